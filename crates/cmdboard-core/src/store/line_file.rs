//! Tolerant line reading and atomic line writing.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads `path` as a sequence of lines.
///
/// Returns `Ok(None)` when the file does not exist. Lines that are not valid
/// UTF-8 come back as empty strings; `\r\n` endings are accepted.
pub(crate) fn read_lines(path: &Path) -> io::Result<Option<Vec<String>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(split_lines(&bytes))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn split_lines(bytes: &[u8]) -> Vec<String> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.is_empty() {
        return Vec::new();
    }

    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|b| *b == b'\n')
        .map(|line| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            std::str::from_utf8(line).map(str::to_owned).unwrap_or_default()
        })
        .collect()
}

/// Writes `lines` to `path`, one per line, replacing the file atomically.
///
/// The content is written to a temporary file in the same directory and
/// renamed over the target, so readers never observe a partial file and a
/// failed write leaves the previous content in place.
pub(crate) fn write_lines_atomic(path: &Path, lines: &[String]) -> io::Result<()> {
    stage_lines(path, lines)?.commit()
}

/// Lines written and synced next to their target but not yet visible there.
#[derive(Debug)]
pub(crate) struct StagedLines<'a> {
    target: &'a Path,
    file: NamedTempFile,
}

impl StagedLines<'_> {
    pub(crate) fn target(&self) -> &Path {
        self.target
    }

    /// Renames the staged file over its target.
    pub(crate) fn commit(self) -> io::Result<()> {
        self.file.persist(self.target).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Writes `lines` to a temporary file beside `path` without touching `path`.
///
/// Dropping the result removes the temporary file.
pub(crate) fn stage_lines<'a>(path: &'a Path, lines: &[String]) -> io::Result<StagedLines<'a>> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = io::BufWriter::new(file.as_file_mut());
        for line in lines {
            writer.write_all(single_line(line).as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }
    file.as_file().sync_all()?;
    Ok(StagedLines { target: path, file })
}

/// Line breaks inside a field would shift every following entry.
fn single_line(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains(['\r', '\n']) {
        std::borrow::Cow::Owned(value.replace("\r\n", " ").replace(['\r', '\n'], " "))
    } else {
        std::borrow::Cow::Borrowed(value)
    }
}
