//! Command resolution against a PATH-like search list.
//!
//! Turns `notepad readme.txt` into `"C:\Windows\System32\notepad.exe" readme.txt`
//! the way a shell would find the executable. Resolution never fails: when
//! nothing matches, the command is returned untouched and any error surfaces
//! when the process is spawned.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::trace;

/// Resolves the executable of a raw command string.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    search_path: Vec<PathBuf>,
    working_dir: PathBuf,
    exe_suffix: String,
}

impl CommandResolver {
    /// Creates a resolver over an explicit search list.
    ///
    /// `search_path` is split with the platform list separator, exactly like
    /// the `PATH` environment variable.
    pub fn new(search_path: Option<OsString>, working_dir: impl Into<PathBuf>) -> Self {
        let search_path = search_path
            .map(|value| env::split_paths(&value).filter(|p| !p.as_os_str().is_empty()).collect())
            .unwrap_or_default();
        Self {
            search_path,
            working_dir: working_dir.into(),
            exe_suffix: env::consts::EXE_SUFFIX.to_string(),
        }
    }

    /// Resolver over the current process's `PATH` and working directory.
    pub fn from_env() -> Self {
        let working_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(env::var_os("PATH"), working_dir)
    }

    /// Overrides the executable suffix tried after the bare name.
    #[must_use]
    pub fn with_exe_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.exe_suffix = suffix.into();
        self
    }

    /// Resolves `raw`.
    ///
    /// The first whitespace-separated token is the candidate executable. If
    /// it already names an existing file, `raw` is returned unchanged.
    /// Otherwise each search directory is tried with the bare name and then
    /// with the executable suffix; the first hit is returned quoted, followed
    /// by the rest of the command.
    pub fn resolve(&self, raw: &str) -> String {
        let (candidate, remainder) = match raw.split_once(char::is_whitespace) {
            Some((candidate, remainder)) => (candidate, remainder),
            None => (raw, ""),
        };
        if candidate.is_empty() {
            return raw.to_string();
        }

        if self.working_dir.join(candidate).is_file() {
            return raw.to_string();
        }

        match self.find_in_search_path(candidate) {
            Some(full) => {
                trace!(candidate, resolved = %full.display(), "Resolved command");
                let quoted = format!("\"{}\"", full.display());
                if remainder.is_empty() { quoted } else { format!("{} {}", quoted, remainder) }
            }
            None => raw.to_string(),
        }
    }

    fn find_in_search_path(&self, candidate: &str) -> Option<PathBuf> {
        self.search_path.iter().find_map(|dir| {
            let bare = dir.join(candidate);
            if bare.is_file() {
                return Some(bare);
            }
            if self.exe_suffix.is_empty() {
                return None;
            }
            let suffixed = dir.join(format!("{}{}", candidate, self.exe_suffix));
            suffixed.is_file().then_some(suffixed)
        })
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

impl Default for CommandResolver {
    fn default() -> Self {
        Self::from_env()
    }
}
