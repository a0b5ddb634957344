//! Execution mode selection.

use serde::{Deserialize, Serialize};

/// Substrings that mark a command as needing an elevated console.
const ELEVATED_MARKERS: &[&str] = &["sfc", "scannow"];

/// Extensions of scripts that open in a visible console.
const SCRIPT_EXTENSIONS: &[&str] = &[".ps1"];

/// How a resolved command is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Shell with redirected stdout/stderr; output is returned.
    Captured,
    /// Persistent console visible to the user; output is not captured.
    Visible {
        /// Request administrator rights.
        elevated: bool,
        /// The command is a script run through its interpreter.
        script: bool,
    },
}

impl ExecutionMode {
    /// Picks the mode for `resolved`, case-insensitively.
    ///
    /// Any command containing `sfc` or `scannow` is elevated, and any command
    /// ending in a script extension runs visibly. Note that the substring
    /// match also catches unrelated commands that merely contain `sfc`.
    pub fn select(resolved: &str) -> Self {
        let lower = resolved.to_lowercase();
        let elevated = ELEVATED_MARKERS.iter().any(|marker| lower.contains(marker));
        let tail = lower.trim_end().trim_end_matches('"');
        let script = SCRIPT_EXTENSIONS.iter().any(|ext| tail.ends_with(ext));

        if elevated || script {
            Self::Visible { elevated, script }
        } else {
            Self::Captured
        }
    }

    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible { .. })
    }
}
