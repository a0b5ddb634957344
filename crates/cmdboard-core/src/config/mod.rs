//! Board configuration.
//!
//! Configuration is assembled from, in increasing precedence:
//! 1. Defaults
//! 2. Global config file (`~/.cmdboard/config.toml`)
//! 3. Local config file (`./.cmdboardrc`)
//! 4. The `CMDBOARD_DATA_DIR` environment variable (data directory only)
//! 5. Command-line flags, applied by the binaries through
//!    [`BoardConfig::with_data_dir`]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::executor::ExecutionEngine;
use crate::store::{SlotStore, StorePaths};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CMDBOARD_DATA_DIR";

/// Names of the files kept in the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNames {
    #[serde(default = "default_commands_file")]
    pub commands: String,
    #[serde(default = "default_descriptions_file")]
    pub descriptions: String,
    #[serde(default = "default_reset_flag_file")]
    pub reset_flag: String,
    #[serde(default = "default_log_file")]
    pub log: String,
}

fn default_commands_file() -> String {
    crate::store::COMMANDS_FILE.to_string()
}

fn default_descriptions_file() -> String {
    crate::store::DESCRIPTIONS_FILE.to_string()
}

fn default_reset_flag_file() -> String {
    crate::store::RESET_FLAG_FILE.to_string()
}

fn default_log_file() -> String {
    "cmdboard.log".to_string()
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            commands: default_commands_file(),
            descriptions: default_descriptions_file(),
            reset_flag: default_reset_flag_file(),
            log: default_log_file(),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Directory holding the store files and the log.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// File names inside the data directory.
    #[serde(default)]
    pub files: FileNames,

    /// Install the global F1–F12 interceptor. Unset means on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_hotkeys: Option<bool>,

    /// Terminal program for visible consoles on non-Windows hosts.
    #[serde(default)]
    pub terminal: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default)]
    pub log_level: Option<String>,

    /// Presentation colours: symbolic key to `#RRGGBB`.
    #[serde(default)]
    pub theme: BTreeMap<String, String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            files: FileNames::default(),
            global_hotkeys: Some(true),
            terminal: None,
            log_level: None,
            theme: BTreeMap::new(),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to read or write a configuration file.
    #[error("Failed to access configuration file: {0}")]
    Io(String),

    /// Failed to parse or serialize a configuration file.
    #[error("Failed to parse configuration file: {0}")]
    Parse(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl BoardConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize: {}", e)))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Io(format!("Failed to create directory: {}", e)))?;
        }

        std::fs::write(path, content).map_err(|e| ConfigError::Io(format!("Failed to write file: {}", e)))
    }

    /// Get default global configuration file path.
    pub fn default_global_path() -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".cmdboard").join("config.toml")
    }

    /// Get default local configuration file path.
    pub fn default_local_path() -> PathBuf {
        PathBuf::from(".cmdboardrc")
    }

    /// Discover and load configuration files.
    ///
    /// Missing files are skipped; a file that fails to parse is skipped with
    /// a warning.
    pub fn discover_and_load() -> Self {
        let (config, problems) = Self::discover();
        for e in &problems {
            tracing::warn!(error = %e, "Ignoring configuration file");
        }
        config
    }

    /// Like [`BoardConfig::discover_and_load`], but hands back the files
    /// that could not be used instead of logging them, for callers whose
    /// logging depends on the configuration.
    pub fn discover() -> (Self, Vec<ConfigError>) {
        Self::discover_from(&[Self::default_global_path(), Self::default_local_path()])
    }

    /// Merges `paths` in order over the defaults, then applies the environment.
    pub fn discover_from(paths: &[PathBuf]) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut problems = Vec::new();
        for path in paths {
            match Self::load_from_file(path) {
                Ok(found) => config.merge(&found),
                Err(ConfigError::NotFound(_)) => {}
                Err(e) => problems.push(e),
            }
        }
        config.apply_env();
        (config, problems)
    }

    /// Applies `CMDBOARD_DATA_DIR`, if set and non-empty.
    pub fn apply_env(&mut self) {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// Merge another configuration into this one.
    ///
    /// Values set in `other` override values in `self`.
    pub fn merge(&mut self, other: &Self) {
        if let Some(ref data_dir) = other.data_dir {
            self.data_dir = Some(data_dir.clone());
        }
        if let Some(ref terminal) = other.terminal {
            self.terminal = Some(terminal.clone());
        }
        if let Some(ref log_level) = other.log_level {
            self.log_level = Some(log_level.clone());
        }
        if let Some(enabled) = other.global_hotkeys {
            self.global_hotkeys = Some(enabled);
        }

        let defaults = FileNames::default();
        if other.files.commands != defaults.commands {
            self.files.commands.clone_from(&other.files.commands);
        }
        if other.files.descriptions != defaults.descriptions {
            self.files.descriptions.clone_from(&other.files.descriptions);
        }
        if other.files.reset_flag != defaults.reset_flag {
            self.files.reset_flag.clone_from(&other.files.reset_flag);
        }
        if other.files.log != defaults.log {
            self.files.log.clone_from(&other.files.log);
        }

        self.theme.extend(other.theme.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Whether the global F1–F12 interceptor should be installed.
    pub fn hotkeys_enabled(&self) -> bool {
        self.global_hotkeys.unwrap_or(true)
    }

    /// Overrides the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// The effective data directory: the configured one, or `cmdboard`
    /// under the platform's local data directory.
    pub fn data_dir(&self) -> PathBuf {
        match self.data_dir {
            Some(ref dir) => dir.clone(),
            None => dirs::data_local_dir().map_or_else(|| PathBuf::from("."), |d| d.join("cmdboard")),
        }
    }

    /// Store file locations inside the data directory.
    pub fn store_paths(&self) -> StorePaths {
        let dir = self.data_dir();
        StorePaths {
            commands: dir.join(&self.files.commands),
            descriptions: dir.join(&self.files.descriptions),
            reset_flag: dir.join(&self.files.reset_flag),
        }
    }

    /// Log file location inside the data directory.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join(&self.files.log)
    }

    /// Opens the slot store, creating the data directory if needed.
    pub fn open_store(&self) -> crate::Result<SlotStore> {
        let dir = self.data_dir();
        std::fs::create_dir_all(&dir)?;
        Ok(SlotStore::new(self.store_paths()))
    }

    /// Execution engine configured for this board.
    pub fn execution_engine(&self) -> ExecutionEngine {
        match self.terminal {
            Some(ref terminal) => ExecutionEngine::new().with_terminal(terminal.clone()),
            None => ExecutionEngine::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert!(config.hotkeys_enabled());
        assert_eq!(config.files.commands, "commands.txt");
        assert_eq!(config.files.descriptions, "descriptions.txt");
        assert_eq!(config.files.reset_flag, "reset.flag");
        assert!(config.theme.is_empty());
    }

    #[test]
    fn test_deserialize_partial() {
        let toml = r##"
            global_hotkeys = false
            terminal = "alacritty"

            [files]
            commands = "cmds.txt"

            [theme]
            button = "#0B1096"
        "##;
        let config: BoardConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.global_hotkeys, Some(false));
        assert_eq!(config.terminal.as_deref(), Some("alacritty"));
        assert_eq!(config.files.commands, "cmds.txt");
        assert_eq!(config.files.descriptions, "descriptions.txt");
        assert_eq!(config.theme.get("button").map(String::as_str), Some("#0B1096"));
    }

    #[test]
    fn test_merge_overrides_set_values() {
        let mut base = BoardConfig::default();
        base.theme.insert("button".to_string(), "#000000".to_string());
        let mut local = BoardConfig { log_level: Some("debug".to_string()), ..BoardConfig::default() };
        local.files.log = "board.log".to_string();
        local.theme.insert("button".to_string(), "#FFFFFF".to_string());

        base.merge(&local);

        assert_eq!(base.log_level.as_deref(), Some("debug"));
        assert_eq!(base.files.log, "board.log");
        assert_eq!(base.files.commands, "commands.txt");
        assert_eq!(base.theme["button"], "#FFFFFF");
        assert!(base.hotkeys_enabled());
    }

    #[test]
    fn test_local_file_can_reenable_hotkeys() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("config.toml");
        let local = dir.path().join(".cmdboardrc");
        std::fs::write(&global, "global_hotkeys = false\nterminal = \"xterm\"\n").unwrap();
        std::fs::write(&local, "global_hotkeys = true\n").unwrap();

        let (config, problems) = BoardConfig::discover_from(&[global.clone()]);
        assert!(problems.is_empty());
        assert!(!config.hotkeys_enabled());

        let (config, _) = BoardConfig::discover_from(&[global, local]);
        assert!(config.hotkeys_enabled());
        assert_eq!(config.terminal.as_deref(), Some("xterm"));
    }

    #[test]
    fn test_unset_hotkeys_do_not_override() {
        let mut base = BoardConfig::default();
        base.merge(&BoardConfig { global_hotkeys: Some(false), ..BoardConfig::default() });
        let local: BoardConfig = toml::from_str("log_level = \"info\"").unwrap();

        base.merge(&local);

        assert!(!base.hotkeys_enabled());
    }

    #[test]
    fn test_discover_reports_unusable_files() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "global_hotkeys = \"maybe\"").unwrap();

        let (config, problems) = BoardConfig::discover_from(&[dir.path().join("absent.toml"), bad]);

        assert_eq!(problems.len(), 1);
        assert!(matches!(problems[0], ConfigError::Parse(_)));
        assert!(config.hotkeys_enabled());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = BoardConfig::default().with_data_dir(dir.path());

        config.save_to_file(&path).unwrap();
        let loaded = BoardConfig::load_from_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_open_store_creates_data_dir() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("board");
        let mut config = BoardConfig::default().with_data_dir(&data_dir);
        config.files.commands = "cmds.txt".to_string();

        let store = config.open_store().unwrap();

        assert!(data_dir.is_dir());
        assert_eq!(store.paths().commands, data_dir.join("cmds.txt"));
        assert_eq!(config.log_path(), data_dir.join("cmdboard.log"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = BoardConfig::load_from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "global_hotkeys = \"maybe\"").unwrap();
        assert!(matches!(BoardConfig::load_from_file(&path), Err(ConfigError::Parse(_))));
    }
}
