// crates/notekeep-core/src/config.rs - Configuration System
//
// CONFIGURATION HIERARCHY (highest to lowest priority):
// 1. Command-line arguments (--db, --config), applied by the CLI
// 2. Environment variables (NOTEKEEP_DB, NOTEKEEP_ID_STRATEGY)
// 3. Config file: --config, else NOTEKEEP_CONFIG, else notekeep.toml next to
//    the executable when present
// 4. Built-in defaults
//
// A missing default config file is fine. A config file that was asked for
// explicitly must exist.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::id::IdStrategy;
use crate::store::FileStoreOptions;

pub const CONFIG_ENV: &str = "NOTEKEEP_CONFIG";
pub const DB_ENV: &str = "NOTEKEEP_DB";
pub const ID_STRATEGY_ENV: &str = "NOTEKEEP_ID_STRATEGY";

const CONFIG_FILE_NAME: &str = "notekeep.toml";
const DB_FILE_NAME: &str = "db.json";

/// Errors that can occur during configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid TOML syntax in {file}: {error}")]
    ParseError { file: String, error: String },

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),

    #[error("I/O error reading config: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Complete configuration schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotekeepConfig {
    /// Where and how the note database is persisted
    #[serde(default)]
    pub store: StoreConfig,

    /// Id assignment for new notes
    #[serde(default)]
    pub id: IdConfig,

    /// Output formatting options
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file. Relative paths in a config file are resolved against
    /// the directory holding that file.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Write through a temporary file and rename it into place
    #[serde(default = "default_true")]
    pub atomic_write: bool,

    /// Guard writes with a `<db>.lock` file
    #[serde(default = "default_true")]
    pub lock: bool,

    /// Milliseconds to wait for another process's lock
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdConfig {
    /// "timestamp" or "sequential"
    #[serde(default)]
    pub strategy: IdStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human" or "json"
    #[serde(default = "default_output_format")]
    pub format: String,
}

impl StoreConfig {
    pub fn file_options(&self) -> FileStoreOptions {
        FileStoreOptions {
            atomic_write: self.atomic_write,
            lock: self.lock,
            lock_timeout: Duration::from_millis(self.lock_timeout_ms),
        }
    }
}

impl NotekeepConfig {
    /// Database location: explicit override, then config, then next to the
    /// executable
    pub fn db_path(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.store.path.clone())
            .unwrap_or_else(|| install_dir().join(DB_FILE_NAME))
    }

    pub fn json_output(&self) -> bool {
        self.output.format == "json"
    }
}

/// Configuration loading and management
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from the process environment and config files
    pub fn load_config(explicit_file: Option<&Path>) -> ConfigResult<NotekeepConfig> {
        Self::load_with_env(explicit_file, |key| std::env::var(key).ok())
    }

    /// Same as [`ConfigManager::load_config`] with an injectable environment
    ///
    /// LOADING STRATEGY:
    /// 1. Start with built-in defaults
    /// 2. Replace with the config file, if one is found
    /// 3. Apply environment variable overrides
    /// 4. Validate
    pub fn load_with_env<E>(explicit_file: Option<&Path>, env: E) -> ConfigResult<NotekeepConfig>
    where
        E: Fn(&str) -> Option<String>,
    {
        let mut config = NotekeepConfig::default();

        let requested = explicit_file
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).map(PathBuf::from));

        match requested {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.display().to_string()));
                }
                config = Self::load_file(&path)?;
            }
            None => {
                let fallback = install_dir().join(CONFIG_FILE_NAME);
                if fallback.exists() {
                    config = Self::load_file(&fallback)?;
                }
            }
        }

        Self::apply_env_overrides(&mut config, env)?;
        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Parse one TOML config file
    pub fn load_file(path: &Path) -> ConfigResult<NotekeepConfig> {
        let content = std::fs::read_to_string(path)?;

        let mut config: NotekeepConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                file: path.display().to_string(),
                error: e.to_string(),
            })?;

        if let Some(db) = config.store.path.take() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.store.path = Some(if db.is_relative() { base.join(db) } else { db });
        }

        Ok(config)
    }

    /// Render a configuration as TOML
    pub fn to_toml(config: &NotekeepConfig) -> ConfigResult<String> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Apply environment variable overrides
    ///
    /// - NOTEKEEP_DB -> store.path
    /// - NOTEKEEP_ID_STRATEGY -> id.strategy
    fn apply_env_overrides<E>(config: &mut NotekeepConfig, env: E) -> ConfigResult<()>
    where
        E: Fn(&str) -> Option<String>,
    {
        if let Some(db) = env(DB_ENV).filter(|value| !value.is_empty()) {
            config.store.path = Some(PathBuf::from(db));
        }

        if let Some(strategy) = env(ID_STRATEGY_ENV) {
            config.id.strategy = strategy
                .parse()
                .map_err(|e: crate::id::IdError| ConfigError::ValidationError(e.to_string()))?;
        }

        Ok(())
    }

    /// Validate the final configuration for consistency and correctness
    fn validate_config(config: &NotekeepConfig) -> ConfigResult<()> {
        match config.output.format.as_str() {
            "human" | "json" => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid output format '{}'. Must be one of: human, json",
                    config.output.format
                )));
            }
        }

        if config.store.lock && config.store.lock_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "store.lock_timeout_ms must be greater than zero when locking is enabled"
                    .to_string(),
            ));
        }

        if config
            .store
            .path
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::ValidationError(
                "store.path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Directory holding the running executable, or the current directory
pub fn install_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_true() -> bool {
    true
}

fn default_lock_timeout_ms() -> u64 {
    2000
}

fn default_output_format() -> String {
    "human".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            atomic_write: true,
            lock: true,
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = NotekeepConfig::default();
        assert!(ConfigManager::validate_config(&config).is_ok());
        assert_eq!(config.store.file_options(), FileStoreOptions::default());
        assert!(!config.json_output());
    }

    #[test]
    fn test_config_serialization() {
        let config = NotekeepConfig::default();
        let toml = ConfigManager::to_toml(&config).unwrap();
        let parsed: NotekeepConfig = toml::from_str(&toml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notekeep.toml");
        std::fs::write(&file, "[id]\nstrategy = \"sequential\"\n").unwrap();

        let config = ConfigManager::load_with_env(Some(&file), no_env).unwrap();
        assert_eq!(config.id.strategy, IdStrategy::Sequential);
        assert!(config.store.lock);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_relative_db_path_resolves_against_config_dir() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notekeep.toml");
        std::fs::write(&file, "[store]\npath = \"data/notes.json\"\n").unwrap();

        let config = ConfigManager::load_with_env(Some(&file), no_env).unwrap();
        assert_eq!(config.db_path(None), temp.path().join("data/notes.json"));
    }

    #[test]
    fn test_env_overrides_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notekeep.toml");
        std::fs::write(&file, "[store]\npath = \"a.json\"\n").unwrap();
        let env: HashMap<&str, &str> = [(DB_ENV, "/tmp/b.json"), (ID_STRATEGY_ENV, "sequential")]
            .into_iter()
            .collect();

        let config =
            ConfigManager::load_with_env(Some(&file), |key| env.get(key).map(|v| v.to_string()))
                .unwrap();
        assert_eq!(config.db_path(None), PathBuf::from("/tmp/b.json"));
        assert_eq!(config.id.strategy, IdStrategy::Sequential);
    }

    #[test]
    fn test_cli_override_wins() {
        let mut config = NotekeepConfig::default();
        config.store.path = Some(PathBuf::from("/from/config.json"));
        assert_eq!(
            config.db_path(Some(Path::new("/from/cli.json"))),
            PathBuf::from("/from/cli.json")
        );
    }

    #[test]
    fn test_default_db_lives_next_to_executable() {
        let config = NotekeepConfig::default();
        assert_eq!(config.db_path(None), install_dir().join("db.json"));
    }

    #[test]
    fn test_config_env_points_at_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("custom.toml");
        std::fs::write(&file, "[output]\nformat = \"json\"\n").unwrap();
        let file_str = file.display().to_string();

        let config = ConfigManager::load_with_env(None, |key| {
            (key == CONFIG_ENV).then(|| file_str.clone())
        })
        .unwrap();
        assert!(config.json_output());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        let result = ConfigManager::load_with_env(Some(&temp.path().join("nope.toml")), no_env);
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notekeep.toml");
        std::fs::write(&file, "[store\n").unwrap();

        let result = ConfigManager::load_with_env(Some(&file), no_env);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_invalid_output_format_validation() {
        let mut config = NotekeepConfig::default();
        config.output.format = "xml".to_string();
        assert!(ConfigManager::validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_lock_timeout_validation() {
        let mut config = NotekeepConfig::default();
        config.store.lock_timeout_ms = 0;
        assert!(ConfigManager::validate_config(&config).is_err());

        config.store.lock = false;
        assert!(ConfigManager::validate_config(&config).is_ok());
    }

    #[test]
    fn test_unknown_strategy_in_env_is_rejected() {
        let result = ConfigManager::load_with_env(None, |key| {
            (key == ID_STRATEGY_ENV).then(|| "uuid".to_string())
        });
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
