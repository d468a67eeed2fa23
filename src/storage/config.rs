//! Configuration handling for Bookshelf
//!
//! Configuration is stored in `~/.config/bookshelf/config.toml` (or the
//! platform equivalent). `BOOKSHELF_CONFIG` points at an alternative file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "BOOKSHELF_CONFIG";

/// Data file used when neither the command line nor the config names one
pub const DEFAULT_DATA_FILE: &str = "books_data.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// How an update looks for the book to change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateScan {
    /// Only the first book in the collection is examined
    #[default]
    FirstOnly,
    /// The first book with a matching title anywhere in the collection
    All,
}

impl UpdateScan {
    pub fn as_str(&self) -> &str {
        match self {
            UpdateScan::FirstOnly => "first-only",
            UpdateScan::All => "all",
        }
    }
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the backing JSON file
    pub data_file: Option<PathBuf>,

    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Update scan mode
    pub update_scan: UpdateScan,
}

impl Config {
    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file (defaults if it does not exist)
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parses configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.data_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("data_file must not be empty".to_string()));
            }
        }
        Ok(())
    }

    /// Returns the config file location: `$BOOKSHELF_CONFIG` or the platform config dir
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "bookshelf", "bookshelf")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Resolves the backing file: explicit path, then config, then the default name
    pub fn data_file(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.data_file, None);
        assert_eq!(config.default_format, OutputFormat::Text);
        assert_eq!(config.update_scan, UpdateScan::FirstOnly);
    }

    #[test]
    fn parse_config() {
        let toml = r#"
data_file = "/tmp/books.json"
default_format = "json"
update_scan = "all"
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/books.json")));
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(config.update_scan, UpdateScan::All);
    }

    #[test]
    fn parse_rejects_unknown_scan() {
        assert!(Config::parse("update_scan = \"sometimes\"").is_err());
    }

    #[test]
    fn parse_rejects_empty_data_file() {
        assert!(Config::parse("data_file = \"\"").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_file = \"library.json\"\nupdate_scan = \"all\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("library.json")));
        assert_eq!(config.update_scan, UpdateScan::All);
        assert_eq!(config.default_format, OutputFormat::Text);
    }

    #[test]
    fn load_from_invalid_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_file = [").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn data_file_precedence() {
        let mut config = Config::default();
        assert_eq!(config.data_file(None), PathBuf::from(DEFAULT_DATA_FILE));

        config.data_file = Some(PathBuf::from("configured.json"));
        assert_eq!(config.data_file(None), PathBuf::from("configured.json"));
        assert_eq!(
            config.data_file(Some(Path::new("flag.json"))),
            PathBuf::from("flag.json")
        );
    }

    #[test]
    fn update_scan_labels() {
        assert_eq!(UpdateScan::FirstOnly.as_str(), "first-only");
        assert_eq!(UpdateScan::All.as_str(), "all");
    }
}
