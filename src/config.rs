//! Organizer configuration.
//!
//! Configuration is read from a TOML file. Every key is optional:
//!
//! ```toml
//! [organizer]
//! target_dir = "/home/me/Downloads"
//! log_file_name = "log.txt"
//! ```
//!
//! The log file always lives in the parent of the target directory; only its
//! name can be changed.

use crate::activity_log::DEFAULT_LOG_FILE_NAME;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".extsortrc.toml";

/// Errors that can occur while loading or applying configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    /// The configured log file name is not a bare file name.
    #[error("Invalid log file name '{0}': expected a plain file name such as log.txt")]
    InvalidLogFileName(String),
    /// Neither the command line nor the configuration names a directory to organize.
    #[error(
        "No target directory given. Pass one on the command line or set organizer.target_dir in .extsortrc.toml"
    )]
    MissingTargetDir,
    /// IO error while reading configuration.
    #[error("IO error reading configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub organizer: OrganizerConfig,
}

/// Settings of the `[organizer]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrganizerConfig {
    /// Directory to organize when none is given on the command line.
    #[serde(default)]
    pub target_dir: Option<PathBuf>,

    /// Name of the activity log created next to the target directory.
    #[serde(default = "default_log_file_name")]
    pub log_file_name: String,
}

fn default_log_file_name() -> String {
    DEFAULT_LOG_FILE_NAME.to_string()
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            target_dir: None,
            log_file_name: default_log_file_name(),
        }
    }
}

impl Config {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.extsortrc.toml` in the current directory
    /// 3. Look for `~/.config/extsort/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read, or if any file found is invalid.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("extsort")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let name = &self.organizer.log_file_name;
        let is_bare_name = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if !is_bare_name {
            return Err(ConfigError::InvalidLogFileName(name.clone()));
        }
        Ok(())
    }

    /// Picks the directory to organize: the command-line value wins over the
    /// configured one.
    pub fn resolve_target_dir(&self, from_cli: Option<&Path>) -> Result<PathBuf, ConfigError> {
        from_cli
            .map(Path::to_path_buf)
            .or_else(|| self.organizer.target_dir.clone())
            .ok_or(ConfigError::MissingTargetDir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.organizer.target_dir, None);
        assert_eq!(config.organizer.log_file_name, "log.txt");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());

        let config = Config::parse("[organizer]\n").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            [organizer]
            target_dir = "/home/me/Downloads"
            log_file_name = "organizer.log"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.organizer.target_dir,
            Some(PathBuf::from("/home/me/Downloads"))
        );
        assert_eq!(config.organizer.log_file_name, "organizer.log");
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::parse("[organizer\ntarget_dir = 3");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = Config::parse("[organizer]\ntarget_dir = 3\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_log_file_name_must_be_bare() {
        for bad in ["", ".", "..", "logs/log.txt", "..\\log.txt"] {
            let content = format!("[organizer]\nlog_file_name = {:?}\n", bad);
            let result = Config::parse(&content);
            assert!(
                matches!(result, Err(ConfigError::InvalidLogFileName(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_cli_target_overrides_config() {
        let config = Config {
            organizer: OrganizerConfig {
                target_dir: Some(PathBuf::from("/configured")),
                ..Default::default()
            },
        };

        assert_eq!(
            config.resolve_target_dir(Some(Path::new("/from/cli"))).unwrap(),
            PathBuf::from("/from/cli")
        );
        assert_eq!(
            config.resolve_target_dir(None).unwrap(),
            PathBuf::from("/configured")
        );
    }

    #[test]
    fn test_missing_target_dir() {
        let result = Config::default().resolve_target_dir(None);
        assert!(matches!(result, Err(ConfigError::MissingTargetDir)));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("extsort.toml");
        fs::write(&path, "[organizer]\ntarget_dir = \"/srv/inbox\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(
            config.organizer.target_dir,
            Some(PathBuf::from("/srv/inbox"))
        );
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let result = Config::load(Some(&temp_dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
