//! Configuration loading and typed config structures for the game server.
//!
//! The canonical configuration lives in `trivia-config.yaml` next to the
//! server binary's working directory. Every field has a default, so a
//! missing file or a partial file is fine. The listen port can be
//! overridden with the `PORT` environment variable.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "trivia-config.yaml";

/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "PORT";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The `PORT` override is not a valid port number.
    #[error("invalid PORT value {value:?}: {reason}")]
    InvalidPort {
        /// The raw environment value.
        value: String,
        /// Why it could not be parsed.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game server configuration.
///
/// Mirrors the structure of `trivia-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TriviaConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Leaderboard database settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Question file location.
    #[serde(default)]
    pub questions: QuestionsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TriviaConfig {
    /// Load configuration from a YAML file at the given path, then apply
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidPort`] if `PORT` is set but malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    /// Environment overrides apply either way.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_file`].
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            let mut config = Self::default();
            config.apply_env_overrides()?;
            Ok(config)
        }
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply the `PORT` environment override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `PORT` is not a `u16`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(value) = std::env::var(PORT_ENV) {
            self.server.port = parse_port(&value)?;
        }
        Ok(())
    }
}

/// Parse a port number from an environment value.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPort`] if `value` is not a `u16`.
pub fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ConfigError::InvalidPort {
            value: value.to_owned(),
            reason: e.to_string(),
        })
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Leaderboard database settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// `SQLite` connection URL.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Maximum pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Question file location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionsConfig {
    /// Path to the JSON question file.
    #[serde(default = "default_questions_path")]
    pub path: PathBuf,
}

impl Default for QuestionsConfig {
    fn default() -> Self {
        Self {
            path: default_questions_path(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "sqlite://leaderboard.sqlite?mode=rwc".to_owned()
}

const fn default_max_connections() -> u32 {
    5
}

fn default_questions_path() -> PathBuf {
    PathBuf::from("questions.json")
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TriviaConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.questions.path, PathBuf::from("questions.json"));
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.storage.database_url.starts_with("sqlite:"));
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8081
storage:
  database_url: "sqlite::memory:"
  max_connections: 1
questions:
  path: "data/questions.json"
logging:
  level: "debug"
  format: "json"
"#;
        let config = TriviaConfig::parse(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.storage.database_url, "sqlite::memory:");
        assert_eq!(config.storage.max_connections, 1);
        assert_eq!(config.questions.path, PathBuf::from("data/questions.json"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = TriviaConfig::parse("server:\n  port: 4000\n").unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(TriviaConfig::parse("server: [unterminated").is_err());
    }

    #[test]
    fn port_parsing() {
        assert_eq!(parse_port("8080").unwrap(), 8080);
        assert_eq!(parse_port(" 3001 ").unwrap(), 3001);
        assert!(matches!(
            parse_port("eighty"),
            Err(ConfigError::InvalidPort { .. })
        ));
        assert!(parse_port("70000").is_err());
    }
}
