use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use postfeed_core::remote::DEFAULT_TIMEOUT;
use postfeed_core::Strategy;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Remote server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Server base URL (e.g., "http://localhost:8080"); posts are fetched from `<base_url>/posts`
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    /// Returns the server URL, treating a blank value as unset
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Path to the SQLite cache
    pub database_path: ConfigValue<PathBuf>,
    /// Default fetch strategy for `feed`
    pub strategy: ConfigValue<Strategy>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    /// Remote server configuration
    pub remote: RemoteConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    database_path: Option<PathBuf>,
    strategy: Option<Strategy>,
    remote: Option<RemoteConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let default_db_path = Self::default_data_dir().join("postfeed.db");

        // Start with defaults
        let mut database_path = ConfigValue::new(default_db_path, ConfigSource::Default);
        let mut strategy = ConfigValue::new(Strategy::default(), ConfigSource::Default);
        let mut config_file = None;
        let mut remote = RemoteConfig::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(db_path) = file_config.database_path {
                // Resolve relative paths against config file's directory
                let resolved_path = if db_path.is_relative() {
                    path.parent().map(|p| p.join(&db_path)).unwrap_or(db_path)
                } else {
                    db_path
                };
                database_path = ConfigValue::new(resolved_path, ConfigSource::File);
            }
            if let Some(s) = file_config.strategy {
                strategy = ConfigValue::new(s, ConfigSource::File);
            }
            if let Some(remote_config) = file_config.remote {
                remote = remote_config;
            }
        }

        // Apply environment variable overrides
        if let Ok(db_path) = std::env::var("POSTFEED_DATABASE_PATH") {
            database_path = ConfigValue::new(PathBuf::from(db_path), ConfigSource::Environment);
        }
        if let Ok(s) = std::env::var("POSTFEED_STRATEGY") {
            let parsed = s
                .parse::<Strategy>()
                .map_err(|e| ConfigError::InvalidValue("POSTFEED_STRATEGY", e.to_string()))?;
            strategy = ConfigValue::new(parsed, ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("POSTFEED_REMOTE_URL") {
            remote.base_url = Some(url);
        }
        if let Ok(secs) = std::env::var("POSTFEED_REMOTE_TIMEOUT") {
            remote.timeout_secs = secs.parse().map_err(|_| {
                ConfigError::InvalidValue(
                    "POSTFEED_REMOTE_TIMEOUT",
                    format!("'{}' is not a number of seconds", secs),
                )
            })?;
        }

        Ok(Self {
            database_path,
            strategy,
            config_file,
            remote,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/postfeed/
    /// - macOS: ~/Library/Application Support/postfeed/
    /// - Windows: %APPDATA%/postfeed/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("postfeed")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/postfeed/
    /// - macOS: ~/Library/Application Support/postfeed/
    /// - Windows: %APPDATA%/postfeed/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("postfeed")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(name, e) => {
                write!(f, "Invalid value for {}: {}", name, e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config
            .database_path
            .value
            .to_string_lossy()
            .contains("postfeed.db"));
        assert_eq!(config.database_path.source, ConfigSource::Default);
        assert_eq!(config.strategy.value, Strategy::OfflineFirst);
        assert_eq!(config.strategy.source, ConfigSource::Default);
        assert!(config.config_file.is_none());
        assert_eq!(config.remote.base_url(), None);
        assert_eq!(config.remote.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "database_path: /custom/path/db.sqlite").unwrap();
        writeln!(file, "strategy: offline-last").unwrap();
        writeln!(file, "remote:").unwrap();
        writeln!(file, "  base_url: http://localhost:8080").unwrap();
        writeln!(file, "  timeout_secs: 3").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(
            config.database_path.value,
            PathBuf::from("/custom/path/db.sqlite")
        );
        assert_eq!(config.database_path.source, ConfigSource::File);
        assert_eq!(config.strategy.value, Strategy::OfflineLast);
        assert_eq!(config.strategy.source, ConfigSource::File);
        assert_eq!(
            config.remote.base_url.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(config.remote.timeout(), Duration::from_secs(3));
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_remote_timeout_defaults_when_omitted() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "remote:").unwrap();
        writeln!(file, "  base_url: https://posts.example.com").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.remote.base_url(), Some("https://posts.example.com"));
        assert_eq!(config.remote.timeout_secs, DEFAULT_TIMEOUT.as_secs());
    }

    #[test]
    fn test_blank_remote_url_is_unset() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "remote:").unwrap();
        writeln!(file, "  base_url: \"   \"").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config.remote.base_url.is_some());
        assert_eq!(config.remote.base_url(), None);
    }

    #[test]
    fn test_strategy_alias_in_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "strategy: remote").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.strategy.value, Strategy::OfflineLast);
        assert_eq!(config.strategy.source, ConfigSource::File);
    }

    #[test]
    fn test_relative_database_path_resolves_against_config_dir() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "database_path: data/cache.db").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(
            config.database_path.value,
            temp_dir.path().join("data/cache.db")
        );
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "strategy: offline-first").unwrap();

        std::env::set_var("POSTFEED_STRATEGY", "offline-last");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.strategy.value, Strategy::OfflineLast);
        assert_eq!(config.strategy.source, ConfigSource::Environment);

        std::env::remove_var("POSTFEED_STRATEGY");
    }

    #[test]
    fn test_invalid_strategy_in_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "strategy: sometimes").unwrap();

        let err = Config::load(Some(config_path)).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_, _)));
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
