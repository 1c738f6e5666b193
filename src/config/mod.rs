//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::calculate::{Faction, RECENT_COUNT, RECENT_WINDOW_DAYS};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Scoreboard backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Deadline for the initial bulk load
    #[serde(default = "default_load_timeout")]
    pub load_timeout_seconds: u64,

    /// Automatic retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay between attempts
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Also retry POST requests
    #[serde(default)]
    pub retry_non_idempotent: bool,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_load_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    1
}

fn default_retry_delay() -> u64 {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            load_timeout_seconds: default_load_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
            retry_non_idempotent: false,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_seconds)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Window sizes for derived statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_window_days")]
    pub recent_window_days: i64,

    #[serde(default = "default_recent_count")]
    pub recent_count: usize,

    /// Rivalry games listed by the offline tally
    #[serde(default = "default_rivalry_recent")]
    pub rivalry_recent: usize,
}

fn default_window_days() -> i64 {
    RECENT_WINDOW_DAYS
}

fn default_recent_count() -> usize {
    RECENT_COUNT
}

fn default_rivalry_recent() -> usize {
    5
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            recent_window_days: default_window_days(),
            recent_count: default_recent_count(),
            rivalry_recent: default_rivalry_recent(),
        }
    }
}

impl StatsConfig {
    pub fn recent_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.recent_window_days)
    }
}

/// The two rivalry factions. `first` maps to the backend's "orchard" side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RivalryConfig {
    #[serde(default = "default_first_faction")]
    pub first: Faction,

    #[serde(default = "default_second_faction")]
    pub second: Faction,
}

fn default_first_faction() -> Faction {
    Faction::new(
        "The Orchard",
        &["Sean Nary", "Tyler Pendleton", "Reid Silverman"],
    )
}

fn default_second_faction() -> Faction {
    Faction::new(
        "Dreher",
        &[
            "Jeremy Cortazzo",
            "Danny Wersching",
            "AJ Partridge",
            "Brendan Meagher",
        ],
    )
}

impl Default for RivalryConfig {
    fn default() -> Self {
        Self {
            first: default_first_faction(),
            second: default_second_faction(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub stats: StatsConfig,

    #[serde(default)]
    pub rivalry: RivalryConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api: ApiConfig::default(),
            stats: StatsConfig::default(),
            rivalry: RivalryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.api.base_url).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "API base URL is not a valid URL: {}",
                self.api.base_url
            )));
        }

        if self.api.request_timeout_seconds == 0 || self.api.load_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "API timeouts must be greater than 0".to_string(),
            ));
        }

        if self.stats.recent_window_days <= 0 || self.stats.recent_count == 0 {
            return Err(ConfigError::ValidationError(
                "Stats windows must be greater than 0".to_string(),
            ));
        }

        let first = &self.rivalry.first;
        let second = &self.rivalry.second;
        if first.name.eq_ignore_ascii_case(&second.name) {
            return Err(ConfigError::ValidationError(
                "Rivalry factions need distinct names".to_string(),
            ));
        }
        if let Some(shared) = first.members.iter().find(|m| second.contains(m)) {
            return Err(ConfigError::ValidationError(format!(
                "{shared} is a member of both rivalry factions"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.load_timeout(), Duration::from_secs(10));
        assert_eq!(config.api.max_retries, 1);
        assert_eq!(config.api.retry_delay(), Duration::from_secs(1));
        assert!(!config.api.retry_non_idempotent);
        assert_eq!(config.stats.recent_window_days, 7);
        assert_eq!(config.stats.recent_count, 10);
    }

    #[test]
    fn test_default_rivalry_factions() {
        let rivalry = RivalryConfig::default();

        assert_eq!(rivalry.first.members.len(), 3);
        assert!(rivalry.second.contains("brendan meagher"));
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_timeout() {
        let mut config = AppConfig::default();
        config.api.load_timeout_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_shared_member() {
        let mut config = AppConfig::default();
        config.rivalry.second.members.push("Sean Nary".to_string());

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Sean Nary"));
    }

    #[test]
    fn test_config_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"

[api]
base_url = "https://scores.example.com/api/"
retry_non_idempotent = true

[stats]
recent_count = 5

[rivalry.first]
name = "North"
members = ["A", "B", "C"]
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.api.base_url, "https://scores.example.com/api/");
        assert!(config.api.retry_non_idempotent);
        assert_eq!(config.api.max_retries, 1);
        assert_eq!(config.stats.recent_count, 5);
        assert_eq!(config.stats.recent_window_days, 7);
        assert_eq!(config.rivalry.first.name, "North");
        assert_eq!(config.rivalry.second.name, "Dreher");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.api.load_timeout_seconds, 10);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.api.base_url, parsed.api.base_url);
        assert_eq!(config.rivalry.second.members, parsed.rivalry.second.members);
    }
}
