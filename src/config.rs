//! Configuration module for forumlist.

use serde::Deserialize;
use std::path::Path;

use crate::{ForumError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Secret used to verify bearer tokens issued by the session service.
    #[serde(default)]
    pub jwt_secret: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            jwt_secret: String::new(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/forumlist.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/forumlist.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Thread list configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadsConfig {
    /// Regular threads shown per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Threads allowed on the last page instead of opening a new one.
    #[serde(default = "default_orphans")]
    pub orphans: u32,
    /// Threads whose last post is older than this many days count as read.
    #[serde(default = "default_read_cutoff_days")]
    pub read_cutoff_days: u32,
}

fn default_per_page() -> u32 {
    20
}

fn default_orphans() -> u32 {
    10
}

/// Upper bound for `threads.read_cutoff_days` (a century).
pub const MAX_READ_CUTOFF_DAYS: u32 = 36500;

fn default_read_cutoff_days() -> u32 {
    40
}

impl Default for ThreadsConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            orphans: default_orphans(),
            read_cutoff_days: default_read_cutoff_days(),
        }
    }
}

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Thread list configuration.
    #[serde(default)]
    pub threads: ThreadsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ForumError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ForumError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides.
    ///
    /// - `FORUMLIST_JWT_SECRET`: overrides `server.jwt_secret`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var("FORUMLIST_JWT_SECRET") {
            if !jwt_secret.is_empty() {
                self.server.jwt_secret = jwt_secret;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.server.jwt_secret.is_empty() {
            return Err(ForumError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via FORUMLIST_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.threads.per_page == 0 {
            return Err(ForumError::Config(
                "threads.per_page must be greater than zero".to_string(),
            ));
        }
        if self.threads.read_cutoff_days > MAX_READ_CUTOFF_DAYS {
            return Err(ForumError::Config(format!(
                "threads.read_cutoff_days must be at most {MAX_READ_CUTOFF_DAYS}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.jwt_secret.is_empty());

        assert_eq!(config.database.path, "data/forumlist.db");

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/forumlist.log");

        assert_eq!(config.threads.per_page, 20);
        assert_eq!(config.threads.orphans, 10);
        assert_eq!(config.threads.read_cutoff_days, 40);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
jwt_secret = "secret"

[database]
path = "custom/db.sqlite"

[logging]
level = "debug"
file = "custom/logs/app.log"

[threads]
per_page = 30
orphans = 5
read_cutoff_days = 7
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.jwt_secret, "secret");
        assert_eq!(config.database.path, "custom/db.sqlite");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
        assert_eq!(config.threads.per_page, 30);
        assert_eq!(config.threads.orphans, 5);
        assert_eq!(config.threads.read_cutoff_days, 7);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[threads]
per_page = 50
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.threads.per_page, 50);
        assert_eq!(config.threads.orphans, 10);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.threads.per_page, 20);
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("[threads]\nper_page = \"many\"");
        assert!(matches!(result, Err(ForumError::Config(_))));
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config.server.jwt_secret = "secret".to_string();
        assert!(config.validate().is_ok());

        config.threads.per_page = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_read_cutoff_days() {
        let toml = r#"
[server]
jwt_secret = "secret"

[threads]
read_cutoff_days = 4000000000
"#;
        let mut config = Config::parse(toml).unwrap();
        assert!(matches!(config.validate(), Err(ForumError::Config(_))));

        config.threads.read_cutoff_days = MAX_READ_CUTOFF_DAYS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 4000\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/config.toml");
        assert!(matches!(result, Err(ForumError::Io(_))));
    }
}
