use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Collector configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: PathBuf,

    /// Maximum number of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Use the write-ahead log journal
    #[serde(default = "default_enable_wal")]
    pub enable_wal: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_database_path() -> PathBuf {
    if cfg!(debug_assertions) {
        PathBuf::from("./scavenger.db")
    } else {
        PathBuf::from("/var/lib/scavenger/scavenger.db")
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_enable_wal() -> bool {
    true
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
            enable_wal: default_enable_wal(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl From<&DatabaseConfig> for scavenger_db::DatabaseConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_connections: config.max_connections,
            enable_wal: config.enable_wal,
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::info!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from default locations in order:
    /// 1. ./scavenger.toml (current directory)
    /// 2. /etc/scavenger/config.toml (system-wide)
    /// 3. Built-in defaults
    pub fn load_default() -> Result<Self> {
        let paths = [
            PathBuf::from("./scavenger.toml"),
            PathBuf::from("/etc/scavenger/config.toml"),
        ];

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        tracing::info!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Generate example configuration file
    pub fn example() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize example config")
    }
}
