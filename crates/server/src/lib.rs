mod config;

pub use config::{Config, DatabaseConfig, LogConfig};

use anyhow::{Context, Result};
use scavenger_db::Database;

/// Open the application store described by `config` and bring its schema up to date
pub async fn open_store(config: &DatabaseConfig) -> Result<Database> {
    // Create parent directory for database if it doesn't exist
    if let Some(parent) = config.path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create database directory: {}", parent.display())
        })?;
    }

    let db = Database::new_with_config(&config.path, config.into())
        .await
        .with_context(|| format!("Failed to open database: {}", config.path.display()))?;
    db.migrate().await.context("Failed to migrate database")?;

    Ok(db)
}
