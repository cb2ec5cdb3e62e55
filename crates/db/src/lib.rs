mod error;
mod models;
mod repositories;

pub use error::{validate_app_name, DbError, Result, MAX_NAME_LEN};
pub use models::{Application, UNASSIGNED_ID};
pub use repositories::ApplicationRepository;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

/// Schema migrations, applied in order and recorded by name
const MIGRATIONS: &[(&str, &str)] = &[(
    "001_initial_schema",
    include_str!("../migrations/001_initial_schema.sql"),
)];

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Enable `SQLite` write-ahead logging for better concurrency
    pub enable_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            enable_wal: true,
        }
    }
}

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pub(crate) pool: SqlitePool,
}

impl Database {
    /// Create a new database connection with default config
    pub async fn new(database_path: impl AsRef<Path>) -> Result<Self> {
        Self::new_with_config(database_path, DatabaseConfig::default()).await
    }

    /// Create a new database connection with custom config
    pub async fn new_with_config(
        database_path: impl AsRef<Path>,
        config: DatabaseConfig,
    ) -> Result<Self> {
        let database_path = database_path.as_ref();

        let mut options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true);

        if config.enable_wal {
            options = options.pragma("journal_mode", "WAL");
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        info!(
            "Connected to database at {} (max_connections: {}, wal: {})",
            database_path.display(),
            config.max_connections,
            config.enable_wal
        );

        Ok(Self { pool })
    }

    /// Run database migrations
    ///
    /// Each migration runs at most once; calling this repeatedly is harmless.
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS _migrations (
                id INTEGER PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                applied_at INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        for &(name, sql) in MIGRATIONS {
            let mut tx = self.pool.begin().await?;

            // Claim the migration first so a concurrent migrator waits on the write lock
            let claimed =
                sqlx::query("INSERT OR IGNORE INTO _migrations (name, applied_at) VALUES (?, ?)")
                    .bind(name)
                    .bind(chrono::Utc::now().timestamp_millis())
                    .execute(&mut *tx)
                    .await?;

            if claimed.rows_affected() == 0 {
                tx.rollback().await?;
                info!("Migration {} already applied, skipping", name);
                continue;
            }

            sqlx::raw_sql(sql).execute(&mut *tx).await?;
            tx.commit().await?;

            info!("Applied migration: {}", name);
        }

        info!("Database migrations completed");
        Ok(())
    }

    /// Get repository for application operations
    #[must_use]
    pub fn applications(&self) -> ApplicationRepository<'_> {
        ApplicationRepository::new(self)
    }
}
