mod documents;
mod projects;
mod tasks;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// The row still exists but the write did not land on it.
    #[error("record was modified concurrently")]
    Conflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database at `url`, creating the file if needed, and
    /// bring the schema up to date.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// A private in-memory database. Everything lives on one connection, so
    /// the pool is pinned to exactly that connection for its whole life.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Child rows are inserted without a prior lookup; a foreign key failure
/// means the owning project does not exist.
fn missing_parent(err: sqlx::Error) -> StoreError {
    let is_fk = err
        .as_database_error()
        .map_or(false, |db_err| db_err.is_foreign_key_violation());

    if is_fk {
        StoreError::NotFound
    } else {
        StoreError::Database(err)
    }
}

/// Initialize the database connection pool
pub async fn init(config: &Config) -> anyhow::Result<Database> {
    let db = Database::connect(config.database_url()).await?;
    log::info!("Database ready at {}", config.database_url());
    Ok(db)
}
