pub mod models;
pub mod settings;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Error as SqlxError, migrate::Migrator};
use std::str::FromStr;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// A single player only ever needs one connection.
const MAX_CONNECTIONS: u32 = 1;

/// Connects to the database, creating the file if needed, and runs migrations
pub async fn connect(database_url: &str) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;

    Ok(pool)
}

/// Migrated in-memory database that lives as long as the pool.
#[cfg(test)]
pub async fn memory_pool() -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
        .await?;

    MIGRATOR.run(&pool).await?;

    Ok(pool)
}

pub use settings::{find_by_key as find_setting, upsert as upsert_setting};
