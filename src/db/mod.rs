//! SQLite connection handling and schema management

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

use crate::config::DatabaseConfig;
use crate::error::Result;

/// Tables for users and their posts.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS post (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    author_id INTEGER NOT NULL,
    created TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    FOREIGN KEY (author_id) REFERENCES user (id)
);
"#;

const DROP_SCHEMA: &str = r#"
DROP TABLE IF EXISTS post;
DROP TABLE IF EXISTS user;
"#;

/// Open (creating if needed) the database file named in the config
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    connect_path(&config.path).await
}

/// Open (creating if needed) a database file at `path`
pub async fn connect_path(path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    tracing::debug!("Opened database at {}", path.display());
    Ok(pool)
}

/// Single-connection in-memory database, mostly for tests
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    Ok(pool)
}

/// Create the tables if they do not exist yet
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

/// Drop every table and recreate the schema from scratch
pub async fn reset_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::raw_sql(DROP_SCHEMA).execute(pool).await?;
    init_schema(pool).await?;
    tracing::info!("Database schema reset");
    Ok(())
}
