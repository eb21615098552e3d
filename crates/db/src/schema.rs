//! Schema manager: opens the SQLite store and creates tables on first run.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::DbError;

/// Location string that selects a private in-memory store.
pub const IN_MEMORY: &str = ":memory:";

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on simultaneously open connections to the file.
const MAX_CONNECTIONS: u32 = 4;

/// Tables and indexes, each created only if missing.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL UNIQUE,
        content TEXT NOT NULL,
        summary TEXT,
        url TEXT,
        saved_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        fetched_date TIMESTAMP,
        word_count INTEGER,
        character_count INTEGER
    )",
    "CREATE TABLE IF NOT EXISTS tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS article_tags (
        article_id INTEGER NOT NULL,
        tag_id INTEGER NOT NULL,
        PRIMARY KEY (article_id, tag_id),
        FOREIGN KEY (article_id) REFERENCES articles(id) ON DELETE CASCADE,
        FOREIGN KEY (tag_id) REFERENCES tags(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS favorites (
        article_id INTEGER PRIMARY KEY,
        favorited_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (article_id) REFERENCES articles(id) ON DELETE CASCADE
    )",
    "CREATE INDEX IF NOT EXISTS idx_articles_title ON articles(title)",
    "CREATE INDEX IF NOT EXISTS idx_articles_saved_date ON articles(saved_date)",
    "CREATE INDEX IF NOT EXISTS idx_tags_name ON tags(name)",
];

/// Handle to an initialized store.
///
/// Cheap to clone. Repository functions borrow it for the length of a single
/// operation; connections go back to the handle when the operation returns,
/// on success and error paths alike.
#[derive(Debug, Clone)]
pub struct Storage {
    pool: SqlitePool,
    path: Option<PathBuf>,
}

impl Storage {
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Backing file, or `None` for an in-memory store.
    pub fn file_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close every connection. Further operations fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Open the store at `location`, creating the file, its parent directory and
/// the schema as needed.
///
/// Safe to call on every start: existing tables and rows are left untouched.
/// Pass [`IN_MEMORY`] for a throwaway store.
pub async fn initialize(location: impl AsRef<Path>) -> Result<Storage, DbError> {
    let location = location.as_ref();

    let storage = if location.as_os_str() == IN_MEMORY {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        // Every connection to :memory: is a separate database, so keep exactly one alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Storage { pool, path: None }
    } else {
        if let Some(parent) = location.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let options = SqliteConnectOptions::new()
            .filename(location)
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        Storage {
            pool,
            path: Some(location.to_path_buf()),
        }
    };

    create_schema(&storage.pool).await?;
    tracing::info!(location = %location.display(), "Storage initialized");

    Ok(storage)
}

/// Verify the store answers a trivial query.
pub async fn health_check(storage: &Storage) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(storage.pool()).await?;
    Ok(())
}

async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await
}
