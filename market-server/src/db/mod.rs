//! Database access layer
//!
//! One shared `SqlitePool`; every operation that issues more than one
//! statement runs in its own short-lived transaction.

pub mod categories;
pub mod drafts;
pub mod items;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Bootstrap schema, applied only when the database file is first created
const SCHEMA: &str = include_str!("../../db/schema.sql");

/// Open the database, creating it from the bundled schema if the file is absent.
pub async fn connect(path: &Path, max_connections: u32) -> Result<SqlitePool, BoxError> {
    connect_with_schema(path, max_connections, SCHEMA).await
}

async fn connect_with_schema(
    path: &Path,
    max_connections: u32,
    schema: &str,
) -> Result<SqlitePool, BoxError> {
    let fresh = !tokio::fs::try_exists(path).await?;
    if fresh {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    if fresh {
        tracing::info!(path = %path.display(), "Database file not found, creating from schema");
        if let Err(e) = apply_schema(&pool, schema).await {
            // No file left behind, so the next start bootstraps again
            pool.close().await;
            remove_database_files(path).await;
            return Err(e.into());
        }
    }

    Ok(pool)
}

/// Run the schema script as a single transaction
async fn apply_schema(pool: &SqlitePool, schema: &str) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::raw_sql(schema).execute(&mut *tx).await?;
    tx.commit().await
}

async fn remove_database_files(path: &Path) {
    let mut candidates = vec![path.to_path_buf()];
    for suffix in ["-wal", "-shm", "-journal"] {
        let mut name = path.as_os_str().to_owned();
        name.push(suffix);
        candidates.push(name.into());
    }

    for file in candidates {
        match tokio::fs::remove_file(&file).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "Failed to remove database file");
            }
        }
    }
}

/// Liveness probe used by the health endpoint
pub async fn ping(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}

#[cfg(test)]
pub(crate) async fn test_pool() -> (tempfile::TempDir, SqlitePool) {
    let tmp = tempfile::tempdir().unwrap();
    let pool = connect(&tmp.path().join("db").join("test.sqlite3"), 1)
        .await
        .unwrap();
    (tmp, pool)
}
