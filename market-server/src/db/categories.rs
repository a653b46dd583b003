//! Category database operations
//!
//! Categories are created lazily the first time a listing names them.

use sqlx::SqliteConnection;

/// Return the id of the named category, inserting it if absent.
///
/// Takes a connection so callers can run it inside their own transaction.
pub async fn ensure_category(conn: &mut SqliteConnection, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO Categories (name) VALUES (?)")
        .bind(name)
        .execute(&mut *conn)
        .await?;

    let (id,): (i64,) = sqlx::query_as("SELECT id FROM Categories WHERE name = ?")
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_ensure_category_is_idempotent() {
        let (_tmp, pool) = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let first = ensure_category(&mut conn, "fashion").await.unwrap();
        let again = ensure_category(&mut conn, "fashion").await.unwrap();
        let other = ensure_category(&mut conn, "books").await.unwrap();

        assert_eq!(first, again);
        assert_ne!(first, other);

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Categories")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }
}
