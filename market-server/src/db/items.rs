//! Item database operations

use shared::error::{AppError, ErrorCode};
use shared::models::Item;
use sqlx::SqlitePool;

use super::categories::ensure_category;
use crate::error::ServiceResult;

pub async fn list_items(pool: &SqlitePool) -> ServiceResult<Vec<Item>> {
    let items: Vec<Item> = sqlx::query_as(
        r#"
        SELECT Items.id AS id, Items.name AS name,
               Categories.name AS category, Items.image_filename AS image
        FROM Items
        LEFT JOIN Categories ON Items.category_id = Categories.id
        ORDER BY Items.id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn get_item(pool: &SqlitePool, id: i64) -> ServiceResult<Item> {
    let item: Option<Item> = sqlx::query_as(
        r#"
        SELECT Items.id AS id, Items.name AS name,
               Categories.name AS category, Items.image_filename AS image
        FROM Items
        LEFT JOIN Categories ON Items.category_id = Categories.id
        WHERE Items.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    item.ok_or_else(|| {
        AppError::with_message(ErrorCode::ItemNotFound, format!("Item {} not found", id))
            .with_detail("id", id)
            .into()
    })
}

/// Items whose name or category contains `keyword` (LIKE, ASCII case-insensitive)
pub async fn search_items(pool: &SqlitePool, keyword: &str) -> ServiceResult<Vec<Item>> {
    let pattern = format!("%{}%", keyword);
    let items: Vec<Item> = sqlx::query_as(
        r#"
        SELECT Items.id AS id, Items.name AS name,
               Categories.name AS category, Items.image_filename AS image
        FROM Items
        LEFT JOIN Categories ON Items.category_id = Categories.id
        WHERE Items.name LIKE ? OR Categories.name LIKE ?
        ORDER BY Items.id
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Insert an item, creating its category on first use. Returns the new item id.
pub async fn create_item(
    pool: &SqlitePool,
    name: &str,
    category: &str,
    image_filename: &str,
) -> ServiceResult<i64> {
    let mut tx = pool.begin().await?;

    let category_id = ensure_category(&mut tx, category).await?;

    let id = sqlx::query("INSERT INTO Items (name, category_id, image_filename) VALUES (?, ?, ?)")
        .bind(name)
        .bind(category_id)
        .bind(image_filename)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;
    Ok(id)
}
