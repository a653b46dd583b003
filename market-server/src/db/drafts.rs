//! Draft database operations
//!
//! Drafts carry an explicit `sort_index`. A new draft takes its own id as
//! sort index, so it lands after every existing draft; `swap_drafts` is the
//! only other writer of the column.

use shared::error::{AppError, ErrorCode};
use shared::models::{Draft, DraftCreate};
use sqlx::{SqliteConnection, SqlitePool};

use super::categories::ensure_category;
use crate::error::ServiceResult;

pub async fn list_drafts(pool: &SqlitePool) -> ServiceResult<Vec<Draft>> {
    let drafts: Vec<Draft> = sqlx::query_as(
        r#"
        SELECT d.draft_id AS id, d.sort_index AS sort_index, d.item_name AS name,
               c.name AS category, d.item_image_filename AS image,
               s.label AS state, d.description AS description,
               dl.label AS delivery, d.price AS price
        FROM Drafts d
        LEFT JOIN Categories c ON d.category_id = c.id
        LEFT JOIN Item_State s ON d.item_state_id = s.id
        LEFT JOIN Delivery dl ON d.delivery_method_id = dl.id
        ORDER BY d.sort_index, d.draft_id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(drafts)
}

pub async fn get_draft(pool: &SqlitePool, id: i64) -> ServiceResult<Draft> {
    let draft: Option<Draft> = sqlx::query_as(
        r#"
        SELECT d.draft_id AS id, d.sort_index AS sort_index, d.item_name AS name,
               c.name AS category, d.item_image_filename AS image,
               s.label AS state, d.description AS description,
               dl.label AS delivery, d.price AS price
        FROM Drafts d
        LEFT JOIN Categories c ON d.category_id = c.id
        LEFT JOIN Item_State s ON d.item_state_id = s.id
        LEFT JOIN Delivery dl ON d.delivery_method_id = dl.id
        WHERE d.draft_id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    draft.ok_or_else(|| draft_not_found(id).into())
}

/// Insert a draft and move it to the end of the display order.
///
/// Returns `(draft_id, sort_index)`; both are equal for a fresh draft.
pub async fn create_draft(
    pool: &SqlitePool,
    data: &DraftCreate,
    image_filename: &str,
) -> ServiceResult<(i64, i64)> {
    let mut tx = pool.begin().await?;

    let category_id = ensure_category(&mut tx, &data.category).await?;

    let id = sqlx::query(
        r#"
        INSERT INTO Drafts (
            sort_index, item_name, item_image_filename, category_id,
            item_state_id, description, delivery_method_id, price
        )
        VALUES (0, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&data.item_name)
    .bind(image_filename)
    .bind(category_id)
    .bind(data.item_state_id)
    .bind(&data.description)
    .bind(data.delivery_id)
    .bind(data.price)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    sqlx::query("UPDATE Drafts SET sort_index = ? WHERE draft_id = ?")
        .bind(id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok((id, id))
}

/// Delete a draft. Returns whether a row was removed; a missing id is not an error.
pub async fn delete_draft(pool: &SqlitePool, id: i64) -> ServiceResult<bool> {
    let result = sqlx::query("DELETE FROM Drafts WHERE draft_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Exchange the display positions of two drafts.
///
/// Both rows must exist; nothing is written otherwise.
pub async fn swap_drafts(pool: &SqlitePool, first_id: i64, second_id: i64) -> ServiceResult<()> {
    let mut tx = pool.begin().await?;

    let first_index = sort_index_of(&mut tx, first_id).await?;
    let second_index = sort_index_of(&mut tx, second_id).await?;

    for (id, sort_index) in [(first_id, second_index), (second_id, first_index)] {
        sqlx::query("UPDATE Drafts SET sort_index = ? WHERE draft_id = ?")
            .bind(sort_index)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

async fn sort_index_of(conn: &mut SqliteConnection, id: i64) -> ServiceResult<i64> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT sort_index FROM Drafts WHERE draft_id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    row.map(|(sort_index,)| sort_index)
        .ok_or_else(|| draft_not_found(id).into())
}

fn draft_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::DraftNotFound, format!("Draft {} not found", id))
        .with_detail("id", id)
}
