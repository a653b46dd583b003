//! Draft API Handlers

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Multipart, State};
use axum::routing::get;
use axum::{Json, Router};
use shared::models::{Draft, DraftCreate, DraftCreated, DraftList, DraftSwap};

use super::extract::{RecordId, form_rejection, multipart_rejection};
use super::upload::UploadForm;
use super::{ApiResult, MessageResponse};
use crate::db::drafts;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/drafts", get(list).post(create).put(swap))
        .route("/drafts/{id}", get(get_by_id).delete(delete))
}

/// GET /drafts - all drafts in display order
pub async fn list(State(state): State<AppState>) -> ApiResult<DraftList> {
    let draft_items = drafts::list_drafts(&state.pool).await?;
    Ok(Json(DraftList { draft_items }))
}

/// GET /drafts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Draft> {
    let draft = drafts::get_draft(&state.pool, id).await?;
    Ok(Json(draft))
}

/// POST /drafts - multipart draft fields plus image (.jpg)
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<DraftCreated> {
    let mut form = UploadForm::read(multipart.map_err(multipart_rejection)?).await?;
    let payload = DraftCreate {
        item_name: form.text("item_name")?,
        category: form.text("category")?,
        item_state_id: form.integer("item_state_id")?,
        description: form.text("description")?,
        delivery_id: form.integer("delivery_id")?,
        price: form.integer("price")?,
    };
    let image = form.take_image()?;

    tracing::info!(
        item_name = %payload.item_name,
        category = %payload.category,
        "Receive draft"
    );

    let image_filename = state
        .draft_images
        .store_upload(&image.filename, &image.data)
        .await?;
    let (draft_id, sort_index) = drafts::create_draft(&state.pool, &payload, &image_filename).await?;

    tracing::info!(draft_id, sort_index, image = %image_filename, "Draft created");

    Ok(Json(DraftCreated {
        message: format!(
            "draft received: {}, sort index: {}",
            payload.item_name, sort_index
        ),
        draft_id,
        sort_index,
    }))
}

/// DELETE /drafts/{id} - missing ids are a no-op
pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<MessageResponse> {
    let removed = drafts::delete_draft(&state.pool, id).await?;
    tracing::info!(draft_id = id, removed, "Draft delete");
    Ok(MessageResponse::new(format!("draft deleted: {}", id)))
}

/// PUT /drafts - form: item_id1, item_id2; exchanges their display positions
pub async fn swap(
    State(state): State<AppState>,
    payload: Result<Form<DraftSwap>, FormRejection>,
) -> ApiResult<MessageResponse> {
    let Form(payload) = payload.map_err(form_rejection)?;
    drafts::swap_drafts(&state.pool, payload.item_id1, payload.item_id2).await?;

    tracing::info!(
        first = payload.item_id1,
        second = payload.item_id2,
        "Drafts swapped"
    );

    Ok(MessageResponse::new(format!(
        "drafts swapped: {}, {}",
        payload.item_id1, payload.item_id2
    )))
}
