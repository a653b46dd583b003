//! Item API Handlers

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Form, FromRequest, FromRequestParts, Multipart, Query, Request, State};
use axum::routing::get;
use axum::{Json, Router};
use http::{Method, header};
use serde::Deserialize;
use shared::error::AppError;
use shared::models::{Item, ItemCreate, ItemList};

use super::extract::{RecordId, form_rejection, multipart_rejection};
use super::upload::UploadForm;
use super::{ApiResult, MessageResponse};
use crate::db::items;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(list).post(create))
        .route("/items/{id}", get(get_by_id))
        .route("/search", get(search))
}

/// GET /items - all items with category and image
pub async fn list(State(state): State<AppState>) -> ApiResult<ItemList> {
    let items = items::list_items(&state.pool).await?;
    Ok(Json(ItemList { items }))
}

/// GET /items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Item> {
    let item = items::get_item(&state.pool, id).await?;
    Ok(Json(item))
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
}

/// GET /search - substring match on item name or category
///
/// `keyword` comes from the query string, or from a url-encoded form body
/// when the query string has none.
pub async fn search(State(state): State<AppState>, request: Request) -> ApiResult<ItemList> {
    let keyword = search_keyword(request).await?;

    let items = items::search_items(&state.pool, &keyword).await?;
    tracing::debug!(keyword = %keyword, matches = items.len(), "Item search");
    Ok(Json(ItemList { items }))
}

async fn search_keyword(request: Request) -> Result<String, AppError> {
    let (mut parts, body) = request.into_parts();

    let Query(query) = Query::<SearchQuery>::from_request_parts(&mut parts, &())
        .await
        .map_err(|e| AppError::validation(e.body_text()))?;
    if let Some(keyword) = query.keyword {
        return Ok(keyword);
    }

    let is_form = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with(FORM_CONTENT_TYPE));
    if is_form {
        // Form only reads the body for methods other than GET/HEAD
        parts.method = Method::POST;
        let Form(query) = Form::<SearchQuery>::from_request(Request::from_parts(parts, body), &())
            .await
            .map_err(form_rejection)?;
        if let Some(keyword) = query.keyword {
            return Ok(keyword);
        }
    }

    Err(AppError::required_field("keyword"))
}

/// POST /items - multipart: name, category, image (.jpg)
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<MessageResponse> {
    let mut form = UploadForm::read(multipart.map_err(multipart_rejection)?).await?;
    let payload = ItemCreate {
        name: form.text("name")?,
        category: form.text("category")?,
    };
    let image = form.take_image()?;

    tracing::info!(name = %payload.name, category = %payload.category, "Receive item");

    let image_filename = state.images.store_upload(&image.filename, &image.data).await?;
    let id = items::create_item(&state.pool, &payload.name, &payload.category, &image_filename)
        .await?;

    tracing::info!(id, image = %image_filename, "Item created");

    Ok(MessageResponse::new(format!(
        "item received: {}, category: {}",
        payload.name, payload.category
    )))
}
