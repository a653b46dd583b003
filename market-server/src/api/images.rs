//! Image serving
//!
//! GET /image/{filename} and GET /draft_image/{filename} read from the item
//! and draft stores respectively; both fall back to the store's default image.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use http::header;
use shared::error::AppError;

use super::extract::FileName;
use crate::image_store::ImageStore;
use crate::state::AppState;

/// JPEG file response
pub struct JpegImage(Bytes);

impl IntoResponse for JpegImage {
    fn into_response(self) -> axum::response::Response {
        (
            http::StatusCode::OK,
            [(header::CONTENT_TYPE, "image/jpeg")],
            self.0,
        )
            .into_response()
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/image/{filename}", get(get_image))
        .route("/draft_image/{filename}", get(get_draft_image))
}

async fn serve(store: &ImageStore, filename: &str) -> Result<JpegImage, AppError> {
    let bytes = store.load(filename).await?;
    Ok(JpegImage(bytes.into()))
}

/// GET /image/{filename}
pub async fn get_image(
    State(state): State<AppState>,
    FileName(filename): FileName,
) -> Result<JpegImage, AppError> {
    serve(&state.images, &filename).await
}

/// GET /draft_image/{filename}
pub async fn get_draft_image(
    State(state): State<AppState>,
    FileName(filename): FileName,
) -> Result<JpegImage, AppError> {
    serve(&state.draft_images, &filename).await
}
