//! Request extractors and rejection mapping
//!
//! axum's built-in rejections answer with plain text; these helpers turn
//! them into `AppError` so every 4xx carries the JSON error body.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::FormRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use shared::error::AppError;

/// Numeric record id taken from the `{id}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::invalid_request(e.body_text()))?;

        raw.parse::<i64>().map(RecordId).map_err(|_| {
            AppError::validation(format!("Invalid id: {}", raw)).with_detail("id", raw)
        })
    }
}

/// File name taken from the `{filename}` path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName(pub String);

impl<S> FromRequestParts<S> for FileName
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<String>::from_request_parts(parts, state)
            .await
            .map(|Path(name)| FileName(name))
            .map_err(|e| AppError::invalid_request(e.body_text()))
    }
}

pub fn form_rejection(rejection: FormRejection) -> AppError {
    AppError::validation(rejection.body_text())
}

pub fn multipart_rejection(rejection: MultipartRejection) -> AppError {
    AppError::invalid_request(rejection.body_text())
}
