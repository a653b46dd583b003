//! Multipart upload form
//!
//! Listing forms mix text fields with one file part named `image`.
//! The whole form is read up front so handlers can validate fields
//! before anything touches the image store or the database.

use axum::body::Bytes;
use axum::extract::Multipart;
use shared::error::{AppError, ErrorCode};
use std::collections::HashMap;

/// Name of the file part in listing forms
const IMAGE_FIELD: &str = "image";

/// Uploaded image part
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub data: Bytes,
}

/// Parsed multipart listing form
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    image: Option<UploadedImage>,
}

impl UploadForm {
    /// Read every part of the request
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            AppError::invalid_request(format!("Invalid multipart request: {}", e))
        })? {
            let name = field.name().unwrap_or_default().to_string();

            if name == IMAGE_FIELD {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| AppError::new(ErrorCode::NoFilename))?;
                let data = field.bytes().await.map_err(|e| {
                    AppError::invalid_request(format!("Multipart error: {}", e))
                })?;
                form.image = Some(UploadedImage { filename, data });
            } else {
                let value = field.text().await.map_err(|e| {
                    AppError::invalid_request(format!("Multipart error: {}", e))
                })?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Required text field
    pub fn text(&self, name: &str) -> Result<String, AppError> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::required_field(name))
    }

    /// Required integer field
    pub fn integer(&self, name: &str) -> Result<i64, AppError> {
        let raw = self.text(name)?;
        raw.trim().parse().map_err(|_| {
            AppError::validation(format!("{} must be an integer", name))
                .with_detail("field", name)
                .with_detail("value", raw.clone())
        })
    }

    /// Take the required image part
    pub fn take_image(&mut self) -> Result<UploadedImage, AppError> {
        self.image
            .take()
            .ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))
    }
}
