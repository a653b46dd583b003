//! Unified service-layer error type
//!
//! `ServiceError` bridges DB-layer and IO errors (`sqlx::Error`, `std::io::Error`)
//! and the API-layer error (`AppError`). It enables `?` propagation in the
//! db and image store modules without manual `map_err` at every call site.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error
///
/// - `Db`: Database/infrastructure errors (auto-logged, mapped to DatabaseError)
/// - `Io`: Image store errors (auto-logged, mapped to StorageError)
/// - `App`: Business-rule errors (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    /// Database error
    Db(BoxError),
    /// Image store IO error
    Io(std::io::Error),
    /// Business-rule error (already an AppError with the correct ErrorCode)
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        // Unknown state/delivery ids are a client mistake, not a server fault
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_foreign_key_violation() {
                return ServiceError::App(AppError::with_message(
                    ErrorCode::UnknownReference,
                    "Referenced state, delivery or category does not exist",
                ));
            }
        }
        ServiceError::Db(e.into())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self {
        ServiceError::Io(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
            ServiceError::Io(io_err) => {
                tracing::error!(error = %io_err, "Image store error");
                AppError::new(ErrorCode::StorageError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
