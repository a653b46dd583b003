//! Unified error system for the marketplace backend
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ErrorResponse`]: JSON body of every error response
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 6xxx: Listing errors (items, drafts, uploads)
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ErrorResponse};
//!
//! let err = AppError::new(ErrorCode::DraftNotFound);
//!
//! let err = AppError::with_message(ErrorCode::InvalidFileExtension, "Image filename does not end with .jpg");
//!
//! let err = AppError::validation("Missing required field")
//!     .with_detail("field", "category");
//!
//! let body = ErrorResponse::from(&err);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, ErrorResponse};
