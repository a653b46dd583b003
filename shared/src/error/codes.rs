//! Error codes for the marketplace backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Listing errors (items, drafts, image uploads)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the web client can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 6xxx: Listing ====================
    /// Item not found
    ItemNotFound = 6001,
    /// Draft not found
    DraftNotFound = 6002,
    /// Referenced lookup row (state, delivery) does not exist
    UnknownReference = 6003,

    // ==================== 65xx: File Upload ====================
    /// No file part in the upload
    NoFileProvided = 6504,
    /// File part carries no filename
    NoFilename = 6506,
    /// Filename does not end with .jpg
    InvalidFileExtension = 6507,
    /// Filename is not a plain file name
    InvalidFilename = 6508,
    /// Image not present in the store
    ImageNotFound = 6510,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
    /// Image store IO error
    StorageError = 9401,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Listing
            ErrorCode::ItemNotFound => "Item not found",
            ErrorCode::DraftNotFound => "Draft not found",
            ErrorCode::UnknownReference => "Referenced record does not exist",

            // File Upload
            ErrorCode::NoFileProvided => "No image file provided",
            ErrorCode::NoFilename => "Image file has no filename",
            ErrorCode::InvalidFileExtension => "Image filename does not end with .jpg",
            ErrorCode::InvalidFilename => "Invalid image filename",
            ErrorCode::ImageNotFound => "Image not found",

            // System
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::StorageError => "Image storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Listing
            6001 => Ok(ErrorCode::ItemNotFound),
            6002 => Ok(ErrorCode::DraftNotFound),
            6003 => Ok(ErrorCode::UnknownReference),

            // File Upload
            6504 => Ok(ErrorCode::NoFileProvided),
            6506 => Ok(ErrorCode::NoFilename),
            6507 => Ok(ErrorCode::InvalidFileExtension),
            6508 => Ok(ErrorCode::InvalidFilename),
            6510 => Ok(ErrorCode::ImageNotFound),

            // System
            9002 => Ok(ErrorCode::DatabaseError),
            9401 => Ok(ErrorCode::StorageError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
