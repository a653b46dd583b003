//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::ItemNotFound | Self::DraftNotFound | Self::ImageNotFound => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            Self::DatabaseError | Self::StorageError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::ItemNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::DraftNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::ImageNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_status() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidFileExtension.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::UnknownReference.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::NoFilename.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_error_status() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::StorageError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
