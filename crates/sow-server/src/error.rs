//! Server error type and HTTP status mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sow_storage::StorageError;

/// Error returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Resource does not exist.
    #[error("Not found")]
    NotFound,

    /// Published link is past its expiry.
    #[error("Link expired")]
    Expired,

    /// Request failed validation.
    #[error("{0}")]
    Validation(String),

    /// PDF export requested but no render service is configured.
    #[error("PDF export is not configured")]
    PdfUnavailable,

    /// The PDF render service failed.
    #[error("PDF conversion failed: {0}")]
    Pdf(#[from] sow_pdf::PdfError),

    /// Storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ServerError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => Self::NotFound,
            StorageError::Expired => Self::Expired,
            StorageError::Validation(message) => Self::Validation(message),
            StorageError::Database(err) => Self::Storage(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl ServerError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Expired => StatusCode::GONE,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::PdfUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Pdf(_) => StatusCode::BAD_GATEWAY,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ServerError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ServerError::Expired.status(), StatusCode::GONE);
        assert_eq!(
            ServerError::Validation("bad".to_owned()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::PdfUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_storage_error_conversion() {
        let err: ServerError = StorageError::NotFound.into();
        assert!(matches!(err, ServerError::NotFound));

        let err: ServerError = StorageError::Expired.into();
        assert!(matches!(err, ServerError::Expired));

        let err: ServerError = StorageError::Validation("invalid template".to_owned()).into();
        assert!(matches!(err, ServerError::Validation(_)));
    }
}
