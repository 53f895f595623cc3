//! Response types for the Member Import Engine API.
//!
//! This module defines the error response structures and the mapping from
//! domain errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ImportError> for ApiErrorResponse {
    fn from(error: ImportError) -> Self {
        let (status, code) = match &error {
            ImportError::EmptyUpload => (StatusCode::BAD_REQUEST, "EMPTY_UPLOAD"),
            ImportError::FileTooShort { .. } => (StatusCode::BAD_REQUEST, "FILE_TOO_SHORT"),
            ImportError::UploadTooLarge { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, "UPLOAD_TOO_LARGE")
            }
            ImportError::InvalidEncoding => (StatusCode::BAD_REQUEST, "INVALID_ENCODING"),
            ImportError::InvalidUpload { .. } => (StatusCode::BAD_REQUEST, "INVALID_UPLOAD"),
            ImportError::InvalidFilter { .. } => (StatusCode::BAD_REQUEST, "INVALID_FILTER"),
            ImportError::ConfigNotFound { .. } | ImportError::ConfigParse { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            ImportError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, error.to_string()),
        }
    }
}
