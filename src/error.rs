//! Error types for the Member Import Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all request-level failure conditions. Per-field validation problems
//! are deliberately NOT errors in this sense — they accumulate into
//! [`crate::models::ValidationError`] records so a single row can report
//! every problem at once.

use thiserror::Error;

/// The main error type for the Member Import Engine.
///
/// All fallible operations in the crate return this error type, making it
/// easy to handle failures consistently throughout the application.
///
/// # Example
///
/// ```
/// use member_import::error::ImportError;
///
/// let error = ImportError::EmptyUpload;
/// assert_eq!(error.to_string(), "No file uploaded or file is empty");
/// ```
#[derive(Debug, Error)]
pub enum ImportError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The uploaded file was missing or contained no data.
    #[error("No file uploaded or file is empty")]
    EmptyUpload,

    /// The uploaded file did not contain a header row and a data row.
    #[error("File must contain a header row and at least one data row (found {lines} line(s))")]
    FileTooShort {
        /// The number of lines found in the upload.
        lines: usize,
    },

    /// The uploaded file exceeded the configured size limit.
    #[error("Uploaded file is {size} bytes which exceeds the {limit} byte limit")]
    UploadTooLarge {
        /// The size of the upload in bytes.
        size: usize,
        /// The configured limit in bytes.
        limit: usize,
    },

    /// The uploaded file was not valid UTF-8 text.
    #[error("Uploaded file is not valid UTF-8 text")]
    InvalidEncoding,

    /// The multipart request did not contain a usable file field.
    #[error("Invalid upload: {message}")]
    InvalidUpload {
        /// A description of what was wrong with the request.
        message: String,
    },

    /// An export filter value did not match any known enum name.
    #[error("Invalid {field} filter value: '{value}'. Valid values: {expected}")]
    InvalidFilter {
        /// The query parameter that failed to parse.
        field: String,
        /// The offending raw value.
        value: String,
        /// The comma-separated list of accepted values.
        expected: String,
    },

    /// The persistence collaborator reported a failure.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl ImportError {
    /// Creates an invalid-upload error.
    pub fn invalid_upload(message: impl Into<String>) -> Self {
        Self::InvalidUpload {
            message: message.into(),
        }
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return ImportError.
pub type ImportResult<T> = Result<T, ImportError>;
