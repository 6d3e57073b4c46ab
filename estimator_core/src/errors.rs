//! # Error Types
//!
//! Structured error types for estimator_core. The estimation engine itself
//! only ever raises [`EstimatorError::InvalidInput`]; the remaining variants
//! belong to the project document and file layers.
//!
//! ## Example
//!
//! ```rust
//! use estimator_core::errors::{EstimatorError, EstimatorResult};
//!
//! fn validate_length(length_ft: f64) -> EstimatorResult<()> {
//!     if length_ft <= 0.0 {
//!         return Err(EstimatorError::InvalidInput {
//!             field: "length".to_string(),
//!             value: length_ft.to_string(),
//!             reason: "Length must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimator_core operations
pub type EstimatorResult<T> = Result<T, EstimatorError>;

/// Structured error type for estimation and project operations.
///
/// Callers translate these into user-facing messages (e.g. "enter valid
/// dimensions for Room 2"); the error carries no presentation concerns.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details", rename_all_fields = "camelCase")]
pub enum EstimatorError {
    /// A numeric input is zero, negative, non-finite or NaN where that is not allowed
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// No estimation item with this id exists in the project
    #[error("Estimation item not found: {id}")]
    ItemNotFound { id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl EstimatorError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimatorError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimatorError::MissingField {
            field: field.into(),
        }
    }

    /// Create an ItemNotFound error
    pub fn item_not_found(id: impl Into<String>) -> Self {
        EstimatorError::ItemNotFound { id: id.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimatorError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        EstimatorError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Prefix the field of an InvalidInput/MissingField error with a path
    /// segment, e.g. `length` becomes `rooms[1].length`.
    ///
    /// Other variants are returned unchanged.
    pub fn within(self, prefix: &str) -> Self {
        match self {
            EstimatorError::InvalidInput { field, value, reason } => EstimatorError::InvalidInput {
                field: format!("{}.{}", prefix, field),
                value,
                reason,
            },
            EstimatorError::MissingField { field } => EstimatorError::MissingField {
                field: format!("{}.{}", prefix, field),
            },
            other => other,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimatorError::InvalidInput { .. } => "INVALID_INPUT",
            EstimatorError::MissingField { .. } => "MISSING_FIELD",
            EstimatorError::ItemNotFound { .. } => "ITEM_NOT_FOUND",
            EstimatorError::FileError { .. } => "FILE_ERROR",
            EstimatorError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimatorError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
