//! # Error Types
//!
//! Structured error types for calc_core. Every failure is an explicit value
//! returned to the caller; nothing in the engine panics on bad input.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_m: f64) -> CalcResult<()> {
//!     if !(length_m > 0.0) {
//!         return Err(CalcError::invalid_dimension("length_m", length_m));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_length(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for estimation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A length or height is not in (0, 1000] meters
    #[error("Invalid dimension for '{field}': {value} - must be greater than 0 and at most 1000 meters")]
    InvalidDimension { field: String, value: String },

    /// An option is outside its allowed set (waste, faces, layers, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A room position does not exist in the project
    #[error("Index {index} out of range for project with {len} rooms")]
    IndexOutOfRange { index: usize, len: usize },

    /// CSV or JSON text could not be produced or read back
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// The report could not be compiled or written as PDF
    #[error("Render error: {reason}")]
    RenderError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidDimension error
    pub fn invalid_dimension(field: impl Into<String>, value: f64) -> Self {
        CalcError::InvalidDimension {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an IndexOutOfRange error
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        CalcError::IndexOutOfRange { index, len }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Create a RenderError
    pub fn render(reason: impl Into<String>) -> Self {
        CalcError::RenderError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidDimension { .. } => "INVALID_DIMENSION",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::RenderError { .. } => "RENDER_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_dimension("length_m", -5.0);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("InvalidDimension"));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::index_out_of_range(2, 2).error_code(), "INDEX_OUT_OF_RANGE");
        assert_eq!(CalcError::invalid_dimension("height_m", 0.0).error_code(), "INVALID_DIMENSION");
        assert_eq!(CalcError::render("boom").error_code(), "RENDER_ERROR");
    }

    #[test]
    fn test_error_messages() {
        let msg = CalcError::index_out_of_range(2, 2).to_string();
        assert_eq!(msg, "Index 2 out of range for project with 2 rooms");
    }
}
