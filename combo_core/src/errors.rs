//! # Error Types
//!
//! Structured error types for combo_core. Every failure carries enough
//! context for a caller to show a user-facing message or to react
//! programmatically through [`ComboError::error_code`].
//!
//! Errors fall in three groups:
//!
//! - **Validation**: the caller's input is unusable (too few loads, no rules
//!   selected, duplicate ids). Nothing is generated.
//! - **Configuration**: the factor table lacks a key the input needs. The
//!   whole run aborts instead of silently using a zero factor.
//! - **File**: settings, factor-table or load files could not be read or
//!   parsed.
//!
//! ## Example
//!
//! ```rust
//! use combo_core::errors::{ComboError, ComboResult};
//!
//! fn validate_value(value: f64) -> ComboResult<()> {
//!     if value < 0.0 {
//!         return Err(ComboError::invalid_input(
//!             "value",
//!             value.to_string(),
//!             "Magnitude must be non-negative; use the sign field for direction",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for combo_core operations
pub type ComboResult<T> = Result<T, ComboError>;

/// Structured error type for combination generation.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ComboError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Fewer loads than the configured minimum
    #[error("At least {minimum} load(s) required, got {actual}")]
    TooFewLoads { minimum: usize, actual: usize },

    /// More loads than the configured maximum
    #[error("At most {maximum} loads allowed, got {actual}")]
    TooManyLoads { maximum: usize, actual: usize },

    /// Every load has a zero magnitude
    #[error("At least one load must have a non-zero magnitude")]
    AllMagnitudesZero,

    /// The rule selection is empty
    #[error("No combination rule selected")]
    NoRulesSelected,

    /// Two loads share the same identifier
    #[error("Duplicate load id: '{id}'")]
    DuplicateLoadId { id: String },

    /// A variable load was given without a usage class
    #[error("Variable load '{load_id}' has no usage class")]
    MissingUsageClass { load_id: String },

    /// The declared classification disagrees with the action category
    #[error("Load '{load_id}' is declared {declared} but category '{category}' is {expected}")]
    ClassificationMismatch {
        load_id: String,
        declared: String,
        category: String,
        expected: String,
    },

    /// Factor table lookup failed (configuration defect)
    #[error("Factor table '{table}' has no entry for '{key}'")]
    MissingFactor { table: String, key: String },

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
}

impl ComboError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ComboError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingFactor error
    pub fn missing_factor(table: impl Into<String>, key: impl Into<String>) -> Self {
        ComboError::MissingFactor {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        ComboError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input; reported, never fatal
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ComboError::InvalidInput { .. }
                | ComboError::TooFewLoads { .. }
                | ComboError::TooManyLoads { .. }
                | ComboError::AllMagnitudesZero
                | ComboError::NoRulesSelected
                | ComboError::DuplicateLoadId { .. }
                | ComboError::MissingUsageClass { .. }
                | ComboError::ClassificationMismatch { .. }
        )
    }

    /// True for factor-table defects
    pub fn is_configuration(&self) -> bool {
        matches!(self, ComboError::MissingFactor { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ComboError::InvalidInput { .. } => "INVALID_INPUT",
            ComboError::TooFewLoads { .. } => "TOO_FEW_LOADS",
            ComboError::TooManyLoads { .. } => "TOO_MANY_LOADS",
            ComboError::AllMagnitudesZero => "ALL_MAGNITUDES_ZERO",
            ComboError::NoRulesSelected => "NO_RULES_SELECTED",
            ComboError::DuplicateLoadId { .. } => "DUPLICATE_LOAD_ID",
            ComboError::MissingUsageClass { .. } => "MISSING_USAGE_CLASS",
            ComboError::ClassificationMismatch { .. } => "CLASSIFICATION_MISMATCH",
            ComboError::MissingFactor { .. } => "MISSING_FACTOR",
            ComboError::FileError { .. } => "FILE_ERROR",
            ComboError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for ComboError {
    fn from(err: serde_json::Error) -> Self {
        ComboError::SerializationError {
            reason: err.to_string(),
        }
    }
}
