//! # Error Types
//!
//! Structured error types for volt_core. Engine errors are returned as values
//! and carry enough context for a caller to re-prompt for the offending input.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::errors::{CalcError, CalcResult};
//!
//! fn validate_distance(distance_m: f64) -> CalcResult<()> {
//!     if distance_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "distance_m",
//!             distance_m.to_string(),
//!             "Distance must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_distance(-3.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for volt_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation and record operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The Ohm's-law solver needs exactly two known quantities
    #[error("Exactly 2 known quantities are required, got {known}")]
    InvalidInputCount { known: usize },

    /// A formula would divide by zero
    #[error("Division by zero: {quantity} is zero in {formula}")]
    DivisionByZero { quantity: String, formula: String },

    /// Argument outside the real domain of sqrt/acos, or a power factor out of (0, 1]
    #[error("Domain error for '{field}': {value} - {reason}")]
    DomainError {
        field: String,
        value: String,
        reason: String,
    },

    /// Lookup key not present in a catalog table
    #[error("Unknown key '{key}' in {catalog} catalog")]
    UnknownCatalogKey { catalog: String, key: String },

    /// Value exceeds the largest entry of an ascending catalog
    #[error("{value} exceeds the {catalog} catalog (max {max})")]
    OutOfCatalogRange {
        catalog: String,
        value: String,
        max: String,
    },

    /// An input value is invalid (non-positive, not finite, blank)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// No project with the given id
    #[error("Project not found: {id}")]
    ProjectNotFound { id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInputCount error
    pub fn invalid_input_count(known: usize) -> Self {
        CalcError::InvalidInputCount { known }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(quantity: impl Into<String>, formula: impl Into<String>) -> Self {
        CalcError::DivisionByZero {
            quantity: quantity.into(),
            formula: formula.into(),
        }
    }

    /// Create a DomainError
    pub fn domain_error(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::DomainError {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownCatalogKey error
    pub fn unknown_catalog_key(catalog: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::UnknownCatalogKey {
            catalog: catalog.into(),
            key: key.into(),
        }
    }

    /// Create an OutOfCatalogRange error
    pub fn out_of_catalog_range(
        catalog: impl Into<String>,
        value: impl Into<String>,
        max: impl Into<String>,
    ) -> Self {
        CalcError::OutOfCatalogRange {
            catalog: catalog.into(),
            value: value.into(),
            max: max.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for errors raised by the calculation engine itself
    pub fn is_engine_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInputCount { .. }
                | CalcError::DivisionByZero { .. }
                | CalcError::DomainError { .. }
                | CalcError::UnknownCatalogKey { .. }
                | CalcError::OutOfCatalogRange { .. }
                | CalcError::InvalidInput { .. }
        )
    }

    /// Check if the caller can recover by asking for different input
    pub fn is_recoverable(&self) -> bool {
        self.is_engine_error() || matches!(self, CalcError::ProjectNotFound { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInputCount { .. } => "INVALID_INPUT_COUNT",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::UnknownCatalogKey { .. } => "UNKNOWN_CATALOG_KEY",
            CalcError::OutOfCatalogRange { .. } => "OUT_OF_CATALOG_RANGE",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ProjectNotFound { .. } => "PROJECT_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}
