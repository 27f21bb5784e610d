//! # Error Types
//!
//! Structured error types for wing_core. Every failure the engine can report
//! is a deterministic function of its input, so nothing here is retried.
//! The variants map onto four families:
//!
//! - validation (`InvalidInput`) - an out-of-range field or a rejected mutation
//! - geometry (`GeometryOverflow`) - a spar cutout does not fit inside its rib
//! - `UnsupportedAlignment` - a spar asks for an alignment policy that is not built
//! - `InputData` - malformed airfoil source data
//!
//! ## Example
//!
//! ```rust
//! use wing_core::errors::{WingError, WingResult};
//!
//! fn validate_span(span_mm: f64) -> WingResult<()> {
//!     if span_mm <= 0.0 {
//!         return Err(WingError::invalid_input("span", span_mm, "Span must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_span(-1.0).unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wing_core operations
pub type WingResult<T> = Result<T, WingError>;

/// Structured error type for wing geometry operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum WingError {
    /// A field is out of range, or a mutation would break an invariant
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A spar cutout exceeds the chord or the airfoil surface bounds
    #[error("Geometry overflow{}: {reason}", location(*rib_index, *spar_index))]
    GeometryOverflow {
        rib_index: Option<usize>,
        spar_index: Option<usize>,
        reason: String,
    },

    /// The spar alignment policy has no implementation
    #[error("Unsupported spar alignment '{alignment}'{}", location(None, *spar_index))]
    UnsupportedAlignment {
        spar_index: Option<usize>,
        alignment: String,
    },

    /// Airfoil source data is malformed
    #[error("Invalid airfoil data in {origin}: {reason}")]
    InputData { origin: String, reason: String },

    /// Any other failure raised while building a single rib
    #[error("Rib {rib_index} failed{}: {source}", location(None, *spar_index))]
    RibFailed {
        rib_index: usize,
        spar_index: Option<usize>,
        source: Box<WingError>,
    },

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

fn location(rib_index: Option<usize>, spar_index: Option<usize>) -> String {
    match (rib_index, spar_index) {
        (Some(rib), Some(spar)) => format!(" at rib {} (spar {})", rib, spar),
        (Some(rib), None) => format!(" at rib {}", rib),
        (None, Some(spar)) => format!(" (spar {})", spar),
        (None, None) => String::new(),
    }
}

impl WingError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        WingError::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a GeometryOverflow error with no location attached yet
    pub fn geometry_overflow(reason: impl Into<String>) -> Self {
        WingError::GeometryOverflow {
            rib_index: None,
            spar_index: None,
            reason: reason.into(),
        }
    }

    /// Create an InputData error
    pub fn input_data(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        WingError::InputData {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        WingError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Prefix the field of an `InvalidInput` error, e.g. `end_rib` -> `spars[2].end_rib`.
    pub fn within(self, prefix: &str) -> Self {
        match self {
            WingError::InvalidInput { field, value, reason } => WingError::InvalidInput {
                field: format!("{}.{}", prefix, field),
                value,
                reason,
            },
            other => other,
        }
    }

    /// Attach the rib (and optionally spar) that produced this error.
    ///
    /// Geometry and alignment errors get their location fields filled in;
    /// every other error is wrapped in [`WingError::RibFailed`].
    pub fn locate(self, rib: usize, spar: Option<usize>) -> Self {
        match self {
            WingError::GeometryOverflow { reason, .. } => WingError::GeometryOverflow {
                rib_index: Some(rib),
                spar_index: spar,
                reason,
            },
            WingError::UnsupportedAlignment { alignment, .. } => WingError::UnsupportedAlignment {
                spar_index: spar,
                alignment,
            },
            located @ WingError::RibFailed { .. } => located,
            other => WingError::RibFailed {
                rib_index: rib,
                spar_index: spar,
                source: Box::new(other),
            },
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            WingError::InvalidInput { .. } => "INVALID_INPUT",
            WingError::GeometryOverflow { .. } => "GEOMETRY_OVERFLOW",
            WingError::UnsupportedAlignment { .. } => "UNSUPPORTED_ALIGNMENT",
            WingError::InputData { .. } => "INPUT_DATA",
            WingError::RibFailed { .. } => "RIB_FAILED",
            WingError::FileError { .. } => "FILE_ERROR",
            WingError::SerializationError { .. } => "SERIALIZATION_ERROR",
            WingError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for WingError {
    fn from(e: serde_json::Error) -> Self {
        WingError::SerializationError {
            reason: e.to_string(),
        }
    }
}
