//! # Error Types
//!
//! Structured error types for vessel_core. Every precondition violation in the
//! mechanics, fatigue and reliability code surfaces here immediately; no
//! function returns NaN or clamps an out-of-range input.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::errors::{CalcError, CalcResult};
//!
//! fn validate_thickness(thickness_mm: f64) -> CalcResult<()> {
//!     if thickness_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "thickness_mm",
//!             thickness_mm.to_string(),
//!             "Wall thickness must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_thickness(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for vessel_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is outside its physical domain
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Named material or S-N set not found in the reference tables
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// A random-variable definition violates its distribution's invariants
    #[error("Invalid distribution for '{variable}': {reason}")]
    InvalidDistribution { variable: String, reason: String },

    /// Calculation could not produce a valid result
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// File I/O error while reading a design case or settings file
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

impl CalcError {
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

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create an InvalidDistribution error
    pub fn invalid_distribution(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidDistribution {
            variable: variable.into(),
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
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

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::InvalidDistribution { .. } => "INVALID_DISTRIBUTION",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

/// Reject a value that must be strictly positive.
///
/// NaN fails the comparison and is rejected along with zero and negatives.
pub(crate) fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("thickness_mm", "-5", "Wall thickness must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::material_not_found("T1000").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(
            CalcError::invalid_distribution("strength", "negative std_dev").error_code(),
            "INVALID_DISTRIBUTION"
        );
    }

    #[test]
    fn test_require_positive_rejects_nan() {
        assert!(require_positive("radius_mm", f64::NAN, "Radius must be positive").is_err());
        assert!(require_positive("radius_mm", 0.0, "Radius must be positive").is_err());
        assert!(require_positive("radius_mm", 1.0, "Radius must be positive").is_ok());
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::invalid_input("working_pressure_mpa", "0", "Working pressure must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid input for 'working_pressure_mpa': 0 - Working pressure must be positive"
        );
    }
}
