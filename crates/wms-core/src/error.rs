//! # Error Types
//!
//! Domain-specific error types for wms-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  wms-core errors (this file)                                           │
//! │  ├── CoreError        - Quantity engine failures                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  wms-report errors (app crate)                                         │
//! │  ├── ConfigError      - Bad configuration values                       │
//! │  └── ReportError      - What the CLI prints on failure                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ReportError → stderr              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, item code, value)
//! 3. Errors are enum variants, never String
//! 4. Nesting factors of zero are NOT errors here (they are normalized)

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Quantity engine errors.
///
/// The engine is a leaf with no I/O, so every error is returned synchronously
/// to the immediate caller. Retrying with the same input is meaningless.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An argument is outside the engine's contract.
    ///
    /// ## When This Occurs
    /// - `quantity` is negative (stock lines, scanned amounts)
    /// - A scanned amount in pack/dozen tier is negative
    ///
    /// ## User Workflow
    /// ```text
    /// Counting line (quantity: -3)
    ///      │
    ///      ▼
    /// decompose()
    ///      │
    ///      ▼
    /// InvalidArgument { field: "quantity", value: -3, .. }
    ///      │
    ///      ▼
    /// Caller shows a dash or drops the row
    /// ```
    #[error("Invalid argument {field} = {value}: {reason}")]
    InvalidArgument {
        field: String,
        value: i64,
        reason: String,
    },

    /// A unit tier name could not be parsed (settings, CLI, config files).
    #[error("Unknown unit type: '{0}'. Valid options: unit, dozen, pack")]
    UnknownUnitTier(String),

    /// Summing or scaling a quantity left the representable range.
    #[error("Quantity overflow for {context}")]
    QuantityOverflow { context: String },

    /// An export row did not match the sheet's header row.
    #[error("Export row has {actual} leading cells, expected {expected}")]
    ColumnMismatch { expected: usize, actual: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for the negative-quantity case.
    pub(crate) fn negative(field: &str, value: i64) -> Self {
        CoreError::InvalidArgument {
            field: field.to_string(),
            value,
            reason: "must not be negative".to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when item or settings data doesn't meet requirements.
/// Used by strict callers before the engine runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., control characters in an item code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::negative("quantity", -1);
        assert_eq!(
            err.to_string(),
            "Invalid argument quantity = -1: must not be negative"
        );

        let err = CoreError::UnknownUnitTier("crate".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown unit type: 'crate'. Valid options: unit, dozen, pack"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "itemCode".to_string(),
        };
        assert_eq!(err.to_string(), "itemCode is required");

        let err = ValidationError::MustBePositive {
            field: "numInBuy".to_string(),
        };
        assert_eq!(err.to_string(), "numInBuy must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "itemCode".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
