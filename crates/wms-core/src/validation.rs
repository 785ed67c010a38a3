//! # Validation Module
//!
//! Input validation for document lines and item unit setup.
//!
//! ## Lenient vs Strict
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Nesting factor = 0 on an item                         │
//! │                                                                         │
//! │  Lenient (engine default)          Strict (this module)                │
//! │  ──────────────────────────        ──────────────────────────          │
//! │  NestingFactors::new(0, 2)         validate_nesting_factor(..)         │
//! │  → treated as 1                    → MustBePositive { numInBuy }       │
//! │  → warn! logged                    → caller rejects the document       │
//! │                                                                         │
//! │  Display keeps working.            Bad master data surfaces early.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use wms_core::validation::{validate_item_code, validate_quantity};
//!
//! validate_item_code("A-100").unwrap();
//! validate_quantity("quantity", 0).unwrap();
//! assert!(validate_quantity("quantity", -1).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::DocumentLine;
use crate::{MAX_ITEM_CODE_LEN, MAX_LABEL_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a base-unit quantity.
///
/// ## Rules
/// - Zero is allowed (empty stock)
/// - Negative is rejected with `InvalidArgument`
pub fn validate_quantity(field: &str, quantity: i64) -> CoreResult<()> {
    if quantity < 0 {
        return Err(CoreError::negative(field, quantity));
    }
    Ok(())
}

/// Validates a nesting factor strictly (no normalization).
///
/// ## Rules
/// - Must be `>= 1`
pub fn validate_nesting_factor(field: &str, value: i64) -> ValidationResult<()> {
    if value < 1 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - No control characters
pub fn validate_item_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "itemCode".to_string(),
        });
    }

    if code.chars().count() > MAX_ITEM_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "itemCode".to_string(),
            max: MAX_ITEM_CODE_LEN,
        });
    }

    if code.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "itemCode".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(())
}

/// Validates an optional unit-of-measure label.
///
/// Blank labels are fine (the fallback applies), long ones are not.
pub fn validate_label(field: &str, label: Option<&str>) -> ValidationResult<()> {
    match label {
        Some(label) if label.trim().chars().count() > MAX_LABEL_LEN => {
            Err(ValidationError::TooLong {
                field: field.to_string(),
                max: MAX_LABEL_LEN,
            })
        }
        _ => Ok(()),
    }
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a whole document line.
///
/// `strict_factors` turns zero/negative nesting factors into errors instead
/// of leaving them to the engine's normalization.
pub fn validate_line(line: &DocumentLine, strict_factors: bool) -> CoreResult<()> {
    validate_item_code(&line.item_code)?;
    validate_quantity("quantity", line.quantity)?;
    validate_label("buyUnitMsr", line.buy_unit_msr.as_deref())?;
    validate_label("purPackMsr", line.pur_pack_msr.as_deref())?;

    if strict_factors {
        validate_nesting_factor("numInBuy", line.num_in_buy)?;
        validate_nesting_factor("purPackUn", line.pur_pack_un)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(num_in_buy: i64, pur_pack_un: i64) -> DocumentLine {
        DocumentLine {
            item_code: "A-100".to_string(),
            item_name: "Water".to_string(),
            bin_code: None,
            quantity: 5,
            num_in_buy,
            pur_pack_un,
            buy_unit_msr: Some("Dozen".to_string()),
            pur_pack_msr: None,
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity("quantity", 0).is_ok());
        assert!(validate_quantity("quantity", 1_000_000).is_ok());
        assert!(matches!(
            validate_quantity("quantity", -1),
            Err(CoreError::InvalidArgument { value: -1, .. })
        ));
    }

    #[test]
    fn test_validate_nesting_factor() {
        assert!(validate_nesting_factor("numInBuy", 1).is_ok());
        assert!(validate_nesting_factor("numInBuy", 12).is_ok());
        assert!(validate_nesting_factor("numInBuy", 0).is_err());
        assert!(validate_nesting_factor("numInBuy", -3).is_err());
    }

    #[test]
    fn test_validate_item_code() {
        assert!(validate_item_code("A-100").is_ok());
        assert!(validate_item_code("ÇAY-1KG").is_ok());
        assert!(validate_item_code("").is_err());
        assert!(validate_item_code("   ").is_err());
        assert!(validate_item_code("A\u{7}").is_err());
        assert!(validate_item_code(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_label() {
        assert!(validate_label("purPackMsr", None).is_ok());
        assert!(validate_label("purPackMsr", Some("")).is_ok());
        assert!(validate_label("purPackMsr", Some("Box")).is_ok());
        assert!(validate_label("purPackMsr", Some(&"x".repeat(31))).is_err());
    }

    #[test]
    fn test_validate_line_lenient_and_strict() {
        assert!(validate_line(&line(12, 2), true).is_ok());
        assert!(validate_line(&line(0, 2), false).is_ok());
        assert!(matches!(
            validate_line(&line(0, 2), true),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
    }
}
