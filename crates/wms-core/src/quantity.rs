//! # Quantity Module
//!
//! The pack/dozen/unit decomposition engine and its inverse.
//!
//! ## Why Integer Tiers?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In a dynamically-typed numeric context:                                │
//! │    29 / 0          = Infinity                 ❌ WRONG!                 │
//! │    Math.floor(...) over floats drifts on large stock counts             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Base Units                                       │
//! │    q = 29, numInBuy = 12, purPackUn = 2  (24 per pack)                  │
//! │    pack  = 29 / 24        = 1                                           │
//! │    dozen = (29 % 24) / 12 = 0                                           │
//! │    unit  = (29 % 24) % 12 = 5                                           │
//! │    1 × 24 + 0 × 12 + 5    = 29   ✓ exact, always                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use wms_core::quantity::{decompose, compose};
//! use wms_core::UnitConversion;
//!
//! let parts = decompose(&UnitConversion::new(29, 12, 2)).unwrap();
//! assert_eq!((parts.pack, parts.dozen, parts.unit), (1, 0, 5));
//!
//! let factors = UnitConversion::new(0, 12, 2).factors();
//! assert_eq!(compose(parts, factors).unwrap(), 29);
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::{DecomposedQuantity, NestingFactors, UnitConversion, UnitTier};

// =============================================================================
// Decomposition
// =============================================================================

/// Splits a base-unit quantity into pack, dozen and unit tiers.
///
/// ## Guarantees
/// - `pack * per_pack + dozen * numInBuy + unit == quantity`
/// - `unit < numInBuy`, `dozen < purPackUn`
/// - Zero quantity gives `{0, 0, 0}`
///
/// ## Errors
/// `CoreError::InvalidArgument` when `quantity` is negative.
pub fn decompose(input: &UnitConversion) -> CoreResult<DecomposedQuantity> {
    let quantity = base_quantity("quantity", input.quantity)?;
    Ok(decompose_units(quantity, input.factors()))
}

/// Decomposes an already validated base quantity.
pub fn decompose_units(quantity: u64, factors: NestingFactors) -> DecomposedQuantity {
    let per_pack = factors.per_pack();
    let rest = quantity % per_pack;

    DecomposedQuantity {
        pack: quantity / per_pack,
        dozen: rest / factors.num_in_buy(),
        unit: rest % factors.num_in_buy(),
    }
}

/// Expresses the whole quantity in a single tier, dropping the remainder.
///
/// Used when multi-tier display is turned off. This does NOT satisfy the
/// round-trip law: 25 units at 12 per dozen is 2 dozen, the last unit is lost.
///
/// ```rust
/// use wms_core::quantity::single_tier_value;
/// use wms_core::{UnitConversion, UnitTier};
///
/// let conv = UnitConversion::new(25, 12, 1);
/// assert_eq!(single_tier_value(&conv, UnitTier::Dozen).unwrap(), 2);
/// ```
pub fn single_tier_value(input: &UnitConversion, tier: UnitTier) -> CoreResult<u64> {
    let quantity = base_quantity("quantity", input.quantity)?;
    Ok(quantity / tier.base_units(input.factors()))
}

// =============================================================================
// Inverse Helpers
// =============================================================================

/// Reassembles a base-unit quantity from its tiers.
///
/// Accepts tier values outside the decomposition bounds (e.g. 15 units at 12
/// per dozen), which is what manual count entry produces.
///
/// ## Errors
/// `CoreError::QuantityOverflow` if the total does not fit in `i64`.
pub fn compose(parts: DecomposedQuantity, factors: NestingFactors) -> CoreResult<u64> {
    let overflow = || CoreError::QuantityOverflow {
        context: format!(
            "{} pack, {} dozen, {} unit",
            parts.pack, parts.dozen, parts.unit
        ),
    };

    let packs = parts
        .pack
        .checked_mul(factors.per_pack())
        .ok_or_else(overflow)?;
    let dozens = parts
        .dozen
        .checked_mul(factors.num_in_buy())
        .ok_or_else(overflow)?;

    let total = packs
        .checked_add(dozens)
        .and_then(|sum| sum.checked_add(parts.unit))
        .ok_or_else(overflow)?;

    if total > i64::MAX as u64 {
        return Err(overflow());
    }
    Ok(total)
}

/// Converts an amount entered in one tier to base units.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Scan Screen: Add Line                                                 │
/// │                                                                         │
/// │  User scans item, picks "Pack", enters 3                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  to_base_units(3, Pack, item) ← THIS FUNCTION                          │
/// │       │                                                                 │
/// │       ├── amount < 0?  → InvalidArgument                               │
/// │       ├── overflow?    → QuantityOverflow                              │
/// │       │                                                                 │
/// │       └── OK → 3 × numInBuy × purPackUn base units sent to backend     │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn to_base_units(amount: i64, tier: UnitTier, input: &UnitConversion) -> CoreResult<u64> {
    let amount = base_quantity("amount", amount)?;
    let total = amount
        .checked_mul(tier.base_units(input.factors()))
        .filter(|total| *total <= i64::MAX as u64)
        .ok_or_else(|| CoreError::QuantityOverflow {
            context: format!("{} {}", amount, tier),
        })?;
    Ok(total)
}

impl DecomposedQuantity {
    /// Reassembles the base-unit quantity (see [`compose`]).
    pub fn to_base_units(&self, factors: NestingFactors) -> CoreResult<u64> {
        compose(*self, factors)
    }
}

/// Rejects negative quantities, returning the value as unsigned.
pub(crate) fn base_quantity(field: &str, value: i64) -> CoreResult<u64> {
    u64::try_from(value).map_err(|_| CoreError::negative(field, value))
}

// =============================================================================
// Unit Tests
// =============================================================================
