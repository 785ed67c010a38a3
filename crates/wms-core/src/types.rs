//! # Domain Types
//!
//! Core domain types used throughout the warehouse quantity engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ UnitConversion  │   │ NestingFactors  │   │DecomposedQuantity│      │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  quantity (i64) │──►│  num_in_buy ≥ 1 │──►│  pack           │       │
//! │  │  numInBuy       │   │  pur_pack_un ≥ 1│   │  dozen          │       │
//! │  │  purPackUn      │   └─────────────────┘   │  unit           │       │
//! │  │  buyUnitMsr     │                         └─────────────────┘       │
//! │  │  purPackMsr     │                                                    │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    UnitTier     │   │   DisplayMode   │   │   UnitLabels    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Pack           │   │ PerUnitSelection│   │  unit_label     │       │
//! │  │  Dozen          │   │ SingleTier(tier)│   │  pack_fallback  │       │
//! │  │  Unit           │   └─────────────────┘   │  dozen_fallback │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tier Nesting
//! One pack holds `purPackUn` buy units ("dozens"), one buy unit holds
//! `numInBuy` base units. The "dozen" name is historical, a buy unit is not
//! necessarily 12 pieces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Unit Conversion (engine input)
// =============================================================================

/// A base-unit quantity plus the item's unit-of-measure setup.
///
/// Field names follow the backend JSON (`numInBuy`, `purPackUn`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UnitConversion {
    /// Amount in base units. Negative values are rejected by the engine.
    pub quantity: i64,

    /// Base units per buy unit (dozen tier). Values `<= 0` are treated as 1.
    pub num_in_buy: i64,

    /// Buy units per pack. Values `<= 0` are treated as 1.
    pub pur_pack_un: i64,

    /// Display label for the buy-unit tier (e.g. "Dozen").
    pub buy_unit_msr: Option<String>,

    /// Display label for the pack tier (e.g. "Box").
    pub pur_pack_msr: Option<String>,
}

impl UnitConversion {
    /// Creates a conversion without unit-of-measure labels.
    pub fn new(quantity: i64, num_in_buy: i64, pur_pack_un: i64) -> Self {
        UnitConversion {
            quantity,
            num_in_buy,
            pur_pack_un,
            buy_unit_msr: None,
            pur_pack_msr: None,
        }
    }

    /// Attaches item-specific labels for the buy-unit and pack tiers.
    pub fn with_labels(
        mut self,
        buy_unit_msr: impl Into<String>,
        pur_pack_msr: impl Into<String>,
    ) -> Self {
        self.buy_unit_msr = Some(buy_unit_msr.into());
        self.pur_pack_msr = Some(pur_pack_msr.into());
        self
    }

    /// Returns the normalized nesting factors for this item.
    pub fn factors(&self) -> NestingFactors {
        NestingFactors::new(self.num_in_buy, self.pur_pack_un)
    }

    /// Resolves the display label for a tier.
    ///
    /// Item labels win when non-blank; otherwise the fallback from `labels`.
    /// The base tier always uses `labels.unit_label`.
    pub fn tier_label<'a>(&'a self, tier: UnitTier, labels: &'a UnitLabels) -> &'a str {
        match tier {
            UnitTier::Pack => non_blank(&self.pur_pack_msr).unwrap_or(&labels.pack_fallback),
            UnitTier::Dozen => non_blank(&self.buy_unit_msr).unwrap_or(&labels.dozen_fallback),
            UnitTier::Unit => &labels.unit_label,
        }
    }
}

fn non_blank(label: &Option<String>) -> Option<&str> {
    label.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// =============================================================================
// Nesting Factors
// =============================================================================

/// Normalized nesting factors, both guaranteed `>= 1`.
///
/// Constructing through [`NestingFactors::new`] is the only place a zero or
/// negative factor gets corrected, and every correction is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NestingFactors {
    num_in_buy: u64,
    pur_pack_un: u64,
}

impl NestingFactors {
    /// Factors of one in both tiers: everything collapses to the pack tier.
    pub const ONE: NestingFactors = NestingFactors {
        num_in_buy: 1,
        pur_pack_un: 1,
    };

    /// Normalizes raw factors from item master data.
    pub fn new(num_in_buy: i64, pur_pack_un: i64) -> Self {
        NestingFactors {
            num_in_buy: normalize_factor("numInBuy", num_in_buy),
            pur_pack_un: normalize_factor("purPackUn", pur_pack_un),
        }
    }

    /// Base units per buy unit.
    #[inline]
    pub const fn num_in_buy(&self) -> u64 {
        self.num_in_buy
    }

    /// Buy units per pack.
    #[inline]
    pub const fn pur_pack_un(&self) -> u64 {
        self.pur_pack_un
    }

    /// Base units per pack.
    ///
    /// Saturates instead of overflowing. Any valid quantity (at most
    /// `i64::MAX`) is below a saturated product, so decomposition stays exact.
    #[inline]
    pub const fn per_pack(&self) -> u64 {
        self.num_in_buy.saturating_mul(self.pur_pack_un)
    }
}

impl Default for NestingFactors {
    fn default() -> Self {
        NestingFactors::ONE
    }
}

fn normalize_factor(field: &'static str, value: i64) -> u64 {
    if value >= 1 {
        return value as u64;
    }
    // Usually an item record missing its unit-of-measure setup upstream.
    warn!(field, value, "nesting factor below 1, treating as 1");
    1
}

// =============================================================================
// Decomposed Quantity (engine output)
// =============================================================================

/// A quantity split across pack, dozen and base-unit tiers.
///
/// ## Round-Trip Law
/// `pack * numInBuy * purPackUn + dozen * numInBuy + unit == quantity`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DecomposedQuantity {
    /// Whole packs.
    pub pack: u64,
    /// Whole buy units left after removing packs.
    pub dozen: u64,
    /// Base units left after removing packs and buy units.
    pub unit: u64,
}

impl DecomposedQuantity {
    /// True when every tier is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.pack == 0 && self.dozen == 0 && self.unit == 0
    }

    /// Returns the amount held in a tier.
    #[inline]
    pub const fn tier(&self, tier: UnitTier) -> u64 {
        match tier {
            UnitTier::Pack => self.pack,
            UnitTier::Dozen => self.dozen,
            UnitTier::Unit => self.unit,
        }
    }
}

// =============================================================================
// Unit Tier
// =============================================================================

/// One of the three unit tiers, largest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum UnitTier {
    /// Largest tier: a grouping of buy units.
    Pack,
    /// Intermediate tier: a grouping of base units.
    Dozen,
    /// Base unit: one physical piece.
    #[default]
    Unit,
}

impl UnitTier {
    /// All tiers in display order (pack → dozen → unit).
    pub const ALL: [UnitTier; 3] = [UnitTier::Pack, UnitTier::Dozen, UnitTier::Unit];

    /// Base units contained in one unit of this tier.
    ///
    /// ```rust
    /// use wms_core::{NestingFactors, UnitTier};
    ///
    /// let factors = NestingFactors::new(12, 2);
    /// assert_eq!(UnitTier::Pack.base_units(factors), 24);
    /// assert_eq!(UnitTier::Dozen.base_units(factors), 12);
    /// assert_eq!(UnitTier::Unit.base_units(factors), 1);
    /// ```
    #[inline]
    pub const fn base_units(&self, factors: NestingFactors) -> u64 {
        match self {
            UnitTier::Pack => factors.per_pack(),
            UnitTier::Dozen => factors.num_in_buy(),
            UnitTier::Unit => 1,
        }
    }
}

impl fmt::Display for UnitTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitTier::Pack => write!(f, "pack"),
            UnitTier::Dozen => write!(f, "dozen"),
            UnitTier::Unit => write!(f, "unit"),
        }
    }
}

impl FromStr for UnitTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pack" | "box" => Ok(UnitTier::Pack),
            "dozen" | "buy" => Ok(UnitTier::Dozen),
            "unit" | "base" => Ok(UnitTier::Unit),
            other => Err(CoreError::UnknownUnitTier(other.to_string())),
        }
    }
}

// =============================================================================
// Display Mode
// =============================================================================

/// How a quantity is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    /// Every non-zero tier, e.g. `"2 Pack, 3 Dozen, 1 Unit"`.
    #[default]
    PerUnitSelection,
    /// The whole quantity in exactly one tier, remainder dropped.
    SingleTier(UnitTier),
}

// =============================================================================
// Labels
// =============================================================================

/// Localized labels supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UnitLabels {
    /// Label for the base tier. Always used, items cannot override it.
    pub unit_label: String,
    /// Pack label when the item has no `purPackMsr`.
    pub pack_fallback: String,
    /// Buy-unit label when the item has no `buyUnitMsr`.
    pub dozen_fallback: String,
}

impl UnitLabels {
    /// Returns the caller-level label for a tier (no item override).
    pub fn fallback(&self, tier: UnitTier) -> &str {
        match tier {
            UnitTier::Pack => &self.pack_fallback,
            UnitTier::Dozen => &self.dozen_fallback,
            UnitTier::Unit => &self.unit_label,
        }
    }
}

impl Default for UnitLabels {
    fn default() -> Self {
        UnitLabels {
            unit_label: "Unit".to_string(),
            pack_fallback: "Pack".to_string(),
            dozen_fallback: "Dozen".to_string(),
        }
    }
}

// =============================================================================
// Document Line
// =============================================================================

/// One line of a warehouse document (receipt, count, transfer, pick list).
///
/// Supplied by the backend; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLine {
    /// Item code (business identifier).
    pub item_code: String,

    /// Item description.
    pub item_name: String,

    /// Bin location, when the warehouse is bin-managed.
    pub bin_code: Option<String>,

    /// Quantity in base units.
    pub quantity: i64,

    /// Base units per buy unit.
    pub num_in_buy: i64,

    /// Buy units per pack.
    pub pur_pack_un: i64,

    /// Item label for the buy-unit tier.
    pub buy_unit_msr: Option<String>,

    /// Item label for the pack tier.
    pub pur_pack_msr: Option<String>,
}

impl DocumentLine {
    /// Returns the engine input for this line.
    pub fn conversion(&self) -> UnitConversion {
        UnitConversion {
            quantity: self.quantity,
            num_in_buy: self.num_in_buy,
            pur_pack_un: self.pur_pack_un,
            buy_unit_msr: self.buy_unit_msr.clone(),
            pur_pack_msr: self.pur_pack_msr.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
