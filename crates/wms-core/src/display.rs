//! # Display Module
//!
//! Renders quantities as the inline strings shown in stock tables and cards.
//!
//! ```text
//! PerUnitSelection     29 @ 12/2  →  "1 Pack, 5 Unit"
//! PerUnitSelection      0 @ 12/2  →  "0"
//! SingleTier(Dozen)    25 @ 12/1  →  "2 Dozen"        (1 unit dropped)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::quantity::{decompose, single_tier_value};
use crate::settings::UnitSettings;
use crate::types::{DisplayMode, UnitConversion, UnitLabels, UnitTier};

/// Formats a quantity for display.
///
/// - `PerUnitSelection`: non-zero tiers in order pack → dozen → unit, joined
///   with `", "`. All-zero renders as the bare `"0"`.
/// - `SingleTier(tier)`: `"<value> <label>"`, the remainder is dropped.
///
/// ## Example
/// ```rust
/// use wms_core::display::format_for_display;
/// use wms_core::{DisplayMode, UnitConversion, UnitLabels};
///
/// let labels = UnitLabels::default();
/// let conv = UnitConversion::new(29, 12, 2);
/// let text = format_for_display(&conv, DisplayMode::PerUnitSelection, &labels).unwrap();
/// assert_eq!(text, "1 Pack, 5 Unit");
/// ```
pub fn format_for_display(
    input: &UnitConversion,
    mode: DisplayMode,
    labels: &UnitLabels,
) -> CoreResult<String> {
    match mode {
        DisplayMode::PerUnitSelection => {
            let parts = decompose(input)?;
            if parts.is_zero() {
                return Ok("0".to_string());
            }

            let text = UnitTier::ALL
                .iter()
                .filter(|tier| parts.tier(**tier) > 0)
                .map(|tier| format!("{} {}", parts.tier(*tier), input.tier_label(*tier, labels)))
                .collect::<Vec<_>>()
                .join(", ");
            Ok(text)
        }
        DisplayMode::SingleTier(tier) => {
            let value = single_tier_value(input, tier)?;
            Ok(format!("{} {}", value, input.tier_label(tier, labels)))
        }
    }
}

/// Stock-display formatter with its settings bound once.
///
/// Views build one from the user's settings and localized labels, then call
/// [`StockFormatter::format`] per row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockFormatter {
    mode: DisplayMode,
    labels: UnitLabels,
}

impl StockFormatter {
    pub fn new(mode: DisplayMode, labels: UnitLabels) -> Self {
        StockFormatter { mode, labels }
    }

    /// Builds a formatter from user settings.
    pub fn from_settings(settings: &UnitSettings, labels: UnitLabels) -> Self {
        StockFormatter::new(settings.display_mode(), labels)
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn format(&self, input: &UnitConversion) -> CoreResult<String> {
        format_for_display(input, self.mode, &self.labels)
    }

    /// Like [`StockFormatter::format`], but renders `placeholder` for inputs
    /// the engine rejects. Tables use this so one bad row doesn't blank the view.
    pub fn format_or(&self, input: &UnitConversion, placeholder: &str) -> String {
        self.format(input)
            .unwrap_or_else(|_| placeholder.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn per_unit(conv: &UnitConversion) -> String {
        format_for_display(conv, DisplayMode::PerUnitSelection, &UnitLabels::default()).unwrap()
    }

    #[test]
    fn test_all_tiers() {
        // 60 per pack: 1 pack + 2 dozen (24) + 1 unit
        assert_eq!(
            per_unit(&UnitConversion::new(85, 12, 5)),
            "1 Pack, 2 Dozen, 1 Unit"
        );
        assert_eq!(
            per_unit(&UnitConversion::new(48 + 36 + 1, 12, 4)),
            "1 Pack, 3 Dozen, 1 Unit"
        );
    }

    #[test]
    fn test_zero_tiers_are_omitted() {
        assert_eq!(per_unit(&UnitConversion::new(29, 12, 2)), "1 Pack, 5 Unit");
        assert_eq!(per_unit(&UnitConversion::new(12, 12, 2)), "1 Dozen");
        assert_eq!(per_unit(&UnitConversion::new(48, 12, 2)), "2 Pack");
    }

    #[test]
    fn test_zero_renders_bare_zero() {
        assert_eq!(per_unit(&UnitConversion::new(0, 12, 2)), "0");
    }

    #[test]
    fn test_item_labels_override_fallbacks() {
        let conv = UnitConversion::new(41, 12, 2).with_labels("Dz", "Carton");
        assert_eq!(per_unit(&conv), "1 Carton, 1 Dz, 5 Unit");
    }

    #[test]
    fn test_custom_labels() {
        let labels = UnitLabels {
            unit_label: "pcs".to_string(),
            pack_fallback: "box".to_string(),
            dozen_fallback: "dz".to_string(),
        };
        let text =
            format_for_display(&UnitConversion::new(13, 12, 2), DisplayMode::PerUnitSelection, &labels)
                .unwrap();
        assert_eq!(text, "1 dz, 1 pcs");
    }

    #[test]
    fn test_single_tier_drops_remainder() {
        let labels = UnitLabels::default();
        let conv = UnitConversion::new(25, 12, 1);
        assert_eq!(
            format_for_display(&conv, DisplayMode::SingleTier(UnitTier::Dozen), &labels).unwrap(),
            "2 Dozen"
        );
        assert_eq!(
            format_for_display(&conv, DisplayMode::SingleTier(UnitTier::Unit), &labels).unwrap(),
            "25 Unit"
        );
        assert_eq!(
            format_for_display(
                &UnitConversion::new(5, 12, 2),
                DisplayMode::SingleTier(UnitTier::Pack),
                &labels
            )
            .unwrap(),
            "0 Pack"
        );
    }

    #[test]
    fn test_negative_quantity_fails() {
        let result = format_for_display(
            &UnitConversion::new(-3, 12, 2),
            DisplayMode::PerUnitSelection,
            &UnitLabels::default(),
        );
        assert!(matches!(result, Err(CoreError::InvalidArgument { .. })));
    }

    #[test]
    fn test_formatter_from_settings() {
        let settings = UnitSettings {
            enable_unit_selection: false,
            default_unit_type: UnitTier::Pack,
            enable_base_unit: true,
        };
        let formatter = StockFormatter::from_settings(&settings, UnitLabels::default());
        assert_eq!(formatter.mode(), DisplayMode::SingleTier(UnitTier::Pack));
        assert_eq!(
            formatter.format(&UnitConversion::new(50, 12, 2)).unwrap(),
            "2 Pack"
        );
    }

    #[test]
    fn test_formatter_placeholder() {
        let formatter = StockFormatter::default();
        assert_eq!(formatter.format_or(&UnitConversion::new(-1, 1, 1), "-"), "-");
        assert_eq!(formatter.format_or(&UnitConversion::new(3, 1, 1), "-"), "3 Pack");
    }
}
