//! # Unit Settings
//!
//! The per-user display settings that used to be read from the session by
//! every hook. Here they are a plain value handed to each formatting call.
//!
//! | Setting               | Effect                                        |
//! |-----------------------|-----------------------------------------------|
//! | `enableUnitSelection` | on: all tiers; off: one tier only             |
//! | `defaultUnitType`     | the tier used when unit selection is off      |
//! | `enableBaseUnit`      | include the base-unit column in exports       |

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{DisplayMode, UnitTier};

/// User-level unit display settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UnitSettings {
    pub enable_unit_selection: bool,
    pub default_unit_type: UnitTier,
    pub enable_base_unit: bool,
}

impl UnitSettings {
    /// The display mode these settings select.
    pub fn display_mode(&self) -> DisplayMode {
        if self.enable_unit_selection {
            DisplayMode::PerUnitSelection
        } else {
            DisplayMode::SingleTier(self.default_unit_type)
        }
    }

    /// Whether exports carry the base-unit column.
    pub fn include_base_unit(&self) -> bool {
        self.enable_base_unit
    }
}

impl Default for UnitSettings {
    fn default() -> Self {
        UnitSettings {
            enable_unit_selection: true,
            default_unit_type: UnitTier::Unit,
            enable_base_unit: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = UnitSettings::default();
        assert_eq!(settings.display_mode(), DisplayMode::PerUnitSelection);
        assert!(settings.include_base_unit());
    }

    #[test]
    fn test_unit_selection_off_uses_default_type() {
        let settings = UnitSettings {
            enable_unit_selection: false,
            default_unit_type: UnitTier::Dozen,
            enable_base_unit: false,
        };
        assert_eq!(
            settings.display_mode(),
            DisplayMode::SingleTier(UnitTier::Dozen)
        );
        assert!(!settings.include_base_unit());
    }

    #[test]
    fn test_settings_wire_shape() {
        let json = r#"{"enableUnitSelection":false,"defaultUnitType":"pack","enableBaseUnit":true}"#;
        let settings: UnitSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.default_unit_type, UnitTier::Pack);
        assert!(!settings.enable_unit_selection);
    }
}
