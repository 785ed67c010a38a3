//! # Report Configuration
//!
//! Unit settings, labels and output options for the report app.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Environment Variables (highest priority)                           │
//! │     WMS_ENABLE_UNIT_SELECTION=false                                    │
//! │     WMS_DEFAULT_UNIT_TYPE=pack                                         │
//! │                                                                         │
//! │  2. TOML Config File (--config <path> or WMS_CONFIG)                   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     unit selection on, base unit on, labels Unit/Pack/Dozen            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [units]
//! enable_unit_selection = true
//! default_unit_type = "unit"   # unit | dozen | pack
//! enable_base_unit = true
//!
//! [labels]
//! unit = "Unit"
//! pack = "Box"
//! dozen = "Dozen"
//!
//! [report]
//! strict_factors = false
//! output = "display"           # display | export
//! grouping = "item"            # item | item_and_bin
//! ```
//!
//! Configuration is read-only after loading; it is passed by reference into
//! every formatting call.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use wms_core::{LineGrouping, UnitLabels, UnitSettings, UnitTier};

use crate::error::ConfigError;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "WMS_CONFIG";

// =============================================================================
// Output Format
// =============================================================================

/// What the report prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One formatted quantity string per row.
    #[default]
    Display,
    /// Tab-separated export sheet.
    Export,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "display" | "table" => Ok(OutputFormat::Display),
            "export" | "tsv" => Ok(OutputFormat::Export),
            _ => Err(ConfigError::InvalidValue("output".to_string())),
        }
    }
}

// =============================================================================
// Report Config
// =============================================================================

/// Resolved report configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    /// User-level unit settings (display mode, base-unit column).
    pub units: UnitSettings,

    /// Localized fallback labels.
    pub labels: UnitLabels,

    /// Reject lines whose nesting factors are below 1 instead of normalizing.
    pub strict_factors: bool,

    /// Display table or export sheet.
    pub output: OutputFormat,

    /// Row grouping for document lines.
    pub grouping: LineGrouping,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            units: UnitSettings::default(),
            labels: UnitLabels::default(),
            strict_factors: false,
            output: OutputFormat::Display,
            grouping: LineGrouping::Item,
        }
    }
}

impl ReportConfig {
    /// Loads configuration from defaults, an optional TOML file and the
    /// process environment.
    ///
    /// `path` wins over `WMS_CONFIG`. No file at all is fine.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// [`ReportConfig::load`] with environment reads going through `lookup`.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ReportConfig::default();

        let path = path
            .map(Path::to_path_buf)
            .or_else(|| lookup(CONFIG_PATH_ENV).map(PathBuf::from));

        if let Some(path) = path {
            let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
            config.merge_toml(&text, &path.display().to_string())?;
            info!(path = %path.display(), "Loaded config file");
        }

        config.apply_env(lookup)?;
        debug!(?config, "Configuration resolved");
        Ok(config)
    }

    /// Merges a TOML document over the current values.
    pub fn merge_toml(&mut self, text: &str, source_name: &str) -> Result<(), ConfigError> {
        let file: FileConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: source_name.to_string(),
            source,
        })?;

        if let Some(v) = file.units.enable_unit_selection {
            self.units.enable_unit_selection = v;
        }
        if let Some(v) = file.units.default_unit_type {
            self.units.default_unit_type = parse_tier("units.default_unit_type", &v)?;
        }
        if let Some(v) = file.units.enable_base_unit {
            self.units.enable_base_unit = v;
        }

        if let Some(v) = file.labels.unit {
            self.labels.unit_label = v;
        }
        if let Some(v) = file.labels.pack {
            self.labels.pack_fallback = v;
        }
        if let Some(v) = file.labels.dozen {
            self.labels.dozen_fallback = v;
        }

        if let Some(v) = file.report.strict_factors {
            self.strict_factors = v;
        }
        if let Some(v) = file.report.output {
            self.output = v
                .parse()
                .map_err(|_| ConfigError::InvalidValue("report.output".to_string()))?;
        }
        if let Some(v) = file.report.grouping {
            self.grouping = parse_grouping("report.grouping", &v)?;
        }

        Ok(())
    }

    /// Applies `WMS_*` overrides read through `lookup`.
    ///
    /// ## Environment Variables
    /// - `WMS_ENABLE_UNIT_SELECTION`, `WMS_ENABLE_BASE_UNIT`, `WMS_STRICT_FACTORS`: booleans
    /// - `WMS_DEFAULT_UNIT_TYPE`: unit | dozen | pack
    /// - `WMS_UNIT_LABEL`, `WMS_PACK_LABEL`, `WMS_DOZEN_LABEL`: label text
    /// - `WMS_OUTPUT`: display | export
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("WMS_ENABLE_UNIT_SELECTION") {
            self.units.enable_unit_selection = parse_bool("WMS_ENABLE_UNIT_SELECTION", &v)?;
        }
        if let Some(v) = lookup("WMS_DEFAULT_UNIT_TYPE") {
            self.units.default_unit_type = parse_tier("WMS_DEFAULT_UNIT_TYPE", &v)?;
        }
        if let Some(v) = lookup("WMS_ENABLE_BASE_UNIT") {
            self.units.enable_base_unit = parse_bool("WMS_ENABLE_BASE_UNIT", &v)?;
        }
        if let Some(v) = lookup("WMS_UNIT_LABEL") {
            self.labels.unit_label = v;
        }
        if let Some(v) = lookup("WMS_PACK_LABEL") {
            self.labels.pack_fallback = v;
        }
        if let Some(v) = lookup("WMS_DOZEN_LABEL") {
            self.labels.dozen_fallback = v;
        }
        if let Some(v) = lookup("WMS_STRICT_FACTORS") {
            self.strict_factors = parse_bool("WMS_STRICT_FACTORS", &v)?;
        }
        if let Some(v) = lookup("WMS_OUTPUT") {
            self.output = v
                .parse()
                .map_err(|_| ConfigError::InvalidValue("WMS_OUTPUT".to_string()))?;
        }
        Ok(())
    }
}

// =============================================================================
// File Format
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    units: FileUnits,
    labels: FileLabels,
    report: FileReport,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileUnits {
    enable_unit_selection: Option<bool>,
    default_unit_type: Option<String>,
    enable_base_unit: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileLabels {
    unit: Option<String>,
    pack: Option<String>,
    dozen: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileReport {
    strict_factors: Option<bool>,
    output: Option<String>,
    grouping: Option<String>,
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

fn parse_tier(key: &str, value: &str) -> Result<UnitTier, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

fn parse_grouping(key: &str, value: &str) -> Result<LineGrouping, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "item" => Ok(LineGrouping::Item),
        "item_and_bin" | "bin" => Ok(LineGrouping::ItemAndBin),
        _ => Err(ConfigError::InvalidValue(key.to_string())),
    }
}
