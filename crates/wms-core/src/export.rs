//! # Export Module
//!
//! Columnar quantity output for spreadsheet exports.
//!
//! ## Header / Data Pairing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  mode              includeBaseUnit   headers               values      │
//! │  ────────────────  ───────────────   ───────────────────   ─────────── │
//! │  PerUnitSelection  true              [Pack, Dozen, Unit]   [p, d, u]   │
//! │  PerUnitSelection  false             [Pack, Dozen]         [p, d]      │
//! │  SingleTier(_)     any               [Unit]                [quantity]  │
//! │                                                                         │
//! │  len(headers) == len(values) for every row, always.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both sides are derived from [`export_tiers`], so they cannot drift apart.
//! The file bytes themselves (xlsx) are produced by the caller.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::quantity::{base_quantity, decompose};
use crate::types::{DisplayMode, UnitConversion, UnitLabels, UnitTier};

// =============================================================================
// Columns
// =============================================================================

/// Tiers exported as columns, in order.
///
/// Single-tier mode exports the raw base quantity, so its one column is the
/// base tier.
fn export_tiers(mode: DisplayMode, include_base_unit: bool) -> &'static [UnitTier] {
    match mode {
        DisplayMode::PerUnitSelection if include_base_unit => &UnitTier::ALL,
        DisplayMode::PerUnitSelection => &[UnitTier::Pack, UnitTier::Dozen],
        DisplayMode::SingleTier(_) => &[UnitTier::Unit],
    }
}

/// Quantity values for one export row.
///
/// - `PerUnitSelection`: `[pack, dozen]`, plus `unit` when `include_base_unit`.
/// - `SingleTier(_)`: `[quantity]`, unrounded.
///
/// ```rust
/// use wms_core::export::to_export_columns;
/// use wms_core::{DisplayMode, UnitConversion, UnitTier};
///
/// let conv = UnitConversion::new(29, 12, 2);
/// assert_eq!(to_export_columns(&conv, DisplayMode::PerUnitSelection, true).unwrap(), vec![1, 0, 5]);
/// assert_eq!(to_export_columns(&conv, DisplayMode::PerUnitSelection, false).unwrap(), vec![1, 0]);
/// assert_eq!(to_export_columns(&conv, DisplayMode::SingleTier(UnitTier::Pack), true).unwrap(), vec![29]);
/// ```
pub fn to_export_columns(
    input: &UnitConversion,
    mode: DisplayMode,
    include_base_unit: bool,
) -> CoreResult<Vec<u64>> {
    match mode {
        DisplayMode::PerUnitSelection => {
            let parts = decompose(input)?;
            Ok(export_tiers(mode, include_base_unit)
                .iter()
                .map(|tier| parts.tier(*tier))
                .collect())
        }
        DisplayMode::SingleTier(_) => Ok(vec![base_quantity("quantity", input.quantity)?]),
    }
}

/// Column headers matching [`to_export_columns`] in order and length.
///
/// Headers are per sheet, not per item, so only the caller's labels apply.
pub fn export_column_headers(
    mode: DisplayMode,
    include_base_unit: bool,
    labels: &UnitLabels,
) -> Vec<String> {
    export_tiers(mode, include_base_unit)
        .iter()
        .map(|tier| labels.fallback(*tier).to_string())
        .collect()
}

// =============================================================================
// Export Sheet
// =============================================================================

/// One spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(u64),
}

impl Cell {
    fn to_tsv_field(&self) -> String {
        match self {
            // Tabs and newlines would break the row structure.
            Cell::Text(text) => text.replace(['\t', '\n', '\r'], " "),
            Cell::Number(n) => n.to_string(),
        }
    }
}

/// Header row plus data rows for a spreadsheet export.
///
/// ## Shape
/// Each row is `leading text cells ++ quantity cells`. Leading cells (item
/// code, name, bin...) are chosen by the caller; quantity cells come from
/// [`to_export_columns`] under the sheet's mode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSheet {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    #[serde(skip)]
    leading_columns: usize,
    #[serde(skip)]
    mode: DisplayMode,
    #[serde(skip)]
    include_base_unit: bool,
}

impl ExportSheet {
    /// Creates an empty sheet.
    pub fn new(
        leading_headers: &[&str],
        mode: DisplayMode,
        include_base_unit: bool,
        labels: &UnitLabels,
    ) -> Self {
        let mut headers: Vec<String> = leading_headers.iter().map(|h| h.to_string()).collect();
        headers.extend(export_column_headers(mode, include_base_unit, labels));

        ExportSheet {
            headers,
            rows: Vec::new(),
            leading_columns: leading_headers.len(),
            mode,
            include_base_unit,
        }
    }

    /// Appends a row.
    ///
    /// ## Errors
    /// - `ColumnMismatch` if `leading` doesn't match the leading headers
    /// - `InvalidArgument` if the quantity is negative
    pub fn push_row(&mut self, leading: Vec<String>, input: &UnitConversion) -> CoreResult<()> {
        if leading.len() != self.leading_columns {
            return Err(CoreError::ColumnMismatch {
                expected: self.leading_columns,
                actual: leading.len(),
            });
        }

        let quantities = to_export_columns(input, self.mode, self.include_base_unit)?;
        let mut row: Vec<Cell> = leading.into_iter().map(Cell::Text).collect();
        row.extend(quantities.into_iter().map(Cell::Number));
        self.rows.push(row);
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the sheet as tab-separated values, header first.
    pub fn to_tsv(&self) -> String {
        let mut out = self
            .headers
            .iter()
            .map(|h| Cell::Text(h.clone()).to_tsv_field())
            .collect::<Vec<_>>()
            .join("\t");
        out.push('\n');

        for row in &self.rows {
            let line = row
                .iter()
                .map(Cell::to_tsv_field)
                .collect::<Vec<_>>()
                .join("\t");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// File name for the generated workbook, e.g. `stock-20261019-1430.xlsx`.
    pub fn file_name(prefix: &str, generated_at: DateTime<Utc>) -> String {
        format!("{}-{}.xlsx", prefix, generated_at.format("%Y%m%d-%H%M"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
