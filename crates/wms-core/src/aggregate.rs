//! # Document Line Aggregation
//!
//! Report views (goods receipt, counting, transfer) show one row per item,
//! or per item and bin, with the quantities of all matching lines summed.
//!
//! ```text
//! lines                          grouped by Item
//! ─────────────────────────      ─────────────────────────
//! A-100  bin 01   10             A-100   35   (2 lines)
//! B-200  bin 01    4      ──►    B-200    4   (1 line)
//! A-100  bin 02   25
//! ```
//!
//! Output order is the order each group first appears in the input.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::quantity::base_quantity;
use crate::types::{DocumentLine, UnitConversion};

/// How lines are grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum LineGrouping {
    /// One row per item code.
    #[default]
    Item,
    /// One row per item code and bin location.
    ItemAndBin,
}

/// A summed report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedLine {
    pub item_code: String,
    pub item_name: String,
    /// Set only under [`LineGrouping::ItemAndBin`].
    pub bin_code: Option<String>,
    /// Total base units of all grouped lines.
    pub quantity: u64,
    pub num_in_buy: i64,
    pub pur_pack_un: i64,
    pub buy_unit_msr: Option<String>,
    pub pur_pack_msr: Option<String>,
    /// Number of source lines in this group.
    pub line_count: usize,
}

impl AggregatedLine {
    fn start(line: &DocumentLine, grouping: LineGrouping) -> Self {
        AggregatedLine {
            item_code: line.item_code.clone(),
            item_name: line.item_name.clone(),
            bin_code: match grouping {
                LineGrouping::Item => None,
                LineGrouping::ItemAndBin => line.bin_code.clone(),
            },
            quantity: 0,
            num_in_buy: line.num_in_buy,
            pur_pack_un: line.pur_pack_un,
            buy_unit_msr: line.buy_unit_msr.clone(),
            pur_pack_msr: line.pur_pack_msr.clone(),
            line_count: 0,
        }
    }

    /// Engine input for the summed quantity.
    pub fn conversion(&self) -> UnitConversion {
        UnitConversion {
            // Sums are capped at i64::MAX by aggregate_lines.
            quantity: self.quantity as i64,
            num_in_buy: self.num_in_buy,
            pur_pack_un: self.pur_pack_un,
            buy_unit_msr: self.buy_unit_msr.clone(),
            pur_pack_msr: self.pur_pack_msr.clone(),
        }
    }
}

/// Groups document lines and sums their quantities.
///
/// Unit setup (factors, labels, name) is taken from the first line of each
/// group; it is item master data and identical across lines of one item.
///
/// ## Errors
/// - `InvalidArgument` for a negative line quantity
/// - `QuantityOverflow` if a group total exceeds `i64::MAX`
pub fn aggregate_lines(
    lines: &[DocumentLine],
    grouping: LineGrouping,
) -> CoreResult<Vec<AggregatedLine>> {
    let mut index: HashMap<(&str, Option<&str>), usize> = HashMap::new();
    let mut rows: Vec<AggregatedLine> = Vec::new();

    for line in lines {
        let quantity = base_quantity("quantity", line.quantity)?;
        let key = match grouping {
            LineGrouping::Item => (line.item_code.as_str(), None),
            LineGrouping::ItemAndBin => (line.item_code.as_str(), line.bin_code.as_deref()),
        };

        let slot = *index.entry(key).or_insert_with(|| {
            rows.push(AggregatedLine::start(line, grouping));
            rows.len() - 1
        });

        let row = &mut rows[slot];
        row.quantity = row
            .quantity
            .checked_add(quantity)
            .filter(|total| *total <= i64::MAX as u64)
            .ok_or_else(|| CoreError::QuantityOverflow {
                context: format!("item {}", line.item_code),
            })?;
        row.line_count += 1;
    }

    debug!(
        lines = lines.len(),
        groups = rows.len(),
        ?grouping,
        "aggregated document lines"
    );
    Ok(rows)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item: &str, bin: Option<&str>, quantity: i64) -> DocumentLine {
        DocumentLine {
            item_code: item.to_string(),
            item_name: format!("{} name", item),
            bin_code: bin.map(str::to_string),
            quantity,
            num_in_buy: 12,
            pur_pack_un: 2,
            buy_unit_msr: None,
            pur_pack_msr: None,
        }
    }

    #[test]
    fn test_group_by_item() {
        let lines = vec![
            line("A-100", Some("01"), 10),
            line("B-200", Some("01"), 4),
            line("A-100", Some("02"), 25),
        ];
        let rows = aggregate_lines(&lines, LineGrouping::Item).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].item_code, "A-100");
        assert_eq!(rows[0].quantity, 35);
        assert_eq!(rows[0].line_count, 2);
        assert_eq!(rows[0].bin_code, None);
        assert_eq!(rows[1].item_code, "B-200");
        assert_eq!(rows[1].quantity, 4);
    }

    #[test]
    fn test_group_by_item_and_bin() {
        let lines = vec![
            line("A-100", Some("01"), 10),
            line("A-100", Some("02"), 25),
            line("A-100", Some("01"), 5),
            line("A-100", None, 1),
        ];
        let rows = aggregate_lines(&lines, LineGrouping::ItemAndBin).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].bin_code.as_deref(), Some("01"));
        assert_eq!(rows[0].quantity, 15);
        assert_eq!(rows[1].bin_code.as_deref(), Some("02"));
        assert_eq!(rows[1].quantity, 25);
        assert_eq!(rows[2].bin_code, None);
        assert_eq!(rows[2].quantity, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_lines(&[], LineGrouping::Item).unwrap().is_empty());
    }

    #[test]
    fn test_negative_line_rejected() {
        let lines = vec![line("A-100", None, 3), line("A-100", None, -1)];
        assert!(matches!(
            aggregate_lines(&lines, LineGrouping::Item),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_overflow_rejected() {
        let lines = vec![line("A-100", None, i64::MAX), line("A-100", None, 1)];
        assert!(matches!(
            aggregate_lines(&lines, LineGrouping::Item),
            Err(CoreError::QuantityOverflow { .. })
        ));
    }

    #[test]
    fn test_conversion_carries_unit_setup() {
        let rows = aggregate_lines(&[line("A-100", None, 29)], LineGrouping::Item).unwrap();
        let conv = rows[0].conversion();
        assert_eq!(conv, UnitConversion::new(29, 12, 2));
    }
}
