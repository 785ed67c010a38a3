//! # Rendering
//!
//! Turns aggregated rows into the two outputs the views need: a display table
//! (one formatted quantity string per row) and an export sheet.

use wms_core::{AggregatedLine, CoreResult, ExportSheet, LineGrouping, StockFormatter};

use crate::config::ReportConfig;

/// Placeholder for rows the engine rejects.
const INVALID_QUANTITY: &str = "-";

/// Renders a plain-text stock table.
///
/// ```text
/// ITEM    NAME          QUANTITY
/// A-100   Water 500ml   1 Box, 5 Unit
/// ```
pub fn render_table(lines: &[AggregatedLine], formatter: &StockFormatter) -> String {
    let rows: Vec<[String; 3]> = lines
        .iter()
        .map(|line| {
            let item = match &line.bin_code {
                Some(bin) => format!("{} @ {}", line.item_code, bin),
                None => line.item_code.clone(),
            };
            [
                item,
                line.item_name.clone(),
                formatter.format_or(&line.conversion(), INVALID_QUANTITY),
            ]
        })
        .collect();

    let header = ["ITEM".to_string(), "NAME".to_string(), "QUANTITY".to_string()];
    let item_width = column_width(&header, &rows, 0);
    let name_width = column_width(&header, &rows, 1);

    std::iter::once(&header)
        .chain(rows.iter())
        .map(|[item, name, quantity]| {
            format!(
                "{:<item_width$}  {:<name_width$}  {}",
                item,
                name,
                quantity,
                item_width = item_width,
                name_width = name_width
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn column_width(header: &[String; 3], rows: &[[String; 3]], column: usize) -> usize {
    rows.iter()
        .map(|row| row[column].chars().count())
        .chain(std::iter::once(header[column].chars().count()))
        .max()
        .unwrap_or(0)
}

/// Builds the export sheet for aggregated rows.
pub fn build_export(lines: &[AggregatedLine], config: &ReportConfig) -> CoreResult<ExportSheet> {
    let with_bin = config.grouping == LineGrouping::ItemAndBin;
    let leading: &[&str] = if with_bin {
        &["Item Code", "Item Name", "Bin"]
    } else {
        &["Item Code", "Item Name"]
    };

    let mut sheet = ExportSheet::new(
        leading,
        config.units.display_mode(),
        config.units.include_base_unit(),
        &config.labels,
    );

    for line in lines {
        let mut cells = vec![line.item_code.clone(), line.item_name.clone()];
        if with_bin {
            cells.push(line.bin_code.clone().unwrap_or_default());
        }
        sheet.push_row(cells, &line.conversion())?;
    }
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wms_core::{aggregate_lines, DocumentLine, UnitLabels, UnitTier};

    fn lines(grouping: LineGrouping) -> Vec<AggregatedLine> {
        let raw = vec![
            DocumentLine {
                item_code: "A-100".to_string(),
                item_name: "Water 500ml".to_string(),
                bin_code: Some("01".to_string()),
                quantity: 29,
                num_in_buy: 12,
                pur_pack_un: 2,
                buy_unit_msr: None,
                pur_pack_msr: Some("Box".to_string()),
            },
            DocumentLine {
                item_code: "B-2".to_string(),
                item_name: "Soap".to_string(),
                bin_code: None,
                quantity: 0,
                num_in_buy: 6,
                pur_pack_un: 4,
                buy_unit_msr: None,
                pur_pack_msr: None,
            },
        ];
        aggregate_lines(&raw, grouping).unwrap()
    }

    #[test]
    fn test_render_table() {
        let formatter = StockFormatter::default();
        let table = render_table(&lines(LineGrouping::Item), &formatter);
        assert_eq!(
            table,
            "ITEM   NAME         QUANTITY\n\
             A-100  Water 500ml  1 Box, 5 Unit\n\
             B-2    Soap         0"
        );
    }

    #[test]
    fn test_render_table_with_bins() {
        let formatter = StockFormatter::default();
        let table = render_table(&lines(LineGrouping::ItemAndBin), &formatter);
        assert!(table.contains("A-100 @ 01"));
    }

    #[test]
    fn test_build_export() {
        let config = ReportConfig::default();
        let sheet = build_export(&lines(LineGrouping::Item), &config).unwrap();
        assert_eq!(
            sheet.to_tsv(),
            "Item Code\tItem Name\tPack\tDozen\tUnit\n\
             A-100\tWater 500ml\t1\t0\t5\n\
             B-2\tSoap\t0\t0\t0\n"
        );
    }

    #[test]
    fn test_build_export_single_tier_with_bins() {
        let mut config = ReportConfig::default();
        config.units.enable_unit_selection = false;
        config.units.default_unit_type = UnitTier::Pack;
        config.grouping = LineGrouping::ItemAndBin;
        config.labels = UnitLabels {
            unit_label: "Qty".to_string(),
            ..UnitLabels::default()
        };

        let sheet = build_export(&lines(LineGrouping::ItemAndBin), &config).unwrap();
        assert_eq!(sheet.headers(), ["Item Code", "Item Name", "Bin", "Qty"]);
        assert_eq!(
            sheet.to_tsv().lines().nth(1),
            Some("A-100\tWater 500ml\t01\t29")
        );
    }
}
