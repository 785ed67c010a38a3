//! # Document Processes
//!
//! The scan → add line → alert → reload flow shared by counting, picking,
//! transfer and goods-receipt screens.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ScanProcess::scan(request)                                             │
//! │                                                                         │
//! │  1. validate item          ── bad? ──► Alert::error, store untouched   │
//! │  2. amount × tier → base   ── bad? ──► Alert::error, store untouched   │
//! │  3. store.add_line(..).await                                            │
//! │  4. store.load_lines().await → aggregate_lines                          │
//! │  5. Alert::success("A-100: +1 Box, 5 Unit")                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each step awaits the previous one; there is no state machine and nothing
//! runs concurrently within one scan.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use wms_core::quantity::to_base_units;
use wms_core::validation::validate_line;
use wms_core::{
    aggregate_lines, AggregatedLine, CoreError, DocumentLine, LineGrouping, StockFormatter,
    UnitConversion, UnitTier,
};

use crate::error::ReportResult;
use crate::store::LineStore;

// =============================================================================
// Alert
// =============================================================================

/// Alert severity shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// Message shown after a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Alert {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Alert {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.severity == Severity::Success
    }
}

// =============================================================================
// Scan Process
// =============================================================================

/// One scanned entry: an item, the amount typed in, and the tier it was typed in.
///
/// `item.quantity` is ignored; the process fills it from `amount` and `tier`.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub item: DocumentLine,
    pub amount: i64,
    pub tier: UnitTier,
}

/// Result of a scan: the alert plus the freshly reloaded rows.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub alert: Alert,
    pub lines: Vec<AggregatedLine>,
}

/// Scan flow over a line store.
#[derive(Debug, Clone)]
pub struct ScanProcess<S> {
    store: S,
    formatter: StockFormatter,
    grouping: LineGrouping,
    strict_factors: bool,
}

impl<S: LineStore> ScanProcess<S> {
    pub fn new(
        store: S,
        formatter: StockFormatter,
        grouping: LineGrouping,
        strict_factors: bool,
    ) -> Self {
        ScanProcess {
            store,
            formatter,
            grouping,
            strict_factors,
        }
    }

    /// Reloads and aggregates the store's lines.
    pub async fn reload(&self) -> ReportResult<Vec<AggregatedLine>> {
        let lines = self.store.load_lines().await?;
        Ok(aggregate_lines(&lines, self.grouping)?)
    }

    /// Runs one scan.
    ///
    /// Bad input becomes an error alert; only store and aggregation failures
    /// are returned as `Err`.
    pub async fn scan(&self, request: ScanRequest) -> ReportResult<ProcessOutcome> {
        let ScanRequest { mut item, amount, tier } = request;

        let base = match self.resolve_quantity(&item, amount, tier) {
            Ok(base) => base,
            Err(err) => {
                warn!(item_code = %item.item_code, amount, %tier, error = %err, "Scan rejected");
                return Ok(ProcessOutcome {
                    alert: Alert::error(format!("{}: {}", item.item_code, err)),
                    lines: self.reload().await?,
                });
            }
        };

        // Bounded by i64::MAX in to_base_units.
        item.quantity = base as i64;
        let added = self.formatter.format(&item.conversion())?;
        let item_code = item.item_code.clone();

        self.store.add_line(item).await?;
        let lines = self.reload().await?;

        info!(item_code = %item_code, base_units = base, "Scan added");
        Ok(ProcessOutcome {
            alert: Alert::success(format!("{}: +{}", item_code, added)),
            lines,
        })
    }

    fn resolve_quantity(
        &self,
        item: &DocumentLine,
        amount: i64,
        tier: UnitTier,
    ) -> Result<u64, CoreError> {
        let probe = DocumentLine {
            quantity: 0,
            ..item.clone()
        };
        validate_line(&probe, self.strict_factors)?;

        let conversion = UnitConversion {
            quantity: 0,
            ..item.conversion()
        };
        to_base_units(amount, tier, &conversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryLineStore;
    use wms_core::{DisplayMode, UnitLabels};

    fn item(code: &str) -> DocumentLine {
        DocumentLine {
            item_code: code.to_string(),
            item_name: "Water 500ml".to_string(),
            bin_code: Some("01-A-01".to_string()),
            quantity: 0,
            num_in_buy: 12,
            pur_pack_un: 2,
            buy_unit_msr: None,
            pur_pack_msr: Some("Box".to_string()),
        }
    }

    fn process(store: InMemoryLineStore, strict: bool) -> ScanProcess<InMemoryLineStore> {
        ScanProcess::new(
            store,
            StockFormatter::new(DisplayMode::PerUnitSelection, UnitLabels::default()),
            LineGrouping::Item,
            strict,
        )
    }

    #[tokio::test]
    async fn test_scan_adds_and_reloads() {
        let process = process(InMemoryLineStore::new(), false);

        let outcome = process
            .scan(ScanRequest {
                item: item("A-100"),
                amount: 2,
                tier: UnitTier::Dozen,
            })
            .await
            .unwrap();
        assert!(outcome.alert.is_success());
        assert_eq!(outcome.alert.message, "A-100: +1 Box");
        assert_eq!(outcome.lines.len(), 1);
        assert_eq!(outcome.lines[0].quantity, 24);

        let outcome = process
            .scan(ScanRequest {
                item: item("A-100"),
                amount: 5,
                tier: UnitTier::Unit,
            })
            .await
            .unwrap();
        assert_eq!(outcome.alert.message, "A-100: +5 Unit");
        assert_eq!(outcome.lines[0].quantity, 29);
        assert_eq!(outcome.lines[0].line_count, 2);
    }

    #[tokio::test]
    async fn test_negative_amount_leaves_store_untouched() {
        let store = InMemoryLineStore::new();
        let process = process(store.clone(), false);

        let outcome = process
            .scan(ScanRequest {
                item: item("A-100"),
                amount: -1,
                tier: UnitTier::Pack,
            })
            .await
            .unwrap();
        assert_eq!(outcome.alert.severity, Severity::Error);
        assert!(outcome.alert.message.starts_with("A-100: Invalid argument amount"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_strict_factors_reject_bad_master_data() {
        let store = InMemoryLineStore::new();
        let process = process(store.clone(), true);
        let mut bad = item("B-200");
        bad.num_in_buy = 0;

        let outcome = process
            .scan(ScanRequest {
                item: bad,
                amount: 1,
                tier: UnitTier::Unit,
            })
            .await
            .unwrap();
        assert!(!outcome.alert.is_success());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_lenient_factors_normalize() {
        let process = process(InMemoryLineStore::new(), false);
        let mut bad = item("B-200");
        bad.num_in_buy = 0;
        bad.pur_pack_un = 0;

        let outcome = process
            .scan(ScanRequest {
                item: bad,
                amount: 3,
                tier: UnitTier::Pack,
            })
            .await
            .unwrap();
        assert!(outcome.alert.is_success());
        assert_eq!(outcome.lines[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let lines = (0..crate::MAX_DOCUMENT_LINES)
            .map(|i| {
                let mut line = item(&format!("I-{}", i));
                line.quantity = 1;
                line
            })
            .collect();
        let process = process(InMemoryLineStore::from_lines(lines), false);

        let result = process
            .scan(ScanRequest {
                item: item("A-100"),
                amount: 1,
                tier: UnitTier::Unit,
            })
            .await;
        assert!(result.is_err());
    }
}
