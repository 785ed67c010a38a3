//! # wms-report: Warehouse Document Reports
//!
//! Renders a warehouse document as a stock table or a spreadsheet export,
//! optionally after applying scanned entries through the scan process.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        wms-report                                       │
//! │                                                                         │
//! │  main.rs ────► Sets up logging, parses args, loads config              │
//! │                                                                         │
//! │  lib.rs ─────► run_report(): store → scans → reload → render           │
//! │                                                                         │
//! │  config ─────► ReportConfig (env > TOML > defaults)                    │
//! │  document ───► Document JSON in, line validation                       │
//! │  store ──────► LineStore trait, InMemoryLineStore                      │
//! │  process ────► ScanProcess (scan → add → alert → reload)               │
//! │  render ─────► display table, export sheet                             │
//! │                                                                         │
//! │  All quantity math lives in wms-core.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod process;
pub mod render;
pub mod store;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use wms_core::{StockFormatter, UnitTier};

pub use config::{OutputFormat, ReportConfig};
pub use document::{Document, DocumentKind};
pub use error::{ConfigError, ReportError, ReportResult};
pub use process::{Alert, ScanProcess, ScanRequest};
pub use store::{InMemoryLineStore, LineStore};

/// Maximum lines in one open document.
///
/// Matches the backend's document size limit.
pub const MAX_DOCUMENT_LINES: usize = 500;

// =============================================================================
// Scan Argument
// =============================================================================

/// A scan given on the command line as `ITEM:AMOUNT[:TIER]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanArg {
    pub item_code: String,
    pub amount: i64,
    pub tier: UnitTier,
}

impl FromStr for ScanArg {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidValue(format!("--add {}", s));
        let mut parts = s.split(':');

        let item_code = parts
            .next()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .ok_or_else(invalid)?;
        let amount = parts
            .next()
            .and_then(|a| a.trim().parse::<i64>().ok())
            .ok_or_else(invalid)?;
        let tier = match parts.next() {
            Some(tier) => tier.parse().map_err(|_| invalid())?,
            None => UnitTier::Unit,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(ScanArg {
            item_code: item_code.to_string(),
            amount,
            tier,
        })
    }
}

// =============================================================================
// Report
// =============================================================================

/// Rendered report plus the alerts raised by scans.
#[derive(Debug, Clone)]
pub struct Report {
    pub output: String,
    pub alerts: Vec<Alert>,
    /// Suggested workbook name when the output is an export sheet.
    pub file_name: Option<String>,
}

/// Runs a report over one document.
///
/// ## Steps
/// 1. Validate lines (strict or lenient factors per config)
/// 2. Load lines into an in-memory store
/// 3. Apply each scan through [`ScanProcess`]; the item's unit setup comes
///    from its first line in the document
/// 4. Render the rows from the last scan, or reload when nothing was scanned
pub async fn run_report(
    document: Document,
    config: &ReportConfig,
    scans: &[ScanArg],
    generated_at: DateTime<Utc>,
) -> ReportResult<Report> {
    document.validate(config.strict_factors)?;

    let kind = document.kind;
    let templates = document.lines.clone();
    let formatter = StockFormatter::from_settings(&config.units, config.labels.clone());
    let process = ScanProcess::new(
        InMemoryLineStore::from_lines(document.lines),
        formatter.clone(),
        config.grouping,
        config.strict_factors,
    );

    let mut alerts = Vec::with_capacity(scans.len());
    let mut latest = None;
    for scan in scans {
        let Some(template) = templates.iter().find(|l| l.item_code == scan.item_code) else {
            warn!(item_code = %scan.item_code, "Scanned item not on document");
            alerts.push(Alert::error(format!(
                "{}: item is not on document {}",
                scan.item_code, document.doc_num
            )));
            continue;
        };

        let outcome = process
            .scan(ScanRequest {
                item: template.clone(),
                amount: scan.amount,
                tier: scan.tier,
            })
            .await?;
        alerts.push(outcome.alert);
        latest = Some(outcome.lines);
    }

    let lines = match latest {
        Some(lines) => lines,
        None => process.reload().await?,
    };
    info!(doc_num = document.doc_num, %kind, rows = lines.len(), "Rendering report");

    let report = match config.output {
        OutputFormat::Display => Report {
            output: format!(
                "{} #{}\n{}\n",
                kind,
                document.doc_num,
                render::render_table(&lines, &formatter)
            ),
            alerts,
            file_name: None,
        },
        OutputFormat::Export => Report {
            output: render::build_export(&lines, config)?.to_tsv(),
            alerts,
            file_name: Some(wms_core::ExportSheet::file_name(
                &format!("{}-{}", kind.export_prefix(), document.doc_num),
                generated_at,
            )),
        },
    };
    Ok(report)
}
