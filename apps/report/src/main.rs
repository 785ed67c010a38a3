//! # wms-report
//!
//! Prints a warehouse document as a stock table or a tab-separated export.
//!
//! ## Usage
//! ```bash
//! # Display table (one formatted quantity per item)
//! wms-report ./counting-1042.json
//!
//! # Export sheet, one row per item and bin
//! wms-report ./counting-1042.json --export --group-by-bin
//!
//! # Apply scans before rendering: ITEM:AMOUNT[:TIER]
//! wms-report ./counting-1042.json --add A-100:2:pack --add B-200:5
//!
//! # Explicit config file (otherwise $WMS_CONFIG, then defaults)
//! wms-report ./counting-1042.json --config ./wms.toml
//! ```
//!
//! The report goes to stdout; logs and scan alerts go to stderr.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Parse arguments
//! 3. Load config (env > TOML file > defaults), apply flag overrides
//! 4. Read the document
//! 5. Run the report and print it

use chrono::Utc;
use std::env;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wms_core::LineGrouping;
use wms_report::{run_report, Document, OutputFormat, ReportConfig, ScanArg};

const USAGE: &str = "\
wms-report: warehouse document stock report

Usage: wms-report <DOCUMENT.json> [OPTIONS]

Options:
  -c, --config <PATH>       TOML config file (default: $WMS_CONFIG)
  -e, --export              Print a tab-separated export sheet
  -b, --group-by-bin        One row per item and bin
  -a, --add <ITEM:AMOUNT[:TIER]>
                            Apply a scan before rendering (repeatable)
  -h, --help                Show this help message";

#[derive(Debug, Default)]
struct Args {
    document: Option<PathBuf>,
    config: Option<PathBuf>,
    export: bool,
    group_by_bin: bool,
    scans: Vec<ScanArg>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let value = args.get(i + 1).ok_or("--config needs a path")?;
                parsed.config = Some(PathBuf::from(value));
                i += 1;
            }
            "--export" | "-e" => parsed.export = true,
            "--group-by-bin" | "-b" => parsed.group_by_bin = true,
            "--add" | "-a" => {
                let value = args.get(i + 1).ok_or("--add needs ITEM:AMOUNT[:TIER]")?;
                parsed
                    .scans
                    .push(value.parse().map_err(|e| format!("{}", e))?);
                i += 1;
            }
            "--help" | "-h" => parsed.help = true,
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {}", other));
            }
            other => {
                if parsed.document.is_some() {
                    return Err(format!("Unexpected argument: {}", other));
                }
                parsed.document = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let raw: Vec<String> = env::args().collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }
    let Some(document_path) = args.document else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let mut config = ReportConfig::load(args.config.as_deref())?;
    if args.export {
        config.output = OutputFormat::Export;
    }
    if args.group_by_bin {
        config.grouping = LineGrouping::ItemAndBin;
    }
    info!(
        output = ?config.output,
        grouping = ?config.grouping,
        strict_factors = config.strict_factors,
        "Configuration loaded"
    );

    let document = Document::from_file(&document_path).await?;

    let report = match run_report(document, &config, &args.scans, Utc::now()).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Report failed");
            return Err(e.into());
        }
    };

    for alert in &report.alerts {
        let mark = if alert.is_success() { "✓" } else { "✗" };
        eprintln!("{} {}", mark, alert.message);
    }
    if let Some(name) = &report.file_name {
        info!(file_name = %name, "Export sheet ready");
    }

    print!("{}", report.output);
    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show all debug messages
/// - `RUST_LOG=wms=trace` - Trace level for wms crates only
/// - Default: `info,wms=debug`
///
/// Logs are written to stderr so stdout carries only the report.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,wms=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
