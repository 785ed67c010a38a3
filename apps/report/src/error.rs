//! # Report Error Type
//!
//! Unified error type for the report app.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in wms-report                             │
//! │                                                                         │
//! │  main()                                                                 │
//! │    │                                                                    │
//! │    ├── ReportConfig::load()  ── ConfigError ─────────┐                 │
//! │    ├── Document::from_file() ── io / serde_json ─────┤                 │
//! │    ├── aggregate_lines()     ── CoreError ───────────┼──► ReportError  │
//! │    └── render_*()            ── CoreError ───────────┘        │        │
//! │                                                               ▼        │
//! │                                                  stderr + exit code 1  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use wms_core::CoreError;

/// Errors surfaced by the report app.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Reading a document or config file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document JSON could not be parsed.
    #[error("Invalid document {path}: {source}")]
    Document {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The quantity engine rejected the data.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// A line store operation failed.
    #[error("Line store error: {0}")]
    Store(String),
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results with ReportError.
pub type ReportResult<T> = Result<T, ReportError>;
