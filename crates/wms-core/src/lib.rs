//! # wms-core: Pure Quantity Logic for the Warehouse App
//!
//! This crate is the **single home** of pack/dozen/unit arithmetic. Stock
//! display, spreadsheet export and document reports all call into it instead
//! of repeating the math inline.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Warehouse App Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Frontend views / wms-report CLI                    │   │
//! │  │    Stock tables ──► Count screens ──► Transfer/receipt reports  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ UnitConversion + UnitSettings          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ wms-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ quantity  │  │  display  │  │  export   │  │ aggregate │  │   │
//! │  │   │ decompose │  │  strings  │  │  columns  │  │  grouping │  │   │
//! │  │   │ compose   │  │ formatter │  │  sheet    │  │  sums     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS • INTEGER ARITHMETIC     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          REST backend (documents, item master data)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (UnitConversion, DecomposedQuantity, tiers, labels)
//! - [`quantity`] - Decomposition and its inverse
//! - [`display`] - Display strings and the stock formatter
//! - [`export`] - Export columns, headers and sheets
//! - [`settings`] - User unit settings
//! - [`aggregate`] - Document line grouping
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, safe from any thread
//! 2. **Integer Units**: all quantities are base-unit integers, no floats
//! 3. **Explicit Settings**: display mode and labels are arguments, never globals
//! 4. **Explicit Errors**: negative quantities are typed errors, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use wms_core::display::format_for_display;
//! use wms_core::quantity::decompose;
//! use wms_core::{DisplayMode, UnitConversion, UnitLabels};
//!
//! // 12 units per dozen, 2 dozen per pack
//! let stock = UnitConversion::new(29, 12, 2);
//!
//! let parts = decompose(&stock).unwrap();
//! assert_eq!((parts.pack, parts.dozen, parts.unit), (1, 0, 5));
//!
//! let text = format_for_display(&stock, DisplayMode::PerUnitSelection, &UnitLabels::default());
//! assert_eq!(text.unwrap(), "1 Pack, 5 Unit");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod display;
pub mod error;
pub mod export;
pub mod quantity;
pub mod settings;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregate::{aggregate_lines, AggregatedLine, LineGrouping};
pub use display::{format_for_display, StockFormatter};
pub use error::{CoreError, CoreResult, ValidationError};
pub use export::{export_column_headers, to_export_columns, Cell, ExportSheet};
pub use quantity::{compose, decompose, to_base_units};
pub use settings::UnitSettings;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum item code length accepted from document lines.
pub const MAX_ITEM_CODE_LEN: usize = 50;

/// Maximum length of an item's unit-of-measure label.
pub const MAX_LABEL_LEN: usize = 30;
