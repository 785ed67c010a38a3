//! # Warehouse Documents
//!
//! The JSON shape the backend serves for a document and its lines.
//!
//! ```json
//! {
//!   "docNum": 1042,
//!   "kind": "counting",
//!   "lines": [
//!     { "itemCode": "A-100", "itemName": "Water 500ml", "binCode": "01-A-01",
//!       "quantity": 29, "numInBuy": 12, "purPackUn": 2,
//!       "buyUnitMsr": "Dozen", "purPackMsr": "Box" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

use wms_core::validation::validate_line;
use wms_core::{CoreResult, DocumentLine, ValidationError};

use crate::error::{ReportError, ReportResult};
use crate::MAX_DOCUMENT_LINES;

/// Kind of warehouse document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    GoodsReceipt,
    Picking,
    Counting,
    Transfer,
}

impl DocumentKind {
    /// Prefix used for export file names.
    pub fn export_prefix(&self) -> &'static str {
        match self {
            DocumentKind::GoodsReceipt => "goods-receipt",
            DocumentKind::Picking => "picking",
            DocumentKind::Counting => "counting",
            DocumentKind::Transfer => "transfer",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::GoodsReceipt => write!(f, "Goods Receipt"),
            DocumentKind::Picking => write!(f, "Picking"),
            DocumentKind::Counting => write!(f, "Counting"),
            DocumentKind::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A warehouse document with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub doc_num: i64,
    pub kind: DocumentKind,
    #[serde(default)]
    pub lines: Vec<DocumentLine>,
}

impl Document {
    /// Parses a document from JSON text.
    pub fn from_json(text: &str, source_name: &str) -> ReportResult<Self> {
        serde_json::from_str(text).map_err(|source| ReportError::Document {
            path: source_name.to_string(),
            source,
        })
    }

    /// Reads and parses a document file.
    pub async fn from_file(path: &Path) -> ReportResult<Self> {
        let name = path.display().to_string();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ReportError::Io {
                path: name.clone(),
                source,
            })?;

        let document = Document::from_json(&text, &name)?;
        debug!(
            doc_num = document.doc_num,
            kind = %document.kind,
            lines = document.lines.len(),
            "Document loaded"
        );
        Ok(document)
    }

    /// Validates the line count, then every line, failing on the first bad one.
    pub fn validate(&self, strict_factors: bool) -> CoreResult<()> {
        if self.lines.len() > MAX_DOCUMENT_LINES {
            warn!(
                doc_num = self.doc_num,
                lines = self.lines.len(),
                "Document exceeds line limit"
            );
            return Err(ValidationError::OutOfRange {
                field: "lines".to_string(),
                min: 0,
                max: MAX_DOCUMENT_LINES as i64,
            }
            .into());
        }

        for (index, line) in self.lines.iter().enumerate() {
            if let Err(err) = validate_line(line, strict_factors) {
                warn!(
                    doc_num = self.doc_num,
                    line = index,
                    item_code = %line.item_code,
                    error = %err,
                    "Invalid document line"
                );
                return Err(err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wms_core::CoreError;

    const SAMPLE: &str = r#"{
        "docNum": 1042,
        "kind": "counting",
        "lines": [
            { "itemCode": "A-100", "itemName": "Water 500ml", "binCode": "01-A-01",
              "quantity": 29, "numInBuy": 12, "purPackUn": 2,
              "buyUnitMsr": "Dozen", "purPackMsr": "Box" },
            { "itemCode": "B-200", "itemName": "Soap", "binCode": null,
              "quantity": 3, "numInBuy": 0, "purPackUn": 1,
              "buyUnitMsr": null, "purPackMsr": null }
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let doc = Document::from_json(SAMPLE, "sample.json").unwrap();
        assert_eq!(doc.doc_num, 1042);
        assert_eq!(doc.kind, DocumentKind::Counting);
        assert_eq!(doc.lines.len(), 2);
        assert_eq!(doc.lines[0].pur_pack_msr.as_deref(), Some("Box"));
        assert_eq!(doc.lines[1].bin_code, None);
    }

    #[test]
    fn test_parse_error_names_source() {
        let err = Document::from_json("{ not json", "broken.json").unwrap_err();
        assert!(matches!(err, ReportError::Document { ref path, .. } if path == "broken.json"));
    }

    #[test]
    fn test_validate_lenient_and_strict() {
        let doc = Document::from_json(SAMPLE, "sample.json").unwrap();
        assert!(doc.validate(false).is_ok());
        assert!(matches!(doc.validate(true), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_validate_line_limit() {
        let mut doc = Document::from_json(SAMPLE, "sample.json").unwrap();
        let template = doc.lines[0].clone();
        doc.lines = vec![template; MAX_DOCUMENT_LINES];
        assert!(doc.validate(false).is_ok());

        doc.lines.push(doc.lines[0].clone());
        let err = doc.validate(false).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { ref field, max: 500, .. })
                if field == "lines"
        ));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(DocumentKind::GoodsReceipt.to_string(), "Goods Receipt");
        assert_eq!(DocumentKind::Transfer.export_prefix(), "transfer");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = Document::from_file(Path::new("/nonexistent/doc.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
