//! # Line Store
//!
//! Where document lines live while a process works on them. In the app this
//! seam is the backend's document endpoints; here an in-memory store backs
//! the CLI and the tests.
//!
//! ## Thread Safety
//! The in-memory store wraps its lines in `Arc<RwLock<T>>`:
//! 1. Reloads (`load_lines`) take the read lock and can run concurrently
//! 2. `add_line` takes the write lock exclusively
//! 3. Clones share the same lines

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use wms_core::DocumentLine;

use crate::error::{ReportError, ReportResult};
use crate::MAX_DOCUMENT_LINES;

/// Storage for the lines of one open document.
#[async_trait]
pub trait LineStore: Send + Sync {
    /// Returns all lines in insertion order.
    async fn load_lines(&self) -> ReportResult<Vec<DocumentLine>>;

    /// Appends a line.
    async fn add_line(&self, line: DocumentLine) -> ReportResult<()>;
}

/// In-memory line store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLineStore {
    lines: Arc<RwLock<Vec<DocumentLine>>>,
}

impl InMemoryLineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with a document's lines.
    pub fn from_lines(lines: Vec<DocumentLine>) -> Self {
        InMemoryLineStore {
            lines: Arc::new(RwLock::new(lines)),
        }
    }

    pub async fn len(&self) -> usize {
        self.lines.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.lines.read().await.is_empty()
    }
}

#[async_trait]
impl LineStore for InMemoryLineStore {
    async fn load_lines(&self) -> ReportResult<Vec<DocumentLine>> {
        Ok(self.lines.read().await.clone())
    }

    async fn add_line(&self, line: DocumentLine) -> ReportResult<()> {
        let mut lines = self.lines.write().await;
        if lines.len() >= MAX_DOCUMENT_LINES {
            return Err(ReportError::Store(format!(
                "document cannot have more than {} lines",
                MAX_DOCUMENT_LINES
            )));
        }

        debug!(item_code = %line.item_code, quantity = line.quantity, "Adding line");
        lines.push(line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item: &str, quantity: i64) -> DocumentLine {
        DocumentLine {
            item_code: item.to_string(),
            item_name: item.to_string(),
            bin_code: None,
            quantity,
            num_in_buy: 1,
            pur_pack_un: 1,
            buy_unit_msr: None,
            pur_pack_msr: None,
        }
    }

    #[tokio::test]
    async fn test_add_and_load() {
        let store = InMemoryLineStore::new();
        assert!(store.is_empty().await);

        store.add_line(line("A", 1)).await.unwrap();
        store.add_line(line("B", 2)).await.unwrap();

        let lines = store.load_lines().await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item_code, "A");
        assert_eq!(lines[1].quantity, 2);
    }

    #[tokio::test]
    async fn test_clones_share_lines() {
        let store = InMemoryLineStore::from_lines(vec![line("A", 1)]);
        let other = store.clone();
        other.add_line(line("B", 1)).await.unwrap();
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_line_limit() {
        let lines = (0..MAX_DOCUMENT_LINES).map(|i| line(&i.to_string(), 1)).collect();
        let store = InMemoryLineStore::from_lines(lines);
        let err = store.add_line(line("X", 1)).await.unwrap_err();
        assert!(matches!(err, ReportError::Store(_)));
        assert_eq!(store.len().await, MAX_DOCUMENT_LINES);
    }

    #[tokio::test]
    async fn test_concurrent_adds() {
        let store = InMemoryLineStore::new();
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.add_line(line(&format!("I-{}", i), i)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(store.len().await, 20);
    }
}
