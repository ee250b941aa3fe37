//! Per-page progress events.

use serde::{Deserialize, Serialize};

use crate::page::PageResult;
use crate::write::WriteResult;

/// Read-only snapshot of one completed page.
///
/// Emitted exactly once per page whose read and write both succeeded, in
/// page order. Page indices are contiguous starting at 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// 0-based page index
    pub page_index: usize,

    /// The read result the page came from
    pub read: PageResult,

    /// The write result that made the page durable
    pub write: WriteResult,
}

impl ProgressEvent {
    /// Bind a page index to its read and write results.
    pub fn new(page_index: usize, read: PageResult, write: WriteResult) -> Self {
        Self {
            page_index,
            read,
            write,
        }
    }

    /// Whether both halves of the page succeeded.
    pub fn is_valid(&self) -> bool {
        self.read.is_valid() && self.write.is_valid()
    }

    /// Number of documents the page carried.
    pub fn document_count(&self) -> usize {
        self.read.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SourceDocument;
    use crate::write::{WriteOutcome, WriteResult};
    use serde_json::json;

    #[test]
    fn test_event_validity_is_conjunction() {
        let read = PageResult::new(1, vec![SourceDocument::new("a", json!({}))], None);
        let write = WriteResult::from_outcomes(vec![WriteOutcome::ok("a", "dest")]);
        let event = ProgressEvent::new(0, read.clone(), write);
        assert!(event.is_valid());
        assert_eq!(event.document_count(), 1);

        let failed_write = WriteResult::invalid("boom");
        let event = ProgressEvent::new(0, read, failed_write);
        assert!(!event.is_valid());
    }
}
