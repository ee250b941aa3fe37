//! Reindex request configuration.
//!
//! A [`ReindexRequest`] describes one whole operation and is immutable once
//! the operation starts. Page size and pagination lease fall back to
//! defaults when unset; everything else is optional.

use std::time::Duration;

use crate::collection::{CollectionRef, CreateSpec};

/// Default number of documents per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Default pagination lease duration.
pub const DEFAULT_SCROLL: Duration = Duration::from_secs(120);

/// Caller-constructed description of a reindex operation.
#[derive(Debug, Clone)]
pub struct ReindexRequest {
    /// Collection to read from
    pub source: CollectionRef,

    /// Collection to write into
    pub destination: CollectionRef,

    /// Optional query filter over the source
    pub query: Option<serde_json::Value>,

    /// Optional document-type filter over the source
    pub doc_type: Option<String>,

    /// Documents per page; defaults via [`ReindexRequest::page_size`]
    pub page_size: Option<usize>,

    /// Pagination lease; defaults via [`ReindexRequest::scroll`]
    pub scroll: Option<Duration>,

    /// Destination-creation override. When present it takes precedence
    /// over the settings-copy default.
    pub create_spec: Option<CreateSpec>,
}

impl ReindexRequest {
    /// Describe a reindex from `source` into `destination`.
    pub fn new(source: impl Into<CollectionRef>, destination: impl Into<CollectionRef>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            query: None,
            doc_type: None,
            page_size: None,
            scroll: None,
            create_spec: None,
        }
    }

    /// Set the query filter.
    pub fn with_query(mut self, query: serde_json::Value) -> Self {
        self.query = Some(query);
        self
    }

    /// Set the document-type filter.
    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set the pagination lease duration.
    pub fn with_scroll(mut self, scroll: Duration) -> Self {
        self.scroll = Some(scroll);
        self
    }

    /// Set the destination-creation override.
    pub fn with_create_spec(mut self, spec: CreateSpec) -> Self {
        self.create_spec = Some(spec);
        self
    }

    /// Effective page size.
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Effective pagination lease.
    pub fn scroll(&self) -> Duration {
        self.scroll.unwrap_or(DEFAULT_SCROLL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let request = ReindexRequest::new("v1", "v2");
        assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(request.scroll(), DEFAULT_SCROLL);
        assert!(request.query.is_none());
        assert!(request.doc_type.is_none());
        assert!(request.create_spec.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let request = ReindexRequest::new("v1", "v2")
            .with_query(json!({"term": {"kind": "article"}}))
            .with_doc_type("article")
            .with_page_size(25)
            .with_scroll(Duration::from_secs(30));

        assert_eq!(request.page_size(), 25);
        assert_eq!(request.scroll(), Duration::from_secs(30));
        assert_eq!(request.doc_type.as_deref(), Some("article"));
        assert!(request.query.is_some());
    }
}
