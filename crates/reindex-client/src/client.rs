//! The collection-client contract.

use std::time::Duration;

use reindex_types::{Ack, CollectionSettings, CreateSpec, CursorToken, PageResult, WriteItem, WriteResult};

use crate::error::ClientError;

/// Parameters for a query-and-paginate read.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Collection to read from
    pub collection: String,

    /// Optional query filter
    pub query: Option<serde_json::Value>,

    /// Optional document-type filter
    pub doc_type: Option<String>,

    /// Offset of the first document
    pub from: usize,

    /// Documents per page
    pub size: usize,

    /// Pagination lease for the returned cursor
    pub lease: Duration,
}

impl SearchRequest {
    /// Create a read over a whole collection.
    pub fn new(collection: impl Into<String>, size: usize, lease: Duration) -> Self {
        Self {
            collection: collection.into(),
            query: None,
            doc_type: None,
            from: 0,
            size,
            lease,
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

    /// Set the starting offset.
    pub fn with_from(mut self, from: usize) -> Self {
        self.from = from;
        self
    }
}

/// A client against a document-collection backend.
///
/// One call is outstanding at a time; implementations do not retry. The
/// engine validates every returned result and aborts the operation on the
/// first transport error or invalid response.
pub trait CollectionClient: Send + Sync {
    /// Fetch the current settings/schema of a collection.
    fn get_collection_settings(&self, name: &str) -> Result<CollectionSettings, ClientError>;

    /// Create a collection from a creation spec.
    fn create_collection(&self, spec: &CreateSpec) -> Result<Ack, ClientError>;

    /// Run a query and open a pagination cursor over its matches.
    fn search(&self, request: &SearchRequest) -> Result<PageResult, ClientError>;

    /// Continue a pagination cursor under a fresh lease.
    ///
    /// A valid result with no documents signals exhaustion.
    fn continue_pagination(
        &self,
        lease: Duration,
        cursor: &CursorToken,
    ) -> Result<PageResult, ClientError>;

    /// Write a batch of items in one call.
    fn bulk_write(&self, items: &[WriteItem]) -> Result<WriteResult, ClientError>;
}
