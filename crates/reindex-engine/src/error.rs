//! Error taxonomy for reindex operations.

use thiserror::Error;

/// Fatal failures of a reindex operation.
///
/// Every failure is caught at the operation boundary and delivered through
/// the sink's error channel; none propagate as panics and none are retried
/// internally. Variants carry the diagnostic from the underlying response
/// or client error where one was available.
#[derive(Error, Debug)]
pub enum ReindexError {
    /// Source or destination reference resolved to nothing
    #[error("Invalid reindex request: {0}")]
    InvalidRequest(String),

    /// Source collection holds no matching documents
    #[error("Source collection {collection} does not contain any documents")]
    SourceEmpty {
        /// Resolved source collection name
        collection: String,
    },

    /// Destination-collection creation failed or was rejected
    #[error("Failed to create destination collection {collection}: {diagnostic}")]
    DestinationCreateFailed {
        /// Resolved destination collection name
        collection: String,
        /// Underlying response or transport diagnostic
        diagnostic: String,
    },

    /// A read or pagination continuation failed
    #[error("Reindex failed while reading from {collection}: {diagnostic}")]
    ReadFailed {
        /// Resolved source collection name
        collection: String,
        /// Underlying response or transport diagnostic
        diagnostic: String,
    },

    /// A bulk write failed; the page was never emitted
    #[error("Reindex failed during bulk write of page {page} to {collection}: {diagnostic}")]
    WriteFailed {
        /// Resolved destination collection name
        collection: String,
        /// 0-based index of the page that failed
        page: usize,
        /// Underlying response or transport diagnostic
        diagnostic: String,
    },
}
