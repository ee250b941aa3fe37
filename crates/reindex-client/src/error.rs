//! Error types for collection clients.

use thiserror::Error;

/// Errors a collection client can raise.
///
/// These cover transport-level faults. Server-side rejections surface as
/// `Ok` results whose validity flag is false, not as errors.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure between client and backend
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Named collection does not exist
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// Cursor token was never issued or has been discarded
    #[error("Unknown pagination cursor: {0}")]
    UnknownCursor(String),

    /// Cursor lease elapsed before the continuation arrived
    #[error("Pagination cursor expired: {0}")]
    CursorExpired(String),

    /// Store lock poisoned by a panicking holder
    #[error("Store lock poisoned: {0}")]
    StoreLocked(String),
}
