//! # reindex-client
//!
//! The collection-client boundary consumed by the reindex engine.
//!
//! [`CollectionClient`] is the contract an engine drives: a query-and-
//! paginate read, a pagination continuation, a batched write, and the
//! destination-collection create step. Implementations own transport,
//! pooling, and wire serialization; the engine only sees typed results.
//!
//! [`InMemoryCollectionStore`] is an embedded implementation backed by a
//! process-local map, used by the workspace's tests and by callers that
//! want a local backend without a server.

pub mod client;
pub mod error;
pub mod memory;

pub use client::{CollectionClient, SearchRequest};
pub use error::ClientError;
pub use memory::InMemoryCollectionStore;
