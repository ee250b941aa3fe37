//! # reindex-types
//!
//! Shared domain types for the collection reindex engine.
//!
//! This crate defines the data that flows through a reindex operation:
//! - [`SourceDocument`]: one hit read from the source collection
//! - [`WriteItem`]: the destination-bound form of a document
//! - [`PageResult`] / [`WriteResult`]: per-call outcomes at the client boundary
//! - [`ProgressEvent`]: the per-page snapshot delivered to event sinks
//! - [`ReindexRequest`]: the caller-constructed operation description
//!
//! Payloads, query filters, and collection settings are opaque
//! `serde_json::Value`s; this crate never interprets them.

pub mod collection;
pub mod document;
pub mod event;
pub mod page;
pub mod request;
pub mod write;

pub use collection::{Ack, CollectionRef, CollectionSettings, CreateSpec};
pub use document::SourceDocument;
pub use event::ProgressEvent;
pub use page::{CursorToken, PageResult};
pub use request::{ReindexRequest, DEFAULT_PAGE_SIZE, DEFAULT_SCROLL};
pub use write::{WriteItem, WriteOutcome, WriteResult};
