//! # reindex-engine
//!
//! The scroll-to-completion reindex core: copies every document of a source
//! collection into a destination collection, one page at a time, reporting
//! each completed page to an event sink.
//!
//! ## Key Components
//!
//! - [`ReindexEngine`]: owns the pagination loop, per-page bulk writes,
//!   response validation, and the failure/abort policy
//! - [`EventSink`]: the consumer contract — progress events plus exactly
//!   one terminal completed/error signal
//! - [`build_write_batch`]: the pure page-to-batch transformation with an
//!   optional per-document mutation hook
//! - [`ReindexError`]: the fatal failure taxonomy
//!
//! ## Operation shape
//!
//! The engine is single-threaded, synchronous, and pull-driven: one read,
//! one write, one emission, strictly in sequence. A page is only reported
//! once it is durable in the destination; any invalid response aborts the
//! whole operation without retry.
//!
//! ## Example
//!
//! ```ignore
//! use reindex_engine::ReindexEngine;
//! use reindex_types::ReindexRequest;
//!
//! let engine = ReindexEngine::new(client, ReindexRequest::new("v1", "v2"));
//! let events = engine.execute_collect()?;
//! ```

pub mod engine;
pub mod error;
pub mod sink;
pub mod transform;

pub use engine::ReindexEngine;
pub use error::ReindexError;
pub use sink::{CollectingSink, EventSink, LoggingSink};
pub use transform::{build_write_batch, DocumentMutation};
