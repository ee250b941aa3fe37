//! Event sinks: the consumer side of a reindex operation.

use tracing::{info, warn};

use reindex_types::ProgressEvent;

use crate::error::ReindexError;
use crate::transform::DocumentMutation;

/// Receives the event stream of one reindex operation.
///
/// A sink observes zero or more progress events in strictly increasing
/// page order, followed by exactly one terminal signal — never both,
/// never neither. Only one sink is attached per invocation.
pub trait EventSink {
    /// One page completed: its read and its write both succeeded.
    fn on_next(&mut self, event: ProgressEvent);

    /// The operation finished cleanly.
    fn on_completed(&mut self);

    /// The operation aborted; no further events follow.
    fn on_error(&mut self, error: ReindexError);

    /// Per-document mutation to apply before batching.
    ///
    /// Read once by the engine before the first read. Sinks that return
    /// `Some` are the enriched variant; the default is the raw
    /// three-channel shape.
    fn mutation_hook(&self) -> Option<DocumentMutation> {
        None
    }
}

/// Sink that buffers events and records the terminal signal.
#[derive(Default)]
pub struct CollectingSink {
    /// Progress events in arrival order
    pub events: Vec<ProgressEvent>,

    /// Set when the operation completed cleanly
    pub completed: bool,

    /// Set when the operation aborted
    pub error: Option<ReindexError>,

    mutation: Option<DocumentMutation>,
}

impl CollectingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a mutation hook, making this the enriched sink shape.
    pub fn with_mutation_hook(mut self, mutation: DocumentMutation) -> Self {
        self.mutation = Some(mutation);
        self
    }

    /// Consume the sink: the events on completion, the error otherwise.
    pub fn into_result(self) -> Result<Vec<ProgressEvent>, ReindexError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.events),
        }
    }
}

impl EventSink for CollectingSink {
    fn on_next(&mut self, event: ProgressEvent) {
        self.events.push(event);
    }

    fn on_completed(&mut self) {
        self.completed = true;
    }

    fn on_error(&mut self, error: ReindexError) {
        self.error = Some(error);
    }

    fn mutation_hook(&self) -> Option<DocumentMutation> {
        self.mutation.clone()
    }
}

/// Sink that logs one line per completed page.
#[derive(Debug, Default)]
pub struct LoggingSink;

impl EventSink for LoggingSink {
    fn on_next(&mut self, event: ProgressEvent) {
        info!(
            page = event.page_index,
            documents = event.document_count(),
            "Reindexed page"
        );
    }

    fn on_completed(&mut self) {
        info!("Reindex completed");
    }

    fn on_error(&mut self, error: ReindexError) {
        warn!(error = %error, "Reindex aborted");
    }
}
