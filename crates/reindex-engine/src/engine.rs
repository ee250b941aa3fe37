//! The scroll-to-completion reindex engine.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use reindex_client::{CollectionClient, SearchRequest};
use reindex_types::{CreateSpec, CursorToken, PageResult, ProgressEvent, ReindexRequest};

use crate::error::ReindexError;
use crate::sink::{CollectingSink, EventSink};
use crate::transform::{build_write_batch, DocumentMutation};

/// Copies one collection into another, page by page.
///
/// Holds the client, the request, and optionally a mutation hook — the
/// only state that survives across invocations. Re-entrant across
/// independent invocations; callers serialize concurrent reuse against
/// the same destination, no internal locking is provided.
pub struct ReindexEngine {
    client: Arc<dyn CollectionClient>,
    request: ReindexRequest,
    mutation: Option<DocumentMutation>,
}

impl ReindexEngine {
    /// Create an engine over a client and a request.
    pub fn new(client: Arc<dyn CollectionClient>, request: ReindexRequest) -> Self {
        Self {
            client,
            request,
            mutation: None,
        }
    }

    /// Attach an engine-level mutation hook.
    ///
    /// A hook exposed by the sink takes precedence for that invocation.
    pub fn with_mutation_hook(mut self, mutation: DocumentMutation) -> Self {
        self.mutation = Some(mutation);
        self
    }

    /// Drive the whole operation, delivering progress to `sink`.
    ///
    /// Blocks the calling thread until the operation completes or aborts.
    /// Every failure is caught here and routed to `sink.on_error`; the
    /// sink sees exactly one terminal signal.
    pub fn execute(&self, sink: &mut dyn EventSink) {
        let mutation = sink.mutation_hook().or_else(|| self.mutation.clone());
        match self.run(sink, mutation.as_ref()) {
            Ok(()) => sink.on_completed(),
            Err(error) => sink.on_error(error),
        }
    }

    /// Run to completion, returning the collected events.
    pub fn execute_collect(&self) -> Result<Vec<ProgressEvent>, ReindexError> {
        let mut sink = CollectingSink::new();
        self.execute(&mut sink);
        sink.into_result()
    }

    fn run(
        &self,
        sink: &mut dyn EventSink,
        mutation: Option<&DocumentMutation>,
    ) -> Result<(), ReindexError> {
        let source = self.request.source.resolve().ok_or_else(|| {
            ReindexError::InvalidRequest("source collection reference resolves empty".to_string())
        })?;
        let destination = self.request.destination.resolve().ok_or_else(|| {
            ReindexError::InvalidRequest(
                "destination collection reference resolves empty".to_string(),
            )
        })?;

        info!(source, destination, "Starting reindex");

        self.create_destination(source, destination)?;

        let scroll = self.request.scroll();
        let mut page = self.initiate_search(source, scroll)?;
        let mut page_index = 0usize;

        while page.is_valid() && !page.is_empty() {
            let batch = build_write_batch(&page, destination, mutation);
            let write = self
                .client
                .bulk_write(&batch)
                .map_err(|e| write_failed(destination, page_index, e.to_string()))?;
            if !write.is_valid() {
                return Err(write_failed(
                    destination,
                    page_index,
                    diagnostic_of(&write.diagnostic),
                ));
            }

            let cursor = page.cursor.clone();
            debug!(page = page_index, documents = page.len(), "Page written");
            sink.on_next(ProgressEvent::new(page_index, page, write));
            page_index += 1;

            let cursor = cursor.ok_or_else(|| {
                read_failed(
                    source,
                    "pagination cursor missing from a non-empty page".to_string(),
                )
            })?;
            page = self.continue_search(source, scroll, &cursor)?;
        }

        info!(source, destination, pages = page_index, "Reindex complete");
        Ok(())
    }

    /// Create the destination exactly once, before the first read.
    fn create_destination(&self, source: &str, destination: &str) -> Result<(), ReindexError> {
        let spec = match &self.request.create_spec {
            Some(spec) => spec.clone(),
            None => {
                let settings = self
                    .client
                    .get_collection_settings(source)
                    .map_err(|e| create_failed(destination, e.to_string()))?;
                CreateSpec::from_settings(destination, &settings)
            }
        };

        let ack = self
            .client
            .create_collection(&spec)
            .map_err(|e| create_failed(destination, e.to_string()))?;
        if !ack.is_valid() {
            return Err(create_failed(destination, diagnostic_of(&ack.diagnostic)));
        }

        debug!(collection = destination, "Destination collection created");
        Ok(())
    }

    fn initiate_search(&self, source: &str, scroll: Duration) -> Result<PageResult, ReindexError> {
        let mut search = SearchRequest::new(source, self.request.page_size(), scroll);
        if let Some(query) = &self.request.query {
            search = search.with_query(query.clone());
        }
        if let Some(doc_type) = &self.request.doc_type {
            search = search.with_doc_type(doc_type.clone());
        }

        let page = self
            .client
            .search(&search)
            .map_err(|e| read_failed(source, e.to_string()))?;

        // An empty source is a distinct terminal condition, reported ahead
        // of structural validity.
        if page.total_matches <= 0 {
            return Err(ReindexError::SourceEmpty {
                collection: source.to_string(),
            });
        }
        if !page.is_valid() {
            return Err(read_failed(source, diagnostic_of(&page.diagnostic)));
        }
        Ok(page)
    }

    fn continue_search(
        &self,
        source: &str,
        scroll: Duration,
        cursor: &CursorToken,
    ) -> Result<PageResult, ReindexError> {
        let page = self
            .client
            .continue_pagination(scroll, cursor)
            .map_err(|e| read_failed(source, e.to_string()))?;
        if !page.is_valid() {
            return Err(read_failed(source, diagnostic_of(&page.diagnostic)));
        }
        Ok(page)
    }
}

fn create_failed(destination: &str, diagnostic: String) -> ReindexError {
    ReindexError::DestinationCreateFailed {
        collection: destination.to_string(),
        diagnostic,
    }
}

fn read_failed(source: &str, diagnostic: String) -> ReindexError {
    ReindexError::ReadFailed {
        collection: source.to_string(),
        diagnostic,
    }
}

fn write_failed(destination: &str, page: usize, diagnostic: String) -> ReindexError {
    ReindexError::WriteFailed {
        collection: destination.to_string(),
        page,
        diagnostic,
    }
}

fn diagnostic_of(diagnostic: &Option<String>) -> String {
    diagnostic
        .clone()
        .unwrap_or_else(|| "invalid response".to_string())
}
