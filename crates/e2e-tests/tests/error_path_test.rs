//! Error-path tests: every fatal condition surfaces as exactly one error
//! signal, after exactly the events for the pages that fully succeeded.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;

use e2e_tests::{sample_documents, TestHarness};
use reindex_client::{ClientError, CollectionClient, InMemoryCollectionStore, SearchRequest};
use reindex_engine::{CollectingSink, ReindexEngine, ReindexError};
use reindex_types::{
    Ack, CollectionSettings, CreateSpec, CursorToken, PageResult, ReindexRequest, WriteItem,
    WriteResult,
};

/// Delegates to the store, sleeping before every pagination continuation.
struct SlowScrollClient {
    store: Arc<InMemoryCollectionStore>,
    delay: Duration,
}

impl CollectionClient for SlowScrollClient {
    fn get_collection_settings(&self, name: &str) -> Result<CollectionSettings, ClientError> {
        self.store.get_collection_settings(name)
    }

    fn create_collection(&self, spec: &CreateSpec) -> Result<Ack, ClientError> {
        self.store.create_collection(spec)
    }

    fn search(&self, request: &SearchRequest) -> Result<PageResult, ClientError> {
        self.store.search(request)
    }

    fn continue_pagination(
        &self,
        lease: Duration,
        cursor: &CursorToken,
    ) -> Result<PageResult, ClientError> {
        std::thread::sleep(self.delay);
        self.store.continue_pagination(lease, cursor)
    }

    fn bulk_write(&self, items: &[WriteItem]) -> Result<WriteResult, ClientError> {
        self.store.bulk_write(items)
    }
}

/// Delegates to the store, dropping the destination right before the
/// bulk-write call with the given index.
struct DroppingClient {
    store: Arc<InMemoryCollectionStore>,
    destination: String,
    drop_before_call: usize,
    calls: AtomicUsize,
}

impl CollectionClient for DroppingClient {
    fn get_collection_settings(&self, name: &str) -> Result<CollectionSettings, ClientError> {
        self.store.get_collection_settings(name)
    }

    fn create_collection(&self, spec: &CreateSpec) -> Result<Ack, ClientError> {
        self.store.create_collection(spec)
    }

    fn search(&self, request: &SearchRequest) -> Result<PageResult, ClientError> {
        self.store.search(request)
    }

    fn continue_pagination(
        &self,
        lease: Duration,
        cursor: &CursorToken,
    ) -> Result<PageResult, ClientError> {
        self.store.continue_pagination(lease, cursor)
    }

    fn bulk_write(&self, items: &[WriteItem]) -> Result<WriteResult, ClientError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == self.drop_before_call {
            self.store.drop_collection(&self.destination).unwrap();
        }
        self.store.bulk_write(items)
    }
}

/// An empty source yields zero events, one SourceEmpty error, no writes.
#[test]
fn test_empty_source() {
    let harness = TestHarness::new();
    harness.seed_collection("v1", Vec::new());

    let engine = ReindexEngine::new(harness.store.clone(), ReindexRequest::new("v1", "v2"));
    let mut sink = CollectingSink::new();
    engine.execute(&mut sink);

    assert!(sink.events.is_empty());
    assert!(!sink.completed);
    assert!(matches!(
        sink.error,
        Some(ReindexError::SourceEmpty { ref collection }) if collection == "v1"
    ));
    // Destination was created but never written to
    assert_eq!(harness.store.document_count("v2").unwrap(), 0);
}

/// A missing source collection fails the destination-create step.
#[test]
fn test_missing_source_collection() {
    let harness = TestHarness::new();

    let engine = ReindexEngine::new(harness.store.clone(), ReindexRequest::new("ghost", "v2"));
    let err = engine.execute_collect().unwrap_err();

    assert!(matches!(
        err,
        ReindexError::DestinationCreateFailed { ref diagnostic, .. }
            if diagnostic.contains("ghost")
    ));
}

/// A pre-existing destination rejects the create call; nothing is read
/// or written.
#[test]
fn test_existing_destination_is_rejected() {
    let harness = TestHarness::new();
    harness.seed_collection("v1", sample_documents(3, "x"));
    harness.seed_collection("v2", sample_documents(1, "old"));

    let engine = ReindexEngine::new(harness.store.clone(), ReindexRequest::new("v1", "v2"));
    let mut sink = CollectingSink::new();
    engine.execute(&mut sink);

    assert!(sink.events.is_empty());
    assert!(matches!(
        sink.error,
        Some(ReindexError::DestinationCreateFailed { ref diagnostic, .. })
            if diagnostic.contains("already exists")
    ));
    // The pre-existing destination was left untouched
    assert_eq!(harness.store.document_count("v2").unwrap(), 1);
}

/// Blank collection references fail before any client call.
#[test]
fn test_blank_references_are_invalid() {
    let harness = TestHarness::new();

    let engine = ReindexEngine::new(harness.store.clone(), ReindexRequest::new("v1", ""));
    let err = engine.execute_collect().unwrap_err();
    assert!(matches!(err, ReindexError::InvalidRequest(_)));

    let engine = ReindexEngine::new(harness.store.clone(), ReindexRequest::new("   ", "v2"));
    let err = engine.execute_collect().unwrap_err();
    assert!(matches!(err, ReindexError::InvalidRequest(_)));
}

/// A write failure at page k leaves exactly k events; page k is never
/// emitted and later pages are never read.
#[test]
fn test_write_failure_at_second_page() {
    let harness = TestHarness::new();
    harness.seed_collection("v1", sample_documents(4, "x"));

    let client = Arc::new(DroppingClient {
        store: harness.store.clone(),
        destination: "v2".to_string(),
        drop_before_call: 1,
        calls: AtomicUsize::new(0),
    });
    let engine = ReindexEngine::new(client, ReindexRequest::new("v1", "v2").with_page_size(2));
    let mut sink = CollectingSink::new();
    engine.execute(&mut sink);

    assert_eq!(sink.events.len(), 1);
    assert_eq!(sink.events[0].page_index, 0);
    assert!(matches!(
        sink.error,
        Some(ReindexError::WriteFailed { page: 1, .. })
    ));
}

/// A lease shorter than the gap between pages expires the cursor and the
/// continuation fails as a read failure.
#[test]
fn test_expired_scroll_lease() {
    let harness = TestHarness::new();
    harness.seed_collection("v1", sample_documents(3, "x"));

    let client = Arc::new(SlowScrollClient {
        store: harness.store.clone(),
        delay: Duration::from_millis(50),
    });
    let request = ReindexRequest::new("v1", "v2")
        .with_page_size(1)
        .with_scroll(Duration::from_millis(5));
    let engine = ReindexEngine::new(client, request);
    let mut sink = CollectingSink::new();
    engine.execute(&mut sink);

    assert_eq!(sink.events.len(), 1);
    assert!(matches!(
        sink.error,
        Some(ReindexError::ReadFailed { ref diagnostic, .. })
            if diagnostic.contains("expired")
    ));
}

/// Exactly one terminal signal per invocation, on both paths.
#[test]
fn test_exactly_one_terminal_signal() {
    let harness = TestHarness::new();
    harness.seed_collection("v1", sample_documents(2, "x"));

    let engine = ReindexEngine::new(harness.store.clone(), ReindexRequest::new("v1", "v2"));
    let mut sink = CollectingSink::new();
    engine.execute(&mut sink);
    assert!(sink.completed && sink.error.is_none());

    // Re-running the same engine now fails (destination exists): the other
    // terminal channel fires, alone.
    let mut sink = CollectingSink::new();
    engine.execute(&mut sink);
    assert!(!sink.completed && sink.error.is_some());
}
