//! End-to-end test infrastructure for the collection reindex workspace.
//!
//! Provides a shared TestHarness and helper functions for tests covering
//! the full seed-source, run-engine, inspect-destination flow.

use std::sync::{Arc, Once};

use serde_json::json;
use tracing_subscriber::EnvFilter;

use reindex_client::{CollectionClient, InMemoryCollectionStore};
use reindex_types::{CreateSpec, SourceDocument};

static INIT: Once = Once::new();

/// Install a test-writer tracing subscriber once per process.
///
/// Filtering follows `RUST_LOG`; silent by default.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Shared test harness for E2E tests.
///
/// Owns an in-memory collection store and helpers for seeding source
/// collections before an engine run.
pub struct TestHarness {
    /// Shared store, handed to the engine as its collection client
    pub store: Arc<InMemoryCollectionStore>,
}

impl TestHarness {
    /// Create a harness around an empty store.
    pub fn new() -> Self {
        init_tracing();
        Self {
            store: Arc::new(InMemoryCollectionStore::new()),
        }
    }

    /// Create a collection and fill it with the given documents.
    pub fn seed_collection(&self, name: &str, documents: Vec<SourceDocument>) {
        let ack = self
            .store
            .create_collection(&CreateSpec::new(name, json!({"shards": 1, "origin": name})))
            .expect("Failed to create collection");
        assert!(ack.is_valid(), "Seed collection {} already exists", name);

        for document in documents {
            self.store
                .insert_document(name, document)
                .expect("Failed to insert document");
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Create N documents with sequential identifiers.
///
/// Payloads carry the index and the given base text (with index appended)
/// so term queries can single documents out.
pub fn sample_documents(count: usize, base_text: &str) -> Vec<SourceDocument> {
    (0..count)
        .map(|i| {
            SourceDocument::new(
                format!("doc-{}", i),
                json!({"n": i, "body": format!("{} {}", base_text, i)}),
            )
        })
        .collect()
}
