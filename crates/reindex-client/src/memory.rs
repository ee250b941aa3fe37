//! Embedded in-memory collection backend.
//!
//! Collections live in a mutex-guarded map; pagination cursors hold the
//! remaining matches of their query together with a lease deadline that
//! every continuation renews. Query support is a deliberate subset:
//! `match_all`, single-field `term` equality against top-level payload
//! fields, and the document-type filter. Anything else matches all
//! documents with a warning.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use ulid::Ulid;

use reindex_types::{
    Ack, CollectionSettings, CreateSpec, CursorToken, PageResult, SourceDocument, WriteItem,
    WriteOutcome, WriteResult,
};

use crate::client::{CollectionClient, SearchRequest};
use crate::error::ClientError;

#[derive(Debug)]
struct StoredCollection {
    settings: serde_json::Value,
    documents: Vec<SourceDocument>,
}

#[derive(Debug)]
struct CursorState {
    remaining: Vec<SourceDocument>,
    page_size: usize,
    total_matches: i64,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct StoreInner {
    collections: HashMap<String, StoredCollection>,
    cursors: HashMap<String, CursorState>,
}

/// Process-local collection store implementing [`CollectionClient`].
///
/// Interior mutability keeps the trait's `&self` methods usable behind an
/// `Arc` shared between a seeding test harness and the engine.
#[derive(Debug, Default)]
pub struct InMemoryCollectionStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryCollectionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document into an existing collection, replacing any
    /// document with the same identifier.
    pub fn insert_document(
        &self,
        collection: &str,
        document: SourceDocument,
    ) -> Result<(), ClientError> {
        let mut inner = self.lock()?;
        let stored = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| ClientError::CollectionNotFound(collection.to_string()))?;
        upsert(&mut stored.documents, document);
        Ok(())
    }

    /// Number of documents in a collection.
    pub fn document_count(&self, collection: &str) -> Result<usize, ClientError> {
        let inner = self.lock()?;
        inner
            .collections
            .get(collection)
            .map(|stored| stored.documents.len())
            .ok_or_else(|| ClientError::CollectionNotFound(collection.to_string()))
    }

    /// Fetch a document by identifier.
    pub fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<SourceDocument>, ClientError> {
        let inner = self.lock()?;
        let stored = inner
            .collections
            .get(collection)
            .ok_or_else(|| ClientError::CollectionNotFound(collection.to_string()))?;
        Ok(stored.documents.iter().find(|doc| doc.id == id).cloned())
    }

    /// Remove a collection entirely.
    pub fn drop_collection(&self, collection: &str) -> Result<(), ClientError> {
        let mut inner = self.lock()?;
        inner
            .collections
            .remove(collection)
            .map(|_| ())
            .ok_or_else(|| ClientError::CollectionNotFound(collection.to_string()))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoreInner>, ClientError> {
        self.inner
            .lock()
            .map_err(|e| ClientError::StoreLocked(e.to_string()))
    }
}

impl CollectionClient for InMemoryCollectionStore {
    fn get_collection_settings(&self, name: &str) -> Result<CollectionSettings, ClientError> {
        let inner = self.lock()?;
        inner
            .collections
            .get(name)
            .map(|stored| CollectionSettings::new(stored.settings.clone()))
            .ok_or_else(|| ClientError::CollectionNotFound(name.to_string()))
    }

    fn create_collection(&self, spec: &CreateSpec) -> Result<Ack, ClientError> {
        let mut inner = self.lock()?;
        if inner.collections.contains_key(&spec.collection) {
            return Ok(Ack::rejected(format!(
                "collection {} already exists",
                spec.collection
            )));
        }
        inner.collections.insert(
            spec.collection.clone(),
            StoredCollection {
                settings: spec.settings.clone(),
                documents: Vec::new(),
            },
        );
        debug!(collection = %spec.collection, "Created collection");
        Ok(Ack::acknowledged())
    }

    fn search(&self, request: &SearchRequest) -> Result<PageResult, ClientError> {
        let mut inner = self.lock()?;
        let stored = inner
            .collections
            .get(&request.collection)
            .ok_or_else(|| ClientError::CollectionNotFound(request.collection.clone()))?;

        let matches: Vec<SourceDocument> = stored
            .documents
            .iter()
            .filter(|doc| matches_doc_type(request.doc_type.as_deref(), doc))
            .filter(|doc| matches_query(request.query.as_ref(), doc))
            .cloned()
            .collect();
        let total_matches = matches.len() as i64;

        let mut matches = matches.into_iter().skip(request.from);
        let page: Vec<SourceDocument> = matches.by_ref().take(request.size).collect();
        let remaining: Vec<SourceDocument> = matches.collect();

        let token = Ulid::new().to_string();
        inner.cursors.insert(
            token.clone(),
            CursorState {
                remaining,
                page_size: request.size,
                total_matches,
                expires_at: Instant::now() + request.lease,
            },
        );

        debug!(
            collection = %request.collection,
            total = total_matches,
            page_len = page.len(),
            "Opened pagination cursor"
        );
        Ok(PageResult::new(
            total_matches,
            page,
            Some(CursorToken::from(token)),
        ))
    }

    fn continue_pagination(
        &self,
        lease: Duration,
        cursor: &CursorToken,
    ) -> Result<PageResult, ClientError> {
        let mut inner = self.lock()?;
        let state = inner
            .cursors
            .get_mut(cursor.as_str())
            .ok_or_else(|| ClientError::UnknownCursor(cursor.to_string()))?;

        if Instant::now() > state.expires_at {
            inner.cursors.remove(cursor.as_str());
            return Err(ClientError::CursorExpired(cursor.to_string()));
        }

        let take = state.page_size.min(state.remaining.len());
        let page: Vec<SourceDocument> = state.remaining.drain(..take).collect();
        let total_matches = state.total_matches;
        state.expires_at = Instant::now() + lease;

        debug!(cursor = %cursor, page_len = page.len(), "Continued pagination cursor");
        Ok(PageResult::new(total_matches, page, Some(cursor.clone())))
    }

    fn bulk_write(&self, items: &[WriteItem]) -> Result<WriteResult, ClientError> {
        let mut inner = self.lock()?;
        let mut outcomes = Vec::with_capacity(items.len());

        for item in items {
            match inner.collections.get_mut(&item.collection) {
                Some(stored) => {
                    upsert(&mut stored.documents, document_from_item(item));
                    outcomes.push(WriteOutcome::ok(&item.id, &item.collection));
                }
                None => {
                    warn!(collection = %item.collection, id = %item.id, "Bulk write to missing collection");
                    outcomes.push(WriteOutcome::failed(
                        &item.id,
                        &item.collection,
                        "collection not found",
                    ));
                }
            }
        }

        Ok(WriteResult::from_outcomes(outcomes))
    }
}

fn upsert(documents: &mut Vec<SourceDocument>, document: SourceDocument) {
    match documents.iter_mut().find(|doc| doc.id == document.id) {
        Some(existing) => *existing = document,
        None => documents.push(document),
    }
}

fn document_from_item(item: &WriteItem) -> SourceDocument {
    SourceDocument {
        id: item.id.clone(),
        doc_type: item.doc_type.clone(),
        routing: item.routing.clone(),
        parent: item.parent.clone(),
        ttl: item.ttl,
        timestamp: item.timestamp,
        payload: item.payload.clone(),
    }
}

fn matches_doc_type(filter: Option<&str>, doc: &SourceDocument) -> bool {
    match filter {
        Some(doc_type) => doc.doc_type.as_deref() == Some(doc_type),
        None => true,
    }
}

fn matches_query(query: Option<&serde_json::Value>, doc: &SourceDocument) -> bool {
    let Some(query) = query else {
        return true;
    };
    if query.get("match_all").is_some() {
        return true;
    }
    if let Some(term) = query.get("term").and_then(serde_json::Value::as_object) {
        return term
            .iter()
            .all(|(field, expected)| doc.payload.get(field) == Some(expected));
    }
    warn!(%query, "Unsupported query shape, matching all documents");
    true
}
