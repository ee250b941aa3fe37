//! Page-to-batch transformation.
//!
//! Pure: builds the write batch for one page without touching the client.

use std::sync::Arc;

use reindex_types::{PageResult, SourceDocument, WriteItem};

/// Caller-supplied per-document mutation.
///
/// Invoked once per document with the read-side document, its payload, and
/// the in-progress write item, which it may mutate in place before the
/// item joins the batch. Absent by default.
pub type DocumentMutation =
    Arc<dyn Fn(&SourceDocument, &serde_json::Value, &mut WriteItem) + Send + Sync>;

/// Build the destination-bound write batch for one page.
///
/// One write item per source document: identifier, type, routing, parent,
/// ttl, and timestamp are copied verbatim, the payload is cloned, and the
/// item is retargeted to `destination`. The optional mutation runs last.
pub fn build_write_batch(
    page: &PageResult,
    destination: &str,
    mutation: Option<&DocumentMutation>,
) -> Vec<WriteItem> {
    let mut batch = Vec::with_capacity(page.documents.len());
    for doc in &page.documents {
        let mut item = WriteItem {
            collection: destination.to_string(),
            id: doc.id.clone(),
            doc_type: doc.doc_type.clone(),
            routing: doc.routing.clone(),
            parent: doc.parent.clone(),
            ttl: doc.ttl,
            timestamp: doc.timestamp,
            payload: doc.payload.clone(),
        };
        if let Some(mutation) = mutation {
            mutation(doc, &doc.payload, &mut item);
        }
        batch.push(item);
    }
    batch
}
