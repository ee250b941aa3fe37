//! Source-side document representation.
//!
//! A [`SourceDocument`] is one hit returned by a paginated read: an opaque
//! JSON payload plus the read-side metadata a destination write has to
//! preserve (identity, type, routing, parentage, expiry, timestamp).

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document read from the source collection.
///
/// The payload is opaque to the engine; only the metadata fields are
/// inspected, and they are copied verbatim onto the derived write item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Unique identifier within the collection
    pub id: String,

    /// Document type, where the collection distinguishes types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    /// Routing key used to place the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<String>,

    /// Parent document reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Remaining time-to-live
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Duration>,

    /// Document timestamp (source-assigned, not read time)
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,

    /// Opaque document body
    pub payload: serde_json::Value,
}

impl SourceDocument {
    /// Create a document with the given identifier and payload.
    pub fn new(id: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            doc_type: None,
            routing: None,
            parent: None,
            ttl: None,
            timestamp: None,
            payload,
        }
    }

    /// Set the document type.
    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Set the routing key.
    pub fn with_routing(mut self, routing: impl Into<String>) -> Self {
        self.routing = Some(routing.into());
        self
    }

    /// Set the parent reference.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the remaining time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set the document timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_sets_metadata() {
        let doc = SourceDocument::new("doc-1", json!({"title": "hello"}))
            .with_doc_type("article")
            .with_routing("shard-a")
            .with_parent("doc-0")
            .with_ttl(Duration::from_secs(30));

        assert_eq!(doc.id, "doc-1");
        assert_eq!(doc.doc_type.as_deref(), Some("article"));
        assert_eq!(doc.routing.as_deref(), Some("shard-a"));
        assert_eq!(doc.parent.as_deref(), Some("doc-0"));
        assert_eq!(doc.ttl, Some(Duration::from_secs(30)));
        assert!(doc.timestamp.is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let doc = SourceDocument::new("doc-2", json!({"n": 7})).with_routing("r1");
        let encoded = serde_json::to_string(&doc).unwrap();
        let decoded: SourceDocument = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, doc);
    }
}
