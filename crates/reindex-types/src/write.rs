//! Destination-side write representations.
//!
//! A [`WriteItem`] is the destination-bound form of one source document.
//! Items are built fresh for every page and never reused across pages.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One destination-bound write, derived 1:1 from a source document.
///
/// Carries the same identity/routing metadata as the source hit plus the
/// destination collection name and the (possibly mutated) payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteItem {
    /// Destination collection name
    pub collection: String,

    /// Document identifier, preserved from the source
    pub id: String,

    /// Document type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    /// Routing key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<String>,

    /// Parent document reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Remaining time-to-live
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Duration>,

    /// Document timestamp
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,

    /// Document body to write
    pub payload: serde_json::Value,
}

/// Outcome of one item within a bulk write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteOutcome {
    /// Document identifier
    pub id: String,

    /// Collection the item targeted
    pub collection: String,

    /// Whether the item was written
    pub ok: bool,

    /// Item-level error description, when not written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WriteOutcome {
    /// Record a successful item.
    pub fn ok(id: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            collection: collection.into(),
            ok: true,
            error: None,
        }
    }

    /// Record a failed item.
    pub fn failed(
        id: impl Into<String>,
        collection: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            collection: collection.into(),
            ok: false,
            error: Some(error.into()),
        }
    }
}

/// Result of one bulk write call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteResult {
    /// Whether the call as a whole succeeded
    pub valid: bool,

    /// Per-item outcomes, in submission order
    pub items: Vec<WriteOutcome>,

    /// Call-level diagnostic, when invalid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl WriteResult {
    /// Build a result from per-item outcomes; valid only if every item is.
    pub fn from_outcomes(items: Vec<WriteOutcome>) -> Self {
        let valid = items.iter().all(|item| item.ok);
        Self {
            valid,
            items,
            diagnostic: None,
        }
    }

    /// Build an invalid result with a call-level diagnostic.
    pub fn invalid(diagnostic: impl Into<String>) -> Self {
        Self {
            valid: false,
            items: Vec::new(),
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// Whether the call succeeded.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Number of items in the call.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the call carried no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
