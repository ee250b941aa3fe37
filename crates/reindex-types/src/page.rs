//! Paginated read results and cursor tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::SourceDocument;

/// Opaque pagination cursor.
///
/// Returned by a read, consumed exactly once by the following continuation.
/// The token's content is meaningful only to the client that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CursorToken(String);

impl CursorToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CursorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CursorToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for CursorToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// One page of source documents plus continuation state.
///
/// Produced by a read or continuation call, consumed immediately by the
/// engine, then handed to the sink inside a progress event. A valid result
/// with no documents signals cursor exhaustion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// Whether the call as a whole succeeded
    pub valid: bool,

    /// Total documents matching the query across all pages.
    /// Only meaningful on the initial read.
    pub total_matches: i64,

    /// Documents in this page
    pub documents: Vec<SourceDocument>,

    /// Cursor for fetching the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<CursorToken>,

    /// Call-level diagnostic, when invalid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl PageResult {
    /// Build a valid page.
    pub fn new(
        total_matches: i64,
        documents: Vec<SourceDocument>,
        cursor: Option<CursorToken>,
    ) -> Self {
        Self {
            valid: true,
            total_matches,
            documents,
            cursor,
            diagnostic: None,
        }
    }

    /// Build an invalid page with a call-level diagnostic.
    pub fn invalid(diagnostic: impl Into<String>) -> Self {
        Self {
            valid: false,
            total_matches: 0,
            documents: Vec::new(),
            cursor: None,
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// Whether the call succeeded.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Number of documents in this page.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether this page carries no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_page() {
        let page = PageResult::new(
            3,
            vec![SourceDocument::new("a", json!({}))],
            Some(CursorToken::from("cursor-1")),
        );
        assert!(page.is_valid());
        assert!(!page.is_empty());
        assert_eq!(page.len(), 1);
        assert_eq!(page.cursor.as_ref().unwrap().as_str(), "cursor-1");
    }

    #[test]
    fn test_invalid_page() {
        let page = PageResult::invalid("timed out");
        assert!(!page.is_valid());
        assert!(page.is_empty());
        assert_eq!(page.diagnostic.as_deref(), Some("timed out"));
    }

    #[test]
    fn test_cursor_token_serde_transparent() {
        let token = CursorToken::from("abc");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"abc\"");
    }
}
