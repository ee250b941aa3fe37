//! Collection references, settings, and creation specifications.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a collection by name.
///
/// References are resolved to concrete names when an operation starts;
/// a blank name resolves to nothing and fails the operation up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionRef(String);

impl CollectionRef {
    /// Create a reference from a collection name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Resolve to a concrete name. Blank names resolve to `None`.
    pub fn resolve(&self) -> Option<&str> {
        let name = self.0.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

impl fmt::Display for CollectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CollectionRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for CollectionRef {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Settings/schema snapshot of an existing collection.
///
/// Opaque to the engine; copied onto the destination unless the caller
/// supplies an explicit creation spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSettings {
    /// Raw settings document
    pub settings: serde_json::Value,
}

impl CollectionSettings {
    /// Wrap a raw settings document.
    pub fn new(settings: serde_json::Value) -> Self {
        Self { settings }
    }
}

/// Destination-collection creation specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSpec {
    /// Name of the collection to create
    pub collection: String,

    /// Settings to create it with
    pub settings: serde_json::Value,
}

impl CreateSpec {
    /// Create a spec with explicit settings.
    pub fn new(collection: impl Into<String>, settings: serde_json::Value) -> Self {
        Self {
            collection: collection.into(),
            settings,
        }
    }

    /// Create a spec that copies another collection's settings.
    pub fn from_settings(collection: impl Into<String>, source: &CollectionSettings) -> Self {
        Self {
            collection: collection.into(),
            settings: source.settings.clone(),
        }
    }
}

/// Acknowledgement for a collection-create call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    /// Whether the call succeeded
    pub valid: bool,

    /// Call-level diagnostic, when rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl Ack {
    /// A successful acknowledgement.
    pub fn acknowledged() -> Self {
        Self {
            valid: true,
            diagnostic: None,
        }
    }

    /// A rejection with a diagnostic.
    pub fn rejected(diagnostic: impl Into<String>) -> Self {
        Self {
            valid: false,
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// Whether the call succeeded.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_trims_and_rejects_blank() {
        assert_eq!(CollectionRef::from(" articles ").resolve(), Some("articles"));
        assert_eq!(CollectionRef::from("").resolve(), None);
        assert_eq!(CollectionRef::from("   ").resolve(), None);
    }

    #[test]
    fn test_create_spec_from_settings_copies() {
        let settings = CollectionSettings::new(json!({"shards": 2}));
        let spec = CreateSpec::from_settings("v2", &settings);
        assert_eq!(spec.collection, "v2");
        assert_eq!(spec.settings, json!({"shards": 2}));
    }

    #[test]
    fn test_ack() {
        assert!(Ack::acknowledged().is_valid());
        let rejected = Ack::rejected("exists");
        assert!(!rejected.is_valid());
        assert_eq!(rejected.diagnostic.as_deref(), Some("exists"));
    }
}
