//! Entity state store abstraction.
//!
//! The picker never owns entity data. It reads attribute snapshots through the
//! [`EntityStore`] trait, which stands in for whatever live state container the
//! host application keeps. [`MemoryStore`] is the in-process implementation used
//! by the CLI and tests.

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Attribute key → current value for one entity, in the store's own order.
///
/// Candidate ordering is derived from this iteration order, so implementations
/// must hand out snapshots whose key order is stable between reads.
pub type AttributeSnapshot = IndexMap<String, Value>;

/// Read-only handle onto the external entity state store.
pub trait EntityStore: Send + Sync + Debug {
    /// Current attribute snapshot for `entity_id`, if the store knows the entity.
    fn snapshot(&self, entity_id: &str) -> Option<&AttributeSnapshot>;

    /// Translate a UI string key. Returns `None` when no translation exists.
    fn localize(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Error surfaced when loading a [`MemoryStore`] from disk fails.
#[derive(Debug, Error)]
pub enum StoreLoadError {
    /// The file could not be read.
    #[error("failed to read entity states from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The payload is not a valid states document.
    #[error("invalid entity states document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// In-memory entity store backed by ordered maps.
///
/// The JSON form is
///
/// ```json
/// {
///   "states": { "light.kitchen": { "brightness": 128, "color_temp": 300 } },
///   "translations": { "attrpick.picker.attribute": "Attribute" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    states: IndexMap<String, AttributeSnapshot>,
    #[serde(default)]
    translations: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a states document.
    pub fn from_json_str(content: &str) -> Result<Self, StoreLoadError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read and parse a states document from `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| StoreLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Builder-style variant of [`MemoryStore::set_state`].
    pub fn with_state(mut self, entity_id: impl Into<String>, snapshot: AttributeSnapshot) -> Self {
        self.set_state(entity_id, snapshot);
        self
    }

    /// Builder-style variant of [`MemoryStore::set_translation`].
    pub fn with_translation(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.set_translation(key, text);
        self
    }

    /// Replace the snapshot for an entity.
    pub fn set_state(&mut self, entity_id: impl Into<String>, snapshot: AttributeSnapshot) {
        self.states.insert(entity_id.into(), snapshot);
    }

    pub fn set_translation(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.translations.insert(key.into(), text.into());
    }

    /// Known entity identifiers in store order.
    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }
}

impl EntityStore for MemoryStore {
    fn snapshot(&self, entity_id: &str) -> Option<&AttributeSnapshot> {
        self.states.get(entity_id)
    }

    fn localize(&self, key: &str) -> Option<String> {
        self.translations.get(key).cloned()
    }
}
