//! Lemma index: alternate key to primary key translations
//!
//! The index never owns a cached object, only identifiers. It is installed as
//! the eviction listener of its kind's store, so every entry leaving the
//! store passes through [`SecondaryIndex::forget_evicted`] before the store
//! operation returns. Together with registration after insertion this keeps
//! every translation pointing at a live entry whose own lemma matches.

use crate::cache::eviction::{EvictionListener, EvictionReason};
use crate::cache::types::{AlternateKey, Cacheable, PrimaryKey};
use std::collections::HashMap;
use tracing::debug;

/// Map from alternate keys to the primary key currently holding that element
#[derive(Debug, Clone, Default)]
pub struct SecondaryIndex {
    translations: HashMap<AlternateKey, PrimaryKey>,
}

impl SecondaryIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index sized for a store of `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            translations: HashMap::with_capacity(capacity.min(4096)),
        }
    }

    /// Point `alternate` at `primary`, replacing any previous translation
    pub fn register(&mut self, alternate: AlternateKey, primary: PrimaryKey) {
        debug!("Registering lemma {} -> {}", alternate, primary);
        self.translations.insert(alternate, primary);
    }

    /// Primary key currently registered for `alternate`
    pub fn translate(&self, alternate: &AlternateKey) -> Option<PrimaryKey> {
        self.translations.get(alternate).copied()
    }

    /// Remove the translation for `alternate` only if it points at `primary`
    ///
    /// Returns true if a translation was removed.
    pub fn unregister_if(&mut self, alternate: &AlternateKey, primary: &PrimaryKey) -> bool {
        if self.translations.get(alternate) == Some(primary) {
            self.translations.remove(alternate);
            debug!("Dropped lemma {} -> {}", alternate, primary);
            true
        } else {
            false
        }
    }

    /// Drop the translation for an object that left the store under `primary`
    ///
    /// A newer object may have re-registered the same lemma under another
    /// primary key since this one was cached; that translation is kept.
    pub fn forget_evicted<V: Cacheable>(&mut self, primary: &PrimaryKey, object: &V) -> bool {
        match object.alternate_key() {
            Some(alternate) => self.unregister_if(&alternate, primary),
            None => false,
        }
    }

    /// Drop every translation
    pub fn clear(&mut self) {
        self.translations.clear();
    }

    /// Number of registered translations
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    /// Check if the index holds no translations
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    /// Iterate over all translations
    pub fn iter(&self) -> impl Iterator<Item = (&AlternateKey, &PrimaryKey)> {
        self.translations.iter()
    }
}

impl<V: Cacheable> EvictionListener<PrimaryKey, V> for SecondaryIndex {
    fn on_evicted(&mut self, key: &PrimaryKey, value: &V, _reason: EvictionReason) {
        self.forget_evicted(key, value);
    }
}
