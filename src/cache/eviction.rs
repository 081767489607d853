//! Eviction notification
//!
//! A store owns exactly one listener and calls it synchronously, inside the
//! operation that removed the entry, before that operation returns. There is
//! no deferred delivery: once `put`, `remove`, `resize` or `clear` returns,
//! the listener has seen every entry that left the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why an entry left a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionReason {
    /// Least recently used entry displaced by a new key at capacity
    Capacity,

    /// Value displaced by a newer value under the same key
    Replaced,

    /// Explicit removal by key
    Removed,

    /// Evicted while shrinking the store's capacity
    Resized,

    /// Dropped by clearing the store
    Cleared,
}

impl std::fmt::Display for EvictionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvictionReason::Capacity => write!(f, "LRU eviction"),
            EvictionReason::Replaced => write!(f, "value replaced"),
            EvictionReason::Removed => write!(f, "explicit removal"),
            EvictionReason::Resized => write!(f, "capacity reduced"),
            EvictionReason::Cleared => write!(f, "store cleared"),
        }
    }
}

/// Callback invoked by a store for every entry that leaves it
pub trait EvictionListener<K, V> {
    /// Called with the departing key and value before the triggering
    /// operation returns
    fn on_evicted(&mut self, key: &K, value: &V, reason: EvictionReason);
}

/// Listener that ignores every eviction
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl<K, V> EvictionListener<K, V> for NoopListener {
    fn on_evicted(&mut self, _key: &K, _value: &V, _reason: EvictionReason) {}
}

/// An absent listener is a no-op; a present one is forwarded to
impl<K, V, L> EvictionListener<K, V> for Option<L>
where
    L: EvictionListener<K, V>,
{
    fn on_evicted(&mut self, key: &K, value: &V, reason: EvictionReason) {
        if let Some(listener) = self {
            listener.on_evicted(key, value, reason);
        }
    }
}

/// Record of a single eviction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvictionEvent<K> {
    /// Key that left the store
    pub key: K,

    /// Why it left
    pub reason: EvictionReason,

    /// When the eviction occurred
    pub timestamp: DateTime<Utc>,
}

impl<K> EvictionEvent<K> {
    /// Create a new eviction event
    pub fn new(key: K, reason: EvictionReason) -> Self {
        Self {
            key,
            reason,
            timestamp: Utc::now(),
        }
    }
}

/// Listener that keeps a log of evicted keys in eviction order
#[derive(Debug, Clone)]
pub struct EvictionRecorder<K> {
    events: Vec<EvictionEvent<K>>,
}

impl<K> Default for EvictionRecorder<K> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<K> EvictionRecorder<K> {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, oldest first
    pub fn events(&self) -> &[EvictionEvent<K>] {
        &self.events
    }

    /// Keys evicted for `reason`, oldest first
    pub fn keys_for(&self, reason: EvictionReason) -> Vec<&K> {
        self.events
            .iter()
            .filter(|e| e.reason == reason)
            .map(|e| &e.key)
            .collect()
    }

    /// Take the recorded events, leaving the log empty
    pub fn drain(&mut self) -> Vec<EvictionEvent<K>> {
        std::mem::take(&mut self.events)
    }
}

impl<K: Clone, V> EvictionListener<K, V> for EvictionRecorder<K> {
    fn on_evicted(&mut self, key: &K, _value: &V, reason: EvictionReason) {
        self.events.push(EvictionEvent::new(key.clone(), reason));
    }
}
