//! Bounded LRU store with synchronous eviction notification

use crate::cache::{
    entry::{CacheEntry, EntryMetadata},
    eviction::{EvictionListener, EvictionReason, NoopListener},
    types::CacheStats,
};
use crate::error::{CacheError, Result};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, info};

/// Null link in the recency list.
const NIL: usize = usize::MAX;

/// Arena slot. `entry` is `None` while the slot sits on the free list.
struct Node<K, V> {
    key: K,
    entry: Option<CacheEntry<V>>,
    prev: usize,
    next: usize,
}

/// Fixed-capacity key/value store with least-recently-used eviction
///
/// This implementation provides:
/// - O(1) `get`, `put` and `remove` through a `HashMap` of arena indices and
///   an index-linked recency list (head = most recent, tail = least recent)
/// - A single [`EvictionListener`] called for every entry that leaves the
///   store, inside the call that removed it
/// - Per-entry access metadata and per-store statistics
///
/// Entries that were never touched after insertion keep insertion order, so
/// among them the earliest inserted is evicted first.
pub struct LruStore<K, V, L = NoopListener> {
    capacity: usize,
    map: HashMap<K, usize>,
    arena: Vec<Node<K, V>>,
    head: usize,
    tail: usize,
    free_head: usize,
    stats: CacheStats,
    listener: L,
}

impl<K, V> LruStore<K, V, NoopListener>
where
    K: Hash + Eq + Clone + fmt::Debug,
{
    /// Create a store that does not report evictions
    pub fn without_listener(capacity: usize) -> Result<Self> {
        Self::new(capacity, NoopListener)
    }
}

impl<K, V, L> LruStore<K, V, L>
where
    K: Hash + Eq + Clone + fmt::Debug,
    L: EvictionListener<K, V>,
{
    /// Create a store with the given capacity and eviction listener
    pub fn new(capacity: usize, listener: L) -> Result<Self> {
        validate_capacity(capacity)?;

        Ok(Self {
            capacity,
            map: HashMap::with_capacity(capacity.min(4096)),
            arena: Vec::new(),
            head: NIL,
            tail: NIL,
            free_head: NIL,
            stats: CacheStats {
                capacity,
                ..Default::default()
            },
            listener,
        })
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Check if a key is present (without touching recency)
    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Look up a value, promoting it to most recently used on a hit
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(idx) = self.map.get(key).copied() else {
            self.stats.misses += 1;
            return None;
        };

        self.move_to_head(idx);
        self.stats.hits += 1;

        let entry = self.arena[idx].entry.as_mut()?;
        entry.mark_accessed();
        Some(&entry.value)
    }

    /// Look up a value without promoting it or counting the lookup
    pub fn peek(&self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.arena[idx].entry.as_ref().map(|e| &e.value)
    }

    /// Access metadata of an entry
    pub fn metadata(&self, key: &K) -> Option<&EntryMetadata> {
        let idx = *self.map.get(key)?;
        self.arena[idx].entry.as_ref().map(|e| &e.metadata)
    }

    /// Insert or replace a value
    ///
    /// Replacing reports the displaced value as [`EvictionReason::Replaced`].
    /// Inserting a new key into a full store first evicts the least recently
    /// used entry and reports it as [`EvictionReason::Capacity`]; the new
    /// entry is linked only after the listener returns.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(idx) = self.map.get(&key).copied() {
            if let Some(entry) = self.arena[idx].entry.as_mut() {
                let old = entry.replace_value(value);
                self.stats.updates += 1;
                debug!("Replaced store entry: {:?}", key);
                self.listener.on_evicted(&key, &old, EvictionReason::Replaced);
            }
            self.move_to_head(idx);
            return;
        }

        if self.map.len() >= self.capacity {
            self.evict_lru(EvictionReason::Capacity);
        }

        let idx = self.alloc_slot(key.clone(), value);
        self.push_head(idx);
        debug!("Inserted store entry: {:?}", key);
        self.map.insert(key, idx);
        self.stats.insertions += 1;
    }

    /// Remove an entry, reporting it as [`EvictionReason::Removed`]
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.map.remove(key)?;
        self.unlink(idx);
        let entry = self.arena[idx].entry.take();
        self.release_slot(idx);

        let entry = entry?;
        self.stats.removals += 1;
        debug!("Removed store entry: {:?}", key);
        self.listener.on_evicted(key, &entry.value, EvictionReason::Removed);
        Some(entry.value)
    }

    /// Change the capacity, evicting least recently used entries until the
    /// store fits
    ///
    /// Returns the number of entries evicted. A capacity of zero is rejected
    /// and leaves the store untouched.
    pub fn resize(&mut self, new_capacity: usize) -> Result<usize> {
        validate_capacity(new_capacity)?;

        let mut evicted = 0;
        while self.map.len() > new_capacity {
            if self.evict_lru(EvictionReason::Resized).is_none() {
                break;
            }
            evicted += 1;
        }

        info!(
            "Resized store from {} to {} entries ({} evicted)",
            self.capacity, new_capacity, evicted
        );
        self.capacity = new_capacity;
        self.stats.capacity = new_capacity;
        Ok(evicted)
    }

    /// Evict every entry
    ///
    /// The listener is called once per entry, least recently used first.
    /// Returns the number of entries dropped.
    pub fn clear(&mut self) -> usize {
        let mut count = 0;
        while self.evict_lru(EvictionReason::Cleared).is_some() {
            count += 1;
        }

        self.map.clear();
        self.arena.clear();
        self.head = NIL;
        self.tail = NIL;
        self.free_head = NIL;

        debug!("Cleared {} entries from store", count);
        count
    }

    /// Store statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.map.len(),
            capacity: self.capacity,
            ..self.stats.clone()
        }
    }

    /// Count a lookup that was resolved as a miss before reaching the store
    pub(crate) fn record_miss(&mut self) {
        self.stats.misses += 1;
    }

    /// Reset hit/miss and eviction counters
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats {
            capacity: self.capacity,
            ..Default::default()
        };
    }

    /// The eviction listener
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Mutable access to the eviction listener
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Iterate entries from least to most recently used
    pub fn iter_lru(&self) -> LruIter<'_, K, V> {
        LruIter {
            arena: &self.arena,
            current: self.tail,
            remaining: self.map.len(),
        }
    }

    /// Keys from least to most recently used
    pub fn keys_lru(&self) -> impl Iterator<Item = &K> {
        self.iter_lru().map(|(k, _)| k)
    }

    // --- Internal linked-list operations ---

    /// Evict the tail entry and notify the listener
    fn evict_lru(&mut self, reason: EvictionReason) -> Option<(K, V)> {
        if self.tail == NIL {
            return None;
        }

        let idx = self.tail;
        self.unlink(idx);
        let key = self.arena[idx].key.clone();
        self.map.remove(&key);
        let entry = self.arena[idx].entry.take();
        self.release_slot(idx);

        let entry = entry?;
        match reason {
            EvictionReason::Capacity => self.stats.evictions_capacity += 1,
            EvictionReason::Resized => self.stats.evictions_resize += 1,
            EvictionReason::Cleared => self.stats.cleared += 1,
            EvictionReason::Removed => self.stats.removals += 1,
            EvictionReason::Replaced => self.stats.updates += 1,
        }

        debug!("Evicting store entry ({}): {:?}", reason, key);
        self.listener.on_evicted(&key, &entry.value, reason);
        Some((key, entry.value))
    }

    fn alloc_slot(&mut self, key: K, value: V) -> usize {
        let node = Node {
            key,
            entry: Some(CacheEntry::new(value)),
            prev: NIL,
            next: NIL,
        };

        if self.free_head != NIL {
            let idx = self.free_head;
            self.free_head = self.arena[idx].next;
            self.arena[idx] = node;
            idx
        } else {
            self.arena.push(node);
            self.arena.len() - 1
        }
    }

    fn release_slot(&mut self, idx: usize) {
        self.arena[idx].prev = NIL;
        self.arena[idx].next = self.free_head;
        self.free_head = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.arena[idx].prev;
        let next = self.arena[idx].next;

        if prev != NIL {
            self.arena[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.arena[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.arena[idx].prev = NIL;
        self.arena[idx].next = NIL;
    }

    fn push_head(&mut self, idx: usize) {
        self.arena[idx].prev = NIL;
        self.arena[idx].next = self.head;

        if self.head != NIL {
            self.arena[self.head].prev = idx;
        }
        self.head = idx;

        if self.tail == NIL {
            self.tail = idx;
        }
    }

    fn move_to_head(&mut self, idx: usize) {
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.push_head(idx);
    }
}

impl<K, V, L> fmt::Debug for LruStore<K, V, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruStore")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("stats", &self.stats)
            .finish()
    }
}

fn validate_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(CacheError::InvalidCapacity {
            capacity,
            context: "lru store".to_string(),
        });
    }
    Ok(())
}

/// Iterator over store entries from least to most recently used
pub struct LruIter<'a, K, V> {
    arena: &'a [Node<K, V>],
    current: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for LruIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.current != NIL && self.remaining > 0 {
            let node = &self.arena[self.current];
            self.current = node.prev;
            self.remaining -= 1;
            if let Some(entry) = node.entry.as_ref() {
                return Some((&node.key, &entry.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
