//! Per-kind stores with their lemma indices

use crate::cache::{
    config::CacheConfig,
    index::SecondaryIndex,
    store::LruStore,
    types::{AlternateKey, CacheStats, Cacheable, LookupKey, PrimaryKey},
};
use crate::error::{CacheError, Result};
use crate::schema::ElementKind;
use tracing::{debug, info, warn};

/// LRU store of one element kind, with that kind's lemma index (if any) as
/// its eviction listener
///
/// The store owns the index, so the pair is always mutated together.
pub type ElementStore<V> = LruStore<PrimaryKey, V, Option<SecondaryIndex>>;

/// One bounded store per element kind, each with independent capacity
#[derive(Debug)]
pub struct ElementCacheSet<V> {
    /// Indexed by [`ElementKind::index`]
    stores: Vec<ElementStore<V>>,
}

impl<V: Cacheable> ElementCacheSet<V> {
    /// Allocate a store (and, where configured, an index) for every kind
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let mut stores = Vec::with_capacity(ElementKind::ALL.len());

        for kind in ElementKind::ALL {
            let capacity = config.capacity(kind);
            let index = config
                .alternate_index(kind)
                .then(|| SecondaryIndex::with_capacity(capacity));
            let store =
                LruStore::new(capacity, index).map_err(|e| with_kind_context(e, kind))?;
            stores.push(store);
        }

        info!(
            "Allocated dictionary caches: {}",
            ElementKind::ALL
                .iter()
                .map(|k| format!("{}={}", k, config.capacity(*k)))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self { stores })
    }

    /// Store of one kind
    pub fn store(&self, kind: ElementKind) -> &ElementStore<V> {
        &self.stores[kind.index()]
    }

    fn store_mut(&mut self, kind: ElementKind) -> &mut ElementStore<V> {
        &mut self.stores[kind.index()]
    }

    /// Cache `object` under `primary` and register its lemma translation
    ///
    /// The store insertion runs first so that any eviction it causes,
    /// including replacement of an older object under the same key, is
    /// reported to the index before the new translation is written.
    pub fn cache_object(&mut self, kind: ElementKind, primary: PrimaryKey, object: V) {
        let alternate = object.alternate_key();
        let store = self.store_mut(kind);
        store.put(primary, object);

        if let (Some(index), Some(alternate)) = (store.listener_mut().as_mut(), alternate) {
            index.register(alternate, primary);
        }
    }

    /// Look up a cached object by primary or alternate key
    ///
    /// Alternate keys are translated first; a missing translation, or a kind
    /// without a lemma index, is a plain miss.
    pub fn get_cached_object(&mut self, kind: ElementKind, key: &LookupKey) -> Option<&V> {
        let store = self.store_mut(kind);

        let primary = match key {
            LookupKey::Primary(primary) => *primary,
            LookupKey::Alternate(alternate) => {
                let translated = store
                    .listener()
                    .as_ref()
                    .and_then(|index| index.translate(alternate));

                match translated {
                    Some(primary) if store.contains_key(&primary) => primary,
                    Some(primary) => {
                        warn!(
                            "Lemma {} in {} cache points at missing entry {}; dropping translation",
                            alternate, kind, primary
                        );
                        if let Some(index) = store.listener_mut().as_mut() {
                            index.unregister_if(alternate, &primary);
                        }
                        store.record_miss();
                        return None;
                    }
                    None => {
                        debug!("Lemma miss in {} cache: {}", kind, alternate);
                        store.record_miss();
                        return None;
                    }
                }
            }
        };

        store.get(&primary)
    }

    /// Primary key currently registered for a lemma
    pub fn translate(&self, kind: ElementKind, alternate: &AlternateKey) -> Option<PrimaryKey> {
        self.store(kind)
            .listener()
            .as_ref()
            .and_then(|index| index.translate(alternate))
    }

    /// Remove one object, dropping its lemma translation
    pub fn remove_object(&mut self, kind: ElementKind, primary: &PrimaryKey) -> Option<V> {
        self.store_mut(kind).remove(primary)
    }

    /// Drop every object and translation of one kind
    pub fn clear_cache(&mut self, kind: ElementKind) -> usize {
        let store = self.store_mut(kind);
        let count = store.clear();
        if let Some(index) = store.listener_mut().as_mut() {
            index.clear();
        }

        info!("Cleared {} entries from {} cache", count, kind);
        count
    }

    /// Number of objects cached for one kind
    pub fn cache_size(&self, kind: ElementKind) -> usize {
        self.store(kind).len()
    }

    /// Capacity of one kind's store
    pub fn cache_capacity(&self, kind: ElementKind) -> usize {
        self.store(kind).capacity()
    }

    /// Resize one kind's store, returning the number of evicted objects
    pub fn set_cache_capacity(&mut self, kind: ElementKind, capacity: usize) -> Result<usize> {
        self.store_mut(kind)
            .resize(capacity)
            .map_err(|e| with_kind_context(e, kind))
    }

    /// Statistics of one kind's store
    pub fn stats(&self, kind: ElementKind) -> CacheStats {
        self.store(kind).stats()
    }

    /// Lemma translations of one kind, sorted by lemma key
    pub fn alternate_keys(&self, kind: ElementKind) -> Vec<(AlternateKey, PrimaryKey)> {
        let mut pairs: Vec<_> = self
            .store(kind)
            .listener()
            .iter()
            .flat_map(|index| index.iter().map(|(a, p)| (a.clone(), *p)))
            .collect();
        pairs.sort();
        pairs
    }

    /// Check that every lemma translation of one kind points at a cached
    /// object carrying that lemma
    pub fn verify_coherence(&self, kind: ElementKind) -> Result<()> {
        let store = self.store(kind);
        let Some(index) = store.listener().as_ref() else {
            return Ok(());
        };

        for (alternate, primary) in index.iter() {
            match store.peek(primary) {
                None => {
                    return Err(CacheError::IndexIncoherent {
                        kind,
                        lemma: alternate.to_string(),
                        detail: format!("points at missing entry {}", primary),
                    });
                }
                Some(object) if object.alternate_key().as_ref() != Some(alternate) => {
                    return Err(CacheError::IndexIncoherent {
                        kind,
                        lemma: alternate.to_string(),
                        detail: format!("points at {} which holds another lemma", primary),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

fn with_kind_context(error: CacheError, kind: ElementKind) -> CacheError {
    match error {
        CacheError::InvalidCapacity { capacity, .. } => CacheError::InvalidCapacity {
            capacity,
            context: format!("{} cache", kind),
        },
        other => other,
    }
}
