//! Caching facade used by the dictionary
//!
//! The facade owns the enable flag and the per-kind caches. While caching is
//! disabled nothing is allocated or consulted: `cache` and the clear/remove
//! calls are silent no-ops and every lookup misses. Introspection that would
//! need the allocated caches (size, capacity, stats) and capacity changes
//! fail with [`CacheError::CachingDisabled`] instead.

use crate::cache::{
    config::CacheConfig,
    element_cache::ElementCacheSet,
    types::{AlternateKey, CacheStats, Cacheable, LookupKey, PrimaryKey},
};
use crate::error::{CacheError, Result};
use crate::schema::{DictionaryElement, ElementKind, Exc, IndexWord, Pos, Synset};
use tracing::{debug, info, warn};

/// Dictionary-facing cache over every element kind
///
/// Caches are allocated on the first mutation after caching is enabled.
/// Disabling keeps them allocated but unused; re-enabling picks up the same
/// contents.
#[derive(Debug)]
pub struct DictionaryCache<V = DictionaryElement> {
    enabled: bool,
    config: CacheConfig,
    caches: Option<ElementCacheSet<V>>,
}

impl<V: Cacheable> DictionaryCache<V> {
    /// Create a facade from a validated configuration
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;

        info!(
            "Dictionary cache created (caching {})",
            if config.caching_enabled { "enabled" } else { "disabled" }
        );

        Ok(Self {
            enabled: config.caching_enabled,
            config,
            caches: None,
        })
    }

    /// Create a facade with default settings and caching disabled
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            config: CacheConfig::default(),
            caches: None,
        }
    }

    /// Configuration the facade was created with
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn is_caching_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn caching on or off
    pub fn set_caching_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            info!(
                "Dictionary caching {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
        self.enabled = enabled;
    }

    /// Cache `value` in the `kind` cache under `primary`
    ///
    /// Does nothing while caching is disabled.
    pub fn cache(&mut self, kind: ElementKind, primary: PrimaryKey, value: V) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let actual = value.element_kind();
        if actual != kind {
            warn!("Refusing to cache a {} element in the {} cache", actual, kind);
            return Err(CacheError::KindMismatch {
                expected: kind,
                actual,
            });
        }

        debug!("Caching {} {}", kind, primary);
        self.caches_mut()?.cache_object(kind, primary, value);
        Ok(())
    }

    /// Look up a cached value by primary key or lemma
    ///
    /// Always misses while caching is disabled.
    pub fn get_cached(&mut self, kind: ElementKind, key: impl Into<LookupKey>) -> Option<&V> {
        if !self.enabled {
            return None;
        }

        let key = key.into();
        let found = self.caches.as_mut()?.get_cached_object(kind, &key);
        debug!(
            "Cache {} for {} {}",
            if found.is_some() { "hit" } else { "miss" },
            kind,
            key
        );
        found
    }

    /// Drop one cached value
    pub fn remove_cached(&mut self, kind: ElementKind, primary: &PrimaryKey) -> Option<V> {
        if !self.enabled {
            return None;
        }
        self.caches.as_mut()?.remove_object(kind, primary)
    }

    /// Set the capacity of every kind's cache
    ///
    /// Returns the total number of values evicted to fit.
    pub fn set_cache_capacity(&mut self, capacity: usize) -> Result<usize> {
        self.ensure_enabled("cannot set cache capacity")?;

        let caches = self.caches_mut()?;
        let mut evicted = 0;
        for kind in ElementKind::ALL {
            evicted += caches.set_cache_capacity(kind, capacity)?;
        }
        Ok(evicted)
    }

    /// Set the capacity of one kind's cache
    pub fn set_kind_cache_capacity(&mut self, kind: ElementKind, capacity: usize) -> Result<usize> {
        self.ensure_enabled("cannot set cache capacity")?;
        self.caches_mut()?.set_cache_capacity(kind, capacity)
    }

    /// Drop every cached value of every kind
    pub fn clear_cache(&mut self) {
        for kind in ElementKind::ALL {
            self.clear_kind_cache(kind);
        }
    }

    /// Drop every cached value of one kind
    pub fn clear_kind_cache(&mut self, kind: ElementKind) {
        if !self.enabled {
            return;
        }
        if let Some(caches) = self.caches.as_mut() {
            caches.clear_cache(kind);
        }
    }

    /// Number of values cached for `kind`
    pub fn cache_size(&self, kind: ElementKind) -> Result<usize> {
        self.ensure_enabled("cannot query cache size")?;
        Ok(self.caches.as_ref().map_or(0, |c| c.cache_size(kind)))
    }

    /// Capacity of the `kind` cache
    pub fn cache_capacity(&self, kind: ElementKind) -> Result<usize> {
        self.ensure_enabled("cannot query cache capacity")?;
        Ok(self
            .caches
            .as_ref()
            .map_or_else(|| self.config.capacity(kind), |c| c.cache_capacity(kind)))
    }

    /// Statistics of the `kind` cache
    pub fn cache_stats(&self, kind: ElementKind) -> Result<CacheStats> {
        self.ensure_enabled("cannot query cache stats")?;
        Ok(self.caches.as_ref().map_or_else(
            || CacheStats {
                capacity: self.config.capacity(kind),
                ..Default::default()
            },
            |c| c.stats(kind),
        ))
    }

    /// Check every lemma index against its store
    pub fn verify_coherence(&self) -> Result<()> {
        let Some(caches) = self.caches.as_ref() else {
            return Ok(());
        };
        for kind in ElementKind::ALL {
            caches.verify_coherence(kind)?;
        }
        Ok(())
    }

    /// The per-kind caches, if allocated
    pub fn caches(&self) -> Option<&ElementCacheSet<V>> {
        self.caches.as_ref()
    }

    fn ensure_enabled(&self, action: &str) -> Result<()> {
        if self.enabled {
            Ok(())
        } else {
            Err(CacheError::CachingDisabled(action.to_string()))
        }
    }

    fn caches_mut(&mut self) -> Result<&mut ElementCacheSet<V>> {
        if self.caches.is_none() {
            self.caches = Some(ElementCacheSet::new(&self.config)?);
        }
        self.caches
            .as_mut()
            .ok_or_else(|| CacheError::Other("element caches not allocated".to_string()))
    }
}

impl<V: Cacheable> Default for DictionaryCache<V> {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Typed access for the dictionary's own element types
impl DictionaryCache<DictionaryElement> {
    /// Cache an index word read from offset `offset` of its index file
    pub fn cache_index_word(&mut self, offset: u64, word: IndexWord) -> Result<()> {
        let primary = PrimaryKey::new(word.pos, offset);
        self.cache(ElementKind::IndexWord, primary, word.into())
    }

    /// Cached index word for a lemma
    pub fn get_cached_index_word(&mut self, pos: Pos, lemma: &str) -> Option<&IndexWord> {
        self.get_cached(ElementKind::IndexWord, AlternateKey::new(pos, lemma))
            .and_then(DictionaryElement::as_index_word)
    }

    /// Cache a synset under its own offset
    pub fn cache_synset(&mut self, synset: Synset) -> Result<()> {
        let primary = synset.key();
        self.cache(ElementKind::Synset, primary, synset.into())
    }

    /// Cached synset at `offset`
    pub fn get_cached_synset(&mut self, pos: Pos, offset: u64) -> Option<&Synset> {
        self.get_cached(ElementKind::Synset, PrimaryKey::new(pos, offset))
            .and_then(DictionaryElement::as_synset)
    }

    /// Cache an exception entry read from offset `offset` of its exception file
    pub fn cache_exception(&mut self, offset: u64, exc: Exc) -> Result<()> {
        let primary = PrimaryKey::new(exc.pos, offset);
        self.cache(ElementKind::Exception, primary, exc.into())
    }

    /// Cached exception entry for an inflected form
    pub fn get_cached_exception(&mut self, pos: Pos, derivation: &str) -> Option<&Exc> {
        self.get_cached(ElementKind::Exception, AlternateKey::new(pos, derivation))
            .and_then(DictionaryElement::as_exception)
    }
}
