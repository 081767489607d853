//! # Lexicon Cache (lexicon-cache)
//!
//! An in-process object cache for WordNet-style dictionary lookups.
//!
//! ## Features
//!
//! - Bounded LRU stores, one per element kind (index words, synsets, exceptions)
//! - Lookup by primary key (part of speech + file offset) or by lemma
//! - Lemma index kept coherent with the stores under arbitrary eviction
//! - Runtime enable/disable with no-op mutations while disabled
//! - Configuration through a builder, JSON, or `LEXICON_CACHE_*` environment variables
//!
//! ## Caching Flow
//!
//! The cache never fetches on its own. Callers ask it first, perform the
//! expensive dictionary lookup on a miss, then hand the result back:
//!
//! ```
//! use lexicon_cache::{CacheConfig, DictionaryCache};
//! use lexicon_cache::schema::{Exc, Pos};
//!
//! fn main() -> lexicon_cache::Result<()> {
//!     let mut cache: DictionaryCache = DictionaryCache::new(CacheConfig::small())?;
//!
//!     if cache.get_cached_exception(Pos::Verb, "ran").is_none() {
//!         // read the exception file here
//!         let exc = Exc::new(Pos::Verb, "ran", vec!["run".to_string()]);
//!         cache.cache_exception(7_341, exc)?;
//!     }
//!
//!     let exc = cache.get_cached_exception(Pos::Verb, "ran");
//!     assert_eq!(exc.map(|e| e.exceptions[0].as_str()), Some("run"));
//!     Ok(())
//! }
//! ```
//!
//! ## Generic Elements
//!
//! Anything implementing [`Cacheable`] can be cached; the facade only needs
//! the element kind and, for lemma lookup, the alternate key:
//!
//! ```
//! use lexicon_cache::{AlternateKey, CacheConfig, Cacheable, DictionaryCache, PrimaryKey};
//! use lexicon_cache::schema::{ElementKind, Pos};
//!
//! struct Gloss(String);
//!
//! impl Cacheable for Gloss {
//!     fn element_kind(&self) -> ElementKind {
//!         ElementKind::Synset
//!     }
//! }
//!
//! let config = CacheConfig::builder().caching_enabled(true).build();
//! let mut cache = DictionaryCache::<Gloss>::new(config).unwrap();
//! cache
//!     .cache(ElementKind::Synset, PrimaryKey::new(Pos::Noun, 2084), Gloss("a canine".into()))
//!     .unwrap();
//!
//! assert!(cache.get_cached(ElementKind::Synset, PrimaryKey::new(Pos::Noun, 2084)).is_some());
//! assert!(cache.get_cached(ElementKind::Synset, AlternateKey::new(Pos::Noun, "dog")).is_none());
//! ```

pub mod cache;
pub mod error;
pub mod schema;

// Re-export main types for convenience
pub use cache::{
    AlternateKey, CacheConfig, CacheConfigBuilder, CacheStats, Cacheable, DictionaryCache,
    ElementCacheSet, EvictionListener, EvictionReason, LookupKey, LruStore, PrimaryKey,
    SecondaryIndex,
};
pub use error::{CacheError, Result};
