//! # Dictionary Object Cache
//!
//! This module implements a bounded, least-recently-used cache for dictionary
//! elements, with a lemma index that lets callers find a cached element by
//! its base form as well as by its file offset.
//!
//! ## Features
//!
//! - **LRU Eviction**: O(1) fixed-capacity stores with an index-linked recency list
//! - **Per-Kind Stores**: Index words, synsets and exceptions each get an
//!   independently sized store
//! - **Lemma Index**: Alternate-key translations kept coherent through the
//!   store's synchronous eviction listener
//! - **Runtime Toggle**: Caching can be switched off without losing contents
//! - **Statistics**: Hits, misses and evictions by reason, per kind
//!
//! ## Architecture
//!
//! - [`store::LruStore`]: bounded key/value store with one eviction listener
//! - [`index::SecondaryIndex`]: lemma to offset translations, installed as
//!   its kind's listener
//! - [`element_cache::ElementCacheSet`]: one store/index pair per element kind
//! - [`dictionary::DictionaryCache`]: enable flag and dictionary-facing API
//!
//! ## Example
//!
//! ```rust
//! use lexicon_cache::cache::{CacheConfig, DictionaryCache};
//! use lexicon_cache::schema::{IndexWord, Pos};
//!
//! # fn example() -> lexicon_cache::Result<()> {
//! let config = CacheConfig::builder()
//!     .caching_enabled(true)
//!     .default_capacity(500)
//!     .build();
//!
//! let mut cache: DictionaryCache = DictionaryCache::new(config)?;
//!
//! // Cache an index word after an uncached lookup
//! cache.cache_index_word(4820, IndexWord::new(Pos::Verb, "run", vec![1_926_311]))?;
//!
//! // Find it again by lemma
//! if let Some(word) = cache.get_cached_index_word(Pos::Verb, "run") {
//!     println!("Cache hit: {} senses", word.sense_count());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dictionary;
pub mod element_cache;
pub mod entry;
pub mod eviction;
pub mod index;
pub mod store;
pub mod types;

pub use config::{CacheConfig, CacheConfigBuilder, KindSettings};
pub use dictionary::DictionaryCache;
pub use element_cache::{ElementCacheSet, ElementStore};
pub use entry::{CacheEntry, EntryMetadata};
pub use eviction::{EvictionEvent, EvictionListener, EvictionReason, EvictionRecorder, NoopListener};
pub use index::SecondaryIndex;
pub use store::LruStore;
pub use types::{AlternateKey, CacheStats, Cacheable, LookupKey, PrimaryKey};
