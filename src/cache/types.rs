//! Key and statistics types for the cache system

use crate::schema::{ElementKind, Pos};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier of a dictionary element: part of speech plus file offset
///
/// This is the only key type a store is ever probed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrimaryKey {
    /// Part of speech of the element
    pub pos: Pos,
    /// Byte offset of the element in its data file
    pub offset: u64,
}

impl PrimaryKey {
    /// Create a primary key
    pub fn new(pos: Pos, offset: u64) -> Self {
        Self { pos, offset }
    }
}

impl fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pos.key(), self.offset)
    }
}

/// Human-facing identifier of a dictionary element: part of speech plus lemma
///
/// Never used as a store key; it must be translated through a lemma index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlternateKey {
    /// Part of speech of the element
    pub pos: Pos,
    /// Normalized base form
    lemma: String,
}

impl AlternateKey {
    /// Create an alternate key, normalizing the lemma
    ///
    /// Lemmas are trimmed, lower-cased and have inner whitespace replaced by
    /// `_`, the collocation separator used in dictionary files.
    pub fn new(pos: Pos, lemma: impl AsRef<str>) -> Self {
        Self {
            pos,
            lemma: normalize_lemma(lemma.as_ref()),
        }
    }

    /// The normalized lemma
    pub fn lemma(&self) -> &str {
        &self.lemma
    }
}

impl fmt::Display for AlternateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pos.key(), self.lemma)
    }
}

fn normalize_lemma(lemma: &str) -> String {
    lemma
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Key handed to a cache lookup
///
/// The variant is decided at the call site; alternate keys are translated
/// before any store is touched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKey {
    /// Direct lookup by canonical id
    Primary(PrimaryKey),
    /// Lookup by lemma, translated through the kind's lemma index
    Alternate(AlternateKey),
}

impl LookupKey {
    /// Part of speech carried by either variant
    pub fn pos(&self) -> Pos {
        match self {
            LookupKey::Primary(key) => key.pos,
            LookupKey::Alternate(key) => key.pos,
        }
    }

    /// Whether this key needs translation before lookup
    pub fn is_alternate(&self) -> bool {
        matches!(self, LookupKey::Alternate(_))
    }
}

impl From<PrimaryKey> for LookupKey {
    fn from(key: PrimaryKey) -> Self {
        LookupKey::Primary(key)
    }
}

impl From<AlternateKey> for LookupKey {
    fn from(key: AlternateKey) -> Self {
        LookupKey::Alternate(key)
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Primary(key) => write!(f, "offset {}", key),
            LookupKey::Alternate(key) => write!(f, "lemma {}", key),
        }
    }
}

/// An object the dictionary cache can hold
///
/// The dictionary implements this for whatever it caches so the cache can
/// check the element kind and derive the lemma translation to register.
pub trait Cacheable {
    /// Element kind this object belongs to
    fn element_kind(&self) -> ElementKind;

    /// Lemma key under which this object can also be found, if any
    fn alternate_key(&self) -> Option<AlternateKey> {
        None
    }
}

/// Statistics for one LRU store
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of cache hits
    pub hits: u64,

    /// Total number of cache misses
    pub misses: u64,

    /// Number of entries currently in the store
    pub entries: usize,

    /// Configured capacity of the store
    pub capacity: usize,

    /// Number of new keys inserted
    pub insertions: u64,

    /// Number of existing keys whose value was replaced
    pub updates: u64,

    /// Entries evicted to make room for a new key
    pub evictions_capacity: u64,

    /// Entries evicted by shrinking the capacity
    pub evictions_resize: u64,

    /// Entries removed explicitly
    pub removals: u64,

    /// Entries dropped by `clear`
    pub cleared: u64,
}

impl CacheStats {
    /// Calculate cache hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Total lookups served (hits + misses)
    pub fn total_lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Every entry that left the store for any reason
    pub fn total_evictions(&self) -> u64 {
        self.evictions_capacity + self.evictions_resize + self.removals + self.cleared
    }

    /// Fraction of capacity in use (0.0 - 1.0)
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.entries as f64 / self.capacity as f64
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats {{ hits: {}, misses: {}, hit_rate: {:.2}%, entries: {}/{}, evictions: {} }}",
            self.hits,
            self.misses,
            self.hit_rate(),
            self.entries,
            self.capacity,
            self.total_evictions()
        )
    }
}
