//! Dictionary element payloads held by the cache
//!
//! These are the objects a dictionary produces after an uncached lookup. They
//! carry just enough structure for the cache to key them: the part of speech,
//! the lemma (where lemma lookup applies) and the file offset.

use crate::cache::types::{AlternateKey, Cacheable, PrimaryKey};
use crate::schema::types::{ElementKind, Pos};
use serde::{Deserialize, Serialize};

/// Index entry for one lemma: the synsets the word appears in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexWord {
    /// Part of speech of the entry
    pub pos: Pos,
    /// Base form of the word
    pub lemma: String,
    /// Offsets of the synsets containing this word, most frequent sense first
    pub synset_offsets: Vec<u64>,
}

impl IndexWord {
    /// Create an index word
    pub fn new(pos: Pos, lemma: impl Into<String>, synset_offsets: Vec<u64>) -> Self {
        Self {
            pos,
            lemma: lemma.into(),
            synset_offsets,
        }
    }

    /// Number of senses recorded for this word
    pub fn sense_count(&self) -> usize {
        self.synset_offsets.len()
    }
}

impl Cacheable for IndexWord {
    fn element_kind(&self) -> ElementKind {
        ElementKind::IndexWord
    }

    fn alternate_key(&self) -> Option<AlternateKey> {
        Some(AlternateKey::new(self.pos, &self.lemma))
    }
}

/// Group of word senses sharing one meaning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synset {
    /// Part of speech of the synset
    pub pos: Pos,
    /// Offset of the synset in its data file
    pub offset: u64,
    /// Member words
    pub words: Vec<String>,
    /// Definition and example text
    pub gloss: String,
}

impl Synset {
    /// Create a synset
    pub fn new(pos: Pos, offset: u64, words: Vec<String>, gloss: impl Into<String>) -> Self {
        Self {
            pos,
            offset,
            words,
            gloss: gloss.into(),
        }
    }

    /// Primary key this synset is stored under
    pub fn key(&self) -> PrimaryKey {
        PrimaryKey::new(self.pos, self.offset)
    }

    /// Whether `lemma` is one of the member words
    pub fn contains_word(&self, lemma: &str) -> bool {
        self.words.iter().any(|w| w.eq_ignore_ascii_case(lemma))
    }
}

impl Cacheable for Synset {
    fn element_kind(&self) -> ElementKind {
        ElementKind::Synset
    }
}

/// Morphological exception: irregular forms mapping to their base forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exc {
    /// Part of speech of the exception
    pub pos: Pos,
    /// The irregular (inflected) form, e.g. "ran"
    pub lemma: String,
    /// Base forms, e.g. ["run"]
    pub exceptions: Vec<String>,
}

impl Exc {
    /// Create an exception entry
    pub fn new(pos: Pos, lemma: impl Into<String>, exceptions: Vec<String>) -> Self {
        Self {
            pos,
            lemma: lemma.into(),
            exceptions,
        }
    }
}

impl Cacheable for Exc {
    fn element_kind(&self) -> ElementKind {
        ElementKind::Exception
    }

    fn alternate_key(&self) -> Option<AlternateKey> {
        Some(AlternateKey::new(self.pos, &self.lemma))
    }
}

/// Any dictionary element the cache can hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DictionaryElement {
    /// Index word entry
    IndexWord(IndexWord),
    /// Synset entry
    Synset(Synset),
    /// Exception entry
    Exception(Exc),
}

impl DictionaryElement {
    /// Borrow as an index word, if it is one
    pub fn as_index_word(&self) -> Option<&IndexWord> {
        match self {
            DictionaryElement::IndexWord(word) => Some(word),
            _ => None,
        }
    }

    /// Borrow as a synset, if it is one
    pub fn as_synset(&self) -> Option<&Synset> {
        match self {
            DictionaryElement::Synset(synset) => Some(synset),
            _ => None,
        }
    }

    /// Borrow as an exception entry, if it is one
    pub fn as_exception(&self) -> Option<&Exc> {
        match self {
            DictionaryElement::Exception(exc) => Some(exc),
            _ => None,
        }
    }
}

impl Cacheable for DictionaryElement {
    fn element_kind(&self) -> ElementKind {
        match self {
            DictionaryElement::IndexWord(word) => word.element_kind(),
            DictionaryElement::Synset(synset) => synset.element_kind(),
            DictionaryElement::Exception(exc) => exc.element_kind(),
        }
    }

    fn alternate_key(&self) -> Option<AlternateKey> {
        match self {
            DictionaryElement::IndexWord(word) => word.alternate_key(),
            DictionaryElement::Synset(synset) => synset.alternate_key(),
            DictionaryElement::Exception(exc) => exc.alternate_key(),
        }
    }
}

impl From<IndexWord> for DictionaryElement {
    fn from(word: IndexWord) -> Self {
        DictionaryElement::IndexWord(word)
    }
}

impl From<Synset> for DictionaryElement {
    fn from(synset: Synset) -> Self {
        DictionaryElement::Synset(synset)
    }
}

impl From<Exc> for DictionaryElement {
    fn from(exc: Exc) -> Self {
        DictionaryElement::Exception(exc)
    }
}
