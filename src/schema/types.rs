//! Tag types shared by dictionary elements and cache keys

use serde::{Deserialize, Serialize};
use std::fmt;

/// Part of speech carried by every dictionary key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pos {
    /// Noun
    Noun,
    /// Verb
    Verb,
    /// Adjective (including satellite adjectives)
    Adjective,
    /// Adverb
    Adverb,
}

impl Pos {
    /// All parts of speech, in dictionary file order
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adjective, Pos::Adverb];

    /// Long label used in logs and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adjective => "adjective",
            Pos::Adverb => "adverb",
        }
    }

    /// Single-letter key used by WordNet data files
    pub fn key(&self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adjective => 'a',
            Pos::Adverb => 'r',
        }
    }

    /// Parse a part of speech from its label or WordNet letter
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "noun" | "n" => Some(Pos::Noun),
            "verb" | "v" => Some(Pos::Verb),
            "adjective" | "adj" | "a" | "s" => Some(Pos::Adjective),
            "adverb" | "adv" | "r" => Some(Pos::Adverb),
            _ => None,
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of cacheable dictionary element
///
/// Each kind gets its own LRU store and, when configured, its own lemma index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Index word: a lemma and the synsets it belongs to
    IndexWord,
    /// Synset: a group of word senses sharing one meaning
    Synset,
    /// Morphological exception entry (irregular inflections)
    Exception,
}

impl ElementKind {
    /// Every element kind, in allocation order
    pub const ALL: [ElementKind; 3] = [
        ElementKind::IndexWord,
        ElementKind::Synset,
        ElementKind::Exception,
    ];

    /// Position of this kind in [`ElementKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            ElementKind::IndexWord => 0,
            ElementKind::Synset => 1,
            ElementKind::Exception => 2,
        }
    }

    /// Convert kind to its configuration label
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::IndexWord => "index_word",
            ElementKind::Synset => "synset",
            ElementKind::Exception => "exception",
        }
    }

    /// Parse a kind from its configuration label
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "index_word" | "indexword" => Some(ElementKind::IndexWord),
            "synset" => Some(ElementKind::Synset),
            "exception" | "exc" => Some(ElementKind::Exception),
            _ => None,
        }
    }

    /// Whether elements of this kind are looked up by lemma by default
    pub fn has_alternate_lookup(&self) -> bool {
        matches!(self, ElementKind::IndexWord | ElementKind::Exception)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
