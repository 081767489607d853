//! Dictionary schema module
//!
//! This module defines the element kinds and parts of speech the cache is
//! keyed by, and the dictionary element payloads it stores.

pub mod elements;
pub mod types;

pub use elements::{DictionaryElement, Exc, IndexWord, Synset};
pub use types::{ElementKind, Pos};
