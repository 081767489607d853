//! Error types for the dictionary cache
//!
//! Caching while disabled is not an error: mutations are ignored and lookups
//! miss. Errors are reserved for misconfiguration and for introspection that
//! has nothing to introspect.

use crate::schema::ElementKind;
use thiserror::Error;

/// Main error type for cache operations
#[derive(Error, Debug)]
pub enum CacheError {
    /// Size, capacity or stats were requested while caching is disabled
    #[error("Caching is disabled: {0}")]
    CachingDisabled(String),

    /// A store capacity of zero was requested
    #[error("Invalid capacity {capacity} for {context}: capacity must be greater than 0")]
    InvalidCapacity { capacity: usize, context: String },

    /// The value handed to `cache` belongs to another element kind
    #[error("Kind mismatch: cannot cache a {actual} element in the {expected} cache")]
    KindMismatch {
        expected: ElementKind,
        actual: ElementKind,
    },

    /// A lemma translation points at an entry that is no longer cached
    #[error("Index incoherent for {kind}: lemma '{lemma}' {detail}")]
    IndexIncoherent {
        kind: ElementKind,
        lemma: String,
        detail: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

impl CacheError {
    /// Returns true for errors caused by how the cache was configured
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CacheError::CachingDisabled(_)
                | CacheError::InvalidCapacity { .. }
                | CacheError::ConfigError(_)
        )
    }
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

impl From<String> for CacheError {
    fn from(s: String) -> Self {
        CacheError::Other(s)
    }
}

impl From<&str> for CacheError {
    fn from(s: &str) -> Self {
        CacheError::Other(s.to_string())
    }
}
