//! Cache entry bookkeeping

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A cached value together with its access metadata
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The cached value
    pub value: V,

    /// Entry metadata
    pub metadata: EntryMetadata,
}

impl<V> CacheEntry<V> {
    /// Create a new entry stamped with the current time
    pub fn new(value: V) -> Self {
        let now = Utc::now();

        Self {
            value,
            metadata: EntryMetadata {
                created_at: now,
                accessed_at: now,
                access_count: 0,
                version: 1,
            },
        }
    }

    /// Mark the entry as accessed (updates access time and count)
    pub fn mark_accessed(&mut self) {
        self.metadata.accessed_at = Utc::now();
        self.metadata.access_count += 1;
    }

    /// Swap in a new value, returning the old one
    pub fn replace_value(&mut self, value: V) -> V {
        self.metadata.accessed_at = Utc::now();
        self.metadata.version += 1;
        std::mem::replace(&mut self.value, value)
    }
}

/// Metadata associated with a cache entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// When the entry was created
    pub created_at: DateTime<Utc>,

    /// Last access or update time
    pub accessed_at: DateTime<Utc>,

    /// Number of lookup hits on this entry
    pub access_count: u64,

    /// Version number (incremented when the value is replaced)
    pub version: u64,
}

impl EntryMetadata {
    /// Get the age of the entry
    pub fn age(&self) -> Duration {
        (Utc::now() - self.created_at)
            .to_std()
            .unwrap_or(Duration::from_secs(0))
    }

    /// Get time since last access
    pub fn time_since_access(&self) -> Duration {
        (Utc::now() - self.accessed_at)
            .to_std()
            .unwrap_or(Duration::from_secs(0))
    }

    /// Check if the entry has been hit at least `threshold` times
    pub fn is_hot(&self, threshold: u64) -> bool {
        self.access_count >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("value");
        assert_eq!(entry.value, "value");
        assert_eq!(entry.metadata.access_count, 0);
        assert_eq!(entry.metadata.version, 1);
        assert_eq!(entry.metadata.created_at, entry.metadata.accessed_at);
    }

    #[test]
    fn test_mark_accessed() {
        let mut entry = CacheEntry::new(1u32);
        let initial_time = entry.metadata.accessed_at;

        sleep(Duration::from_millis(10));
        entry.mark_accessed();
        entry.mark_accessed();

        assert_eq!(entry.metadata.access_count, 2);
        assert!(entry.metadata.accessed_at > initial_time);
        assert!(entry.metadata.is_hot(2));
        assert!(!entry.metadata.is_hot(3));
    }

    #[test]
    fn test_replace_value() {
        let mut entry = CacheEntry::new("old");
        let old = entry.replace_value("new");

        assert_eq!(old, "old");
        assert_eq!(entry.value, "new");
        assert_eq!(entry.metadata.version, 2);
    }

    #[test]
    fn test_age() {
        let entry = CacheEntry::new(());
        sleep(Duration::from_millis(10));
        assert!(entry.metadata.age() >= Duration::from_millis(10));
        assert!(entry.metadata.time_since_access() >= Duration::from_millis(10));
    }
}
