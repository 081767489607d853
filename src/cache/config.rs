//! Configuration for the dictionary cache

use crate::error::{CacheError, Result};
use crate::schema::ElementKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of entries per element kind
pub const DEFAULT_CAPACITY: usize = 1000;

/// Environment variable prefix read by [`CacheConfig::from_env`]
pub const ENV_PREFIX: &str = "LEXICON_CACHE";

/// Per-kind cache settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindSettings {
    /// Store capacity for this kind; `None` uses the config's default capacity
    #[serde(default)]
    pub capacity: Option<usize>,

    /// Whether this kind keeps a lemma index for alternate-key lookups
    pub alternate_index: bool,
}

impl KindSettings {
    /// Default settings for a kind
    pub fn for_kind(kind: ElementKind) -> Self {
        Self {
            capacity: None,
            alternate_index: kind.has_alternate_lookup(),
        }
    }
}

/// Configuration for the dictionary cache
///
/// The kind table is static: it is handed to the cache at construction and
/// decides, per element kind, the store capacity and whether a lemma index
/// is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caching starts enabled
    #[serde(default)]
    pub caching_enabled: bool,

    /// Capacity for kinds without an explicit capacity
    #[serde(default = "default_capacity")]
    pub default_capacity: usize,

    /// Per-kind settings
    #[serde(default = "default_kinds")]
    pub kinds: BTreeMap<ElementKind, KindSettings>,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_kinds() -> BTreeMap<ElementKind, KindSettings> {
    ElementKind::ALL
        .iter()
        .map(|&kind| (kind, KindSettings::for_kind(kind)))
        .collect()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            caching_enabled: false,
            default_capacity: DEFAULT_CAPACITY,
            kinds: default_kinds(),
        }
    }
}

impl CacheConfig {
    /// Create a new builder for cache configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Settings for `kind`, falling back to the kind's defaults
    pub fn settings(&self, kind: ElementKind) -> KindSettings {
        self.kinds
            .get(&kind)
            .copied()
            .unwrap_or_else(|| KindSettings::for_kind(kind))
    }

    /// Effective capacity for `kind`
    pub fn capacity(&self, kind: ElementKind) -> usize {
        self.settings(kind).capacity.unwrap_or(self.default_capacity)
    }

    /// Whether `kind` keeps a lemma index
    pub fn alternate_index(&self, kind: ElementKind) -> bool {
        self.settings(kind).alternate_index
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_capacity == 0 {
            return Err(CacheError::ConfigError(
                "default_capacity must be greater than 0".to_string(),
            ));
        }

        for (kind, settings) in &self.kinds {
            if settings.capacity == Some(0) {
                return Err(CacheError::ConfigError(format!(
                    "capacity for {} must be greater than 0",
                    kind
                )));
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CacheConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the environment, reading a `.env` file first
    ///
    /// Recognized variables:
    /// - `LEXICON_CACHE_ENABLED` (`true`/`false`, `1`/`0`, `yes`/`no`)
    /// - `LEXICON_CACHE_CAPACITY` (default capacity)
    /// - `LEXICON_CACHE_INDEX_WORD_CAPACITY`, `LEXICON_CACHE_SYNSET_CAPACITY`,
    ///   `LEXICON_CACHE_EXCEPTION_CAPACITY`
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build a configuration from a variable lookup function
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(&format!("{}_ENABLED", ENV_PREFIX)) {
            config.caching_enabled = parse_bool(&value).ok_or_else(|| {
                CacheError::ConfigError(format!("{}_ENABLED: invalid boolean '{}'", ENV_PREFIX, value))
            })?;
        }

        if let Some(value) = lookup(&format!("{}_CAPACITY", ENV_PREFIX)) {
            config.default_capacity = parse_capacity("CAPACITY", &value)?;
        }

        for kind in ElementKind::ALL {
            let suffix = format!("{}_CAPACITY", kind.as_str().to_uppercase());
            if let Some(value) = lookup(&format!("{}_{}", ENV_PREFIX, suffix)) {
                let capacity = parse_capacity(&suffix, &value)?;
                config
                    .kinds
                    .entry(kind)
                    .or_insert_with(|| KindSettings::for_kind(kind))
                    .capacity = Some(capacity);
            }
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_capacity(name: &str, value: &str) -> Result<usize> {
    value.trim().parse::<usize>().map_err(|e| {
        CacheError::ConfigError(format!("{}_{}: invalid capacity '{}': {}", ENV_PREFIX, name, value, e))
    })
}

/// Builder for cache configuration
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    caching_enabled: Option<bool>,
    default_capacity: Option<usize>,
    kinds: BTreeMap<ElementKind, KindSettings>,
}

impl CacheConfigBuilder {
    /// Enable or disable caching at startup
    pub fn caching_enabled(mut self, enabled: bool) -> Self {
        self.caching_enabled = Some(enabled);
        self
    }

    /// Set capacity for kinds without an explicit capacity
    pub fn default_capacity(mut self, capacity: usize) -> Self {
        self.default_capacity = Some(capacity);
        self
    }

    /// Set the capacity of one kind
    pub fn kind_capacity(mut self, kind: ElementKind, capacity: usize) -> Self {
        self.kinds
            .entry(kind)
            .or_insert_with(|| KindSettings::for_kind(kind))
            .capacity = Some(capacity);
        self
    }

    /// Enable or disable the lemma index of one kind
    pub fn alternate_index(mut self, kind: ElementKind, enabled: bool) -> Self {
        self.kinds
            .entry(kind)
            .or_insert_with(|| KindSettings::for_kind(kind))
            .alternate_index = enabled;
        self
    }

    /// Build the cache configuration
    pub fn build(self) -> CacheConfig {
        let defaults = CacheConfig::default();
        let mut kinds = defaults.kinds;
        kinds.extend(self.kinds);

        CacheConfig {
            caching_enabled: self.caching_enabled.unwrap_or(defaults.caching_enabled),
            default_capacity: self.default_capacity.unwrap_or(defaults.default_capacity),
            kinds,
        }
    }
}

/// Preset configurations for common use cases
impl CacheConfig {
    /// Configuration for memory-constrained environments
    pub fn small() -> Self {
        Self {
            caching_enabled: true,
            default_capacity: 200,
            ..Default::default()
        }
    }

    /// Configuration for long-running dictionary services
    ///
    /// Synsets are fetched once per sense of every looked-up word, so they
    /// get the largest store.
    pub fn large() -> Self {
        Self::builder()
            .caching_enabled(true)
            .default_capacity(5_000)
            .kind_capacity(ElementKind::Synset, 20_000)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert!(!config.caching_enabled);
        assert_eq!(config.default_capacity, DEFAULT_CAPACITY);
        assert_eq!(config.capacity(ElementKind::Synset), DEFAULT_CAPACITY);
        assert!(config.alternate_index(ElementKind::IndexWord));
        assert!(config.alternate_index(ElementKind::Exception));
        assert!(!config.alternate_index(ElementKind::Synset));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::builder()
            .caching_enabled(true)
            .default_capacity(300)
            .kind_capacity(ElementKind::IndexWord, 50)
            .alternate_index(ElementKind::Exception, false)
            .build();

        assert!(config.caching_enabled);
        assert_eq!(config.capacity(ElementKind::IndexWord), 50);
        assert_eq!(config.capacity(ElementKind::Synset), 300);
        assert!(!config.alternate_index(ElementKind::Exception));
        assert!(config.alternate_index(ElementKind::IndexWord));
    }

    #[test]
    fn test_config_validation() {
        let mut config = CacheConfig::default();
        config.default_capacity = 0;
        assert!(config.validate().is_err());

        let config = CacheConfig::builder()
            .kind_capacity(ElementKind::Exception, 0)
            .build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exception"));
    }

    #[test]
    fn test_from_vars() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("LEXICON_CACHE_ENABLED", "yes"),
            ("LEXICON_CACHE_CAPACITY", "250"),
            ("LEXICON_CACHE_SYNSET_CAPACITY", "4000"),
        ]);

        let config = CacheConfig::from_vars(|name| vars.get(name).map(|v| v.to_string())).unwrap();

        assert!(config.caching_enabled);
        assert_eq!(config.capacity(ElementKind::IndexWord), 250);
        assert_eq!(config.capacity(ElementKind::Synset), 4000);
    }

    #[test]
    fn test_from_vars_rejects_bad_values() {
        let result = CacheConfig::from_vars(|name| {
            (name == "LEXICON_CACHE_ENABLED").then(|| "maybe".to_string())
        });
        assert!(matches!(result, Err(CacheError::ConfigError(_))));

        let result = CacheConfig::from_vars(|name| {
            (name == "LEXICON_CACHE_INDEX_WORD_CAPACITY").then(|| "-5".to_string())
        });
        assert!(matches!(result, Err(CacheError::ConfigError(_))));

        let result = CacheConfig::from_vars(|name| {
            (name == "LEXICON_CACHE_CAPACITY").then(|| "0".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "caching_enabled": true,
            "kinds": {
                "index_word": { "capacity": 2, "alternate_index": true },
                "synset": { "alternate_index": false }
            }
        }"#;

        let config = CacheConfig::from_json_str(json).unwrap();
        assert!(config.caching_enabled);
        assert_eq!(config.capacity(ElementKind::IndexWord), 2);
        assert_eq!(config.capacity(ElementKind::Synset), DEFAULT_CAPACITY);
        // kinds missing from the table fall back to their defaults
        assert!(config.alternate_index(ElementKind::Exception));

        assert!(CacheConfig::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_preset_configs() {
        let small = CacheConfig::small();
        assert_eq!(small.capacity(ElementKind::IndexWord), 200);

        let large = CacheConfig::large();
        assert_eq!(large.capacity(ElementKind::Synset), 20_000);
        assert_eq!(large.capacity(ElementKind::Exception), 5_000);
        assert!(large.validate().is_ok());
    }
}
