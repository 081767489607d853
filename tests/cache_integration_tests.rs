//! Integration tests for the dictionary cache
//!
//! These tests verify the complete cache functionality including:
//! - Capacity bounds and LRU eviction order
//! - Lemma index coherence under eviction, replacement and resizing
//! - Disabled-mode behavior
//! - Randomized operation sequences

use lexicon_cache::cache::{
    CacheConfig, DictionaryCache, EvictionReason, EvictionRecorder, LruStore, PrimaryKey,
};
use lexicon_cache::schema::{DictionaryElement, ElementKind, Exc, IndexWord, Pos, Synset};
use lexicon_cache::{AlternateKey, CacheError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn enabled_cache(capacity: usize) -> DictionaryCache {
    let config = CacheConfig::builder()
        .caching_enabled(true)
        .default_capacity(capacity)
        .build();
    DictionaryCache::new(config).unwrap()
}

fn verb(lemma: &str, sense: u64) -> IndexWord {
    IndexWord::new(Pos::Verb, lemma, vec![sense])
}

#[test]
fn test_capacity_two_evicts_oldest_lemma() {
    init_tracing();
    let config = CacheConfig::builder()
        .caching_enabled(true)
        .kind_capacity(ElementKind::IndexWord, 2)
        .build();
    let mut cache: DictionaryCache = DictionaryCache::new(config).unwrap();

    cache.cache_index_word(10, verb("run", 1)).unwrap();
    cache.cache_index_word(20, verb("walk", 2)).unwrap();
    cache.cache_index_word(30, verb("jump", 3)).unwrap();

    assert!(cache.get_cached_index_word(Pos::Verb, "run").is_none());
    assert!(cache
        .get_cached(ElementKind::IndexWord, PrimaryKey::new(Pos::Verb, 20))
        .is_some());
    assert!(cache
        .get_cached(ElementKind::IndexWord, PrimaryKey::new(Pos::Verb, 30))
        .is_some());
    assert_eq!(cache.cache_size(ElementKind::IndexWord).unwrap(), 2);
    assert!(cache.verify_coherence().is_ok());
}

#[test]
fn test_disabled_throughout() {
    init_tracing();
    let mut cache = DictionaryCache::<DictionaryElement>::disabled();

    for offset in 0..50 {
        cache.cache_index_word(offset, verb("run", offset)).unwrap();
    }
    assert!(cache
        .get_cached(ElementKind::IndexWord, PrimaryKey::new(Pos::Verb, 10))
        .is_none());
    assert!(cache.get_cached_index_word(Pos::Verb, "run").is_none());
    assert!(cache.caches().is_none());

    let err = cache.cache_size(ElementKind::IndexWord).unwrap_err();
    assert!(matches!(err, CacheError::CachingDisabled(_)));
    assert!(err.is_config_error());
    assert!(cache.cache_capacity(ElementKind::Synset).is_err());
    assert!(cache.cache_stats(ElementKind::Exception).is_err());
}

#[test]
fn test_shrink_cleans_index() {
    init_tracing();
    let mut cache = enabled_cache(10);
    cache.cache_index_word(10, verb("run", 1)).unwrap();
    cache.cache_index_word(20, verb("walk", 2)).unwrap();
    cache.cache_index_word(30, verb("jump", 3)).unwrap();

    let evicted = cache
        .set_kind_cache_capacity(ElementKind::IndexWord, 1)
        .unwrap();

    assert_eq!(evicted, 2);
    assert_eq!(cache.cache_size(ElementKind::IndexWord).unwrap(), 1);

    let caches = cache.caches().unwrap();
    let lemmas: Vec<String> = caches
        .alternate_keys(ElementKind::IndexWord)
        .iter()
        .map(|(alt, _)| alt.lemma().to_string())
        .collect();
    assert_eq!(lemmas, vec!["jump".to_string()]);

    let stats = cache.cache_stats(ElementKind::IndexWord).unwrap();
    assert_eq!(stats.evictions_resize, 2);
}

#[test]
fn test_capacity_bound_on_every_insert() {
    let mut cache = enabled_cache(5);
    for offset in 0..100u64 {
        cache
            .cache_index_word(offset, verb(&format!("w{}", offset), offset))
            .unwrap();
        assert!(cache.cache_size(ElementKind::IndexWord).unwrap() <= 5);
    }
}

#[test]
fn test_lru_order_and_promotion() {
    let mut store = LruStore::new(3, EvictionRecorder::new()).unwrap();
    store.put(1u64, "a");
    store.put(2, "b");
    store.put(3, "c");

    store.put(4, "d");
    assert!(!store.contains_key(&1));

    // promote 2 so 3 goes next
    assert!(store.get(&2).is_some());
    store.put(5, "e");

    assert!(store.contains_key(&2));
    assert!(!store.contains_key(&3));
    assert_eq!(
        store.listener().keys_for(EvictionReason::Capacity),
        vec![&1, &3]
    );
}

#[test]
fn test_stale_key_guard() {
    let mut cache = enabled_cache(10);
    cache.cache_index_word(1, verb("dog", 100)).unwrap();
    cache.cache_index_word(2, verb("dog", 200)).unwrap();

    let removed = cache.remove_cached(ElementKind::IndexWord, &PrimaryKey::new(Pos::Verb, 1));
    assert!(removed.is_some());

    let word = cache.get_cached_index_word(Pos::Verb, "dog").unwrap();
    assert_eq!(word.synset_offsets, vec![200]);
    assert!(cache.verify_coherence().is_ok());
}

#[test]
fn test_stale_key_guard_under_capacity_eviction() {
    let mut cache = enabled_cache(2);
    cache.cache_index_word(1, verb("dog", 100)).unwrap();
    cache.cache_index_word(2, verb("dog", 200)).unwrap();
    // evicts offset 1, which must not take the lemma with it
    cache.cache_index_word(3, verb("cat", 300)).unwrap();

    let word = cache.get_cached_index_word(Pos::Verb, "dog").unwrap();
    assert_eq!(word.synset_offsets, vec![200]);
}

#[test]
fn test_replacing_object_moves_lemma() {
    let mut cache = enabled_cache(10);
    cache.cache_index_word(1, verb("run", 1)).unwrap();
    cache.cache_index_word(1, verb("sprint", 1)).unwrap();

    assert!(cache.get_cached_index_word(Pos::Verb, "run").is_none());
    assert!(cache.get_cached_index_word(Pos::Verb, "sprint").is_some());
    assert_eq!(cache.cache_size(ElementKind::IndexWord).unwrap(), 1);
    assert!(cache.verify_coherence().is_ok());
}

#[test]
fn test_synsets_have_no_lemma_lookup() {
    let mut cache = enabled_cache(10);
    cache
        .cache_synset(Synset::new(
            Pos::Noun,
            2_084_071,
            vec!["dog".into(), "domestic_dog".into()],
            "a member of the genus Canis",
        ))
        .unwrap();

    assert!(cache
        .get_cached(ElementKind::Synset, AlternateKey::new(Pos::Noun, "dog"))
        .is_none());
    assert!(cache.get_cached_synset(Pos::Noun, 2_084_071).is_some());
}

#[test]
fn test_clear_then_reuse() {
    let mut cache = enabled_cache(10);
    cache.cache_index_word(1, verb("run", 1)).unwrap();
    cache
        .cache_exception(2, Exc::new(Pos::Verb, "ran", vec!["run".into()]))
        .unwrap();

    cache.clear_cache();
    for kind in ElementKind::ALL {
        assert_eq!(cache.cache_size(kind).unwrap(), 0);
    }
    assert!(cache.get_cached_exception(Pos::Verb, "ran").is_none());

    cache.cache_index_word(1, verb("run", 1)).unwrap();
    assert!(cache.get_cached_index_word(Pos::Verb, "run").is_some());
    assert!(cache.verify_coherence().is_ok());
}

#[test]
fn test_toggle_preserves_contents() {
    let mut cache = enabled_cache(10);
    cache.cache_index_word(1, verb("run", 1)).unwrap();

    cache.set_caching_enabled(false);
    cache.cache_index_word(2, verb("walk", 2)).unwrap();
    assert!(cache.get_cached_index_word(Pos::Verb, "run").is_none());

    cache.set_caching_enabled(true);
    assert!(cache.get_cached_index_word(Pos::Verb, "run").is_some());
    assert!(cache.get_cached_index_word(Pos::Verb, "walk").is_none());
}

#[test]
fn test_config_from_json_drives_cache() {
    let json = r#"{
        "caching_enabled": true,
        "default_capacity": 4,
        "kinds": { "exception": { "capacity": 1, "alternate_index": true } }
    }"#;
    let mut cache: DictionaryCache = DictionaryCache::new(CacheConfig::from_json_str(json).unwrap()).unwrap();

    cache
        .cache_exception(1, Exc::new(Pos::Noun, "geese", vec!["goose".into()]))
        .unwrap();
    cache
        .cache_exception(2, Exc::new(Pos::Noun, "mice", vec!["mouse".into()]))
        .unwrap();

    assert_eq!(cache.cache_capacity(ElementKind::Exception).unwrap(), 1);
    assert_eq!(cache.cache_capacity(ElementKind::IndexWord).unwrap(), 4);
    assert!(cache.get_cached_exception(Pos::Noun, "geese").is_none());
    assert!(cache.get_cached_exception(Pos::Noun, "mice").is_some());
}

#[test]
fn test_random_operations_keep_index_coherent() {
    init_tracing();
    const LEMMAS: [&str; 12] = [
        "run", "walk", "jump", "swim", "fly", "read", "write", "sing", "dance", "cook", "sleep",
        "think",
    ];

    for seed in 0..8u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cache = enabled_cache(6);

        for _ in 0..500 {
            let offset = rng.gen_range(0..24u64);
            let lemma = LEMMAS[rng.gen_range(0..LEMMAS.len())];

            match rng.gen_range(0..100) {
                0..=44 => cache
                    .cache_index_word(offset, verb(lemma, offset))
                    .unwrap(),
                45..=64 => {
                    if let Some(word) = cache.get_cached_index_word(Pos::Verb, lemma) {
                        assert_eq!(word.lemma, lemma);
                    }
                }
                65..=79 => {
                    cache.get_cached(ElementKind::IndexWord, PrimaryKey::new(Pos::Verb, offset));
                }
                80..=91 => {
                    cache.remove_cached(ElementKind::IndexWord, &PrimaryKey::new(Pos::Verb, offset));
                }
                92..=97 => {
                    let capacity = rng.gen_range(1..10);
                    cache
                        .set_kind_cache_capacity(ElementKind::IndexWord, capacity)
                        .unwrap();
                }
                _ => cache.clear_kind_cache(ElementKind::IndexWord),
            }

            let size = cache.cache_size(ElementKind::IndexWord).unwrap();
            let capacity = cache.cache_capacity(ElementKind::IndexWord).unwrap();
            assert!(size <= capacity, "seed {}: {} > {}", seed, size, capacity);
            if let Err(e) = cache.verify_coherence() {
                panic!("seed {}: {}", seed, e);
            }
        }
    }
}

#[test]
fn test_stats_reflect_lookups() {
    let mut cache = enabled_cache(2);
    cache.cache_index_word(1, verb("run", 1)).unwrap();
    cache.cache_index_word(2, verb("walk", 2)).unwrap();
    cache.cache_index_word(3, verb("jump", 3)).unwrap();

    cache.get_cached_index_word(Pos::Verb, "walk");
    cache.get_cached_index_word(Pos::Verb, "run");

    let stats = cache.cache_stats(ElementKind::IndexWord).unwrap();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.insertions, 3);
    assert_eq!(stats.evictions_capacity, 1);
    assert_eq!(stats.hit_rate(), 50.0);
    assert!(stats.to_string().contains("entries: 2/2"));
}
