//! Demonstrates the dictionary cache in front of a simulated lookup
//!
//! This example shows how to:
//! - Load cache configuration from the environment (`LEXICON_CACHE_*`)
//! - Check the cache, fall back to a slow lookup, then cache the result
//! - Find cached index words again by lemma
//! - Watch the lemma index follow evictions and resizes
//!
//! Run with `RUST_LOG=lexicon_cache=debug` to see cache decisions.

use lexicon_cache::schema::{ElementKind, Exc, IndexWord, Pos, Synset};
use lexicon_cache::{CacheConfig, DictionaryCache};
use tracing_subscriber::EnvFilter;

/// Stand-in for reading an index file: offsets are derived from the lemma
fn read_index_word(pos: Pos, lemma: &str) -> (u64, IndexWord) {
    let offset = lemma.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b))) % 1_000_000;
    let senses = (0..lemma.len() as u64 % 3 + 1).map(|i| offset * 10 + i).collect();
    (offset, IndexWord::new(pos, lemma, senses))
}

fn lookup<'a>(cache: &'a mut DictionaryCache, pos: Pos, lemma: &str) -> anyhow::Result<&'a IndexWord> {
    if cache.get_cached_index_word(pos, lemma).is_none() {
        println!("   miss: {} ({}), reading index file", lemma, pos);
        let (offset, word) = read_index_word(pos, lemma);
        cache.cache_index_word(offset, word)?;
    }

    cache
        .get_cached_index_word(pos, lemma)
        .ok_or_else(|| anyhow::anyhow!("{} not cached after insert", lemma))
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = CacheConfig::from_env()?;
    config.caching_enabled = true;
    println!("Cache configuration:\n{}\n", serde_json::to_string_pretty(&config)?);

    let mut cache: DictionaryCache = DictionaryCache::new(config)?;
    cache.set_kind_cache_capacity(ElementKind::IndexWord, 3)?;

    // 1. Read-through lookups
    println!("1. Looking up words (index word capacity 3)...");
    for lemma in ["run", "walk", "run", "jump", "swim", "run", "walk"] {
        let word = lookup(&mut cache, Pos::Verb, lemma)?;
        println!("   {} -> {} senses", word.lemma, word.sense_count());
    }
    println!("   {}\n", cache.cache_stats(ElementKind::IndexWord)?);

    // 2. Other element kinds
    println!("2. Caching a synset and an exception entry...");
    cache.cache_synset(Synset::new(
        Pos::Verb,
        1_926_311,
        vec!["run".to_string()],
        "move fast by using one's feet",
    ))?;
    cache.cache_exception(5_120, Exc::new(Pos::Verb, "ran", vec!["run".to_string()]))?;

    if let Some(exc) = cache.get_cached_exception(Pos::Verb, "ran") {
        println!("   ran -> {:?}", exc.exceptions);
    }
    if let Some(synset) = cache.get_cached_synset(Pos::Verb, 1_926_311) {
        println!("   synset {} -> {}\n", synset.key(), synset.gloss);
    }

    // 3. Shrinking evicts and cleans the lemma index
    println!("3. Shrinking the index word cache to 1...");
    let evicted = cache.set_kind_cache_capacity(ElementKind::IndexWord, 1)?;
    println!("   evicted {} entries", evicted);
    if let Some(caches) = cache.caches() {
        for (lemma, primary) in caches.alternate_keys(ElementKind::IndexWord) {
            println!("   lemma {} -> {}", lemma, primary);
        }
    }
    cache.verify_coherence()?;
    println!();

    // 4. Disabling
    println!("4. Disabling caching...");
    cache.set_caching_enabled(false);
    println!(
        "   lookup while disabled: {:?}",
        cache.get_cached_index_word(Pos::Verb, "walk").map(|w| &w.lemma)
    );
    match cache.cache_size(ElementKind::IndexWord) {
        Ok(size) => println!("   size: {}", size),
        Err(e) => println!("   size query refused: {}", e),
    }

    println!("\n✓ Demo complete");
    Ok(())
}
