use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use gems_backend::asset_source::MemoryAssetSource;
use gems_backend::store::DEFAULT_RANDOM_COUNT;
use gems_backend::types::{BundleTier, SupportedLanguage};

mod helpers;
use helpers as h;

#[test]
fn test_small_corpus_is_not_padded() {
    let (store, _source) = h::store_with(h::bundle_source(SupportedLanguage::Spanish, BundleTier::All, 5));

    let words = store.get_random_vocabulary(SupportedLanguage::Spanish, DEFAULT_RANDOM_COUNT, BundleTier::All);

    assert_eq!(words.len(), 5);
}

#[test]
fn test_large_corpus_no_duplicates() {
    let (store, _source) = h::store_with(h::bundle_source(SupportedLanguage::Spanish, BundleTier::All, 1000));

    let words = store.get_random_vocabulary(SupportedLanguage::Spanish, 10, BundleTier::All);

    assert_eq!(words.len(), 10);
    let ids: HashSet<&str> = words.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids.len(), 10);
}

#[test]
fn test_sampling_does_not_reorder_cache() {
    let (store, source) = h::store_with(h::bundle_source(SupportedLanguage::French, BundleTier::Higher, 40));

    let before = store.load_bundled_vocabulary(SupportedLanguage::French, BundleTier::Higher).unwrap().all_words();

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5 {
        store.get_random_vocabulary_with_rng(SupportedLanguage::French, 40, BundleTier::Higher, &mut rng);
    }

    let after = store.load_bundled_vocabulary(SupportedLanguage::French, BundleTier::Higher).unwrap().all_words();
    assert_eq!(before, after);
    assert_eq!(source.fetch_count(), 1);
}

#[test]
fn test_full_sample_is_a_permutation() {
    let (store, _source) = h::store_with(h::bundle_source(SupportedLanguage::German, BundleTier::All, 30));

    let mut rng = StdRng::seed_from_u64(42);
    let words = store.get_random_vocabulary_with_rng(SupportedLanguage::German, 100, BundleTier::All, &mut rng);

    let mut ids: Vec<String> = words.into_iter().map(|w| w.id).collect();
    ids.sort();
    let mut expected: Vec<String> = (0..30).map(|i| format!("de-{}", i)).collect();
    expected.sort();
    assert_eq!(ids, expected);
}

#[test]
fn test_zero_count_and_missing_bundle() {
    let (store, _source) = h::store_with(h::bundle_source(SupportedLanguage::Spanish, BundleTier::All, 5));
    assert!(store.get_random_vocabulary(SupportedLanguage::Spanish, 0, BundleTier::All).is_empty());

    let (store, _source) = h::store_with(MemoryAssetSource::new());
    assert!(store.get_random_vocabulary(SupportedLanguage::Spanish, 10, BundleTier::All).is_empty());
}
