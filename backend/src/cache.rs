use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::types::{BundleTier, CentralizedVocabularyWord, SupportedLanguage, VocabularyBundle};

pub fn bundle_cache_key(language: SupportedLanguage, tier: BundleTier) -> String {
    format!("{}-{}", language.as_str(), tier.as_str())
}

/// In-memory cache for the two vocabulary paths: per-language bundles keyed by
/// `language-tier`, and a single slot for the complete bundle.
///
/// Cached values are shared as `Arc` and never mutated. The locks are only held
/// for the map access itself, never across a fetch, so concurrent cold loads of
/// the same key both fetch and the last writer wins.
#[derive(Debug, Default)]
pub struct VocabularyCache {
    bundles: Mutex<HashMap<String, Arc<VocabularyBundle>>>,
    complete: Mutex<Option<Arc<Vec<CentralizedVocabularyWord>>>>,
}

impl VocabularyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_bundle(&self, key: &str) -> Option<Arc<VocabularyBundle>> {
        self.bundles.lock().get(key).cloned()
    }

    pub fn set_bundle(&self, key: &str, bundle: Arc<VocabularyBundle>) {
        self.bundles.lock().insert(key.to_string(), bundle);
    }

    pub fn bundle_count(&self) -> usize {
        self.bundles.lock().len()
    }

    pub fn get_complete(&self) -> Option<Arc<Vec<CentralizedVocabularyWord>>> {
        self.complete.lock().clone()
    }

    pub fn set_complete(&self, words: Arc<Vec<CentralizedVocabularyWord>>) {
        *self.complete.lock() = Some(words);
    }

    pub fn has_complete(&self) -> bool {
        self.complete.lock().is_some()
    }

    /// Empties both caches. A load that is in flight will still store its result
    /// when it completes.
    pub fn clear(&self) {
        self.bundles.lock().clear();
        *self.complete.lock() = None;
    }
}
