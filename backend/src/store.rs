//! Vocabulary Store Module
//!
//! Loads the static vocabulary datasets through an `AssetSource`, keeps them in a
//! `VocabularyCache` and answers the queries used to seed game sessions.
//!
//! # Data paths
//!
//! - Per-language bundles (`/data/vocabulary/{language}/{tier}.json`), nested by
//!   category and subcategory. A failed load yields `None`.
//! - The complete bundle (`/data/vocabulary/complete_bundle.json`), a flat list of
//!   records carrying curriculum facets. A failed load yields an empty list, so
//!   every query built on it can iterate the result directly.
//!
//! No error crosses the query API. Failures are logged and degrade to the empty
//! result of the path, and are not cached, so the next call tries again.

use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::asset_source::{AssetSource, FetchError, COMPLETE_BUNDLE_PATH, bundle_path};
use crate::cache::{VocabularyCache, bundle_cache_key};
use crate::helpers::sorted_distinct;
use crate::logger::{debug, error, info, warn};
use crate::types::{
    BundleTier, CentralizedVocabularyWord, CurriculumLevel, SupportedLanguage,
    VocabularyBundle, VocabularyCategory, VocabularyFilters, VocabularyWord,
};

pub const DEFAULT_RANDOM_COUNT: usize = 10;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to fetch {path}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: FetchError,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        match self {
            LoadError::Fetch { source, .. } => source.is_not_found(),
            LoadError::Parse { .. } => false,
        }
    }
}

pub struct VocabularyStore {
    source: Box<dyn AssetSource>,
    cache: VocabularyCache,
}

impl VocabularyStore {
    pub fn new(source: Box<dyn AssetSource>) -> Self {
        VocabularyStore {
            source,
            cache: VocabularyCache::new(),
        }
    }

    pub fn cache(&self) -> &VocabularyCache {
        &self.cache
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LoadError> {
        let body = self.source.fetch(path).map_err(|e| LoadError::Fetch {
            path: path.to_string(),
            source: e,
        })?;

        serde_json::from_str(&body).map_err(|e| LoadError::Parse {
            path: path.to_string(),
            source: e,
        })
    }

    fn log_load_failure(&self, e: &LoadError) {
        if e.is_not_found() {
            warn(&format!("Vocabulary not available ({}): {}", self.source.describe(), e));
        } else {
            error(&format!("Error loading vocabulary ({}): {}", self.source.describe(), e));
        }
    }

    // ========================================================================
    // Per-language bundles
    // ========================================================================

    /// Returns the bundle for `(language, tier)`, fetching it on a cache miss.
    /// `None` means no data is available, it is not a fatal condition.
    pub fn load_bundled_vocabulary(
        &self,
        language: SupportedLanguage,
        tier: BundleTier,
    ) -> Option<Arc<VocabularyBundle>> {
        let key = bundle_cache_key(language, tier);

        if let Some(bundle) = self.cache.get_bundle(&key) {
            debug(&format!("load_bundled_vocabulary(): cache hit {}", key));
            return Some(bundle);
        }

        let path = bundle_path(language, tier);
        match self.fetch_json::<VocabularyBundle>(&path) {
            Ok(bundle) => {
                let bundle = Arc::new(bundle);
                self.cache.set_bundle(&key, bundle.clone());
                info(&format!("Loaded vocabulary bundle {}: {} words", key, bundle.word_count()));
                Some(bundle)
            }
            Err(e) => {
                self.log_load_failure(&e);
                None
            }
        }
    }

    /// Words of one subcategory, or of every subcategory in the category when
    /// `subcategory_id` is `None`. Unknown ids yield an empty list.
    pub fn get_vocabulary_for_category(
        &self,
        language: SupportedLanguage,
        category_id: &str,
        subcategory_id: Option<&str>,
        tier: BundleTier,
    ) -> Vec<VocabularyWord> {
        let Some(bundle) = self.load_bundled_vocabulary(language, tier) else {
            return Vec::new();
        };

        let Some(category) = bundle.find_category(category_id) else {
            return Vec::new();
        };

        match subcategory_id {
            Some(sub_id) => category
                .find_subcategory(sub_id)
                .map(|s| s.words.clone())
                .unwrap_or_default(),
            None => category.all_words(),
        }
    }

    /// Up to `count` words drawn uniformly from the whole bundle, without repeats.
    pub fn get_random_vocabulary(
        &self,
        language: SupportedLanguage,
        count: usize,
        tier: BundleTier,
    ) -> Vec<VocabularyWord> {
        self.get_random_vocabulary_with_rng(language, count, tier, &mut rand::thread_rng())
    }

    pub fn get_random_vocabulary_with_rng<R: Rng + ?Sized>(
        &self,
        language: SupportedLanguage,
        count: usize,
        tier: BundleTier,
        rng: &mut R,
    ) -> Vec<VocabularyWord> {
        let Some(bundle) = self.load_bundled_vocabulary(language, tier) else {
            return Vec::new();
        };

        // all_words() copies, the cached bundle is never reordered
        let mut words = bundle.all_words();
        words.shuffle(rng);
        words.truncate(count);
        words
    }

    pub fn get_categories(&self, language: SupportedLanguage, tier: BundleTier) -> Vec<VocabularyCategory> {
        self.load_bundled_vocabulary(language, tier)
            .map(|b| b.categories.clone())
            .unwrap_or_default()
    }

    pub fn get_available_languages(&self) -> Vec<SupportedLanguage> {
        SupportedLanguage::ALL.to_vec()
    }

    // ========================================================================
    // Complete bundle
    // ========================================================================

    /// Returns the flat complete bundle, fetching it once. On failure the result
    /// is an empty list and nothing is cached.
    pub fn load_complete_bundle(&self) -> Arc<Vec<CentralizedVocabularyWord>> {
        if let Some(words) = self.cache.get_complete() {
            return words;
        }

        match self.fetch_json::<Vec<CentralizedVocabularyWord>>(COMPLETE_BUNDLE_PATH) {
            Ok(words) => {
                let words = Arc::new(words);
                self.cache.set_complete(words.clone());
                info(&format!("Loaded complete vocabulary bundle: {} records", words.len()));
                words
            }
            Err(e) => {
                self.log_load_failure(&e);
                Arc::new(Vec::new())
            }
        }
    }

    /// Sorted distinct categories for a language, optionally limited to one
    /// curriculum level.
    pub fn get_available_categories(
        &self,
        language: SupportedLanguage,
        curriculum_level: Option<CurriculumLevel>,
    ) -> Vec<String> {
        let words = self.load_complete_bundle();
        let code = language.code();

        sorted_distinct(
            words
                .iter()
                .filter(|w| w.language == code)
                .filter(|w| match curriculum_level {
                    Some(level) => w.curriculum_level.as_deref() == Some(level.as_str()),
                    None => true,
                })
                .map(|w| w.category.as_deref()),
        )
    }

    pub fn get_available_subcategories(&self, language: SupportedLanguage, category: &str) -> Vec<String> {
        let words = self.load_complete_bundle();
        let code = language.code();

        sorted_distinct(
            words
                .iter()
                .filter(|w| w.language == code && w.category.as_deref() == Some(category))
                .map(|w| w.subcategory.as_deref()),
        )
    }

    /// Every complete bundle record accepted by `filters`, in bundle order.
    ///
    /// Records without an id get `{language code}-{position in the bundle}`.
    pub fn get_filtered_vocabulary(&self, filters: &VocabularyFilters) -> Vec<VocabularyWord> {
        let words = self.load_complete_bundle();

        let results: Vec<VocabularyWord> = words
            .iter()
            .enumerate()
            .filter(|(_, record)| filters.matches(record))
            .map(|(idx, record)| record.to_vocabulary_word(|| format!("{}-{}", record.language, idx)))
            .collect();

        debug(&format!("get_filtered_vocabulary(): {} of {} records", results.len(), words.len()));
        results
    }

    // ========================================================================
    // Cache
    // ========================================================================

    /// Drops both caches. The next query fetches again.
    pub fn clear_vocabulary_cache(&self) {
        self.cache.clear();
        info("Vocabulary cache cleared");
    }
}
