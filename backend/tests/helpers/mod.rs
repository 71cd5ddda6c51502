use std::path::Path;
use std::sync::{Arc, OnceLock};

use serde_json::json;
use tempfile::TempDir;

use gems_backend::asset_source::{MemoryAssetSource, COMPLETE_BUNDLE_PATH, bundle_path};
use gems_backend::store::VocabularyStore;
use gems_backend::types::{BundleTier, SupportedLanguage};

static TEST_GEMS_DIR: OnceLock<TempDir> = OnceLock::new();

/// Turns off the log file and points `GEMS_DIR` at a temp dir, once per test
/// binary. Call it before anything in the test reads the environment.
pub fn init_test_env() -> &'static Path {
    TEST_GEMS_DIR
        .get_or_init(|| {
            let dir = tempfile::tempdir().unwrap();
            // Other tests wait on the OnceLock until the variables are set
            unsafe {
                std::env::set_var("GEMS_DIR", dir.path());
                std::env::set_var("DISABLE_LOG", "true");
            }
            dir
        })
        .path()
}

/// A store reading from `source`, with the source kept for fetch counts.
#[allow(dead_code)]
pub fn store_with(source: MemoryAssetSource) -> (VocabularyStore, Arc<MemoryAssetSource>) {
    init_test_env();
    let source = Arc::new(source);
    let store = VocabularyStore::new(Box::new(source.clone()));
    (store, source)
}

/// Per-language bundle with `n` words spread over two categories.
#[allow(dead_code)]
pub fn bundle_json(language: SupportedLanguage, tier: BundleTier, n: usize) -> String {
    let half = n / 2;
    let words = |from: usize, to: usize, category: &str, subcategory: &str| -> Vec<serde_json::Value> {
        (from..to)
            .map(|i| json!({
                "id": format!("{}-{}", language.code(), i),
                "word": format!("word{}", i),
                "translation": format!("translation{}", i),
                "category": category,
                "subcategory": subcategory,
            }))
            .collect()
    };

    json!({
        "language": language.as_str(),
        "tier": tier.as_str(),
        "lastUpdated": "2025-09-01T10:00:00Z",
        "categories": [
            {
                "id": "food",
                "name": "Food",
                "subcategories": [
                    { "id": "fruits", "name": "Fruits", "words": words(0, half, "food", "fruits") }
                ]
            },
            {
                "id": "animals",
                "name": "Animals",
                "subcategories": [
                    { "id": "pets", "name": "Pets", "words": words(half, n - n / 4, "animals", "pets") },
                    { "id": "farm", "name": "Farm", "words": words(n - n / 4, n, "animals", "farm") }
                ]
            }
        ]
    })
    .to_string()
}

#[allow(dead_code)]
pub fn bundle_source(language: SupportedLanguage, tier: BundleTier, n: usize) -> MemoryAssetSource {
    MemoryAssetSource::new().with_asset(&bundle_path(language, tier), &bundle_json(language, tier, n))
}

/// The manzana record plus nine unrelated ones.
#[allow(dead_code)]
pub fn complete_bundle_json() -> String {
    json!([
        { "id": "es-001", "language": "es", "word": "manzana", "translation": "apple",
          "category": "food", "subcategory": "fruits", "curriculum_level": "KS3" },
        { "id": "es-002", "language": "es", "word": "perro", "translation": "dog",
          "category": "animals", "subcategory": "pets", "curriculum_level": "KS3" },
        { "id": "es-003", "language": "es", "word": "pan", "translation": "bread",
          "category": "food", "subcategory": "bakery", "curriculum_level": "KS4",
          "tier": "foundation,higher", "exam_board_code": "AQA" },
        { "id": "es-004", "language": "es", "word": "desarrollo", "translation": "development",
          "category": "society", "subcategory": "economy", "curriculum_level": "KS4",
          "tier": "higher", "exam_board_code": "EDEXCEL" },
        { "language": "es", "word": "leche", "translation": "milk",
          "category": "food", "subcategory": "drinks", "curriculum_level": "KS4",
          "tier": "both" },
        { "id": "fr-001", "language": "fr", "word": "pomme", "translation": "apple",
          "category": "food", "subcategory": "fruits", "curriculum_level": "KS3" },
        { "id": "fr-002", "language": "fr", "word": "chien", "translation": "dog",
          "category": "Animals", "subcategory": "pets", "curriculum_level": "KS3" },
        { "id": "fr-003", "language": "fr", "word": "chat", "translation": "cat",
          "category": "animals", "subcategory": "pets", "curriculum_level": "KS4", "tier": "foundation" },
        { "id": "x-001", "language": "french", "word": "maison", "translation": "house",
          "category": "home", "curriculum_level": "KS3" },
        { "id": "de-001", "language": "de", "word": "Hund", "translation": "dog",
          "category": "animals", "subcategory": "", "curriculum_level": "KS3", "exam_board_code": "" }
    ])
    .to_string()
}

#[allow(dead_code)]
pub fn complete_source() -> MemoryAssetSource {
    MemoryAssetSource::new().with_asset(COMPLETE_BUNDLE_PATH, &complete_bundle_json())
}
