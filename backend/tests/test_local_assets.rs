use std::path::Path;

use serial_test::serial;

use gems_backend::asset_source::{DirAssetSource, COMPLETE_BUNDLE_PATH, bundle_path};
use gems_backend::store::VocabularyStore;
use gems_backend::types::{BundleTier, CurriculumLevel, SupportedLanguage, VocabularyFilters};
use gems_backend::logger::warn;
use gems_backend::{AppGlobals, get_create_gems_dir, get_vocabulary_store};

mod helpers;
use helpers as h;

fn write_asset(root: &Path, path: &str, body: &str) {
    let file_path = root.join(path.trim_start_matches('/'));
    std::fs::create_dir_all(file_path.parent().unwrap()).unwrap();
    std::fs::write(file_path, body).unwrap();
}

fn assets_dir() -> tempfile::TempDir {
    h::init_test_env();
    let dir = tempfile::tempdir().unwrap();
    write_asset(
        dir.path(),
        &bundle_path(SupportedLanguage::German, BundleTier::Foundation),
        &h::bundle_json(SupportedLanguage::German, BundleTier::Foundation, 12),
    );
    write_asset(dir.path(), COMPLETE_BUNDLE_PATH, &h::complete_bundle_json());
    dir
}

#[test]
#[serial]
fn test_store_over_local_directory() {
    let dir = assets_dir();
    let store = VocabularyStore::new(Box::new(DirAssetSource::new(dir.path())));

    let bundle = store.load_bundled_vocabulary(SupportedLanguage::German, BundleTier::Foundation).unwrap();
    assert_eq!(bundle.word_count(), 12);
    assert!(store.load_bundled_vocabulary(SupportedLanguage::German, BundleTier::Higher).is_none());

    let filters = VocabularyFilters::new(SupportedLanguage::Spanish)
        .with_curriculum_level(CurriculumLevel::KS3)
        .with_category("food")
        .with_subcategory("fruits");
    let results = store.get_filtered_vocabulary(&filters);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].word, "manzana");
}

#[test]
#[serial]
fn test_list_local_bundles() {
    let dir = assets_dir();
    let source = DirAssetSource::new(dir.path());

    let bundles = source.list_bundles();
    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0].language, SupportedLanguage::German);
    assert_eq!(bundles[0].tier, BundleTier::Foundation);
}

#[test]
#[serial]
fn test_data_dir_takes_precedence_over_url() {
    let dir = assets_dir();
    let globals = AppGlobals {
        assets_url: Some("https://cdn.example.com".to_string()),
        data_dir: Some(dir.path().to_path_buf()),
        ..AppGlobals::default()
    };

    let source = globals.asset_source();
    assert!(source.describe().starts_with("dir: "));

    let globals = AppGlobals {
        data_dir: None,
        ..globals
    };
    assert_eq!(globals.asset_source().describe(), "http: https://cdn.example.com");

    assert_eq!(AppGlobals::default().asset_source().describe(), "dir: .");
}

#[test]
#[serial]
fn test_process_wide_store_from_env() {
    let dir = assets_dir();
    unsafe {
        std::env::set_var("GEMS_DATA_DIR", dir.path());
    }

    let store = get_vocabulary_store();
    assert!(std::ptr::eq(store, get_vocabulary_store()));

    let categories = store.get_available_categories(SupportedLanguage::Spanish, None);
    assert_eq!(categories, vec!["animals", "food", "society"]);

    store.clear_vocabulary_cache();
    assert!(!store.cache().has_complete());

    unsafe {
        std::env::remove_var("GEMS_DATA_DIR");
    }
}

#[test]
#[serial]
fn test_logs_stay_out_of_user_data_dir() {
    let gems_dir = h::init_test_env();

    assert_eq!(std::env::var("DISABLE_LOG").as_deref(), Ok("true"));
    assert_eq!(get_create_gems_dir().unwrap(), gems_dir.to_path_buf());

    warn("logging from a test");
    assert!(!gems_dir.join("log.txt").exists());
}
