//! Asset Source Module
//!
//! Static JSON vocabulary assets are read through the `AssetSource` trait, so the
//! store does not care whether a bundle comes from the hosted file service, from
//! files packaged with the mobile app, or from memory.
//!
//! Resource paths are absolute, e.g. `/data/vocabulary/spanish/all.json`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use walkdir::WalkDir;

use crate::types::{BundleTier, SupportedLanguage};

pub const VOCABULARY_ROOT: &str = "/data/vocabulary";
pub const COMPLETE_BUNDLE_PATH: &str = "/data/vocabulary/complete_bundle.json";

/// Request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

pub fn bundle_path(language: SupportedLanguage, tier: BundleTier) -> String {
    format!("{}/{}/{}.json", VOCABULARY_ROOT, language.as_str(), tier.as_str())
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// True for the resource-not-found class: a non-success status or a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status(_) | FetchError::NotFound(_))
    }
}

pub trait AssetSource: Send + Sync {
    /// Returns the body of the resource at `path`.
    fn fetch(&self, path: &str) -> Result<String, FetchError>;

    /// Short human readable description, used in log lines.
    fn describe(&self) -> String;
}

impl<T: AssetSource + ?Sized> AssetSource for Arc<T> {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        (**self).fetch(path)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// Reads assets from the static file service over HTTP.
#[derive(Debug)]
pub struct HttpAssetSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpAssetSource {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(HttpAssetSource {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl AssetSource for HttpAssetSource {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let response = self.client
            .get(self.url_for(path))
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response.text().map_err(|e| FetchError::Network(e.to_string()))
    }

    fn describe(&self) -> String {
        format!("http: {}", self.base_url)
    }
}

// ============================================================================
// Local directory
// ============================================================================

/// A bundle file found on disk by `DirAssetSource::list_bundles()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBundleFile {
    pub language: SupportedLanguage,
    pub tier: BundleTier,
    pub path: PathBuf,
}

/// Reads assets packaged with the app from a local directory.
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: &Path) -> Self {
        DirAssetSource { root: root.to_path_buf() }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    /// Lists per-language bundle files under `data/vocabulary/{language}/{tier}.json`.
    /// Files with an unknown language or tier name are skipped.
    pub fn list_bundles(&self) -> Vec<LocalBundleFile> {
        let vocab_dir = self.resolve(VOCABULARY_ROOT);

        let mut bundles: Vec<LocalBundleFile> = WalkDir::new(&vocab_dir)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let p = entry.path();
                if p.extension().and_then(|e| e.to_str()) != Some("json") {
                    return None;
                }
                let tier = p.file_stem()?.to_str()?.parse::<BundleTier>().ok()?;
                let language = p.parent()?.file_name()?.to_str()?.parse::<SupportedLanguage>().ok()?;
                Some(LocalBundleFile { language, tier, path: p.to_path_buf() })
            })
            .collect();

        bundles.sort_by(|a, b| a.path.cmp(&b.path));
        bundles
    }
}

impl AssetSource for DirAssetSource {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let file_path = self.resolve(path);
        match std::fs::read_to_string(&file_path) {
            Ok(s) => Ok(s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::NotFound(file_path.display().to_string()))
            }
            Err(e) => Err(FetchError::Io(e)),
        }
    }

    fn describe(&self) -> String {
        format!("dir: {}", self.root.display())
    }
}

// ============================================================================
// Memory
// ============================================================================

/// Serves assets from memory and counts every fetch, including misses.
#[derive(Debug, Default)]
pub struct MemoryAssetSource {
    assets: Mutex<HashMap<String, String>>,
    fetch_count: AtomicUsize,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(self, path: &str, body: &str) -> Self {
        self.insert(path, body);
        self
    }

    pub fn insert(&self, path: &str, body: &str) {
        self.assets.lock().insert(path.to_string(), body.to_string());
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

impl AssetSource for MemoryAssetSource {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.assets
            .lock()
            .get(path)
            .cloned()
            .ok_or(FetchError::Status(404))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
