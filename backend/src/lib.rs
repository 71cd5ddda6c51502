pub mod types;
pub mod helpers;
pub mod logger;
pub mod asset_source;
pub mod cache;
pub mod facets;
pub mod store;

use std::env;
use std::fs::create_dir_all;
use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use app_dirs::{get_app_root, AppDataType, AppInfo};
use dotenvy::dotenv;

use crate::asset_source::{AssetSource, DirAssetSource, HttpAssetSource, REQUEST_TIMEOUT_SECS};
use crate::logger::{info, warn};
use crate::store::VocabularyStore;

pub const APP_INFO: AppInfo = AppInfo{name: "language-gems", author: "language-gems"};

/// App directory for logs. `GEMS_DIR` overrides the platform user data dir.
pub fn get_create_gems_dir() -> Result<PathBuf> {
    let p = match env::var("GEMS_DIR") {
        Ok(s) if !s.is_empty() => PathBuf::from(s),
        _ => get_app_root(AppDataType::UserData, &APP_INFO)
            .context("Can't determine the user data directory")?,
    };

    if !p.exists() {
        create_dir_all(&p).with_context(|| format!("Can't create {:?}", p))?;
    }
    Ok(p)
}

/// Process configuration, read once from the environment and `.env`.
#[derive(Debug, Clone)]
pub struct AppGlobals {
    pub assets_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub request_timeout_secs: u64,
}

impl Default for AppGlobals {
    fn default() -> Self {
        AppGlobals {
            assets_url: None,
            data_dir: None,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppGlobals {
    pub fn new() -> Self {
        dotenv().ok();

        let assets_url = env::var("GEMS_ASSETS_URL").ok().filter(|s| !s.is_empty());
        let data_dir = env::var("GEMS_DATA_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from);

        let request_timeout_secs = match env::var("GEMS_REQUEST_TIMEOUT_SECS") {
            Ok(s) => s.parse::<u64>().unwrap_or_else(|_| {
                warn(&format!("Invalid GEMS_REQUEST_TIMEOUT_SECS: {}", s));
                REQUEST_TIMEOUT_SECS
            }),
            Err(_) => REQUEST_TIMEOUT_SECS,
        };

        AppGlobals {
            assets_url,
            data_dir,
            request_timeout_secs,
        }
    }

    /// Local assets win over the network. Without either, assets are read from
    /// the current directory.
    pub fn asset_source(&self) -> Box<dyn AssetSource> {
        if let Some(dir) = &self.data_dir {
            return Box::new(DirAssetSource::new(dir));
        }

        if let Some(url) = &self.assets_url {
            match HttpAssetSource::new(url, self.request_timeout_secs) {
                Ok(source) => return Box::new(source),
                Err(e) => warn(&format!("Can't use assets url {}: {}", url, e)),
            }
        }

        Box::new(DirAssetSource::new(&PathBuf::from(".")))
    }
}

pub static APP_GLOBALS: OnceLock<AppGlobals> = OnceLock::new();
pub static VOCABULARY_STORE: OnceLock<VocabularyStore> = OnceLock::new();

pub fn get_app_globals() -> &'static AppGlobals {
    APP_GLOBALS.get_or_init(AppGlobals::new)
}

/// The process-wide store, created from `AppGlobals` on first use.
pub fn get_vocabulary_store() -> &'static VocabularyStore {
    VOCABULARY_STORE.get_or_init(|| {
        let store = VocabularyStore::new(get_app_globals().asset_source());
        info(&format!("Vocabulary store reading from {}", store.source_description()));
        store
    })
}
