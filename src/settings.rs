//! Catalog settings.
//!
//! Settings live in a JSON file (`settings.json` under the platform config
//! directory by default). Every field is optional in the file; missing
//! fields take their defaults.
//!
//! ```json
//! {
//!   "sources": [
//!     { "label": "ttl", "family": "ttl", "address": "ttl.csv" },
//!     { "label": "cmos", "family": "cmos", "address": "https://example.com/cmos.csv" }
//!   ],
//!   "page_size": 20,
//!   "image_root": "images"
//! }
//! ```

use crate::constants::{DEFAULT_IMAGE_ROOT, DEFAULT_PAGE_SIZE, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME};
use crate::data::{DataError, DataResult, DefaultFetcher, FileFetcher, SourceSpec, default_sources};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Path of the settings file under the platform config directory
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Sources in merge order
    pub sources: Vec<SourceSpec>,
    /// Records per "load more" step
    pub page_size: usize,
    /// Directory or URL prefix of the chip images
    pub image_root: String,
    /// Directory relative source paths resolve against (the settings file's directory)
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            page_size: DEFAULT_PAGE_SIZE,
            image_root: DEFAULT_IMAGE_ROOT.to_string(),
            base_dir: None,
        }
    }
}

impl CatalogSettings {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring invalid settings file");
                Self::default()
            }
        }
    }

    /// Load and validate a settings file.
    pub fn load_from(path: &Path) -> DataResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut settings = Self::from_json(&content)?;
        settings.base_dir = path.parent().map(Path::to_path_buf);
        Ok(settings)
    }

    /// Parse and validate settings JSON
    pub fn from_json(content: &str) -> DataResult<Self> {
        let settings: Self = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> DataResult<()> {
        if self.page_size == 0 {
            return Err(DataError::Settings("page_size must be at least 1".to_string()));
        }
        if self.sources.is_empty() {
            return Err(DataError::Settings("at least one source is required".to_string()));
        }
        if let Some(source) = self.sources.iter().find(|s| s.address.trim().is_empty()) {
            return Err(DataError::Settings(format!(
                "source '{}' has an empty address",
                source.label
            )));
        }
        Ok(())
    }

    /// File fetcher resolving relative sources against the settings directory
    pub fn file_fetcher(&self) -> FileFetcher {
        match &self.base_dir {
            Some(dir) => FileFetcher::with_base_dir(dir),
            None => FileFetcher::new(),
        }
    }

    /// Fetcher for both local and HTTP sources
    pub fn fetcher(&self) -> DataResult<DefaultFetcher> {
        DefaultFetcher::new(self.file_fetcher())
    }
}
