//! Site configuration
//!
//! The site root, locale directory, page pattern and base URL are resolved once
//! at startup and passed to every command.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::core::error::SiteError;

pub const DEFAULT_LOCALE_DIR: &str = "en";
pub const DEFAULT_PAGE_PATTERN: &str = r"^\d+-tutorial\.html$";
pub const DEFAULT_BASE_URL: &str = "https://example.github.io/docs";
pub const DEFAULT_TRANSLATE_TARGET: &str = "en/index.html";

static DEFAULT_PAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_PAGE_PATTERN).expect("Invalid DEFAULT_PAGE_PATTERN regex"));

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub root: PathBuf,
    /// Name of the English locale subtree under the root
    pub locale_dir: String,
    /// Regex a tutorial page file name must match
    pub page_pattern: Regex,
    /// Absolute site URL used in hreflang links, without trailing '/'
    pub base_url: String,
}

impl SiteConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locale_dir: DEFAULT_LOCALE_DIR.to_string(),
            page_pattern: DEFAULT_PAGE_RE.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_locale_dir(mut self, locale_dir: impl Into<String>) -> Self {
        self.locale_dir = locale_dir.into();
        self
    }

    pub fn with_page_pattern(mut self, pattern: &str) -> Result<Self, SiteError> {
        self.page_pattern = Regex::new(pattern).map_err(|source| SiteError::PagePattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn is_page_name(&self, file_name: &str) -> bool {
        self.page_pattern.is_match(file_name)
    }

    /// Resolve a root-relative path (absolute paths are kept as-is)
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
