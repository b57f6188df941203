//! Tutorial page discovery
//!
//! Walks the site root with walkdir and partitions matching pages by locale.

use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::config::SiteConfig;
use crate::core::error::SiteError;
use crate::core::model::{Locale, ResultItem, ResultSet};
use crate::core::paths::{make_relative, segments};
use crate::core::render::{RenderConfig, Renderer};

/// A discovered tutorial page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub path: PathBuf,
    /// Path relative to the site root, '/' separated
    pub relative: String,
    pub locale: Locale,
    pub topic: String,
    pub file_name: String,
}

impl Page {
    pub fn to_result_item(&self) -> ResultItem {
        ResultItem::page(self.relative.clone())
            .with_locale(self.locale)
            .with_topic(self.topic.clone())
    }
}

/// Pages under the site root, split by locale. Each half is sorted by path.
#[derive(Debug, Clone, Default)]
pub struct Pages {
    pub root: Vec<Page>,
    pub locale: Vec<Page>,
}

impl Pages {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.root.len() + self.locale.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.locale.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.root.iter().chain(self.locale.iter())
    }
}

/// Find `<topic>/<page>` under the root and `<locale>/<topic>/<page>` under the
/// locale subtree. A missing directory yields no pages.
pub fn discover_pages(config: &SiteConfig) -> Result<Pages, SiteError> {
    let mut pages = Pages::default();

    if !config.root.is_dir() {
        return Ok(pages);
    }

    let walker = WalkDir::new(&config.root)
        .min_depth(2)
        .max_depth(3)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| SiteError::Walk {
            path: config.root.clone(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(page) = classify(config, entry.path()) {
            match page.locale {
                Locale::Ko => pages.root.push(page),
                Locale::En => pages.locale.push(page),
            }
        }
    }

    pages.root.sort_by(|a, b| a.relative.cmp(&b.relative));
    pages.locale.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(pages)
}

/// Decide whether a file is a tutorial page and which locale it belongs to
fn classify(config: &SiteConfig, path: &Path) -> Option<Page> {
    let relative = path.strip_prefix(&config.root).ok()?;
    let parts = segments(relative);

    let (locale, topic, file_name) = match parts.as_slice() {
        [topic, file] if topic != &config.locale_dir => (Locale::Ko, topic, file),
        [locale_dir, topic, file] if locale_dir == &config.locale_dir => (Locale::En, topic, file),
        _ => return None,
    };

    if !config.is_page_name(file_name) {
        return None;
    }

    Some(Page {
        path: path.to_path_buf(),
        relative: make_relative(path, &config.root)?,
        locale,
        topic: topic.clone(),
        file_name: file_name.clone(),
    })
}

/// Run the scan command
pub fn run_scan(config: &SiteConfig, render: RenderConfig) -> Result<()> {
    let pages = discover_pages(config)?;

    let result_set: ResultSet = pages.iter().map(Page::to_result_item).collect();

    Renderer::with_config(render).emit(&result_set, false);
    Ok(())
}
