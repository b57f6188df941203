//! Unified Result Model
//!
//! Every command maps its outcome to this model before rendering output.

use serde::{Deserialize, Serialize};

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Page,
    Rule,
    Lint,
    Error,
}

/// Locale of a tutorial page, inferred from its path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ko,
    En,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Ko => "ko",
            Locale::En => "en",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many times a single rewrite rule matched in a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleHit {
    pub rule: String,
    pub count: usize,
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// File size in bytes after processing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Content hash (XXH3) before the rewrite
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_before: Option<String>,

    /// Content hash (XXH3) after the rewrite
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_after: Option<String>,

    /// Whether the run skipped writing to disk
    #[serde(default)]
    pub dry_run: bool,
}

/// Error information for a result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteFixError {
    pub code: String,
    pub message: String,
}

impl SiteFixError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all commands produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Path relative to the site root, using '/' as separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,

    /// Topic (framework) directory the page belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// Human-readable summary (rule text, lint message)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Whether the content differs after applying the rules
    #[serde(default)]
    pub changed: bool,

    /// Rules that matched at least once, in application order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hits: Vec<RuleHit>,

    /// Metadata
    pub meta: Meta,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SiteFixError>,
}

impl ResultItem {
    fn empty(kind: Kind) -> Self {
        Self {
            kind,
            path: None,
            locale: None,
            topic: None,
            message: None,
            changed: false,
            hits: Vec::new(),
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a new page result
    pub fn page(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::empty(Kind::Page)
        }
    }

    /// Create a new rule listing result
    pub fn rule(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::empty(Kind::Rule)
        }
    }

    /// Create a new lint finding
    pub fn lint(code: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: Some(message.clone()),
            errors: vec![SiteFixError::new(code, message)],
            ..Self::empty(Kind::Lint)
        }
    }

    /// Create a new error result
    pub fn error(error: SiteFixError) -> Self {
        Self {
            errors: vec![error],
            ..Self::empty(Kind::Error)
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_hits(mut self, hits: Vec<RuleHit>) -> Self {
        self.changed = hits.iter().any(|h| h.count > 0);
        self.hits = hits.into_iter().filter(|h| h.count > 0).collect();
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of page items whose content changed
    pub fn changed_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.kind == Kind::Page && item.changed)
            .count()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
