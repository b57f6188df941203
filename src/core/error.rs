//! Error types shared by the rewrite, scan and flow modules

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while discovering, loading or rewriting site pages.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to walk '{}': {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("invalid page pattern '{pattern}': {source}")]
    PagePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid rule table '{}': {reason}", .path.display())]
    RuleTable { path: PathBuf, reason: String },
}

impl SiteError {
    /// Stable machine-readable code used in error result items
    pub fn code(&self) -> &'static str {
        match self {
            SiteError::Read { .. } => "read_failed",
            SiteError::Write { .. } => "write_failed",
            SiteError::Walk { .. } => "walk_failed",
            SiteError::PagePattern { .. } => "invalid_page_pattern",
            SiteError::RuleTable { .. } => "invalid_rule_table",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_message_names_path() {
        let err = SiteError::Read {
            path: PathBuf::from("fw1/01-tutorial.html"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        let message = err.to_string();
        assert!(message.contains("fw1/01-tutorial.html"));
        assert!(message.contains("missing"));
        assert_eq!(err.code(), "read_failed");
    }

    #[test]
    fn test_rule_table_error_code() {
        let err = SiteError::RuleTable {
            path: PathBuf::from("rules.json"),
            reason: "rule 0 has an empty pattern".to_string(),
        };
        assert_eq!(err.code(), "invalid_rule_table");
        assert!(err.to_string().contains("empty pattern"));
    }
}
