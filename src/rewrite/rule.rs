//! Literal rewrite rules
//!
//! A rule is an exact (pattern, replacement) pair. Rules never look at document
//! structure: a pattern that is absent is a no-op, not an error.

use serde::{Deserialize, Serialize};

use crate::core::model::RuleHit;

/// A single literal search-and-replace pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    /// Optional short label used in reports instead of the pattern text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub from: String,
    pub to: String,
}

impl RewriteRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            name: None,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn named(name: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Label used in hit reports
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("'{}' -> '{}'", self.from, self.to),
        }
    }

    /// Replace every occurrence of the pattern, returning the new text and the
    /// number of occurrences replaced.
    pub fn apply(&self, content: &str) -> (String, usize) {
        if self.from.is_empty() {
            return (content.to_string(), 0);
        }
        let count = content.matches(self.from.as_str()).count();
        if count == 0 {
            return (content.to_string(), 0);
        }
        (content.replace(self.from.as_str(), &self.to), count)
    }
}

/// Outcome of applying a rule set to one document
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub content: String,
    /// One entry per rule, in rule order, including rules that did not match
    pub hits: Vec<RuleHit>,
}

impl Rewrite {
    pub fn changed(&self) -> bool {
        self.hits.iter().any(|h| h.count > 0)
    }
}

/// An ordered list of rules; each rule sees the output of the previous one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, content: &str) -> Rewrite {
        let mut current = content.to_string();
        let mut hits = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let (next, count) = rule.apply(&current);
            current = next;
            hits.push(RuleHit {
                rule: rule.label(),
                count,
            });
        }

        Rewrite {
            content: current,
            hits,
        }
    }
}

impl FromIterator<RewriteRule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = RewriteRule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
