//! Rule table linting
//!
//! Checks for:
//! - Rules that replace a pattern with itself (NOOP)
//! - Rules whose replacement contains their own pattern, or can re-form it
//!   together with adjacent text (NOT_IDEMPOTENT)
//! - Later rules whose replacement contains or can complete an earlier rule's
//!   pattern (REINTRODUCES)
//! - Later rules that can never match because an earlier rule consumed part of
//!   their pattern (SHADOWED)
//! - Repeated patterns (DUPLICATE)

use std::collections::HashMap;

use crate::core::model::ResultItem;
use crate::rewrite::rule::RuleSet;

/// Lint issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// A second run over already-processed output would change it again
    Error,
    Warning,
}

/// A lint issue tied to one rule of the table
#[derive(Debug, Clone)]
pub struct LintIssue {
    pub severity: LintSeverity,
    pub code: &'static str,
    pub message: String,
    /// Zero-based index of the offending rule
    pub index: usize,
}

impl LintIssue {
    fn error(code: &'static str, index: usize, message: String) -> Self {
        Self {
            severity: LintSeverity::Error,
            code,
            message,
            index,
        }
    }

    fn warning(code: &'static str, index: usize, message: String) -> Self {
        Self {
            severity: LintSeverity::Warning,
            code,
            message,
            index,
        }
    }

    pub fn to_result_item(&self) -> ResultItem {
        ResultItem::lint(self.code, format!("rule {}: {}", self.index, self.message))
    }
}

/// Lint a rule table. Issues are ordered by rule index.
pub fn lint_rules(rules: &RuleSet) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (index, rule) in rules.rules().iter().enumerate() {
        if rule.from.is_empty() {
            issues.push(LintIssue::error(
                "EMPTY_PATTERN",
                index,
                "pattern is empty".to_string(),
            ));
            continue;
        }

        if let Some(&earlier) = first_seen.get(rule.from.as_str()) {
            issues.push(LintIssue::warning(
                "DUPLICATE",
                index,
                format!("pattern '{}' already handled by rule {}", rule.from, earlier),
            ));
        } else {
            first_seen.insert(rule.from.as_str(), index);
        }

        if rule.from == rule.to {
            issues.push(LintIssue::warning(
                "NOOP",
                index,
                format!("'{}' is replaced with itself", rule.from),
            ));
            continue;
        }

        if rule.to.contains(rule.from.as_str()) {
            issues.push(LintIssue::error(
                "NOT_IDEMPOTENT",
                index,
                format!("replacement '{}' contains its own pattern", rule.to),
            ));
        } else if can_form(&rule.from, &rule.to, None) {
            issues.push(LintIssue::error(
                "NOT_IDEMPOTENT",
                index,
                format!(
                    "replacement '{}' can re-form '{}' with adjacent text",
                    rule.to, rule.from
                ),
            ));
        }

        for (earlier_index, earlier) in rules.rules()[..index].iter().enumerate() {
            if earlier.from.is_empty() || earlier.from == earlier.to {
                continue;
            }
            if can_form(&earlier.from, &rule.to, Some(&rule.from)) {
                issues.push(LintIssue::error(
                    "REINTRODUCES",
                    index,
                    format!(
                        "replacement '{}' reintroduces the pattern of rule {}",
                        rule.to, earlier_index
                    ),
                ));
            }
            if rule.from != earlier.from && rule.from.contains(earlier.from.as_str()) {
                issues.push(LintIssue::warning(
                    "SHADOWED",
                    index,
                    format!(
                        "pattern '{}' is rewritten by rule {} before this rule runs",
                        rule.from, earlier_index
                    ),
                ));
            }
        }
    }

    issues
}

/// Whether inserting `replacement` can leave an occurrence of `pattern` behind:
/// the replacement contains the pattern, sits inside it, or supplies one end of
/// it while adjacent text supplies the rest.
///
/// When `pattern` belongs to an earlier rule, `replaced` is the pattern this
/// replacement substitutes for. An edge shared by `replaced` and `replacement`
/// was already in the text, so with the adjacent text it spelled `pattern`
/// before this rule ran, and the earlier rule had consumed it.
fn can_form(pattern: &str, replacement: &str, replaced: Option<&str>) -> bool {
    if replacement.contains(pattern) || pattern.contains(replacement) {
        return true;
    }

    pattern.char_indices().skip(1).any(|(split, _)| {
        let (head, tail) = pattern.split_at(split);
        let trailing =
            replacement.ends_with(head) && !replaced.is_some_and(|r| r.ends_with(head));
        let leading =
            replacement.starts_with(tail) && !replaced.is_some_and(|r| r.starts_with(tail));
        trailing || leading
    })
}

/// Whether any issue breaks the fixed-point guarantee
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::rule::RewriteRule;

    fn codes(issues: &[LintIssue]) -> Vec<&'static str> {
        issues.iter().map(|i| i.code).collect()
    }

    #[test]
    fn test_clean_table() {
        let rules = RuleSet::new(vec![
            RewriteRule::new("lang=\"ko\"", "lang=\"en\""),
            RewriteRule::new("블로그", "Blog"),
        ]);
        assert!(lint_rules(&rules).is_empty());
    }

    #[test]
    fn test_noop_is_warning() {
        let rules = RuleSet::new(vec![RewriteRule::new("Blog", "Blog")]);
        let issues = lint_rules(&rules);
        assert_eq!(codes(&issues), vec!["NOOP"]);
        assert!(!has_errors(&issues));
    }

    #[test]
    fn test_lookalike_glyphs_are_not_noop() {
        // Cyrillic 'В' looks like Latin 'B'
        let rules = RuleSet::new(vec![RewriteRule::new("\u{0412}log", "Blog")]);
        assert!(lint_rules(&rules).is_empty());
    }

    #[test]
    fn test_not_idempotent() {
        let rules = RuleSet::new(vec![RewriteRule::new("EN", "EN EN")]);
        let issues = lint_rules(&rules);
        assert_eq!(codes(&issues), vec!["NOT_IDEMPOTENT"]);
        assert!(has_errors(&issues));
    }

    #[test]
    fn test_reintroduces_earlier_pattern() {
        let rules = RuleSet::new(vec![
            RewriteRule::new("홈", "Home"),
            RewriteRule::new("Start", "홈 시작"),
        ]);
        let issues = lint_rules(&rules);
        assert_eq!(codes(&issues), vec!["REINTRODUCES"]);
        assert_eq!(issues[0].index, 1);
        assert!(has_errors(&issues));
    }

    #[test]
    fn test_shrinking_replacement_re_forms_pattern() {
        let rules = RuleSet::new(vec![RewriteRule::new("aa", "a")]);
        let issues = lint_rules(&rules);
        assert_eq!(codes(&issues), vec!["NOT_IDEMPOTENT"]);

        let once = rules.apply("aaa");
        assert_ne!(rules.apply(&once.content).content, once.content);
    }

    #[test]
    fn test_replacement_straddling_pattern_edge() {
        // "abb" -> "xab"
        let rules = RuleSet::new(vec![RewriteRule::new("ab", "xa")]);
        assert_eq!(codes(&lint_rules(&rules)), vec!["NOT_IDEMPOTENT"]);

        // "bba" -> "bax"
        let rules = RuleSet::new(vec![RewriteRule::new("ba", "ax")]);
        assert_eq!(codes(&lint_rules(&rules)), vec!["NOT_IDEMPOTENT"]);
    }

    #[test]
    fn test_later_rule_completes_earlier_pattern() {
        let rules = RuleSet::new(vec![
            RewriteRule::new("ab", "X"),
            RewriteRule::new("c", "b"),
        ]);
        let issues = lint_rules(&rules);
        assert_eq!(codes(&issues), vec!["REINTRODUCES"]);
        assert!(has_errors(&issues));

        let once = rules.apply("ac");
        assert_eq!(once.content, "ab");
        assert_eq!(rules.apply(&once.content).content, "X");
    }

    #[test]
    fn test_later_rule_edge_overlap_with_adjacent_text() {
        let rules = RuleSet::new(vec![
            RewriteRule::new("lang=\"ko\"", "lang=\"en\""),
            RewriteRule::new("시작", "Start Tutorial"),
        ]);
        assert_eq!(codes(&lint_rules(&rules)), vec!["REINTRODUCES"]);

        let once = rules.apply("시작ang=\"ko\"");
        assert!(once.content.contains("lang=\"ko\""));
    }

    #[test]
    fn test_shared_edge_is_not_reintroduction() {
        // ">블로그<title>Apple" already held the earlier pattern
        let rules = RuleSet::new(vec![
            RewriteRule::new("<title>Apple", "<title>Tutorials"),
            RewriteRule::new(">블로그<", ">Blog<"),
        ]);
        let issues = lint_rules(&rules);
        assert!(!has_errors(&issues), "unexpected issues: {:?}", issues);
    }

    #[test]
    fn test_clean_tables_reach_fixed_point() {
        let tables = [
            RuleSet::new(vec![
                RewriteRule::new(">블로그<", ">Blog<"),
                RewriteRule::new(">홈<", ">Home<"),
                RewriteRule::new("lang=\"ko\"", "lang=\"en\""),
            ]),
            RuleSet::new(vec![RewriteRule::new("ab", "cd")]),
        ];
        let inputs = ["aab>블로그<", "ab>홈<title>", ">>블로그<<", "lang=\"ko\"ab"];

        for rules in &tables {
            assert!(!has_errors(&lint_rules(rules)));
            for input in inputs {
                let once = rules.apply(input);
                assert_eq!(rules.apply(&once.content).content, once.content);
            }
        }
    }

    #[test]
    fn test_shadowed_pattern() {
        let rules = RuleSet::new(vec![
            RewriteRule::new("튜토리얼", "Tutorial"),
            RewriteRule::new("전체 튜토리얼", "All Tutorials"),
        ]);
        let issues = lint_rules(&rules);
        assert_eq!(codes(&issues), vec!["SHADOWED"]);
        assert!(!has_errors(&issues));
    }

    #[test]
    fn test_duplicate_pattern() {
        let rules = RuleSet::new(vec![
            RewriteRule::new("검색", "Search"),
            RewriteRule::new("검색", "Find"),
        ]);
        assert_eq!(codes(&lint_rules(&rules)), vec!["DUPLICATE"]);
    }

    #[test]
    fn test_empty_pattern() {
        let rules = RuleSet::new(vec![RewriteRule::new("", "x")]);
        let issues = lint_rules(&rules);
        assert_eq!(codes(&issues), vec!["EMPTY_PATTERN"]);
        assert!(has_errors(&issues));
    }

    #[test]
    fn test_to_result_item() {
        let rules = RuleSet::new(vec![RewriteRule::new("Blog", "Blog")]);
        let item = lint_rules(&rules)[0].to_result_item();
        assert_eq!(item.errors[0].code, "NOOP");
        assert!(item.message.unwrap().starts_with("rule 0:"));
    }
}
