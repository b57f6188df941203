//! Built-in Korean to English phrase table and loading of alternate tables

use std::path::Path;

use crate::core::error::SiteError;
use crate::core::util::read_text;
use crate::rewrite::rule::{RewriteRule, RuleSet};

/// Phrases of the Korean landing page, in application order. Longer phrases
/// come before any phrase they contain. The `lang` attribute goes last: an
/// English phrase ending in `l` would otherwise complete `ang="ko"`.
const KO_EN_PHRASES: &[(&str, &str)] = &[
    (
        "<title>Apple 프레임워크 튜토리얼</title>",
        "<title>Apple Framework Tutorials</title>",
    ),
    (
        "<h1>Apple 프레임워크 튜토리얼</h1>",
        "<h1>Apple Framework Tutorials</h1>",
    ),
    (
        "HIG 기반 실습 튜토리얼 모음",
        "Hands-on tutorials based on the Human Interface Guidelines",
    ),
    ("전체 튜토리얼", "All Tutorials"),
    ("튜토리얼 시작하기", "Start Tutorial"),
    ("샘플 프로젝트", "Sample Projects"),
    ("로드맵 프로젝트", "Roadmap Projects"),
    ("실습 과제", "Practice"),
    ("최근 업데이트", "Recently Updated"),
    ("예상 소요 시간", "Estimated Time"),
    ("난이도", "Difficulty"),
    ("초급", "Beginner"),
    ("중급", "Intermediate"),
    ("고급", "Advanced"),
    (">블로그<", ">Blog<"),
    (">검색<", ">Search<"),
    (">홈<", ">Home<"),
    ("placeholder=\"튜토리얼 검색\"", "placeholder=\"Search tutorials\""),
    (
        "이 사이트는 Apple과 제휴하지 않은 비공식 학습 자료입니다.",
        "This site is an unofficial learning resource not affiliated with Apple.",
    ),
    ("모든 권리 보유", "All rights reserved"),
    ("lang=\"ko\"", "lang=\"en\""),
];

/// The built-in translation table
pub fn builtin_translation_table() -> RuleSet {
    KO_EN_PHRASES
        .iter()
        .map(|(from, to)| RewriteRule::new(*from, *to))
        .collect()
}

/// Load an ordered rule table from a JSON array of `{"from", "to"}` objects.
/// Rules with an empty pattern are rejected.
pub fn load_rule_table(path: &Path) -> Result<RuleSet, SiteError> {
    let content = read_text(path)?;
    parse_rule_table(&content).map_err(|reason| SiteError::RuleTable {
        path: path.to_path_buf(),
        reason,
    })
}

fn parse_rule_table(content: &str) -> Result<RuleSet, String> {
    let rules: RuleSet = serde_json::from_str(content).map_err(|e| e.to_string())?;
    if let Some(index) = rules.rules().iter().position(|r| r.from.is_empty()) {
        return Err(format!("rule {} has an empty pattern", index));
    }
    Ok(rules)
}
