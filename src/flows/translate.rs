//! Phrase translator
//!
//! Applies an ordered phrase table to a single page and writes it back in place.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::core::config::SiteConfig;
use crate::core::model::{Meta, ResultItem, ResultSet};
use crate::core::paths::make_relative;
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{hash_bytes, read_text, write_text};
use crate::rewrite::lint::{has_errors, lint_rules};
use crate::rewrite::rule::RuleSet;
use crate::rewrite::table::{builtin_translation_table, load_rule_table};

/// Resolve the active table: a JSON file when given, otherwise the built-in one
pub fn resolve_table(config: &SiteConfig, rules: Option<&Path>) -> Result<RuleSet> {
    match rules {
        Some(path) => {
            let path = config.resolve(path);
            load_rule_table(&path)
                .with_context(|| format!("Failed to load rule table {}", path.display()))
        }
        None => Ok(builtin_translation_table()),
    }
}

/// Translate one page. Missing phrases are no-ops; a missing page is an error.
pub fn translate_page(
    config: &SiteConfig,
    target: &Path,
    table: &RuleSet,
    dry_run: bool,
) -> Result<ResultItem> {
    let path = config.resolve(target);
    let content = read_text(&path)?;
    let rewrite = table.apply(&content);

    if rewrite.changed() && !dry_run {
        write_text(&path, &rewrite.content)?;
    }

    let relative = make_relative(&path, &config.root)
        .unwrap_or_else(|| path.to_string_lossy().replace('\\', "/"));
    let meta = Meta {
        size: Some(rewrite.content.len() as u64),
        hash_before: Some(hash_bytes(content.as_bytes())),
        hash_after: Some(hash_bytes(rewrite.content.as_bytes())),
        dry_run,
    };

    Ok(ResultItem::page(relative)
        .with_hits(rewrite.hits)
        .with_meta(meta))
}

/// Run the translate command
pub fn run_translate(
    config: &SiteConfig,
    target: &Path,
    rules: Option<&Path>,
    dry_run: bool,
    verbose: bool,
    render: RenderConfig,
) -> Result<()> {
    let table = resolve_table(config, rules)?;
    if verbose && table.is_empty() {
        eprintln!("[translate] rule table is empty");
    }

    let issues = lint_rules(&table);
    if has_errors(&issues) {
        for issue in &issues {
            eprintln!("[translate] {}: rule {}: {}", issue.code, issue.index, issue.message);
        }
        bail!("Rule table cannot reach a fixed point; run `sitefix rules lint` for details");
    }
    if verbose {
        for issue in &issues {
            eprintln!("[translate] warning {}: rule {}: {}", issue.code, issue.index, issue.message);
        }
    }

    let item = translate_page(config, target, &table, dry_run)
        .with_context(|| format!("Failed to translate {}", target.display()))?;

    if verbose {
        eprintln!(
            "[translate] {} of {} rules matched",
            item.hits.len(),
            table.len()
        );
    }

    // The page line is the completion line; no separate marker
    let mut result_set = ResultSet::new();
    result_set.push(item);
    Renderer::with_config(render).emit(&result_set, false);
    Ok(())
}

/// Run `rules list`
pub fn run_rules_list(
    config: &SiteConfig,
    rules: Option<&Path>,
    render: RenderConfig,
) -> Result<()> {
    let table = resolve_table(config, rules)?;

    let result_set: ResultSet = table
        .rules()
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            ResultItem::rule(format!("{}: '{}' -> '{}'", index, rule.from, rule.to))
        })
        .collect();

    Renderer::with_config(render).emit(&result_set, false);
    Ok(())
}

/// Run `rules lint`. Fails when any rule breaks the fixed-point guarantee.
pub fn run_rules_lint(
    config: &SiteConfig,
    rules: Option<&Path>,
    render: RenderConfig,
) -> Result<()> {
    let table = resolve_table(config, rules)?;
    let issues = lint_rules(&table);

    let result_set: ResultSet = issues.iter().map(|i| i.to_result_item()).collect();
    Renderer::with_config(render).emit(&result_set, false);

    if has_errors(&issues) {
        bail!("Found {} rule table issue(s)", issues.len());
    }
    Ok(())
}
