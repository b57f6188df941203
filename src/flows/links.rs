//! Link fixer
//!
//! Rewrites the hard-coded cross-language navigation of every tutorial page so
//! the language toggle, flag label and hreflang link point at the sibling page
//! in the other locale. Root (Korean) pages are processed before the English
//! subtree.

use anyhow::{Context, Result};

use crate::backends::scan::{discover_pages, Page};
use crate::core::config::SiteConfig;
use crate::core::model::{Locale, Meta, ResultItem, ResultSet};
use crate::core::paths::page_stem;
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{hash_bytes, read_text, write_text};
use crate::rewrite::rule::{RewriteRule, RuleSet};

/// Flag placeholder emitted by the page generator
pub const FLAG_PLACEHOLDER: &str = "<span class=\"lang-flag\">🌐</span>";
const FLAG_EN: &str = "<span class=\"lang-flag\">🇺🇸</span> EN";
const FLAG_KO: &str = "<span class=\"lang-flag\">🇰🇷</span> KO";

/// Rules for a root page `T/F`: point the toggle at `en/T/F`.
pub fn root_page_rules(config: &SiteConfig, page: &Page) -> RuleSet {
    let topic = &page.topic;
    let file = &page.file_name;
    let stem = page_stem(file);

    RuleSet::new(vec![
        RewriteRule::named(
            "english-link",
            format!("href=\"{stem}.en.html\""),
            format!("href=\"../{}/{topic}/{file}\"", config.locale_dir),
        ),
        RewriteRule::named("flag-en", FLAG_PLACEHOLDER, FLAG_EN),
        hreflang_rule(config, page),
    ])
}

/// Rules for a locale page `en/T/F`: point the toggle back at `T/F`. The home
/// link already resolves correctly and has no rule.
pub fn locale_page_rules(config: &SiteConfig, page: &Page) -> RuleSet {
    let topic = &page.topic;
    let file = &page.file_name;

    RuleSet::new(vec![
        RewriteRule::named(
            "korean-link",
            format!("href=\"{file}\" class=\"lang-toggle\""),
            format!("href=\"../../{topic}/{file}\" class=\"lang-toggle\""),
        ),
        RewriteRule::named("flag-ko", FLAG_PLACEHOLDER, FLAG_KO),
        hreflang_rule(config, page),
    ])
}

/// The absolute English alternate URL moves from `BASE/T/S.en.html` to
/// `BASE/en/T/F`.
fn hreflang_rule(config: &SiteConfig, page: &Page) -> RewriteRule {
    let base = &config.base_url;
    let locale_dir = &config.locale_dir;
    let topic = &page.topic;
    let file = &page.file_name;
    let stem = page_stem(file);

    RewriteRule::named(
        "hreflang",
        format!("hreflang=\"en\" href=\"{base}/{topic}/{stem}.en.html\""),
        format!("hreflang=\"en\" href=\"{base}/{locale_dir}/{topic}/{file}\""),
    )
}

pub fn rules_for(config: &SiteConfig, page: &Page) -> RuleSet {
    match page.locale {
        Locale::Ko => root_page_rules(config, page),
        Locale::En => locale_page_rules(config, page),
    }
}

/// Read, rewrite and (unless `dry_run`) write back a single page.
/// Unchanged pages are not written.
pub fn fix_page(config: &SiteConfig, page: &Page, dry_run: bool) -> Result<ResultItem> {
    let content = read_text(&page.path)?;
    let rewrite = rules_for(config, page).apply(&content);

    if rewrite.changed() && !dry_run {
        write_text(&page.path, &rewrite.content)?;
    }

    let meta = Meta {
        size: Some(rewrite.content.len() as u64),
        hash_before: Some(hash_bytes(content.as_bytes())),
        hash_after: Some(hash_bytes(rewrite.content.as_bytes())),
        dry_run,
    };

    Ok(page.to_result_item().with_hits(rewrite.hits).with_meta(meta))
}

/// Fix every discovered page, root pages first. The first I/O failure aborts
/// the run; pages already written stay written.
pub fn fix_links(config: &SiteConfig, dry_run: bool) -> Result<ResultSet> {
    let pages = discover_pages(config)
        .with_context(|| format!("Failed to discover pages under {}", config.root.display()))?;

    let mut result_set = ResultSet::new();
    for page in pages.iter() {
        let item = fix_page(config, page, dry_run)
            .with_context(|| format!("Failed to fix links in {}", page.relative))?;
        result_set.push(item);
    }

    Ok(result_set)
}

/// Run the links command
pub fn run_links(
    config: &SiteConfig,
    dry_run: bool,
    verbose: bool,
    render: RenderConfig,
) -> Result<()> {
    let result_set = fix_links(config, dry_run)?;

    if verbose && result_set.is_empty() {
        eprintln!("[links] no tutorial pages under {}", config.root.display());
    } else if verbose {
        eprintln!(
            "[links] {} pages scanned, {} changed{}",
            result_set.len(),
            result_set.changed_count(),
            if dry_run { " (dry run)" } else { "" }
        );
    }

    Renderer::with_config(render).emit(&result_set, true);
    Ok(())
}
