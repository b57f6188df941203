//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::{
    SiteConfig, DEFAULT_BASE_URL, DEFAULT_LOCALE_DIR, DEFAULT_PAGE_PATTERN,
    DEFAULT_TRANSLATE_TARGET,
};
use crate::core::error::SiteError;
use crate::core::model::{ResultItem, ResultSet, SiteFixError};
use crate::core::render::{OutputFormat, RenderConfig, Renderer};

/// sitefix - maintenance passes for a bilingual static tutorial site.
#[derive(Parser, Debug)]
#[command(name = "sitefix")]
#[command(
    author,
    version,
    about,
    long_about = r#"sitefix rewrites generated HTML pages of a Korean/English tutorial site in place.

Every rewrite is a literal search-and-replace rule. Rules are idempotent, so a
second run over already-processed pages changes nothing and a failed run can
simply be repeated.

Output formats:
- text: one log line per page, then "Done" after links (default)
- jsonl: one JSON object per line
- json: a single JSON array
- md: human-friendly Markdown

Examples:
    sitefix --root site scan
    sitefix --root site links
    sitefix --root site links --dry-run --format jsonl
    sitefix --root site translate
    sitefix rules lint --rules ko-en.json
"#
)]
pub struct Cli {
    /// Root directory of the generated site.
    #[arg(
        long,
        global = true,
        env = "SITEFIX_ROOT",
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory of the generated site (defaults to the current directory).\n\n\
Korean tutorial pages live at ROOT/<topic>/<page>, English ones at\n\
ROOT/<locale-dir>/<topic>/<page>. All paths in results are relative to ROOT."
    )]
    pub root: PathBuf,

    /// Name of the English locale subtree.
    #[arg(
        long,
        global = true,
        env = "SITEFIX_LOCALE_DIR",
        default_value = DEFAULT_LOCALE_DIR,
        value_name = "DIR"
    )]
    pub locale_dir: String,

    /// Regex a tutorial page file name must match.
    #[arg(
        long,
        global = true,
        env = "SITEFIX_PAGE_PATTERN",
        default_value = DEFAULT_PAGE_PATTERN,
        value_name = "REGEX"
    )]
    pub page_pattern: String,

    /// Absolute site URL used in hreflang links.
    #[arg(
        long,
        global = true,
        env = "SITEFIX_BASE_URL",
        default_value = DEFAULT_BASE_URL,
        value_name = "URL"
    )]
    pub base_url: String,

    /// Output format (text/jsonl/json/md).
    #[arg(long, global = true, default_value = "text", value_name = "FORMAT")]
    pub format: String,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (suppress stdout results).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (diagnostics on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tutorial pages with their locale and topic.
    #[command(
        long_about = "Discover tutorial pages under ROOT without modifying them.\n\n\
Root pages come first, then pages of the locale subtree, each sorted by path.\n\n\
Example:\n\
  sitefix --root site scan --format jsonl\n"
    )]
    Scan,

    /// Rewrite cross-language navigation links on every tutorial page.
    #[command(
        long_about = "For each root page <topic>/<page>: point the English link at\n\
../en/<topic>/<page>, label the flag EN and move the hreflang URL into the English\n\
subtree. Then for each page en/<topic>/<page>: point the language toggle back at\n\
../../<topic>/<page>, label the flag KO and fix the hreflang URL.\n\n\
Examples:\n\
  sitefix --root site links\n\
  sitefix --root site links --dry-run\n"
    )]
    Links {
        /// Report changes without writing files.
        #[arg(long)]
        dry_run: bool,
    },

    /// Translate one page with an ordered phrase table.
    #[command(
        long_about = "Apply the phrase table to TARGET (relative to ROOT) and write it back.\n\
Phrases missing from the page are skipped.\n\n\
Examples:\n\
  sitefix --root site translate\n\
  sitefix --root site translate en/about.html --rules ko-en.json\n"
    )]
    Translate {
        /// Page to translate (relative to ROOT unless absolute).
        #[arg(value_name = "TARGET", default_value = DEFAULT_TRANSLATE_TARGET)]
        target: PathBuf,

        /// JSON phrase table to use instead of the built-in one.
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Report changes without writing the file.
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect the phrase table.
    Rules {
        #[command(subcommand)]
        action: RulesCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum RulesCommands {
    /// Print the active phrase table in application order.
    List {
        /// JSON phrase table to use instead of the built-in one.
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
    },

    /// Check the phrase table for rules that break re-runs.
    #[command(
        long_about = "Report rules that replace a pattern with itself, can re-form their\n\
own pattern with adjacent text, reintroduce or complete an earlier pattern, are\n\
shadowed by an earlier rule, or repeat a pattern.\n\n\
Exits non-zero when a second run could change an already-translated page.\n"
    )]
    Lint {
        /// JSON phrase table to use instead of the built-in one.
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
    },
}

impl Cli {
    /// Build the site configuration from global flags
    pub fn site_config(&self) -> Result<SiteConfig> {
        let root = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());
        let config = SiteConfig::new(root)
            .with_locale_dir(self.locale_dir.as_str())
            .with_base_url(&self.base_url)
            .with_page_pattern(&self.page_pattern)
            .context("Invalid --page-pattern")?;
        Ok(config)
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);
    let config = cli.site_config()?;

    if cli.verbose {
        eprintln!(
            "[sitefix] root={} locale_dir={} base_url={}",
            config.root.display(),
            config.locale_dir,
            config.base_url
        );
    }

    let render_config = if cli.quiet {
        render_config.silenced()
    } else {
        render_config
    };

    let verbose = cli.verbose;
    let result = dispatch(cli.command, &config, verbose, render_config);

    // Machine-readable formats also carry the failure on stdout
    if let Err(err) = &result {
        if render_config.format != OutputFormat::Text {
            let code = err
                .downcast_ref::<SiteError>()
                .map(SiteError::code)
                .unwrap_or("failed");
            let mut result_set = ResultSet::new();
            result_set.push(ResultItem::error(SiteFixError::new(code, format!("{:#}", err))));
            Renderer::with_config(render_config).emit(&result_set, false);
        }
    }

    result
}

fn dispatch(
    command: Commands,
    config: &SiteConfig,
    verbose: bool,
    render_config: RenderConfig,
) -> Result<()> {
    match command {
        Commands::Scan => crate::backends::scan::run_scan(config, render_config),

        Commands::Links { dry_run } => {
            crate::flows::links::run_links(config, dry_run, verbose, render_config)
        }

        Commands::Translate {
            target,
            rules,
            dry_run,
        } => crate::flows::translate::run_translate(
            config,
            &target,
            rules.as_deref(),
            dry_run,
            verbose,
            render_config,
        ),

        Commands::Rules { action } => match action {
            RulesCommands::List { rules } => {
                crate::flows::translate::run_rules_list(config, rules.as_deref(), render_config)
            }
            RulesCommands::Lint { rules } => {
                crate::flows::translate::run_rules_lint(config, rules.as_deref(), render_config)
            }
        },
    }
}
