//! sitefix - maintenance passes for a bilingual static tutorial site
//!
//! sitefix provides:
//! - Tutorial page discovery split by locale
//! - Cross-language navigation link rewriting
//! - Phrase-table translation of a single page
//! - Rule table linting for safe re-runs
//! - Unified output format (text/jsonl/json/md)

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod flows;
mod rewrite;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
