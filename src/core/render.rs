//! Renderer module
//!
//! Renders ResultSet to different output formats: text, jsonl, json, md

use colored::Colorize;

use crate::core::model::{Kind, ResultItem, ResultSet};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    /// Suppress stdout output entirely
    pub quiet: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    #[cfg(test)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
            quiet: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self {
            format,
            pretty,
            quiet: false,
        }
    }

    pub fn silenced(mut self) -> Self {
        self.quiet = true;
        self
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[cfg(test)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_text(result_set),
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
        }
    }

    /// Print the rendered set, followed by the completion marker in text mode.
    pub fn emit(&self, result_set: &ResultSet, done: bool) {
        if self.config.quiet {
            return;
        }
        let output = self.render(result_set);
        if !output.is_empty() {
            println!("{}", output);
        }
        if done && self.config.format == OutputFormat::Text {
            println!("{}", "Done".bold());
        }
    }

    /// Render as plain log lines, one per item
    fn render_text(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .map(text_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        let mut pages = Vec::new();
        let mut rules = Vec::new();
        let mut lints = Vec::new();
        let mut errors = Vec::new();

        for item in &result_set.items {
            match item.kind {
                Kind::Page => pages.push(item),
                Kind::Rule => rules.push(item),
                Kind::Lint => lints.push(item),
                Kind::Error => errors.push(item),
            }
        }

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                for error in &item.errors {
                    output.push_str(&format!("- **{}**: {}\n", error.code, error.message));
                }
            }
            output.push('\n');
        }

        if !pages.is_empty() {
            output.push_str("## Pages\n\n");
            for item in pages {
                self.render_page_md(&mut output, item);
            }
            output.push('\n');
        }

        if !rules.is_empty() {
            output.push_str("## Rules\n\n");
            for item in rules {
                if let Some(message) = &item.message {
                    output.push_str(&format!("- {}\n", message));
                }
            }
            output.push('\n');
        }

        if !lints.is_empty() {
            output.push_str("## Lint\n\n");
            for item in lints {
                for error in &item.errors {
                    output.push_str(&format!("- **{}**: {}\n", error.code, error.message));
                }
            }
            output.push('\n');
        }

        output
    }

    fn render_page_md(&self, output: &mut String, item: &ResultItem) {
        if let Some(path) = &item.path {
            output.push_str(&format!("- `{}`", path));
            if let (Some(topic), Some(locale)) = (&item.topic, item.locale) {
                output.push_str(&format!(" ({}, {})", topic, locale));
            }
            output.push_str(if item.changed { " changed" } else { " unchanged" });
            output.push('\n');
            for hit in &item.hits {
                output.push_str(&format!("  - {} x{}\n", hit.rule, hit.count));
            }
        }
    }
}

fn text_line(item: &ResultItem) -> String {
    match item.kind {
        Kind::Page => {
            let path = item.path.as_deref().unwrap_or("");
            let status = match (item.changed, item.meta.dry_run) {
                (true, true) => "would change".yellow(),
                (true, false) => "updated".green(),
                (false, _) => "unchanged".dimmed(),
            };
            match (&item.topic, item.locale) {
                (Some(topic), Some(locale)) => {
                    format!("{} ({}) {} {}", topic, locale, path, status)
                }
                _ => format!("{} {}", path, status),
            }
        }
        Kind::Rule => item.message.clone().unwrap_or_default(),
        Kind::Lint | Kind::Error => item
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.code.red(), e.message))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
