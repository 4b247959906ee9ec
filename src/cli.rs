use clap::Parser;
use std::path::PathBuf;

use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use crate::ports::outbound::ReportFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json' or 'markdown'",
                s
            )),
        }
    }
}

impl OutputFormat {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Returns
    /// A boxed ReportFormatter trait object appropriate for this format
    pub fn create_formatter(&self) -> Box<dyn ReportFormatter> {
        match self {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(&self) -> &'static str {
        match self {
            OutputFormat::Json => "📝 Generating JSON report...",
            OutputFormat::Markdown => "📝 Generating Markdown report...",
        }
    }
}

/// Find and safely delete unused assets in a content repository
#[derive(Parser, Debug)]
#[command(name = "asset-sweep")]
#[command(version)]
#[command(about = "Find and safely delete unused assets in a content repository", long_about = None)]
pub struct Args {
    /// Output format: json or markdown (defaults to json, config file can override)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Path to the content root directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Report file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Exclude a specific asset id from deletion.
    /// Can be specified multiple times.
    #[arg(long = "exclude-asset", value_name = "ID")]
    pub exclude_asset: Vec<String>,

    /// Exclude every asset under a path prefix from deletion.
    /// Can be specified multiple times.
    #[arg(long = "exclude-path", value_name = "PREFIX")]
    pub exclude_path: Vec<String>,

    /// Exclude every asset of a class from deletion.
    /// Can be specified multiple times.
    #[arg(long = "exclude-class", value_name = "CLASS")]
    pub exclude_class: Vec<String>,

    /// Delete the unused assets after scanning (default is scan only)
    #[arg(long)]
    pub delete: bool,

    /// Keep directories left empty after deletion
    #[arg(long)]
    pub keep_empty_dirs: bool,

    /// Maximum assets per fallback deletion round
    #[arg(long, value_name = "N")]
    pub chunk_limit: Option<usize>,

    /// Path to a config file (overrides auto-discovery)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
