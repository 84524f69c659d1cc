use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI entry point.
#[derive(Debug, Parser)]
#[command(
    name = "abstract-keywords",
    version,
    about = "Keyword lemma extraction for Persian academic abstracts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Increase logging verbosity (-v, -vv).
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
    /// Settings file; replaces the default `config/settings` lookup.
    #[arg(global = true, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collect abstracts and author keywords from saved article pages.
    Crawl(CrawlArgs),
    /// Extract keyword lemmas from an articles table.
    Extract(ExtractArgs),
    /// Run one text through the pipeline and show every token's verdict.
    Explain(ExplainArgs),
    /// Validate the configured filter policy and print the report as JSON.
    CheckPolicy,
}

#[derive(Debug, Args)]
pub struct CrawlArgs {
    /// Directory holding `*.html` article pages.
    #[arg(long, value_name = "DIR", default_value = "Articles")]
    pub articles_dir: PathBuf,
    /// Articles table to write.
    #[arg(long, value_name = "FILE", default_value = "all_articles.csv")]
    pub output: PathBuf,
    /// Stop after this many articles with an abstract (omit to crawl all).
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Articles table produced by `crawl`.
    #[arg(long, value_name = "FILE", default_value = "all_articles.csv")]
    pub input: PathBuf,
    /// Keywords table to write.
    #[arg(long, value_name = "FILE", default_value = "all_keywords.csv")]
    pub output: PathBuf,
    /// Process documents one at a time instead of on the thread pool.
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Debug, Args)]
pub struct ExplainArgs {
    /// Text to analyze.
    pub text: String,
}
