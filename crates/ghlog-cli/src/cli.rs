//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Daily GitHub activity log.
///
/// Prints one line per GitHub event you took part in on a given day, from
/// your own feed and optionally from your organizations' feeds.
#[derive(Debug, Parser)]
#[command(name = "ghlog", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// User whose feed to read (defaults to the token's owner).
    #[arg(short, long)]
    pub user: Option<String>,

    /// Day to report: YYYY-MM-DD, or an offset in days from today (e.g. -1).
    #[arg(short, long, allow_hyphen_values = true)]
    pub date: Option<String>,

    /// GitHub token (falls back to GHLOG_TOKEN, then GITHUB_TOKEN).
    #[arg(short, long)]
    pub token: Option<String>,

    /// Comma-separated event types to keep (e.g. push,PullRequest).
    #[arg(short, long, value_delimiter = ',')]
    pub events: Vec<String>,

    /// Comma-separated organizations whose feeds to include.
    #[arg(short, long, value_delimiter = ',')]
    pub orgs: Vec<String>,
}
