use crate::digest::DEFAULT_CHUNK_SIZE;
use crate::formatter::{DatePolicy, DEFAULT_SUMMARY_MAX_CHARS};
use crate::types::{DigestError, FetchConfig, Result};
use clap::Parser;
use std::path::PathBuf;

/// Command-line options. Each one falls back to an environment variable
/// (also read from `.env`); a flag given on the command line wins.
#[derive(Debug, Clone, Parser)]
#[command(name = "journal-digest", about = "Post a keyword-screened digest of new feed entries to Slack")]
pub struct Cli {
    /// Slack bot token (xoxb-...)
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Channel to post the digest in
    #[arg(long, env = "CHANNEL")]
    pub channel: Option<String>,

    /// Tab-separated feed list with a `title<TAB>url` header
    #[arg(short = 'f', long = "feeds", env = "FEEDS_FILE")]
    pub feeds_file: PathBuf,

    /// Keyword list, one per line
    #[arg(short = 'k', long = "keywords", env = "KEYWORDS_FILE")]
    pub keywords_file: PathBuf,

    /// SQLite file holding previously seen articles
    #[arg(long = "database", env = "DATABASE_PATH", default_value = "seen_articles.db")]
    pub database_path: PathBuf,

    /// Summary length budget in characters
    #[arg(long, env = "SUMMARY_MAX_CHARS", default_value_t = DEFAULT_SUMMARY_MAX_CHARS)]
    pub summary_max_chars: usize,

    /// Maximum blocks per chat message
    #[arg(long, env = "CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Replace unreadable publication dates with a placeholder instead of failing
    #[arg(long)]
    pub lenient_dates: bool,

    /// Print the digest blocks instead of posting them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub enum Delivery {
    Slack { token: String, channel: String },
    Stdout,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub feeds_file: PathBuf,
    pub keywords_file: PathBuf,
    pub database_path: PathBuf,
    pub summary_max_chars: usize,
    pub chunk_size: usize,
    pub date_policy: DatePolicy,
    pub delivery: Delivery,
    pub fetch: FetchConfig,
}

impl RunConfig {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let delivery = if cli.dry_run {
            Delivery::Stdout
        } else {
            let token = non_empty(cli.token)
                .ok_or_else(|| DigestError::Config("SLACK_TOKEN is not set".to_string()))?;
            let channel = non_empty(cli.channel)
                .ok_or_else(|| DigestError::Config("CHANNEL is not set".to_string()))?;
            Delivery::Slack { token, channel }
        };

        if cli.summary_max_chars == 0 {
            return Err(DigestError::Config("summary budget must be positive".to_string()));
        }
        if cli.chunk_size == 0 {
            return Err(DigestError::Config("chunk size must be positive".to_string()));
        }

        Ok(Self {
            feeds_file: cli.feeds_file,
            keywords_file: cli.keywords_file,
            database_path: cli.database_path,
            summary_max_chars: cli.summary_max_chars,
            chunk_size: cli.chunk_size,
            date_policy: if cli.lenient_dates {
                DatePolicy::Lenient
            } else {
                DatePolicy::Strict
            },
            delivery,
            fetch: FetchConfig::default(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
