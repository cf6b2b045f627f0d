use serde::Serialize;

/// Marker used in place of a link when an entry has none.
pub const NO_LINK: &str = ":x: No Link";
/// Marker used in place of a publication date when an entry has none.
pub const NO_DATE: &str = ":x: No Date";
/// Date layout used for run dates and normalised publication dates.
pub const DISPLAY_DATE_FORMAT: &str = "%B %d, %Y";

/// One configured feed, as listed in the feed-list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSpec {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "journal-digest/0.1".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            retry_delay_seconds: 5,
            max_redirects: 5,
        }
    }
}

/// A text field as a feed document exposes it: a rich detail with its raw
/// value, a plain string, or both.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub detail: Option<String>,
    pub plain: Option<String>,
}

impl TextField {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            detail: None,
            plain: Some(value.into()),
        }
    }

    pub fn detail(value: impl Into<String>) -> Self {
        Self {
            detail: Some(value.into()),
            plain: None,
        }
    }

    /// Detail wins over the plain value.
    fn resolve(self) -> Option<String> {
        self.detail.or(self.plain)
    }
}

/// Entry fields as supplied by a feed source, before precedence is applied.
#[derive(Debug, Clone, Default)]
pub struct EntryFields {
    pub title: TextField,
    pub summary: TextField,
    pub link: Option<String>,
    pub published: Option<String>,
}

/// An entry from a feed with detail/plain precedence already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
}

impl RawEntry {
    pub fn new(title: impl Into<String>, link: Option<&str>) -> Self {
        Self {
            title: Some(title.into()),
            summary: None,
            link: link.map(str::to_string),
            published: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = Some(published.into());
        self
    }

    /// Dedup key: the link when present and non-empty, otherwise the title.
    pub fn identifier(&self) -> Option<&str> {
        match self.link.as_deref() {
            Some(link) if !link.trim().is_empty() => Some(link),
            _ => self.title.as_deref(),
        }
    }
}

impl From<EntryFields> for RawEntry {
    fn from(fields: EntryFields) -> Self {
        Self {
            title: fields.title.resolve().filter(|t| !t.trim().is_empty()),
            summary: fields.summary.resolve(),
            link: fields.link.filter(|l| !l.trim().is_empty()),
            published: fields.published.filter(|p| !p.trim().is_empty()),
        }
    }
}

/// An entry that is both new and relevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenedEntry(pub RawEntry);

/// A row of the seen-article store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRecord {
    pub identifier: String,
    pub date_seen: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedEntry {
    pub title: String,
    pub summary: Option<String>,
    pub url: String,
    pub date: String,
}

/// Outcome of screening one feed's entries.
#[derive(Debug, Clone, Default)]
pub struct ScreenOutcome {
    pub screened: Vec<ScreenedEntry>,
    pub seen_count: usize,
    pub skipped_count: usize,
    pub dropped_count: usize,
}

/// Formatted entries of one feed, in feed order.
#[derive(Debug, Clone)]
pub struct FeedDigest {
    pub feed_title: String,
    pub entries: Vec<FormattedEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedReport {
    pub feed_title: String,
    pub passed: usize,
    pub seen: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub run_date: String,
    pub feeds: Vec<FeedReport>,
    pub records_committed: usize,
    pub chunks_sent: usize,
}

impl RunReport {
    pub fn total_passed(&self) -> usize {
        self.feeds.iter().map(|f| f.passed).sum()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Chat transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DigestError>;
