use crate::types::{
    DigestError, FormattedEntry, Result, ScreenedEntry, DISPLAY_DATE_FORMAT, NO_DATE, NO_LINK,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use html2text::render::TrivialDecorator;
use tracing::{debug, warn};

/// Character budget for summaries, matching the chat section size we target.
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 1500;

const ELLIPSIS: &str = " ...";
const SENTENCE_BOUNDARY: &str = ". ";
const HTML_RENDER_WIDTH: usize = 400;

/// Query markers appended by publishers to links that came through their feed.
const TRACKING_SUFFIXES: &[&str] = &["?rss=1", "&rss=1", "?rss=yes", "&rss=yes"];

/// What to do with a publication date the parser cannot read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePolicy {
    /// Fail the run.
    #[default]
    Strict,
    /// Use the "no date" marker and carry on.
    Lenient,
}

#[derive(Debug, Clone)]
pub struct EntryFormatter {
    summary_max_chars: usize,
    date_policy: DatePolicy,
}

impl Default for EntryFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_MAX_CHARS, DatePolicy::Strict)
    }
}

impl EntryFormatter {
    pub fn new(summary_max_chars: usize, date_policy: DatePolicy) -> Self {
        Self {
            summary_max_chars,
            date_policy,
        }
    }

    /// Formats screened entries in order. Entries without a usable title are
    /// dropped; an unreadable date fails the whole batch under
    /// [`DatePolicy::Strict`].
    pub fn format(&self, screened: &[ScreenedEntry]) -> Result<Vec<FormattedEntry>> {
        let mut formatted = Vec::with_capacity(screened.len());
        for entry in screened {
            if let Some(entry) = self.format_entry(entry)? {
                formatted.push(entry);
            }
        }
        Ok(formatted)
    }

    pub fn format_entry(&self, screened: &ScreenedEntry) -> Result<Option<FormattedEntry>> {
        let raw = &screened.0;

        let title = match raw.title.as_deref().map(html_to_text) {
            Some(title) if !title.is_empty() => title,
            _ => {
                warn!("Entry had no title, skipping (link: {:?})", raw.link);
                return Ok(None);
            }
        };

        let summary = raw
            .summary
            .as_deref()
            .map(|s| truncate_summary(&html_to_text(s), self.summary_max_chars));

        let url = raw
            .link
            .as_deref()
            .map(strip_tracking_suffix)
            .unwrap_or_else(|| NO_LINK.to_string());

        let date = match raw.published.as_deref() {
            None => NO_DATE.to_string(),
            Some(published) => match (normalize_date(published), self.date_policy) {
                (Ok(date), _) => date,
                (Err(e), DatePolicy::Lenient) => {
                    warn!("{} (entry {:?}), using placeholder", e, title);
                    NO_DATE.to_string()
                }
                (Err(e), DatePolicy::Strict) => return Err(e),
            },
        };

        debug!("Formatted entry: {}", title);
        Ok(Some(FormattedEntry {
            title,
            summary,
            url,
            date,
        }))
    }
}

/// Renders markup to plain text and folds all whitespace runs, newlines
/// included, into single spaces. Links keep their text only; the target URL
/// is dropped.
pub fn html_to_text(html: &str) -> String {
    let flattened = html.replace('\n', " ");
    let rendered = html2text::config::with_decorator(TrivialDecorator::new())
        .string_from_read(flattened.as_bytes(), HTML_RENDER_WIDTH)
        .unwrap_or(flattened);
    collapse_whitespace(&rendered)
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cuts `text` to `max_chars` characters, then back to the last ". " inside
/// the cut, and appends an ellipsis. Text within budget is returned as is.
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    let cut_at = match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => byte_index,
        None => return text.to_string(),
    };

    let cut = &text[..cut_at];
    let kept = match cut.rfind(SENTENCE_BOUNDARY) {
        Some(boundary) => &cut[..boundary],
        None => cut,
    };
    format!("{}{}", kept, ELLIPSIS)
}

/// Removes a known feed-tracking marker from the end of a link.
pub fn strip_tracking_suffix(url: &str) -> String {
    let url = url.trim();
    TRACKING_SUFFIXES
        .iter()
        .find_map(|suffix| url.strip_suffix(suffix))
        .unwrap_or(url)
        .to_string()
}

/// Parses a feed-supplied date in any of the common feed layouts and
/// renders it as "Month Day, Year".
pub fn normalize_date(date_str: &str) -> Result<String> {
    parse_feed_date(date_str)
        .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
        .ok_or_else(|| DigestError::Format(format!("unrecognised publication date {:?}", date_str)))
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%a, %d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %b %Y", "%d %B %Y", "%B %d, %Y", "%b %d, %Y", "%Y/%m/%d"];

fn parse_feed_date(date_str: &str) -> Option<NaiveDate> {
    let date_str = date_str.trim();

    // RFC 2822 first (RSS), then RFC 3339 (Atom), then bare layouts.
    DateTime::parse_from_rfc2822(date_str)
        .or_else(|_| DateTime::parse_from_rfc3339(date_str))
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(date_str, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(date_str, fmt).ok())
        })
}
