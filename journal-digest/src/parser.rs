use crate::types::{DigestError, EntryFields, RawEntry, Result, TextField};
use feed_rs::parser;
use tracing::{debug, info};

#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<RawEntry>,
}

/// Decodes RSS/Atom documents into [`RawEntry`] values.
pub struct FeedParser;

impl FeedParser {
    pub fn parse_feed(content: &str) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| DigestError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);
        let entries: Vec<RawEntry> = feed
            .entries
            .into_iter()
            .map(|entry| RawEntry::from(Self::entry_fields(entry)))
            .collect();

        info!("Parsed feed with {} entries", entries.len());
        Ok(ParsedFeed { title, entries })
    }

    /// Maps a document entry onto the detail/plain field shape. The summary
    /// element is the detail; full content is the fallback.
    fn entry_fields(entry: feed_rs::model::Entry) -> EntryFields {
        let title = TextField {
            detail: entry.title.map(|t| t.content),
            plain: None,
        };

        let summary = TextField {
            detail: entry.summary.map(|s| s.content),
            plain: entry.content.and_then(|c| c.body),
        };

        let link = entry.links.into_iter().next().map(|l| l.href);
        let published = entry
            .published
            .or(entry.updated)
            .map(|dt| dt.to_rfc2822());

        EntryFields {
            title,
            summary,
            link,
            published,
        }
    }
}
