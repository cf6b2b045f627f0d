use crate::types::{FeedDigest, FormattedEntry};
use serde::Serialize;
use tracing::debug;

/// Block limit of a single chat.postMessage call.
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// A chat layout block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Section { text: BlockText },
    Divider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockText {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl Block {
    pub fn markdown(text: impl Into<String>) -> Self {
        Block::Section {
            text: BlockText {
                kind: "mrkdwn".to_string(),
                text: text.into(),
            },
        }
    }
}

/// Blocks that must be delivered together; one per formatted entry, plus
/// the digest header.
pub type DisplayUnit = Vec<Block>;

/// Turns a run's formatted entries into display units, grouped by feed in
/// configuration order.
pub struct DigestAssembler;

impl DigestAssembler {
    pub fn header(run_date: &str) -> DisplayUnit {
        vec![
            Block::markdown(format!(
                ":sparkles: Daily Digest: *{}* :sparkles:",
                run_date
            )),
            Block::Divider,
        ]
    }

    pub fn entry_unit(feed_title: &str, entry: &FormattedEntry) -> DisplayUnit {
        let mut text = format!(
            "*{}*\n{}\n{}: {}",
            entry.title, entry.date, feed_title, entry.url
        );
        if let Some(summary) = &entry.summary {
            text.push_str("\n\n");
            text.push_str(summary);
        }
        vec![Block::markdown(text), Block::Divider]
    }

    /// Header first, then every entry. Empty when no feed produced an entry.
    pub fn assemble(run_date: &str, feeds: &[FeedDigest]) -> Vec<DisplayUnit> {
        let entry_count: usize = feeds.iter().map(|f| f.entries.len()).sum();
        if entry_count == 0 {
            return Vec::new();
        }

        let mut units = Vec::with_capacity(entry_count + 1);
        units.push(Self::header(run_date));
        for feed in feeds {
            for entry in &feed.entries {
                units.push(Self::entry_unit(&feed.feed_title, entry));
            }
        }

        debug!("Assembled {} display units", units.len());
        units
    }
}

/// Packs whole units into chunks of at most `max_blocks` blocks. A unit is
/// never split; one larger than the limit travels alone.
pub fn chunk_units(units: Vec<DisplayUnit>, max_blocks: usize) -> Vec<Vec<Block>> {
    let mut chunks: Vec<Vec<Block>> = Vec::new();
    let mut current: Vec<Block> = Vec::new();

    for unit in units {
        if !current.is_empty() && current.len() + unit.len() > max_blocks {
            chunks.push(std::mem::take(&mut current));
        }
        current.extend(unit);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
