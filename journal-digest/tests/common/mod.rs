#![allow(dead_code)]

use async_trait::async_trait;
use journal_digest::{Block, ChatTransport, DigestError, FeedSource, FeedSpec, RawEntry, Result};
use std::collections::HashMap;
use std::sync::Mutex;

pub const RUN_DATE: &str = "October 18, 2026";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn feed(title: &str, url: &str) -> FeedSpec {
    FeedSpec {
        title: title.to_string(),
        url: url.to_string(),
    }
}

/// In-memory feed source keyed by feed URL. Unknown URLs fail like a dead feed.
#[derive(Default)]
pub struct StaticFeedSource {
    entries: HashMap<String, Vec<RawEntry>>,
}

impl StaticFeedSource {
    pub fn with_feed(mut self, url: &str, entries: Vec<RawEntry>) -> Self {
        self.entries.insert(url.to_string(), entries);
        self
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    async fn entries(&self, feed: &FeedSpec) -> Result<Vec<RawEntry>> {
        self.entries
            .get(&feed.url)
            .cloned()
            .ok_or_else(|| DigestError::Parse(format!("no such feed {}", feed.url)))
    }
}

/// Records every chunk it is asked to send.
#[derive(Default)]
pub struct RecordingTransport {
    pub chunks: Mutex<Vec<Vec<Block>>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<Vec<Block>> {
        self.chunks.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send(&self, chunk: &[Block]) -> Result<()> {
        self.chunks.lock().unwrap().push(chunk.to_vec());
        Ok(())
    }
}

pub fn section_text(block: &Block) -> Option<&str> {
    match block {
        Block::Section { text } => Some(text.text.as_str()),
        Block::Divider => None,
    }
}
