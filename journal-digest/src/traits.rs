use crate::digest::Block;
use crate::types::{FeedSpec, RawEntry, Result};
use async_trait::async_trait;

/// Supplies the decoded entries of a feed.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Entries of `feed`, in document order.
    async fn entries(&self, feed: &FeedSpec) -> Result<Vec<RawEntry>>;
}

/// Delivers pre-built block chunks to a chat channel, one call per chunk.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, chunk: &[Block]) -> Result<()>;
}
