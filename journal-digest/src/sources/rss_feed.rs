use crate::fetcher::Fetcher;
use crate::parser::FeedParser;
use crate::traits::FeedSource;
use crate::types::{FeedSpec, FetchConfig, RawEntry, Result};
use async_trait::async_trait;
use tracing::{debug, info};

/// Fetches a feed over HTTP and decodes it with feed-rs.
pub struct RssFeedSource {
    fetcher: Fetcher,
}

impl RssFeedSource {
    pub fn new(fetch_config: FetchConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(fetch_config)?,
        })
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    async fn entries(&self, feed: &FeedSpec) -> Result<Vec<RawEntry>> {
        info!("Pulling RSS feed: {} ({})", feed.title, feed.url);

        let content = self.fetcher.fetch(&feed.url).await?;
        let parsed = FeedParser::parse_feed(&content)?;

        if let Some(document_title) = &parsed.title {
            debug!("Feed {} calls itself {:?}", feed.title, document_title);
        }

        Ok(parsed.entries)
    }
}
