use crate::digest::{chunk_units, DigestAssembler, DEFAULT_CHUNK_SIZE};
use crate::formatter::EntryFormatter;
use crate::keywords::KeywordSet;
use crate::screener::EntryScreener;
use crate::store::SeenStore;
use crate::traits::{ChatTransport, FeedSource};
use crate::types::{FeedDigest, FeedReport, FeedSpec, Result, RunReport, DISPLAY_DATE_FORMAT};
use chrono::Local;
use tracing::{error, info};

/// Today's date as recorded in the store and shown in the digest header.
pub fn run_date_today() -> String {
    Local::now().format(DISPLAY_DATE_FORMAT).to_string()
}

/// One digest run: screen and format every feed, commit the store, then
/// deliver.
pub struct DigestPipeline {
    keywords: KeywordSet,
    formatter: EntryFormatter,
    chunk_size: usize,
}

impl DigestPipeline {
    pub fn new(keywords: KeywordSet, formatter: EntryFormatter) -> Self {
        Self {
            keywords,
            formatter,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Screens and formats every feed in order, staging what was seen.
    /// Nothing is committed here.
    pub async fn collect(
        &self,
        feeds: &[FeedSpec],
        source: &dyn FeedSource,
        store: &mut SeenStore,
        run_date: &str,
    ) -> Result<(Vec<FeedDigest>, Vec<FeedReport>)> {
        let screener = EntryScreener::new(&self.keywords, run_date);
        let mut digests = Vec::with_capacity(feeds.len());
        let mut reports = Vec::with_capacity(feeds.len());

        for feed in feeds {
            let entries = match source.entries(feed).await {
                Ok(entries) => entries,
                Err(e) => {
                    error!("Failed to pull feed {} ({}): {}", feed.title, feed.url, e);
                    reports.push(FeedReport {
                        feed_title: feed.title.clone(),
                        ..Default::default()
                    });
                    continue;
                }
            };

            let outcome = screener.screen(entries, store).await?;
            let formatted = self.formatter.format(&outcome.screened)?;

            info!(
                "{}: {} entries already seen, {} entries skipped, {} passed",
                feed.title,
                outcome.seen_count,
                outcome.skipped_count,
                formatted.len()
            );

            reports.push(FeedReport {
                feed_title: feed.title.clone(),
                passed: formatted.len(),
                seen: outcome.seen_count,
                skipped: outcome.skipped_count,
            });
            digests.push(FeedDigest {
                feed_title: feed.title.clone(),
                entries: formatted,
            });
        }

        Ok((digests, reports))
    }

    /// Full run. The store is committed before anything is sent, so a
    /// failed commit never leaves a delivered digest behind.
    pub async fn run(
        &self,
        feeds: &[FeedSpec],
        source: &dyn FeedSource,
        store: &mut SeenStore,
        transport: &dyn ChatTransport,
        run_date: &str,
    ) -> Result<RunReport> {
        info!("Starting digest run for {} with {} feeds", run_date, feeds.len());

        let (digests, reports) = self.collect(feeds, source, store, run_date).await?;
        let records_committed = store.commit().await?;

        let mut report = RunReport {
            run_date: run_date.to_string(),
            feeds: reports,
            records_committed,
            chunks_sent: 0,
        };

        let units = DigestAssembler::assemble(run_date, &digests);
        if units.is_empty() {
            info!("No relevant entries today, nothing to send");
            return Ok(report);
        }

        let chunks = chunk_units(units, self.chunk_size);
        for chunk in &chunks {
            transport.send(chunk).await?;
            report.chunks_sent += 1;
        }

        info!(
            "Delivered {} entries in {} chunks",
            report.total_passed(),
            report.chunks_sent
        );
        Ok(report)
    }
}
