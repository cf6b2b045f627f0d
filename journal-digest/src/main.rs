use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use journal_digest::{
    load_feed_list, run_date_today, Block, ChatTransport, Cli, Delivery, DigestPipeline,
    EntryFormatter, KeywordSet, RssFeedSource, RunConfig, SeenStore, SlackTransport,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Dry-run delivery: prints each chunk as JSON.
struct StdoutTransport;

#[async_trait]
impl ChatTransport for StdoutTransport {
    async fn send(&self, chunk: &[Block]) -> journal_digest::Result<()> {
        println!("{}", serde_json::to_string_pretty(chunk)?);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = RunConfig::from_cli(cli).context("invalid configuration")?;

    let feeds = load_feed_list(&config.feeds_file).context("loading feed list")?;
    let keywords = KeywordSet::load(&config.keywords_file).context("loading keywords")?;
    info!("Starting journal digest: {} feeds, {} keywords", feeds.len(), keywords.len());

    let source = RssFeedSource::new(config.fetch.clone())?;
    let transport: Box<dyn ChatTransport> = match &config.delivery {
        Delivery::Slack { token, channel } => {
            Box::new(SlackTransport::new(token.clone(), channel.clone()))
        }
        Delivery::Stdout => {
            info!("Dry run: printing the digest instead of posting it");
            Box::new(StdoutTransport)
        }
    };

    let mut store = SeenStore::open(&config.database_path)
        .await
        .context("opening seen-article store")?;

    let pipeline = DigestPipeline::new(
        keywords,
        EntryFormatter::new(config.summary_max_chars, config.date_policy),
    )
    .with_chunk_size(config.chunk_size);

    let run_date = run_date_today();
    let result = pipeline
        .run(&feeds, &source, &mut store, transport.as_ref(), &run_date)
        .await;
    store.close().await;

    match result {
        Ok(report) => {
            info!(
                "Run finished: {} entries passed, {} records committed, {} chunks sent",
                report.total_passed(),
                report.records_committed,
                report.chunks_sent
            );
            Ok(())
        }
        Err(e) => {
            error!("Digest run failed: {}", e);
            Err(e.into())
        }
    }
}
