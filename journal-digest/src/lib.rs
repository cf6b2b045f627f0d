pub mod types;
pub mod config;
pub mod keywords;
pub mod feed_list;
pub mod store;
pub mod screener;
pub mod formatter;
pub mod digest;
pub mod traits;
pub mod fetcher;
pub mod parser;
pub mod sources;
pub mod slack;
pub mod pipeline;

pub use types::*;
pub use config::{Cli, Delivery, RunConfig};
pub use keywords::KeywordSet;
pub use feed_list::load_feed_list;
pub use store::SeenStore;
pub use screener::{EntryScreener, Verdict};
pub use formatter::{DatePolicy, EntryFormatter};
pub use digest::{chunk_units, Block, DigestAssembler};
pub use traits::{ChatTransport, FeedSource};
pub use sources::RssFeedSource;
pub use slack::SlackTransport;
pub use pipeline::{run_date_today, DigestPipeline};
