use crate::types::{DigestError, FeedSpec, Result};
use std::path::Path;
use tracing::{debug, info};
use url::Url;

const DELIMITER: char = '\t';
const EXPECTED_HEADER: [&str; 2] = ["title", "url"];

/// Reads the tab-delimited feed list: a `title<TAB>url` header row followed by
/// one feed per row.
pub fn load_feed_list(path: &Path) -> Result<Vec<FeedSpec>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        DigestError::Config(format!("cannot read feed list {}: {}", path.display(), e))
    })?;

    let feeds = parse_feed_list(&content)?;
    info!("Loaded {} feeds from {}", feeds.len(), path.display());
    Ok(feeds)
}

pub fn parse_feed_list(content: &str) -> Result<Vec<FeedSpec>> {
    let mut rows = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_line, header) = rows
        .next()
        .ok_or_else(|| DigestError::Config("feed list has no header row".to_string()))?;

    let columns: Vec<String> = header
        .split(DELIMITER)
        .map(|c| c.trim().to_lowercase())
        .collect();
    if columns != EXPECTED_HEADER {
        return Err(DigestError::Config(format!(
            "feed list line {}: expected header \"title<TAB>url\", found {:?}",
            header_line, header
        )));
    }

    let mut feeds = Vec::new();
    for (line_number, line) in rows {
        let fields: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();
        let [title, url] = fields.as_slice() else {
            return Err(DigestError::Config(format!(
                "feed list line {}: expected 2 columns, found {}",
                line_number,
                fields.len()
            )));
        };

        if !is_valid_feed_url(url) {
            return Err(DigestError::Config(format!(
                "feed list line {}: {:?} is not an http(s) URL",
                line_number, url
            )));
        }

        debug!("Feed {}: {}", title, url);
        feeds.push(FeedSpec {
            title: title.to_string(),
            url: url.to_string(),
        });
    }

    Ok(feeds)
}

fn is_valid_feed_url(url_str: &str) -> bool {
    match Url::parse(url_str) {
        Ok(url) => url.scheme() == "http" || url.scheme() == "https",
        Err(_) => false,
    }
}
