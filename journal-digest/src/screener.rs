use crate::formatter::html_to_text;
use crate::keywords::KeywordSet;
use crate::store::SeenStore;
use crate::types::{RawEntry, Result, ScreenOutcome, ScreenedEntry};
use tracing::{debug, warn};

/// How a single entry was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Duplicate,
    Irrelevant,
    Relevant,
    /// No title, or a blank one: malformed input, neither staged nor counted.
    Dropped,
}

/// Novelty and relevance filter in front of the formatter.
///
/// Every new entry is staged in the store whether or not it matches, so an
/// irrelevant article is evaluated once and then remembered as seen.
pub struct EntryScreener<'a> {
    keywords: &'a KeywordSet,
    run_date: &'a str,
}

impl<'a> EntryScreener<'a> {
    pub fn new(keywords: &'a KeywordSet, run_date: &'a str) -> Self {
        Self { keywords, run_date }
    }

    /// Screens one feed's entries in order.
    pub async fn screen(&self, entries: Vec<RawEntry>, store: &mut SeenStore) -> Result<ScreenOutcome> {
        let mut outcome = ScreenOutcome::default();

        for entry in entries {
            match self.classify(&entry, store).await? {
                Verdict::Duplicate => outcome.seen_count += 1,
                Verdict::Irrelevant => outcome.skipped_count += 1,
                Verdict::Dropped => outcome.dropped_count += 1,
                Verdict::Relevant => outcome.screened.push(ScreenedEntry(entry)),
            }
        }

        Ok(outcome)
    }

    /// Classifies `entry`, staging it in `store` when it is new.
    pub async fn classify(&self, entry: &RawEntry, store: &mut SeenStore) -> Result<Verdict> {
        let title = match entry.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => {
                warn!("Entry without a title, dropping (link: {:?})", entry.link);
                return Ok(Verdict::Dropped);
            }
        };
        // A title is always present here, so the identifier is too.
        let identifier = entry.identifier().unwrap_or(title);

        if store.lookup(identifier).await? {
            debug!("Already seen: {}", identifier);
            return Ok(Verdict::Duplicate);
        }

        let summary = entry.summary.as_deref().unwrap_or("");
        let text = html_to_text(&format!("{} {}", title, summary));
        let verdict = if self.keywords.matches(&text) {
            Verdict::Relevant
        } else {
            Verdict::Irrelevant
        };

        store.stage_insert(identifier, self.run_date, title);
        Ok(verdict)
    }
}
