use crate::types::{DigestError, Result};
use std::path::Path;
use tracing::debug;

/// Lower-cased interest terms, fixed for the duration of a run.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Builds a set from raw terms. Terms are trimmed and lower-cased; blank
    /// terms and repeats are dropped, first occurrence wins.
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() || keywords.contains(&term) {
                continue;
            }
            keywords.push(term);
        }

        if keywords.is_empty() {
            return Err(DigestError::Config(
                "keyword list is empty, every entry would be skipped".to_string(),
            ));
        }

        Ok(Self { keywords })
    }

    /// Reads one keyword per line. Lines starting with `#` are comments.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DigestError::Config(format!("cannot read keyword file {}: {}", path.display(), e))
        })?;

        let set = Self::new(
            content
                .lines()
                .filter(|line| !line.trim_start().starts_with('#')),
        )?;
        debug!("Loaded {} keywords from {}", set.len(), path.display());
        Ok(set)
    }

    /// True if any keyword occurs in `text`, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }
}
