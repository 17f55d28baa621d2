// Feed entry batch format.
//
// A batch file is either a bare JSON array of entries or an object with an
// `entries` array and an optional batch-wide `source`:
//
//   {"source": "The Guardian", "entries": [{"title": ..., "link": ...}]}
//
// Entries are decoded one at a time so a single malformed entry is counted
// and skipped instead of failing the whole batch.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::{clean_text, parse_published};
use crate::db::models::Article;

/// One item from a news feed, as delivered by the fetcher.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "url")]
    pub link: String,
    #[serde(default, alias = "content")]
    pub summary: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, alias = "published_date")]
    pub published: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl FeedEntry {
    /// Normalize into an unscored article.
    ///
    /// Returns `None` when the entry has no title or no link after cleaning.
    /// The entry's own source wins over `default_source`.
    pub fn into_article(self, default_source: &str) -> Option<Article> {
        let title = clean_text(&self.title);
        let url = self.link.trim().to_string();
        if title.is_empty() || url.is_empty() {
            return None;
        }

        let source = self
            .source
            .map(|s| clean_text(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_source.to_string());

        let mut article = Article::new(&title, &clean_text(&self.summary), &url, &source);
        article.author = self.author.map(|a| clean_text(&a)).filter(|a| !a.is_empty());
        article.published_date = self.published.as_deref().and_then(parse_published);
        Some(article)
    }
}

/// Decoded entries plus the number that could not be decoded.
#[derive(Debug, Clone, Default)]
pub struct FeedBatch {
    pub entries: Vec<FeedEntry>,
    /// Batch-wide source name, if the file declared one
    pub source: Option<String>,
    pub malformed: usize,
}

impl FeedBatch {
    /// Total entries in the file, decodable or not.
    pub fn received(&self) -> usize {
        self.entries.len() + self.malformed
    }
}

/// Parse a batch from JSON text.
pub fn parse_batch(json: &str) -> Result<FeedBatch> {
    let root: Value = serde_json::from_str(json).context("Feed batch is not valid JSON")?;

    let (items, source) = match root {
        Value::Array(items) => (items, None),
        Value::Object(mut map) => {
            let source = map
                .get("source")
                .and_then(Value::as_str)
                .map(str::to_string);
            match map.remove("entries") {
                Some(Value::Array(items)) => (items, source),
                _ => anyhow::bail!("Feed batch object has no `entries` array"),
            }
        }
        _ => anyhow::bail!("Feed batch must be a JSON array or an object with `entries`"),
    };

    let mut batch = FeedBatch {
        source,
        ..FeedBatch::default()
    };

    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<FeedEntry>(item) {
            Ok(entry) => batch.entries.push(entry),
            Err(e) => {
                warn!(index = i, error = %e, "Skipping malformed feed entry");
                batch.malformed += 1;
            }
        }
    }

    Ok(batch)
}

/// Read and parse a batch file.
pub fn load_batch(path: &Path) -> Result<FeedBatch> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read feed batch {}", path.display()))?;
    parse_batch(&json).with_context(|| format!("Failed to parse feed batch {}", path.display()))
}
