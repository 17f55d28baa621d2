// Data models — the types that flow through the application.
//
// These are separate from the database queries so the scoring and grouping
// code can use them without depending on rusqlite.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::relevance::scorer::RelevanceVerdict;

/// A news article, before or after scoring.
///
/// The scoring fields default to "unscored" (zero score, no terms, no
/// topics), which is also what an irrelevant article looks like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub matched_terms: Vec<String>,
    #[serde(default)]
    pub topics: BTreeSet<String>,
}

impl Article {
    /// An unscored article with just the provenance fields filled in.
    pub fn new(title: &str, content: &str, url: &str, source: &str) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            url: url.to_string(),
            source: source.to_string(),
            author: None,
            published_date: None,
            relevance_score: 0.0,
            matched_terms: Vec::new(),
            topics: BTreeSet::new(),
        }
    }

    pub fn with_published(mut self, published: DateTime<Utc>) -> Self {
        self.published_date = Some(published);
        self
    }

    /// Copy a verdict's score, terms, and topics onto this article.
    pub fn apply_verdict(&mut self, verdict: RelevanceVerdict) {
        self.relevance_score = verdict.relevance_score;
        self.matched_terms = verdict.matched_terms;
        self.topics = verdict.topics;
    }

    pub fn tier(&self) -> RelevanceTier {
        RelevanceTier::from_score(self.relevance_score)
    }
}

/// Relevance buckets used for the digest markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelevanceTier {
    Low,
    Medium,
    High,
}

impl RelevanceTier {
    /// Determine the tier from a relevance score (0-1).
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.7 => RelevanceTier::High,
            s if s >= 0.4 => RelevanceTier::Medium,
            _ => RelevanceTier::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelevanceTier::Low => "Low",
            RelevanceTier::Medium => "Medium",
            RelevanceTier::High => "High",
        }
    }
}

impl fmt::Display for RelevanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URLs and content hashes already in storage, used for deduplication.
#[derive(Debug, Clone, Default)]
pub struct KnownFingerprints {
    pub urls: HashSet<String>,
    pub content_hashes: HashSet<String>,
}

/// Per-source article totals for the status display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCount {
    pub source: String,
    pub articles: i64,
}
