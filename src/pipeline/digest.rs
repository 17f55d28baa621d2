// Digest pipeline: recent stored articles → grouped stories.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use tracing::info;

use crate::db::models::Article;
use crate::db::Database;
use crate::grouping::cluster::{group_articles, ArticleGroup};
use crate::relevance::region::{RegionFilter, GLOBAL_REGION};

pub const DEFAULT_DAYS: i64 = 7;
pub const DEFAULT_MIN_RELEVANCE: f64 = 0.1;
/// Longest look-back window accepted from configuration (about a century).
pub const MAX_DAYS: i64 = 36_500;

/// Which articles go into a digest.
#[derive(Debug, Clone)]
pub struct DigestOptions {
    /// Look-back window, in days
    pub days: i64,
    /// Source names to include; empty means all
    pub sources: Vec<String>,
    pub region: String,
    pub min_relevance: f64,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            sources: Vec::new(),
            region: GLOBAL_REGION.to_string(),
            min_relevance: DEFAULT_MIN_RELEVANCE,
        }
    }
}

/// Grouped stories plus how many articles went into them.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub region: String,
    pub since: DateTime<Utc>,
    pub article_count: usize,
    pub groups: Vec<ArticleGroup>,
}

/// Load, filter, and group the articles `options` selects, relative to `now`.
pub async fn build_digest(
    db: &dyn Database,
    options: &DigestOptions,
    now: DateTime<Utc>,
) -> Result<Digest> {
    let since = TimeDelta::try_days(options.days)
        .and_then(|window| now.checked_sub_signed(window))
        .with_context(|| format!("Digest window of {} days is out of range", options.days))?;
    let region = RegionFilter::new(&options.region)?;

    let articles = db
        .get_recent_articles(since, &options.sources, options.min_relevance)
        .await?;
    let loaded = articles.len();

    let (article_count, groups) = digest_from_articles(articles, &region);

    info!(
        loaded,
        kept = article_count,
        groups = groups.len(),
        region = region.region(),
        "Digest built"
    );

    Ok(Digest {
        region: region.region().to_string(),
        since,
        article_count,
        groups,
    })
}

/// Apply the region filter and group what is left. Returns the number of
/// articles kept alongside the groups.
pub fn digest_from_articles(
    articles: Vec<Article>,
    region: &RegionFilter,
) -> (usize, Vec<ArticleGroup>) {
    let kept: Vec<Article> = articles
        .into_iter()
        .filter(|a| region.matches(&a.title, &a.content))
        .collect();
    let count = kept.len();
    (count, group_articles(kept))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, content: &str, score: f64) -> Article {
        let mut a = Article::new(title, content, &format!("https://x/{title}"), "AP");
        a.relevance_score = score;
        a
    }

    #[test]
    fn test_defaults() {
        let opts = DigestOptions::default();
        assert_eq!(opts.days, 7);
        assert_eq!(opts.min_relevance, 0.1);
        assert_eq!(opts.region, "Global");
        assert!(opts.sources.is_empty());
    }

    #[test]
    fn test_region_filter_applies_before_grouping() {
        let articles = vec![
            article("Canada raises minimum wage", "", 0.9),
            article("Japan wage growth slows", "", 0.8),
        ];
        let region = RegionFilter::new("North America").unwrap();
        let (count, groups) = digest_from_articles(articles, &region);
        assert_eq!(count, 1);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].main_article.title, "Canada raises minimum wage");
    }

    #[test]
    fn test_global_keeps_everything() {
        let articles = vec![article("A", "", 0.5), article("B", "", 0.4)];
        let (count, _) = digest_from_articles(articles, &RegionFilter::global());
        assert_eq!(count, 2);
    }
}
