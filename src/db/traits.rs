// Database trait — backend-agnostic async interface for article storage.
//
// Implementor: SqliteDatabase (wraps rusqlite behind a tokio Mutex).
// Methods mirror the free functions in queries.rs so callers hold an
// `Arc<dyn Database>` and never touch a Connection directly.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::models::{Article, KnownFingerprints, SourceCount};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Articles ---

    /// Store a scored article. Returns false if its URL is already stored.
    async fn insert_article(&self, article: &Article, content_hash: &str) -> Result<bool>;

    /// Every stored URL and content hash, for deduplicating the next batch.
    async fn known_fingerprints(&self) -> Result<KnownFingerprints>;

    /// Articles published since `since` with at least `min_relevance`,
    /// most relevant first. An empty `sources` slice means every source.
    async fn get_recent_articles(
        &self,
        since: DateTime<Utc>,
        sources: &[String],
        min_relevance: f64,
    ) -> Result<Vec<Article>>;

    // --- Status ---

    /// Total number of stored articles.
    async fn article_count(&self) -> Result<i64>;

    /// Per-source article counts, largest first.
    async fn get_sources_summary(&self) -> Result<Vec<SourceCount>>;

    /// Timestamp of the most recently stored article.
    async fn last_scraped_at(&self) -> Result<Option<String>>;
}
