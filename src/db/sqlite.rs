// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across an .await on anything else.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{Article, KnownFingerprints, SourceCount};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn insert_article(&self, article: &Article, content_hash: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::insert_article(&conn, article, content_hash)
    }

    async fn known_fingerprints(&self) -> Result<KnownFingerprints> {
        let conn = self.conn.lock().await;
        super::queries::known_fingerprints(&conn)
    }

    async fn get_recent_articles(
        &self,
        since: DateTime<Utc>,
        sources: &[String],
        min_relevance: f64,
    ) -> Result<Vec<Article>> {
        let conn = self.conn.lock().await;
        super::queries::get_recent_articles(&conn, &since, sources, min_relevance)
    }

    async fn article_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::article_count(&conn)
    }

    async fn get_sources_summary(&self) -> Result<Vec<SourceCount>> {
        let conn = self.conn.lock().await;
        super::queries::source_counts(&conn)
    }

    async fn last_scraped_at(&self) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::last_scraped_at(&conn)
    }
}
