// Database queries — CRUD operations for the articles table.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use std::collections::BTreeSet;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{Article, KnownFingerprints, SourceCount};

/// Timestamps are stored as fixed-width RFC 3339 so they sort as text.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Store a scored article. Returns false if its URL is already stored.
pub fn insert_article(conn: &Connection, article: &Article, content_hash: &str) -> Result<bool> {
    let matched_terms = serde_json::to_string(&article.matched_terms)?;
    let topics = serde_json::to_string(&article.topics)?;
    let published = article.published_date.as_ref().map(format_timestamp);

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO articles
            (title, content, url, source, author, published_date, content_hash,
             relevance_score, matched_terms, topics)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            article.title,
            article.content,
            article.url,
            article.source,
            article.author,
            published,
            content_hash,
            article.relevance_score,
            matched_terms,
            topics,
        ],
    )?;
    Ok(inserted > 0)
}

/// All stored URLs and content hashes.
pub fn known_fingerprints(conn: &Connection) -> Result<KnownFingerprints> {
    let mut stmt = conn.prepare("SELECT url, content_hash FROM articles")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut known = KnownFingerprints::default();
    for row in rows {
        let (url, hash) = row?;
        known.urls.insert(url);
        known.content_hashes.insert(hash);
    }
    Ok(known)
}

/// Articles published at or after `since` with at least `min_relevance`,
/// most relevant first, then most recent. Undated articles are excluded.
///
/// An empty `sources` slice means every source.
pub fn get_recent_articles(
    conn: &Connection,
    since: &DateTime<Utc>,
    sources: &[String],
    min_relevance: f64,
) -> Result<Vec<Article>> {
    let mut stmt = conn.prepare(
        "SELECT title, content, url, source, author, published_date,
                relevance_score, matched_terms, topics
         FROM articles
         WHERE published_date >= ?1 AND relevance_score >= ?2
         ORDER BY relevance_score DESC, published_date DESC",
    )?;

    let rows = stmt.query_map(params![format_timestamp(since), min_relevance], row_to_article)?;

    let mut articles = Vec::new();
    for row in rows {
        let article = row?;
        if sources.is_empty() || sources.iter().any(|s| s == &article.source) {
            articles.push(article);
        }
    }
    Ok(articles)
}

/// Total number of stored articles.
pub fn article_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
    Ok(count)
}

/// Stored article counts per source, largest first.
pub fn source_counts(conn: &Connection) -> Result<Vec<SourceCount>> {
    let mut stmt = conn.prepare(
        "SELECT source, COUNT(*) FROM articles GROUP BY source ORDER BY COUNT(*) DESC, source",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(SourceCount {
            source: row.get(0)?,
            articles: row.get(1)?,
        })
    })?;

    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}

/// When the most recent article was stored.
pub fn last_scraped_at(conn: &Connection) -> Result<Option<String>> {
    let result: Option<Option<String>> = conn
        .query_row("SELECT MAX(scraped_date) FROM articles", [], |row| row.get(0))
        .optional()?;
    Ok(result.flatten())
}

fn row_to_article(row: &Row<'_>) -> rusqlite::Result<Article> {
    let matched_terms: String = row.get(7)?;
    let topics: String = row.get(8)?;

    Ok(Article {
        title: row.get(0)?,
        content: row.get(1)?,
        url: row.get(2)?,
        source: row.get(3)?,
        author: row.get(4)?,
        published_date: parse_timestamp(row.get(5)?),
        relevance_score: row.get(6)?,
        // A corrupt JSON column degrades to "no terms" rather than failing the query
        matched_terms: serde_json::from_str::<Vec<String>>(&matched_terms).unwrap_or_default(),
        topics: serde_json::from_str::<BTreeSet<String>>(&topics).unwrap_or_default(),
    })
}
