// Database schema — table creation.
//
// One `articles` table holds every stored article with its relevance data.
// Matched terms and topics are JSON arrays so the scorer can evolve without
// schema changes. `schema_version` records what has been applied.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// Idempotent, so it runs on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Scored articles that passed the relevance filter
        CREATE TABLE IF NOT EXISTS articles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL DEFAULT '',
            url TEXT NOT NULL UNIQUE,
            source TEXT NOT NULL,
            author TEXT,
            published_date TEXT,                   -- RFC 3339, UTC, second precision
            scraped_date TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now')),
            content_hash TEXT NOT NULL,            -- SHA-256 of cleaned content
            relevance_score REAL NOT NULL DEFAULT 0.0,
            matched_terms TEXT NOT NULL DEFAULT '[]',
            topics TEXT NOT NULL DEFAULT '[]'
        );

        -- Digest queries filter on recency and relevance
        CREATE INDEX IF NOT EXISTS idx_articles_published
            ON articles(published_date);

        CREATE INDEX IF NOT EXISTS idx_articles_relevance
            ON articles(relevance_score);

        -- Content-hash deduplication
        CREATE INDEX IF NOT EXISTS idx_articles_hash
            ON articles(content_hash);
        ",
    )
    .context("Failed to create database tables")?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        // schema_version, articles
        assert_eq!(table_count(&conn).unwrap(), 2i64);
    }

    #[test]
    fn test_url_is_unique() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let insert = "INSERT INTO articles (title, url, source, content_hash)
                      VALUES ('T', 'https://a', 'S', 'h')";
        conn.execute(insert, []).unwrap();
        assert!(conn.execute(insert, []).is_err());
    }
}
