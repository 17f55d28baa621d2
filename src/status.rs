// System status display — database size, article counts, last ingest.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::db::Database;
use crate::output::terminal;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, db_display_path: &str) -> Result<()> {
    // Database file size
    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    let total = db.article_count().await?;
    if total == 0 {
        println!("Articles: none stored yet");
        println!("  Run `compnews ingest <FILE>` to add a feed batch");
        return Ok(());
    }
    println!("Articles: {total}");

    match db.last_scraped_at().await? {
        Some(ts) => println!("Last ingest: {ts}"),
        None => println!("Last ingest: never"),
    }

    terminal::display_sources(&db.get_sources_summary().await?);

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
