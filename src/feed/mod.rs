// Feed batches — the ingestion boundary.
//
// Fetching feeds happens elsewhere; this module reads the resulting entries
// (a JSON array per batch) and normalizes them into unscored articles.

pub mod entry;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Collapse every run of whitespace into a single space and trim the ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a feed timestamp.
///
/// Accepts RFC 3339 ("2025-06-19T09:00:00Z"), RFC 2822 as used by RSS
/// ("Thu, 19 Jun 2025 09:00:00 GMT"), and bare "YYYY-MM-DD HH:MM:SS" or
/// "YYYY-MM-DD" (taken as UTC). Anything else is `None`.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
