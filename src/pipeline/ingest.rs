// Ingest pipeline: feed batch → stored, scored articles.
//
// Each entry goes through four gates in order: it must normalize into an
// article (title and link present), must not be a duplicate, must pass the
// relevance scorer, and finally must insert (the URL constraint catches
// anything that raced past the dedup set). The report counts where each
// entry stopped.
//
// Entries without a parseable publish date are stamped with the ingest time
// so they stay inside the digest window.

use anyhow::Result;
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use crate::db::models::Article;
use crate::db::Database;
use crate::feed::entry::{FeedBatch, FeedEntry};
use crate::relevance::scorer::{RelevanceScorer, SearchTerms};

use super::dedup::{content_hash, Deduplicator};

/// Where the entries of one or more batches ended up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Entries in the batch, decodable or not
    pub received: usize,
    /// Malformed entries and entries missing a title or link
    pub skipped_invalid: usize,
    pub duplicates: usize,
    /// Entries the relevance scorer turned away
    pub rejected: usize,
    pub stored: usize,
}

impl IngestReport {
    /// Add another report's counts to this one.
    pub fn merge(&mut self, other: &IngestReport) {
        self.received += other.received;
        self.skipped_invalid += other.skipped_invalid;
        self.duplicates += other.duplicates;
        self.rejected += other.rejected;
        self.stored += other.stored;
    }
}

/// What happened to a single entry before storage.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Invalid,
    Duplicate,
    Rejected,
    Accepted {
        article: Article,
        content_hash: String,
    },
}

/// Normalize, dedup, and score one entry. No I/O.
///
/// `ingested_at` becomes the publish date of an undated entry.
pub fn assess_entry(
    entry: FeedEntry,
    default_source: &str,
    scorer: &RelevanceScorer,
    search_terms: &SearchTerms,
    dedup: &mut Deduplicator,
    ingested_at: DateTime<Utc>,
) -> EntryOutcome {
    let Some(mut article) = entry.into_article(default_source) else {
        return EntryOutcome::Invalid;
    };
    if article.published_date.is_none() {
        debug!(url = %article.url, "No publish date, using ingest time");
        article.published_date = Some(ingested_at);
    }

    let hash = content_hash(&article.content);
    if dedup.check_and_record(&article.url, &article.content, &hash) {
        debug!(url = %article.url, "Duplicate article");
        return EntryOutcome::Duplicate;
    }

    let verdict = scorer.score(&article.title, &article.content, search_terms);
    if !verdict.is_relevant {
        debug!(title = %article.title, "Article not relevant");
        return EntryOutcome::Rejected;
    }

    article.apply_verdict(verdict);
    EntryOutcome::Accepted {
        article,
        content_hash: hash,
    }
}

/// Run one batch through the pipeline and store what survives.
///
/// `default_source` names the source for entries that carry none and whose
/// batch declares none.
pub async fn ingest_batch(
    db: &dyn Database,
    scorer: &RelevanceScorer,
    search_terms: &SearchTerms,
    batch: FeedBatch,
    default_source: &str,
) -> Result<IngestReport> {
    let mut report = IngestReport {
        received: batch.received(),
        skipped_invalid: batch.malformed,
        ..IngestReport::default()
    };

    let source = batch
        .source
        .clone()
        .unwrap_or_else(|| default_source.to_string());
    let mut dedup = Deduplicator::new(db.known_fingerprints().await?);
    let ingested_at = Utc::now();

    let pb = ProgressBar::new(batch.entries.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("  Ingesting [{bar:30}] {pos}/{len}")?);

    for entry in batch.entries {
        match assess_entry(entry, &source, scorer, search_terms, &mut dedup, ingested_at) {
            EntryOutcome::Invalid => report.skipped_invalid += 1,
            EntryOutcome::Duplicate => report.duplicates += 1,
            EntryOutcome::Rejected => report.rejected += 1,
            EntryOutcome::Accepted {
                article,
                content_hash,
            } => {
                if db.insert_article(&article, &content_hash).await? {
                    report.stored += 1;
                } else {
                    report.duplicates += 1;
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        source = %source,
        received = report.received,
        stored = report.stored,
        duplicates = report.duplicates,
        rejected = report.rejected,
        invalid = report.skipped_invalid,
        "Batch ingested"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingest_time() -> DateTime<Utc> {
        use chrono::TimeZone;
        Utc.with_ymd_and_hms(2025, 6, 19, 9, 0, 0).unwrap()
    }

    fn entry(title: &str, link: &str, summary: &str) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            link: link.to_string(),
            summary: summary.to_string(),
            ..FeedEntry::default()
        }
    }

    #[test]
    fn test_assess_relevant_entry() {
        let scorer = RelevanceScorer::builtin().unwrap();
        let terms = SearchTerms::new(&["wage"]).unwrap();
        let mut dedup = Deduplicator::default();

        let outcome = assess_entry(
            entry("Minimum wage increase approved", "https://a", ""),
            "Feed",
            &scorer,
            &terms,
            &mut dedup,
            ingest_time(),
        );
        match outcome {
            EntryOutcome::Accepted { article, .. } => {
                assert_eq!(article.source, "Feed");
                assert_eq!(article.relevance_score, 1.0);
                assert!(article.topics.contains("compensation"));
            }
            other => panic!("expected Accepted, got {other:?}"),
        }
    }

    #[test]
    fn test_assess_gates_in_order() {
        let scorer = RelevanceScorer::builtin().unwrap();
        let terms = SearchTerms::new(&["wage"]).unwrap();
        let mut dedup = Deduplicator::default();

        let invalid = assess_entry(
            entry("", "https://a", ""),
            "F",
            &scorer,
            &terms,
            &mut dedup,
            ingest_time(),
        );
        assert_eq!(invalid, EntryOutcome::Invalid);

        let rejected = assess_entry(
            entry("Sewage plant upgrade approved", "https://b", ""),
            "F",
            &scorer,
            &terms,
            &mut dedup,
            ingest_time(),
        );
        assert_eq!(rejected, EntryOutcome::Rejected);

        // Seen (and rejected) above, so now a duplicate
        let dup = assess_entry(
            entry("Minimum wage increase approved", "https://b", ""),
            "F",
            &scorer,
            &terms,
            &mut dedup,
            ingest_time(),
        );
        assert_eq!(dup, EntryOutcome::Duplicate);
    }

    #[test]
    fn test_undated_entry_gets_ingest_time() {
        let scorer = RelevanceScorer::builtin().unwrap();
        let terms = SearchTerms::new(&["wage"]).unwrap();
        let mut dedup = Deduplicator::default();

        let undated = assess_entry(
            entry("Minimum wage increase approved", "https://a", ""),
            "F",
            &scorer,
            &terms,
            &mut dedup,
            ingest_time(),
        );
        let mut dated_entry = entry("Minimum wage rises again", "https://b", "");
        dated_entry.published = Some("2025-06-01T09:00:00Z".to_string());
        let dated = assess_entry(dated_entry, "F", &scorer, &terms, &mut dedup, ingest_time());

        match (undated, dated) {
            (
                EntryOutcome::Accepted { article: a, .. },
                EntryOutcome::Accepted { article: b, .. },
            ) => {
                assert_eq!(a.published_date, Some(ingest_time()));
                assert_ne!(b.published_date, Some(ingest_time()));
                assert!(b.published_date.is_some());
            }
            other => panic!("expected two Accepted outcomes, got {other:?}"),
        }
    }

    #[test]
    fn test_report_merge() {
        let mut total = IngestReport::default();
        let one = IngestReport {
            received: 3,
            skipped_invalid: 1,
            duplicates: 0,
            rejected: 1,
            stored: 1,
        };
        total.merge(&one);
        total.merge(&one);
        assert_eq!(total.received, 6);
        assert_eq!(total.stored, 2);
    }
}
