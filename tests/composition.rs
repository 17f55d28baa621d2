// Composition tests — the ingest and digest pipelines end to end.
//
// These tests exercise the data flow between modules:
//   JSON batch -> FeedEntry -> dedup -> RelevanceScorer -> SQLite -> digest groups
// against an in-memory database, with no filesystem or network access.

use chrono::{DateTime, TimeZone, Utc};

use compnews::db::in_memory;
use compnews::feed::entry::parse_batch;
use compnews::pipeline::digest::{build_digest, DigestOptions};
use compnews::pipeline::ingest::ingest_batch;
use compnews::relevance::scorer::{RelevanceScorer, SearchTerms};

const BATCH: &str = r#"{
  "source": "Wire",
  "entries": [
    {"title": "Nurses strike over pay",
     "link": "https://news.example/nurses-1",
     "summary": "Nurses at three hospitals walked out over pay and staffing levels.",
     "published": "2025-06-18T10:00:00Z"},
    {"title": "Nurses strike over pay and staffing",
     "link": "https://news.example/nurses-2",
     "summary": "The nurses union said the strike would continue until a new contract is signed.",
     "published": "2025-06-18T12:00:00Z",
     "source": "Guardian"},
    {"title": "Minimum wage increase approved",
     "link": "https://news.example/min-wage",
     "summary": "The state legislature approved a minimum wage increase for next year.",
     "published": "2025-06-17T09:00:00Z"},
    {"title": "Police union ratifies contract",
     "link": "https://news.example/police",
     "summary": "Officers voted to approve the union contract with a 4% pay raise.",
     "published": "2025-06-01T09:00:00Z"},
    {"title": "Football salary cap rises",
     "link": "https://news.example/football",
     "summary": "Football salary negotiations continue as the minimum wage debate heats up.",
     "published": "2025-06-18T09:00:00Z"},
    {"title": "Sewage plant upgrade approved",
     "link": "https://news.example/sewage",
     "summary": "The city will spend more on the sewage plant.",
     "published": "2025-06-18T09:00:00Z"},
    {"title": "Nurses strike over pay (updated)",
     "link": "https://news.example/nurses-1",
     "summary": "A repost of the first story.",
     "published": "2025-06-18T11:00:00Z"},
    {"title": "",
     "link": "https://news.example/untitled",
     "summary": "No headline."},
    {"title": 42}
  ]
}"#;

fn search_terms() -> SearchTerms {
    SearchTerms::new(&["wage", "pay", "union", "strike"]).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 19, 9, 0, 0).unwrap()
}

// ============================================================
// Ingest
// ============================================================

#[tokio::test]
async fn ingest_counts_every_entry_once() {
    let db = in_memory().unwrap();
    let scorer = RelevanceScorer::builtin().unwrap();
    let batch = parse_batch(BATCH).unwrap();

    let report = ingest_batch(db.as_ref(), &scorer, &search_terms(), batch, "default")
        .await
        .unwrap();

    assert_eq!(report.received, 9);
    assert_eq!(report.skipped_invalid, 2);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.rejected, 2);
    assert_eq!(report.stored, 4);
    assert_eq!(
        report.received,
        report.skipped_invalid + report.duplicates + report.rejected + report.stored
    );
    assert_eq!(db.article_count().await.unwrap(), 4);
}

#[tokio::test]
async fn reingesting_the_same_batch_stores_nothing_new() {
    let db = in_memory().unwrap();
    let scorer = RelevanceScorer::builtin().unwrap();

    ingest_batch(db.as_ref(), &scorer, &search_terms(), parse_batch(BATCH).unwrap(), "d")
        .await
        .unwrap();
    let batch = parse_batch(BATCH).unwrap();
    let second = ingest_batch(db.as_ref(), &scorer, &search_terms(), batch, "d")
        .await
        .unwrap();

    assert_eq!(second.stored, 0);
    // Four stored URLs plus the in-batch repost
    assert_eq!(second.duplicates, 5);
    assert_eq!(db.article_count().await.unwrap(), 4);
}

#[tokio::test]
async fn entry_source_overrides_batch_source() {
    let db = in_memory().unwrap();
    let scorer = RelevanceScorer::builtin().unwrap();
    ingest_batch(db.as_ref(), &scorer, &search_terms(), parse_batch(BATCH).unwrap(), "d")
        .await
        .unwrap();

    let summary = db.get_sources_summary().await.unwrap();
    let wire = summary.iter().find(|s| s.source == "Wire").unwrap();
    let guardian = summary.iter().find(|s| s.source == "Guardian").unwrap();
    assert_eq!(wire.articles, 3);
    assert_eq!(guardian.articles, 1);
}

#[tokio::test]
async fn empty_search_terms_store_everything_valid() {
    let db = in_memory().unwrap();
    let scorer = RelevanceScorer::builtin().unwrap();
    let report = ingest_batch(
        db.as_ref(),
        &scorer,
        &SearchTerms::empty(),
        parse_batch(BATCH).unwrap(),
        "d",
    )
    .await
    .unwrap();

    assert_eq!(report.rejected, 0);
    assert_eq!(report.stored, 6);
}

// ============================================================
// Ingest -> Digest
// ============================================================

#[tokio::test]
async fn digest_groups_recent_articles() {
    let db = in_memory().unwrap();
    let scorer = RelevanceScorer::builtin().unwrap();
    ingest_batch(db.as_ref(), &scorer, &search_terms(), parse_batch(BATCH).unwrap(), "d")
        .await
        .unwrap();

    let digest = build_digest(db.as_ref(), &DigestOptions::default(), now())
        .await
        .unwrap();

    // The police story is older than seven days
    assert_eq!(digest.article_count, 3);
    assert_eq!(digest.groups.len(), 2);

    let nurses = &digest.groups[0];
    assert_eq!(nurses.main_article.title, "Nurses strike over pay and staffing");
    assert_eq!(nurses.related_articles.len(), 1);
    assert_eq!(nurses.related_articles[0].title, "Nurses strike over pay");
    assert!(nurses.main_article.topics.contains("labor_market"));

    assert_eq!(digest.groups[1].main_article.title, "Minimum wage increase approved");
}

#[tokio::test]
async fn digest_window_and_source_filters() {
    let db = in_memory().unwrap();
    let scorer = RelevanceScorer::builtin().unwrap();
    ingest_batch(db.as_ref(), &scorer, &search_terms(), parse_batch(BATCH).unwrap(), "d")
        .await
        .unwrap();

    let wide = DigestOptions {
        days: 30,
        ..DigestOptions::default()
    };
    let digest = build_digest(db.as_ref(), &wide, now()).await.unwrap();
    assert_eq!(digest.article_count, 4);

    let guardian_only = DigestOptions {
        sources: vec!["Guardian".to_string()],
        ..DigestOptions::default()
    };
    let digest = build_digest(db.as_ref(), &guardian_only, now()).await.unwrap();
    assert_eq!(digest.article_count, 1);
    assert_eq!(digest.groups.len(), 1);
    assert!(digest.groups[0].related_articles.is_empty());
}

#[tokio::test]
async fn digest_region_filter_can_exclude_everything() {
    let db = in_memory().unwrap();
    let scorer = RelevanceScorer::builtin().unwrap();
    ingest_batch(db.as_ref(), &scorer, &search_terms(), parse_batch(BATCH).unwrap(), "d")
        .await
        .unwrap();

    let asia = DigestOptions {
        region: "Asia".to_string(),
        ..DigestOptions::default()
    };
    let digest = build_digest(db.as_ref(), &asia, now()).await.unwrap();
    assert_eq!(digest.article_count, 0);
    assert!(digest.groups.is_empty());
    assert_eq!(digest.region, "Asia");
}

#[tokio::test]
async fn undated_articles_appear_in_the_digest() {
    let db = in_memory().unwrap();
    let scorer = RelevanceScorer::builtin().unwrap();
    let batch = parse_batch(
        r#"[{"title": "Minimum wage increase approved",
             "link": "https://news.example/undated",
             "summary": "The legislature voted on Tuesday."}]"#,
    )
    .unwrap();
    let report = ingest_batch(db.as_ref(), &scorer, &search_terms(), batch, "d")
        .await
        .unwrap();
    assert_eq!(report.stored, 1);

    let digest = build_digest(db.as_ref(), &DigestOptions::default(), Utc::now())
        .await
        .unwrap();
    assert_eq!(digest.article_count, 1);
    assert!(digest.groups[0].main_article.published_date.is_some());
}

#[tokio::test]
async fn unfiltered_articles_need_zero_min_relevance() {
    let db = in_memory().unwrap();
    let scorer = RelevanceScorer::builtin().unwrap();
    ingest_batch(
        db.as_ref(),
        &scorer,
        &SearchTerms::empty(),
        parse_batch(BATCH).unwrap(),
        "d",
    )
    .await
    .unwrap();

    // Unfiltered articles are stored with a score of 0.0
    let digest = build_digest(db.as_ref(), &DigestOptions::default(), now())
        .await
        .unwrap();
    assert_eq!(digest.article_count, 0);

    let everything = DigestOptions {
        min_relevance: 0.0,
        ..DigestOptions::default()
    };
    let digest = build_digest(db.as_ref(), &everything, now()).await.unwrap();
    // Everything but the police story, which is outside the window
    assert_eq!(digest.article_count, 5);
}

#[tokio::test]
async fn out_of_range_window_is_an_error() {
    let db = in_memory().unwrap();
    let huge = DigestOptions {
        days: 999_999_999_999,
        ..DigestOptions::default()
    };
    let err = build_digest(db.as_ref(), &huge, now()).await.unwrap_err();
    assert!(err.to_string().contains("out of range"), "got {err}");
}

#[tokio::test]
async fn empty_database_gives_empty_digest() {
    let db = in_memory().unwrap();
    let digest = build_digest(db.as_ref(), &DigestOptions::default(), now())
        .await
        .unwrap();
    assert_eq!(digest.article_count, 0);
    assert!(digest.groups.is_empty());
}
