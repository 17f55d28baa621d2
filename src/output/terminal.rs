// Colored terminal output for digests, verdicts, and ingest reports.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use crate::db::models::{Article, RelevanceTier, SourceCount};
use crate::grouping::cluster::ArticleGroup;
use crate::pipeline::digest::Digest;
use crate::pipeline::ingest::IngestReport;
use crate::relevance::region::RegionFilter;
use crate::relevance::scorer::RelevanceVerdict;
use crate::relevance::vocabulary::{NegativeVocabulary, TopicVocabulary};

/// Display a grouped digest.
pub fn display_digest(digest: &Digest) {
    if digest.groups.is_empty() {
        println!("No relevant articles found. Run `compnews ingest` first, or widen --days.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Compensation News: {} stories from {} articles ({}) ===",
            digest.groups.len(),
            digest.article_count,
            digest.region,
        )
        .bold()
    );
    println!(
        "  {}",
        format!("since {}", digest.since.format("%Y-%m-%d %H:%M UTC")).dimmed()
    );

    for (i, group) in digest.groups.iter().enumerate() {
        display_group(i + 1, group);
    }

    let high = digest
        .groups
        .iter()
        .filter(|g| g.main_article.tier() == RelevanceTier::High)
        .count();
    println!();
    if high > 0 {
        println!("  {} {} highly relevant stories", "*".green().bold(), high);
    }
}

fn display_group(rank: usize, group: &ArticleGroup) {
    let main = &group.main_article;
    println!();
    println!(
        "  {:>3}. {} {}",
        rank,
        tier_marker(main.tier()),
        main.title.bold()
    );

    let summary = super::short_summary(&main.content, 30, 200);
    if !summary.is_empty() {
        println!("       {}", summary.dimmed());
    }
    println!("       {}", article_byline(main));

    if !main.matched_terms.is_empty() {
        println!("       Terms: {}", main.matched_terms.join(", "));
    }
    if !main.topics.is_empty() {
        let topics: Vec<&str> = main.topics.iter().map(String::as_str).collect();
        println!("       Topics: {}", topics.join(", "));
    }

    let related = group.related_articles.len();
    if related > 0 {
        println!(
            "       {} related article{}:",
            related,
            if related == 1 { "" } else { "s" }
        );
        for article in &group.related_articles {
            println!(
                "         - {} {}",
                super::truncate_chars(&article.title, 90),
                article_byline(article).dimmed()
            );
        }
    }
}

fn article_byline(article: &Article) -> String {
    let date = article
        .published_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "undated".to_string());
    format!(
        "[{} | {} | {:.2}] {}",
        article.source, date, article.relevance_score, article.url
    )
}

/// Display a single scoring verdict (for `compnews score`).
pub fn display_verdict(
    title: &str,
    content: &str,
    verdict: &RelevanceVerdict,
    region: Option<&RegionFilter>,
) {
    println!("\n{}", format!("=== Relevance for \"{}\" ===", title).bold());

    let relevant = if verdict.is_relevant {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    };
    println!("  Relevant: {relevant}");

    let tier = RelevanceTier::from_score(verdict.relevance_score);
    println!(
        "  Score: {:.2} ({})",
        verdict.relevance_score,
        colorize_tier(tier)
    );

    if verdict.matched_terms.is_empty() {
        println!("  Matched terms: {}", "none".dimmed());
    } else {
        println!("  Matched terms: {}", verdict.matched_terms.join(", "));
    }
    if !verdict.topics.is_empty() {
        let topics: Vec<&str> = verdict.topics.iter().map(String::as_str).collect();
        println!("  Topics: {}", topics.join(", "));
    }

    if let Some(region) = region.filter(|r| !r.is_global()) {
        match region.matched_keyword(title, content) {
            Some(keyword) => println!("  Region {}: yes ({keyword})", region.region()),
            None => println!("  Region {}: {}", region.region(), "no".red()),
        }
    }
}

/// Display the built-in vocabulary.
pub fn display_vocabulary(vocabulary: &TopicVocabulary, negatives: &NegativeVocabulary) {
    println!(
        "\n{}",
        format!(
            "=== Vocabulary ({} terms in {} topics) ===",
            vocabulary.term_count(),
            vocabulary.topics.len()
        )
        .bold()
    );

    for topic in &vocabulary.topics {
        println!("\n  {}", topic.name.bold());
        for entry in &topic.keywords {
            println!(
                "    {:<14} {}",
                entry.keyword,
                entry.phrases.join(", ").dimmed()
            );
        }
    }

    println!(
        "\n  {} ({})",
        "Negative phrases".bold(),
        negatives.phrases.len()
    );
    println!("    {}", negatives.phrases.join(", ").dimmed());
}

/// Display the outcome of ingesting one or more batches.
pub fn display_ingest_report(report: &IngestReport) {
    println!("\n{}", "=== Ingest Summary ===".bold());
    println!("  Received:   {}", report.received);
    println!("  Stored:     {}", report.stored.to_string().green());
    println!("  Duplicates: {}", report.duplicates);
    println!("  Irrelevant: {}", report.rejected);
    if report.skipped_invalid > 0 {
        println!("  Invalid:    {}", report.skipped_invalid.to_string().yellow());
    }
}

/// Display per-source article counts.
pub fn display_sources(sources: &[SourceCount]) {
    if sources.is_empty() {
        return;
    }
    println!("\n  Articles by source:");
    for s in sources {
        println!("    {:<32} {:>6}", s.source, s.articles);
    }
}

fn tier_marker(tier: RelevanceTier) -> colored::ColoredString {
    match tier {
        RelevanceTier::High => "●".green(),
        RelevanceTier::Medium => "●".yellow(),
        RelevanceTier::Low => "●".red(),
    }
}

/// Colorize a relevance tier.
fn colorize_tier(tier: RelevanceTier) -> colored::ColoredString {
    match tier {
        RelevanceTier::High => tier.as_str().green().bold(),
        RelevanceTier::Medium => tier.as_str().yellow(),
        RelevanceTier::Low => tier.as_str().red(),
    }
}
