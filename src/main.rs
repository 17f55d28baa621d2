use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use compnews::config::Config;
use compnews::db::Database;
use compnews::feed::entry::load_batch;
use compnews::output::terminal;
use compnews::pipeline::digest::{build_digest, DigestOptions};
use compnews::pipeline::ingest::{ingest_batch, IngestReport};
use compnews::relevance::region::{known_regions, RegionFilter, GLOBAL_REGION};
use compnews::relevance::scorer::{RelevanceScorer, SearchTerms};
use compnews::relevance::vocabulary::{NegativeVocabulary, TopicVocabulary};

/// compnews: compensation news relevance scoring and story grouping.
///
/// Scores news articles for relevance to pay, wages, and labor-market
/// topics, stores the relevant ones, and groups them into stories.
#[derive(Parser)]
#[command(name = "compnews", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Ingest one or more JSON feed batches
    Ingest {
        /// Batch files (a JSON array of entries, or {"source": ..., "entries": [...]})
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Comma-separated search terms (default: COMPNEWS_SEARCH_TERMS)
        #[arg(long, value_delimiter = ',')]
        terms: Option<Vec<String>>,

        /// Source name for entries that carry none (default: the file name)
        #[arg(long)]
        source: Option<String>,
    },

    /// Score a single headline and body without storing anything
    Score {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        content: String,

        /// Comma-separated search terms (default: COMPNEWS_SEARCH_TERMS)
        #[arg(long, value_delimiter = ',')]
        terms: Option<Vec<String>>,

        /// Also report whether the text matches this region
        #[arg(long)]
        region: Option<String>,
    },

    /// Print grouped stories from recently ingested articles
    Digest {
        /// Look-back window in days (default: COMPNEWS_DAYS or 7)
        #[arg(long)]
        days: Option<i64>,

        /// Only include this source (repeatable)
        #[arg(long = "source")]
        sources: Vec<String>,

        /// Only include articles mentioning this region
        #[arg(long)]
        region: Option<String>,

        /// Minimum relevance score, 0.0-1.0 (default: COMPNEWS_MIN_RELEVANCE or 0.1)
        #[arg(long)]
        min_relevance: Option<f64>,

        /// Emit the digest as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show the built-in topic and negative vocabularies
    Vocabulary,

    /// Show database statistics
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("compnews=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing compnews database...");
            let config = Config::load()?;
            let db = init_database(&config)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\n{}", "Next step: cargo run -- ingest <FILE>".dimmed());
        }

        Commands::Ingest {
            files,
            terms,
            source,
        } => {
            let config = Config::load()?;
            let db = init_database(&config)?;
            let scorer = RelevanceScorer::builtin()?;
            let search_terms = SearchTerms::new(&terms.unwrap_or(config.search_terms))?;
            if search_terms.is_empty() {
                warn!(
                    "No search terms configured; every article will be stored unfiltered \
                     with a relevance score of 0.0, so use `digest --min-relevance 0` to see them"
                );
            }

            let mut total = IngestReport::default();
            for path in &files {
                let batch = load_batch(path)?;
                let default_source = source.clone().unwrap_or_else(|| file_source_name(path));
                println!("Ingesting {} ({} entries)...", path.display(), batch.received());
                let report =
                    ingest_batch(db.as_ref(), &scorer, &search_terms, batch, &default_source)
                        .await?;
                total.merge(&report);
            }

            terminal::display_ingest_report(&total);
        }

        Commands::Score {
            title,
            content,
            terms,
            region,
        } => {
            let config = Config::load()?;
            let scorer = RelevanceScorer::builtin()?;
            let search_terms = SearchTerms::new(&terms.unwrap_or(config.search_terms))?;
            let verdict = scorer.score(&title, &content, &search_terms);

            let region = region.as_deref().map(region_filter).transpose()?;
            terminal::display_verdict(&title, &content, &verdict, region.as_ref());
        }

        Commands::Digest {
            days,
            sources,
            region,
            min_relevance,
            json,
        } => {
            let mut config = Config::load()?;
            if let Some(days) = days {
                config.days = days;
            }
            if let Some(min) = min_relevance {
                config.min_relevance = min;
            }
            if !sources.is_empty() {
                config.sources = sources;
            }
            if let Some(region) = region {
                config.region = region;
            }
            config.validate()?;
            // Unknown region names are an error here, not an empty filter
            region_filter(&config.region)?;

            let db = open_database(&config)?;
            let options = DigestOptions {
                days: config.days,
                sources: config.sources,
                region: config.region,
                min_relevance: config.min_relevance,
            };
            let digest = build_digest(db.as_ref(), &options, Utc::now()).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&digest)?);
            } else {
                terminal::display_digest(&digest);
            }
        }

        Commands::Vocabulary => {
            terminal::display_vocabulary(
                &TopicVocabulary::compensation(),
                &NegativeVocabulary::builtin(),
            );
        }

        Commands::Status => {
            let config = Config::load()?;
            if !std::path::Path::new(&config.db_path).exists() {
                println!("Database: not initialized");
                println!("\nRun `compnews init` to set up the database.");
                return Ok(());
            }
            let db = open_database(&config)?;
            compnews::status::show(&db, &config.db_path).await?;
        }
    }

    Ok(())
}

/// Resolve a region name, listing the known ones if it isn't recognized.
fn region_filter(name: &str) -> Result<RegionFilter> {
    let filter = RegionFilter::new(name)?;
    if filter.is_global() && !name.eq_ignore_ascii_case(GLOBAL_REGION) {
        let known: Vec<&str> = known_regions().collect();
        anyhow::bail!(
            "Unknown region '{}'. Known regions: Global, {}",
            name,
            known.join(", ")
        );
    }
    Ok(filter)
}

/// Source name derived from a batch file name ("guardian.json" → "guardian").
fn file_source_name(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Open the existing database.
#[cfg(feature = "sqlite")]
fn open_database(config: &Config) -> Result<Arc<dyn Database>> {
    compnews::db::open_sqlite(&config.db_path)
}

/// Initialize the database (create if needed).
#[cfg(feature = "sqlite")]
fn init_database(config: &Config) -> Result<Arc<dyn Database>> {
    compnews::db::initialize_sqlite(&config.db_path)
}

#[cfg(not(feature = "sqlite"))]
fn open_database(_config: &Config) -> Result<Arc<dyn Database>> {
    anyhow::bail!(
        "No database backend compiled in.\n\
         Rebuild with: cargo build --features sqlite"
    )
}

#[cfg(not(feature = "sqlite"))]
fn init_database(config: &Config) -> Result<Arc<dyn Database>> {
    open_database(config)
}
