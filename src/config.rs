use std::env;

use anyhow::{Context, Result};

use crate::pipeline::digest::{DEFAULT_DAYS, DEFAULT_MIN_RELEVANCE, MAX_DAYS};
use crate::relevance::region::GLOBAL_REGION;
use crate::relevance::vocabulary::default_search_terms;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// setting has a default, and command-line flags override what is here.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    /// Terms a story must mention to be kept (COMPNEWS_SEARCH_TERMS)
    pub search_terms: Vec<String>,
    /// Sources included in digests; empty means all
    pub sources: Vec<String>,
    pub days: i64,
    pub min_relevance: f64,
    pub region: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment, or a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let search_terms = match lookup("COMPNEWS_SEARCH_TERMS") {
            Some(raw) => parse_list(&raw),
            None => default_search_terms(),
        };

        let days = match lookup("COMPNEWS_DAYS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("COMPNEWS_DAYS is not a whole number: '{raw}'"))?,
            None => DEFAULT_DAYS,
        };

        let min_relevance = match lookup("COMPNEWS_MIN_RELEVANCE") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("COMPNEWS_MIN_RELEVANCE is not a number: '{raw}'"))?,
            None => DEFAULT_MIN_RELEVANCE,
        };

        let config = Self {
            db_path: lookup("COMPNEWS_DB_PATH").unwrap_or_else(|| "./compnews.db".to_string()),
            search_terms,
            sources: lookup("COMPNEWS_SOURCES")
                .map(|raw| parse_list(&raw))
                .unwrap_or_default(),
            days,
            min_relevance,
            region: lookup("COMPNEWS_REGION")
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| GLOBAL_REGION.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the digest settings. Called by `load`, and again by commands
    /// after applying flag overrides.
    pub fn validate(&self) -> Result<()> {
        if self.days < 1 {
            anyhow::bail!("Digest window must be at least 1 day (got {}).", self.days);
        }
        if self.days > MAX_DAYS {
            anyhow::bail!(
                "Digest window must be at most {MAX_DAYS} days (got {}).",
                self.days
            );
        }
        if !(0.0..=1.0).contains(&self.min_relevance) {
            anyhow::bail!(
                "Minimum relevance must be between 0.0 and 1.0 (got {}).",
                self.min_relevance
            );
        }
        Ok(())
    }
}

/// Split a comma-separated list, trimming entries and dropping blanks.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load_from(&[]).unwrap();
        assert_eq!(config.db_path, "./compnews.db");
        assert_eq!(config.search_terms, default_search_terms());
        assert!(config.sources.is_empty());
        assert_eq!(config.days, 7);
        assert_eq!(config.min_relevance, 0.1);
        assert_eq!(config.region, "Global");
    }

    #[test]
    fn test_overrides() {
        let config = load_from(&[
            ("COMPNEWS_SEARCH_TERMS", "police, pay raise,,salary "),
            ("COMPNEWS_SOURCES", "The Guardian,AP"),
            ("COMPNEWS_DAYS", "3"),
            ("COMPNEWS_MIN_RELEVANCE", "0.4"),
            ("COMPNEWS_REGION", "UK"),
        ])
        .unwrap();
        assert_eq!(config.search_terms, vec!["police", "pay raise", "salary"]);
        assert_eq!(config.sources, vec!["The Guardian", "AP"]);
        assert_eq!(config.days, 3);
        assert_eq!(config.min_relevance, 0.4);
        assert_eq!(config.region, "UK");
    }

    #[test]
    fn test_empty_search_terms_disable_filtering() {
        let config = load_from(&[("COMPNEWS_SEARCH_TERMS", "")]).unwrap();
        assert!(config.search_terms.is_empty());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(load_from(&[("COMPNEWS_DAYS", "0")]).is_err());
        assert!(load_from(&[("COMPNEWS_DAYS", "week")]).is_err());
        assert!(load_from(&[("COMPNEWS_MIN_RELEVANCE", "1.5")]).is_err());
    }

    #[test]
    fn test_days_upper_bound() {
        assert!(load_from(&[("COMPNEWS_DAYS", "36500")]).is_ok());
        assert!(load_from(&[("COMPNEWS_DAYS", "36501")]).is_err());
        assert!(load_from(&[("COMPNEWS_DAYS", "999999999999")]).is_err());
    }
}
