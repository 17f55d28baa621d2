// Region filter — narrows a digest to stories about one part of the world.
//
// A region is a list of place names, institutions, and market names. An
// article belongs to a region when any of them appears as a whole word in its
// title or content. "Global" and unknown regions accept everything.

use anyhow::Result;

use super::matcher::{compile_all, WordMatcher};

/// The region name that disables filtering.
pub const GLOBAL_REGION: &str = "Global";

const REGION_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "North America",
        &[
            "united states",
            "u.s.",
            "canada",
            "canadian",
            "mexico",
            "mexican",
            "north america",
            "north american",
            "federal reserve",
            "fed",
            "wall street",
            "nasdaq",
            "nyse",
            "treasury",
        ],
    ),
    (
        "Europe",
        &[
            "european union",
            "germany",
            "france",
            "italy",
            "spain",
            "netherlands",
            "ecb",
            "european central bank",
            "brussels",
            "frankfurt",
            "european",
        ],
    ),
    (
        "Asia",
        &[
            "china",
            "japan",
            "india",
            "singapore",
            "hong kong",
            "south korea",
            "asian markets",
            "bank of japan",
            "pboc",
            "nikkei",
        ],
    ),
    (
        "UK",
        &[
            "united kingdom",
            "britain",
            "england",
            "scotland",
            "wales",
            "bank of england",
            "boe",
            "ftse",
            "british",
        ],
    ),
    (
        "Australia",
        &[
            "australia",
            "new zealand",
            "australian",
            "reserve bank of australia",
            "rba",
            "asx",
        ],
    ),
];

/// Names of every region with a keyword table.
pub fn known_regions() -> impl Iterator<Item = &'static str> {
    REGION_KEYWORDS.iter().map(|(name, _)| *name)
}

/// Compiled keyword set for one region.
#[derive(Debug, Clone)]
pub struct RegionFilter {
    region: String,
    keywords: Vec<WordMatcher>,
}

impl RegionFilter {
    /// Build the filter for `region` (case-insensitive name lookup).
    pub fn new(region: &str) -> Result<Self> {
        let keywords = REGION_KEYWORDS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(region))
            .map(|(_, kws)| compile_all(kws))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            region: region.to_string(),
            keywords,
        })
    }

    /// A filter that accepts everything.
    pub fn global() -> Self {
        Self {
            region: GLOBAL_REGION.to_string(),
            keywords: Vec::new(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Whether this filter would reject anything at all.
    pub fn is_global(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Returns the first region keyword found in the article, if any.
    pub fn matched_keyword(&self, title: &str, content: &str) -> Option<&str> {
        let text = format!("{} {}", title, content).to_lowercase();
        self.keywords
            .iter()
            .find(|k| k.is_match(&text))
            .map(|k| k.term())
    }

    pub fn matches(&self, title: &str, content: &str) -> bool {
        self.is_global() || self.matched_keyword(title, content).is_some()
    }
}
