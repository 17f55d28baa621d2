// Built-in vocabularies for compensation and labor-market news.
//
// The topic vocabulary is a three-level table: topic -> keyword -> contextual
// phrases. A contextual phrase ("performance bonus") is a stronger signal than
// its bare keyword ("bonus"), which is why the scorer weights them differently.
//
// The negative vocabulary lists phrases that mark an article as off-topic no
// matter what else it mentions (celebrity salaries, lottery wins, crypto).
//
// Tables are ordered: matched terms are reported in vocabulary order.

use serde::{Deserialize, Serialize};

/// Static table shape: (topic, [(keyword, [phrase, ...]), ...]).
pub type VocabularyTable<'a> = &'a [(&'a str, &'a [(&'a str, &'a [&'a str])])];

const COMPENSATION_TABLE: VocabularyTable<'static> = &[
    (
        "compensation",
        &[
            (
                "salary",
                &[
                    "annual salary",
                    "base salary",
                    "starting salary",
                    "salary range",
                    "salary survey",
                    "salary data",
                ],
            ),
            (
                "wage",
                &[
                    "hourly wage",
                    "minimum wage",
                    "living wage",
                    "wage increase",
                    "wage freeze",
                    "wage cut",
                ],
            ),
            (
                "pay",
                &[
                    "equal pay",
                    "pay gap",
                    "pay raise",
                    "pay cut",
                    "pay equity",
                    "pay transparency",
                ],
            ),
            (
                "bonus",
                &[
                    "performance bonus",
                    "signing bonus",
                    "retention bonus",
                    "annual bonus",
                    "quarterly bonus",
                ],
            ),
            (
                "benefits",
                &[
                    "health benefits",
                    "retirement benefits",
                    "employee benefits",
                    "benefits package",
                ],
            ),
            (
                "equity",
                &[
                    "stock options",
                    "equity compensation",
                    "RSUs",
                    "restricted stock",
                    "stock grants",
                ],
            ),
        ],
    ),
    (
        "labor_market",
        &[
            (
                "employment",
                &[
                    "job market",
                    "employment rate",
                    "unemployment",
                    "job creation",
                    "job loss",
                ],
            ),
            (
                "hiring",
                &[
                    "hiring freeze",
                    "layoffs",
                    "job cuts",
                    "recruitment",
                    "talent acquisition",
                ],
            ),
            (
                "union",
                &[
                    "labor union",
                    "collective bargaining",
                    "union contract",
                    "union negotiations",
                ],
            ),
            (
                "strike",
                &[
                    "labor strike",
                    "work stoppage",
                    "picketing",
                    "strike authorization",
                ],
            ),
            (
                "workplace",
                &[
                    "workplace safety",
                    "workplace rights",
                    "workplace discrimination",
                ],
            ),
        ],
    ),
    (
        "government",
        &[
            (
                "policy",
                &[
                    "labor policy",
                    "employment law",
                    "minimum wage law",
                    "overtime law",
                ],
            ),
            (
                "regulation",
                &[
                    "wage regulation",
                    "benefits regulation",
                    "workplace regulation",
                ],
            ),
            (
                "legislation",
                &["pay equity bill", "minimum wage bill", "overtime bill"],
            ),
            (
                "enforcement",
                &[
                    "wage theft",
                    "labor violations",
                    "compliance",
                    "investigation",
                ],
            ),
        ],
    ),
    (
        "industry",
        &[
            (
                "tech",
                &[
                    "tech salaries",
                    "startup compensation",
                    "tech benefits",
                    "tech equity",
                ],
            ),
            (
                "finance",
                &[
                    "banking compensation",
                    "finance bonuses",
                    "wall street pay",
                ],
            ),
            (
                "healthcare",
                &["nurse pay", "doctor salaries", "healthcare benefits"],
            ),
            (
                "education",
                &["teacher salaries", "education funding", "school budgets"],
            ),
            (
                "retail",
                &["retail wages", "retail benefits", "retail unionization"],
            ),
            (
                "manufacturing",
                &[
                    "factory wages",
                    "manufacturing pay",
                    "industrial compensation",
                ],
            ),
        ],
    ),
];

const NEGATIVE_PHRASES: &[&str] = &[
    "sports salary",
    "athlete salary",
    "celebrity salary",
    "actor salary",
    "movie salary",
    "film salary",
    "entertainment salary",
    "music salary",
    "singer salary",
    "rapper salary",
    "football salary",
    "basketball salary",
    "baseball salary",
    "soccer salary",
    "hockey salary",
    "golf salary",
    "tennis salary",
    "boxing salary",
    "ufc salary",
    "wrestling salary",
    "reality tv salary",
    "tv show salary",
    "game show salary",
    "lottery winner",
    "inheritance",
    "trust fund",
    "family money",
    "crypto trading",
    "bitcoin mining",
    "nft sales",
    "cryptocurrency",
    "gambling winnings",
    "casino earnings",
    "poker winnings",
];

/// Search terms used when the user hasn't configured any.
pub const DEFAULT_SEARCH_TERMS: &[&str] = &[
    "compensation",
    "salary",
    "wage",
    "pay gap",
    "minimum wage",
    "equal pay",
    "benefits",
    "remuneration",
    "bonus",
    "payroll",
    "labor market",
    "employment cost",
    "income inequality",
];

/// Topic name -> keyword -> contextual phrases.
///
/// Read-only once built; the scorer compiles it into matchers up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicVocabulary {
    pub topics: Vec<Topic>,
}

/// One controlled-vocabulary label and the keywords that imply it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub keywords: Vec<KeywordEntry>,
}

/// A bare keyword plus the phrases that use it in a compensation sense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub phrases: Vec<String>,
}

impl TopicVocabulary {
    /// Build a vocabulary from a static table, preserving order.
    pub fn from_table(table: VocabularyTable<'_>) -> Self {
        let topics = table
            .iter()
            .map(|(name, keywords)| Topic {
                name: name.to_string(),
                keywords: keywords
                    .iter()
                    .map(|(keyword, phrases)| KeywordEntry {
                        keyword: keyword.to_string(),
                        phrases: phrases.iter().map(|p| p.to_string()).collect(),
                    })
                    .collect(),
            })
            .collect();
        Self { topics }
    }

    /// The built-in compensation / labor-market vocabulary.
    pub fn compensation() -> Self {
        Self::from_table(COMPENSATION_TABLE)
    }

    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.name.as_str())
    }

    /// Total number of matchable terms (keywords plus phrases).
    pub fn term_count(&self) -> usize {
        self.topics
            .iter()
            .flat_map(|t| &t.keywords)
            .map(|k| 1 + k.phrases.len())
            .sum()
    }
}

impl Default for TopicVocabulary {
    fn default() -> Self {
        Self::compensation()
    }
}

/// Phrases that force an article to be irrelevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegativeVocabulary {
    pub phrases: Vec<String>,
}

impl NegativeVocabulary {
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Self {
        Self {
            phrases: phrases.iter().map(|p| p.as_ref().to_string()).collect(),
        }
    }

    /// The built-in list: entertainment/sports pay, windfalls, crypto.
    pub fn builtin() -> Self {
        Self::new(NEGATIVE_PHRASES)
    }
}

impl Default for NegativeVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The default search terms as owned strings.
pub fn default_search_terms() -> Vec<String> {
    DEFAULT_SEARCH_TERMS.iter().map(|t| t.to_string()).collect()
}
