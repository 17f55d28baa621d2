// Relevance scorer — keyword/phrase matching with a title boost.
//
// Scoring works on the lower-cased title + content:
//   1. Any negative phrase -> rejected outright, before anything else.
//   2. Each vocabulary phrase match adds `phrase` weight and tags its topic.
//      Each bare keyword match (not already matched) adds `keyword` weight.
//   3. Each caller search term not already matched adds `search_term` weight.
//      These carry no topic; topics come only from the vocabulary.
//   4. Every matched term that also appears in the title adds `title_boost`.
//      A term can score twice this way: headlines count extra.
//   5. The sum is clamped to 1.0. Below `threshold` the article is rejected.
//
// An empty search-term list disables filtering entirely: every article is
// relevant with score 0.0 and no matched terms.

use std::collections::BTreeSet;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::matcher::{compile_all, WordMatcher};
use super::vocabulary::{NegativeVocabulary, TopicVocabulary};

/// Weights for each kind of match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Contextual phrase match (default 0.4)
    pub phrase: f64,
    /// Bare keyword match (default 0.2)
    pub keyword: f64,
    /// Caller search-term match (default 0.2)
    pub search_term: f64,
    /// Added per matched term that also appears in the title (default 0.3)
    pub title_boost: f64,
    /// Clamped scores below this are rejected (default 0.1)
    pub threshold: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            phrase: 0.4,
            keyword: 0.2,
            search_term: 0.2,
            title_boost: 0.3,
            threshold: 0.1,
        }
    }
}

/// The outcome of scoring one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceVerdict {
    pub is_relevant: bool,
    /// Matched keywords/phrases in the order they were found
    pub matched_terms: Vec<String>,
    /// 0.0 to 1.0
    pub relevance_score: f64,
    pub topics: BTreeSet<String>,
}

impl RelevanceVerdict {
    /// Not relevant: nothing matched, score zero.
    pub fn rejected() -> Self {
        Self {
            is_relevant: false,
            matched_terms: Vec::new(),
            relevance_score: 0.0,
            topics: BTreeSet::new(),
        }
    }

    /// Filtering disabled: relevant, but with no evidence and score zero.
    pub fn unfiltered() -> Self {
        Self {
            is_relevant: true,
            ..Self::rejected()
        }
    }
}

/// The caller's search terms, compiled once per batch.
#[derive(Debug, Clone)]
pub struct SearchTerms {
    matchers: Vec<WordMatcher>,
}

impl SearchTerms {
    /// Compile a term list. Blank entries are dropped and whitespace trimmed.
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Result<Self> {
        let cleaned: Vec<&str> = terms
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .collect();
        Ok(Self {
            matchers: compile_all(&cleaned)?,
        })
    }

    /// No terms at all; scoring becomes a pass-through.
    pub fn empty() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|m| m.term())
    }
}

struct CompiledKeyword {
    keyword: WordMatcher,
    phrases: Vec<WordMatcher>,
}

struct CompiledTopic {
    name: String,
    keywords: Vec<CompiledKeyword>,
}

/// Scores articles against a topic vocabulary and a negative vocabulary.
///
/// Build one per process and share it across sources; all patterns are
/// compiled in [`RelevanceScorer::new`].
pub struct RelevanceScorer {
    topics: Vec<CompiledTopic>,
    negatives: Vec<WordMatcher>,
    weights: ScoreWeights,
}

impl RelevanceScorer {
    pub fn new(vocabulary: &TopicVocabulary, negatives: &NegativeVocabulary) -> Result<Self> {
        let mut topics = Vec::with_capacity(vocabulary.topics.len());
        for topic in &vocabulary.topics {
            let mut keywords = Vec::with_capacity(topic.keywords.len());
            for entry in &topic.keywords {
                keywords.push(CompiledKeyword {
                    keyword: WordMatcher::new(&entry.keyword)?,
                    phrases: compile_all(&entry.phrases)?,
                });
            }
            topics.push(CompiledTopic {
                name: topic.name.clone(),
                keywords,
            });
        }

        Ok(Self {
            topics,
            negatives: compile_all(&negatives.phrases)?,
            weights: ScoreWeights::default(),
        })
    }

    /// Scorer over the built-in compensation and negative vocabularies.
    pub fn builtin() -> Result<Self> {
        Self::new(&TopicVocabulary::compensation(), &NegativeVocabulary::builtin())
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score one article. Never fails; empty text is simply irrelevant.
    pub fn score(&self, title: &str, content: &str, search_terms: &SearchTerms) -> RelevanceVerdict {
        if search_terms.is_empty() {
            return RelevanceVerdict::unfiltered();
        }

        let title_lower = title.to_lowercase();
        let text = format!("{} {}", title_lower, content.to_lowercase());

        if self.negatives.iter().any(|n| n.is_match(&text)) {
            return RelevanceVerdict::rejected();
        }

        let w = &self.weights;
        let mut matched: Vec<&WordMatcher> = Vec::new();
        let mut topics = BTreeSet::new();
        let mut score = 0.0;

        for topic in &self.topics {
            for entry in &topic.keywords {
                for phrase in &entry.phrases {
                    if phrase.is_match(&text) {
                        if !contains_term(&matched, phrase.term()) {
                            matched.push(phrase);
                        }
                        topics.insert(topic.name.clone());
                        score += w.phrase;
                    }
                }

                if entry.keyword.is_match(&text) && !contains_term(&matched, entry.keyword.term()) {
                    matched.push(&entry.keyword);
                    topics.insert(topic.name.clone());
                    score += w.keyword;
                }
            }
        }

        for term in &search_terms.matchers {
            if term.is_match(&text) && !contains_term(&matched, term.term()) {
                matched.push(term);
                score += w.search_term;
            }
        }

        for term in &matched {
            if term.is_match(&title_lower) {
                score += w.title_boost;
            }
        }

        let score: f64 = score.min(1.0);
        if score < w.threshold || matched.is_empty() {
            return RelevanceVerdict::rejected();
        }

        RelevanceVerdict {
            is_relevant: true,
            matched_terms: matched.iter().map(|m| m.term().to_string()).collect(),
            relevance_score: score,
            topics,
        }
    }
}

fn contains_term(matched: &[&WordMatcher], term: &str) -> bool {
    matched.iter().any(|m| m.term().eq_ignore_ascii_case(term))
}
