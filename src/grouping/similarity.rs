// Pairwise story similarity.
//
// Two articles report the same story when either:
//   - their lower-cased titles are nearly identical (sequence ratio), or
//   - they share most of their matched terms AND a good part of their topics.
//
// Both overlap conditions are required so that two articles sharing one
// generic keyword ("pay") but covering different topics stay apart.

use std::collections::HashSet;
use std::hash::Hash;

use crate::db::models::Article;

use super::sequence;

/// Cut-offs for the similarity test. All comparisons are strict (`>`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityThresholds {
    /// Title sequence ratio above which two articles always match (default 0.7)
    pub title_ratio: f64,
    /// Jaccard overlap of matched terms (default 0.5)
    pub terms_overlap: f64,
    /// Jaccard overlap of topics (default 0.3)
    pub topics_overlap: f64,
}

impl Default for SimilarityThresholds {
    fn default() -> Self {
        Self {
            title_ratio: 0.7,
            terms_overlap: 0.5,
            topics_overlap: 0.3,
        }
    }
}

/// Sequence ratio of two titles after lower-casing.
///
/// Blank titles carry no signal, so a blank title on either side scores 0.0
/// instead of the 1.0 two empty strings would otherwise get.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }
    sequence::ratio(&a.to_lowercase(), &b.to_lowercase())
}

/// Jaccard overlap |A ∩ B| / |A ∪ B|, or 0.0 when both sets are empty.
pub fn set_overlap<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Jaccard overlap of two articles' matched terms.
pub fn terms_overlap(a: &Article, b: &Article) -> f64 {
    let ta: HashSet<&str> = a.matched_terms.iter().map(String::as_str).collect();
    let tb: HashSet<&str> = b.matched_terms.iter().map(String::as_str).collect();
    set_overlap(&ta, &tb)
}

/// Jaccard overlap of two articles' topic labels.
pub fn topics_overlap(a: &Article, b: &Article) -> f64 {
    let ta: HashSet<&str> = a.topics.iter().map(String::as_str).collect();
    let tb: HashSet<&str> = b.topics.iter().map(String::as_str).collect();
    set_overlap(&ta, &tb)
}

/// Whether `b` belongs in the same story cluster as `a`.
pub fn are_similar(a: &Article, b: &Article, thresholds: &SimilarityThresholds) -> bool {
    if title_similarity(&a.title, &b.title) > thresholds.title_ratio {
        return true;
    }
    terms_overlap(a, b) > thresholds.terms_overlap
        && topics_overlap(a, b) > thresholds.topics_overlap
}
