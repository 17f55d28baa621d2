// Story clustering — star clustering over a single sorted pass.
//
// Articles are sorted by relevance, then recency. Each article not yet
// claimed seeds a new cluster and claims every unclaimed article similar to
// *it*. Members are not compared with each other, so a chain A~B~C where
// A and C are dissimilar puts C in its own cluster (or B's, if B seeds one).
//
// The claim set makes this inherently sequential: each seed only sees what
// earlier seeds left behind.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::db::models::Article;

use super::similarity::{are_similar, SimilarityThresholds};

/// One story: its most relevant article plus the rest of the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleGroup {
    pub main_article: Article,
    /// Remaining members, most relevant first
    pub related_articles: Vec<Article>,
}

impl ArticleGroup {
    /// Number of articles in the group, main article included.
    pub fn len(&self) -> usize {
        1 + self.related_articles.len()
    }

    /// Always false; a group has at least its main article.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        std::iter::once(&self.main_article).chain(self.related_articles.iter())
    }
}

/// Group articles into story clusters with the default thresholds.
pub fn group_articles(articles: Vec<Article>) -> Vec<ArticleGroup> {
    group_articles_with(articles, &SimilarityThresholds::default())
}

/// Group articles into story clusters.
///
/// Groups come out in seed order: the most relevant (then most recent)
/// unclaimed article seeds the next group.
pub fn group_articles_with(
    mut articles: Vec<Article>,
    thresholds: &SimilarityThresholds,
) -> Vec<ArticleGroup> {
    articles.sort_by(seed_order);

    let mut used = vec![false; articles.len()];
    let mut clusters: Vec<Vec<usize>> = Vec::new();

    for i in 0..articles.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let mut members = vec![i];

        for j in 0..articles.len() {
            if used[j] {
                continue;
            }
            if are_similar(&articles[i], &articles[j], thresholds) {
                used[j] = true;
                members.push(j);
            }
        }

        clusters.push(members);
    }

    let mut slots: Vec<Option<Article>> = articles.into_iter().map(Some).collect();

    clusters
        .into_iter()
        .filter_map(|members| {
            let mut group: Vec<Article> = members
                .into_iter()
                .filter_map(|idx| slots[idx].take())
                .collect();
            // Stable: ties keep seed-first order
            group.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));

            let mut iter = group.into_iter();
            let main_article = iter.next()?;
            Some(ArticleGroup {
                main_article,
                related_articles: iter.collect(),
            })
        })
        .collect()
}

/// Descending relevance, then descending recency (undated last), then title
/// and URL ascending so that input order never matters.
fn seed_order(a: &Article, b: &Article) -> Ordering {
    b.relevance_score
        .total_cmp(&a.relevance_score)
        .then_with(|| b.published_date.cmp(&a.published_date))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.url.cmp(&b.url))
}
