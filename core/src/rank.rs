//! Blends TF-IDF cosine, trigram Jaccard and a literal-substring bonus.
//!
//! The weights and the confidence threshold are empirical constants kept for
//! compatibility with existing result orderings; they are tunable, not
//! structural.

use crate::index::{CorpusIndex, IndexedDocument};
use crate::query::{vectorize, QueryVector};
use crate::similarity::{cosine, jaccard};
use std::cmp::Ordering;

pub const COSINE_WEIGHT: f32 = 0.7;
pub const TRIGRAM_WEIGHT: f32 = 0.3;
pub const SUBSTRING_BONUS: f32 = 0.1;
/// Results below this score are dropped when only confident matches are wanted.
pub const CONFIDENCE_THRESHOLD: f32 = 0.12;
pub const MAX_RESULTS: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub only_confident: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredResult<'a> {
    pub document: &'a IndexedDocument,
    pub score: f32,
}

/// `SUBSTRING_BONUS` when the normalized query occurs in the lowercased name or alias text.
pub fn substring_bonus(normalized_query: &str, doc: &IndexedDocument) -> f32 {
    let in_name = doc.item.name.to_lowercase().contains(normalized_query);
    let in_aliases = doc
        .item
        .aliases
        .as_deref()
        .is_some_and(|a| a.to_lowercase().contains(normalized_query));
    if in_name || in_aliases {
        SUBSTRING_BONUS
    } else {
        0.0
    }
}

pub fn score_document(query: &QueryVector, doc: &IndexedDocument) -> f32 {
    COSINE_WEIGHT * cosine(&query.vector, &doc.vector)
        + TRIGRAM_WEIGHT * jaccard(&query.trigrams, &doc.trigrams)
        + substring_bonus(&query.normalized, doc)
}

/// Rank every document of `index` against `query`.
///
/// Ties keep corpus order. A query that normalizes to nothing matches nothing.
pub fn search<'a>(query: &str, index: &'a CorpusIndex, options: SearchOptions) -> Vec<ScoredResult<'a>> {
    let Some(query) = vectorize(query, index.idf_table()) else {
        return Vec::new();
    };

    let mut scored: Vec<ScoredResult<'a>> = index
        .documents()
        .iter()
        .map(|document| ScoredResult { document, score: score_document(&query, document) })
        .collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    if options.only_confident {
        scored.retain(|r| r.score >= CONFIDENCE_THRESHOLD);
    }
    scored.truncate(MAX_RESULTS);
    tracing::trace!(query = %query.normalized, hits = scored.len(), "ranked");
    scored
}

impl CorpusIndex {
    pub fn search(&self, query: &str, options: SearchOptions) -> Vec<ScoredResult<'_>> {
        search(query, self, options)
    }
}
