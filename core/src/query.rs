use crate::tokenizer::{normalize, tokenize};
use crate::trigram::{trigrams, TrigramSet};
use crate::vector::{IdfTable, SparseVector};

/// A query analyzed against an existing corpus IDF table.
#[derive(Debug, Clone)]
pub struct QueryVector {
    pub normalized: String,
    pub vector: SparseVector,
    pub trigrams: TrigramSet,
}

/// Analyze `query` with the corpus IDF table; the table is only read.
///
/// Returns `None` when the query normalizes to nothing: a blank query has no
/// meaningful vector and must not be ranked.
pub fn vectorize(query: &str, idf: &IdfTable) -> Option<QueryVector> {
    let normalized = normalize(query);
    if normalized.is_empty() {
        return None;
    }
    let tokens = tokenize(&normalized);
    let vector = SparseVector::from_tokens(&tokens, idf);
    let trigrams = trigrams(&normalized);
    Some(QueryVector { normalized, vector, trigrams })
}
