//! Sparse TF-IDF vectors keyed by token.

use std::collections::HashMap;

pub type IdfTable = HashMap<String, f32>;

/// Token -> weight mapping with its Euclidean norm computed once.
///
/// The stored norm is never zero: a vector without positive weight carries a
/// norm of 1 so similarity against it is simply 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    weights: HashMap<String, f32>,
    norm: f32,
}

impl SparseVector {
    /// Weigh `tokens` by length-normalized term frequency times `idf`.
    ///
    /// Tokens missing from `idf` have weight 0 and are left out of the mapping.
    pub fn from_tokens(tokens: &[String], idf: &IdfTable) -> Self {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for token in tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }
        let len = tokens.len();
        let mut weights = HashMap::with_capacity(counts.len());
        for (term, count) in counts {
            let tf = if len > 0 { count as f32 / len as f32 } else { 0.0 };
            let weight = tf * idf.get(term).copied().unwrap_or(0.0);
            if weight > 0.0 {
                weights.insert(term.to_string(), weight);
            }
        }
        Self::from_weights(weights)
    }

    pub fn from_weights(weights: HashMap<String, f32>) -> Self {
        let norm = weights.values().map(|w| w * w).sum::<f32>().sqrt();
        let norm = if norm > 0.0 && norm.is_finite() { norm } else { 1.0 };
        Self { weights, norm }
    }

    pub fn weight(&self, term: &str) -> f32 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn weights(&self) -> &HashMap<String, f32> {
        &self.weights
    }

    pub fn norm(&self) -> f32 {
        self.norm
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn tf_is_length_normalized() {
        let idf: IdfTable = [("pot".to_string(), 2.0), ("verre".to_string(), 1.0)].into_iter().collect();
        let v = SparseVector::from_tokens(&toks(&["pot", "pot", "verre", "verre"]), &idf);
        assert!((v.weight("pot") - 1.0).abs() < 1e-6);
        assert!((v.weight("verre") - 0.5).abs() < 1e-6);
        assert!((v.norm() - 1.25f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn unknown_terms_weigh_nothing() {
        let v = SparseVector::from_tokens(&toks(&["zzz"]), &IdfTable::new());
        assert!(v.is_empty());
        assert_eq!(v.weight("zzz"), 0.0);
        assert_eq!(v.norm(), 1.0);
    }

    #[test]
    fn empty_token_list_has_unit_norm() {
        let v = SparseVector::from_tokens(&[], &IdfTable::new());
        assert!(v.is_empty());
        assert_eq!(v.norm(), 1.0);
    }
}
