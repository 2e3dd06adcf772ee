use crate::trigram::TrigramSet;
use crate::vector::SparseVector;

/// Cosine of the angle between two sparse vectors, in `[0, 1]`.
///
/// Only shared keys contribute to the dot product; vectors with nothing in
/// common score 0.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
    // iterate the smaller side
    let (small, large) = if a.weights().len() <= b.weights().len() { (a, b) } else { (b, a) };
    let dot: f32 = small
        .weights()
        .iter()
        .map(|(term, w)| w * large.weight(term))
        .sum();
    let denom = a.norm() * b.norm();
    if dot <= 0.0 || denom <= 0.0 || !denom.is_finite() {
        return 0.0;
    }
    (dot / denom).min(1.0)
}

/// `|A ∩ B| / |A ∪ B|`, or 0 when both sets are empty.
pub fn jaccard(a: &TrigramSet, b: &TrigramSet) -> f32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let inter = small.iter().filter(|g| large.contains(*g)).count();
    let union = a.len() + b.len() - inter;
    if union == 0 {
        0.0
    } else {
        inter as f32 / union as f32
    }
}
