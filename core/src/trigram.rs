//! Padded character trigrams for typo-tolerant matching.

use crate::tokenizer::normalize;
use std::collections::HashSet;

pub type TrigramSet = HashSet<String>;

const PADDING: &str = "  ";

/// Collect the distinct 3-character windows of `"  " + normalize(text) + "  "`.
///
/// Padding lets one- and two-character inputs still produce grams and makes
/// word boundaries at both ends significant. Windows are taken over `char`s,
/// so non-ASCII letters that survive normalization (`œ`, `ß`) count as one.
pub fn trigrams(text: &str) -> TrigramSet {
    let padded: Vec<char> = PADDING
        .chars()
        .chain(normalize(text).chars())
        .chain(PADDING.chars())
        .collect();
    padded.windows(3).map(|w| w.iter().collect()).collect()
}
