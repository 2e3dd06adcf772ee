use lazy_static::lazy_static;
use regex::Regex;
use std::ops::RangeInclusive;
use unicode_normalization::UnicodeNormalization;

/// The "Combining Diacritical Marks" block left behind by canonical decomposition.
const COMBINING_MARKS: RangeInclusive<char> = '\u{0300}'..='\u{036f}';

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[^a-z0-9]+").expect("valid regex");
}

/// Canonicalize text for matching: lowercase, NFD decomposition, diacritics removed, trimmed.
///
/// Lowercasing happens before decomposition so that characters whose lowercase
/// form carries a combining mark (`İ` -> `i̇`) lose it in the same pass, which
/// keeps the function idempotent. Absent fields are normalized as `""`.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect();
    folded.trim().to_string()
}

/// Split normalized text into `[a-z0-9]+` tokens, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    SEPARATORS
        .split(&normalized)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(normalize("Écorce"), "ecorce");
        assert_eq!(normalize("  Boîte  "), "boite");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["Écorce", "İstanbul", "ÆØÅ crème brûlée", "  ", "", "Ça\u{0327}va?"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn splits_on_non_alphanumerics() {
        assert_eq!(tokenize("Pot de yaourt (500g)"), vec!["pot", "de", "yaourt", "500g"]);
        assert_eq!(tokenize("conserve;boite metal"), vec!["conserve", "boite", "metal"]);
    }

    #[test]
    fn punctuation_only_has_no_tokens() {
        assert!(tokenize("--- ;; !!").is_empty());
        assert!(tokenize("").is_empty());
    }
}
