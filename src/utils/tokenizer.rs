use crate::utils::normalize::Normalizer;
use rustc_hash::FxHashSet;

/// Split record text into words.
/// ASCII punctuation acts as whitespace, so `cat,dog` yields `cat` and `dog`.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|ch: char| ch.is_whitespace() || ch.is_ascii_punctuation())
        .filter(|word| !word.is_empty())
}

/// Extract the distinct terms of a record's text.
/// Each word is lower-cased before it reaches the normalizer.
pub fn extract_terms(text: &str, normalizer: &dyn Normalizer) -> FxHashSet<String> {
    let mut terms = FxHashSet::default();

    for word in split_words(text) {
        let term = normalizer.normalize(&word.to_lowercase());
        if !term.is_empty() {
            terms.insert(term);
        }
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::normalize::{IdentityNormalizer, Language, SnowballNormalizer};

    #[test]
    fn test_split_on_punctuation() {
        let words: Vec<_> = split_words("the cat,sat. on-the  mat!").collect();
        assert_eq!(words, vec!["the", "cat", "sat", "on", "the", "mat"]);
    }

    #[test]
    fn test_split_keeps_non_ascii_letters() {
        let words: Vec<_> = split_words("кошка «сидит» на\tковре").collect();
        assert_eq!(words, vec!["кошка", "«сидит»", "на", "ковре"]);
    }

    #[test]
    fn test_split_empty() {
        assert_eq!(split_words("  ... ,,, ").count(), 0);
    }

    #[test]
    fn test_extract_terms_lowercases_and_dedups() {
        let terms = extract_terms("Cat CAT cat dog", &IdentityNormalizer);
        assert_eq!(terms.len(), 2);
        assert!(terms.contains("cat"));
        assert!(terms.contains("dog"));
    }

    #[test]
    fn test_extract_terms_stems() {
        let normalizer = SnowballNormalizer::new(Language::English);
        let terms = extract_terms("Running cats", &normalizer);
        assert!(terms.contains("run"));
        assert!(terms.contains("cat"));
    }
}
