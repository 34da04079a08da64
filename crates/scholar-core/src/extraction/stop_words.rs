//! Closed stop-word set for term extraction.
//!
//! Function words, pronouns, report vocabulary ("figure", "chapter"), common
//! OCR misreads of "the", and the metadata words scanners leave behind.

use std::collections::HashSet;

use once_cell::sync::Lazy;

pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "for", "of", "to", "in", "on", "at", "by", "from",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "can", "must", "shall",
    "example", "examples", "such", "this", "that", "these", "those", "i", "you", "he",
    "she", "it", "we", "they", "what", "which", "who", "when", "where", "why", "how",
    "as", "if", "than", "then", "so", "too", "also", "even", "all", "each", "every",
    "both", "either", "neither", "any", "some", "few", "many", "much", "more", "most",
    "no", "not", "only", "very", "just", "my", "your", "his", "her", "its", "our",
    "their", "etc", "et", "al", "vs", "v", "page", "pp", "chapter", "fig", "table",
    "reader", "having", "made", "make", "fthe", "tthe", "thhe", "thee",
    "like", "way", "figure", "probably", "prbably", "likely", "seem", "appears", "shown",
    "see", "show", "indicate", "indicates", "illustrate", "illustrates", "present", "presents",
    "discuss", "discusses", "explain", "explains", "describe", "describes",
    "plain", "text", "drawing", "field", "activity", "type", "content", "uploaded",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Whether `word` (already lowercased) is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("figure"));
        assert!(is_stop_word("uploaded"));
        assert!(!is_stop_word("mitochondria"));
        assert!(!is_stop_word("The"));
    }

    #[test]
    fn test_no_duplicates() {
        assert_eq!(STOP_WORD_SET.len(), STOP_WORDS.len());
    }
}
