//! Definition derivation from the source text.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Derive a short definition for `term` from the text it was extracted from.
///
/// Uses the first two sentences mentioning the term (case-insensitive),
/// otherwise the first three sentences of the text.
pub fn extract_definition(text: &str, term: &str) -> String {
    let sentences: Vec<&str> = SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let needle = term.to_lowercase();
    let relevant: Vec<&str> = sentences
        .iter()
        .copied()
        .filter(|s| s.to_lowercase().contains(&needle))
        .take(2)
        .collect();

    let chosen = if relevant.is_empty() {
        sentences.into_iter().take(3).collect()
    } else {
        relevant
    };

    format!("{}.", chosen.join(". "))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Cells are the unit of life. The mitochondria makes ATP! \
                        Ribosomes build proteins. Mitochondria have their own DNA? \
                        Mitochondria divide by fission.";

    #[test]
    fn test_sentences_mentioning_term() {
        assert_eq!(
            extract_definition(TEXT, "Mitochondria"),
            "The mitochondria makes ATP. Mitochondria have their own DNA."
        );
    }

    #[test]
    fn test_falls_back_to_leading_sentences() {
        assert_eq!(
            extract_definition(TEXT, "chloroplast"),
            "Cells are the unit of life. The mitochondria makes ATP. Ribosomes build proteins."
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract_definition("", "anything"), ".");
    }
}
