//! Candidate term extraction from noisy scanned text.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::stop_words::is_stop_word;
use crate::config::ExtractionConfig;

// Lines a scanner emits as metadata rather than content.
static FIELD_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"field[0-9]+\s*=").unwrap());
static DRAWING_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"drawing.*type").unwrap());
static PLAIN_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^plain\s*text").unwrap());
static UPLOADED_CONTENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"uploaded.*content").unwrap());
static UPPER_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]+[0-9]+=").unwrap());

static HEX_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-f0-9]{6,}").unwrap());
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?;\n]+").unwrap());
static PURE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static SHORT_HEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-f0-9]{4,}$").unwrap());
static METADATA_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)field[0-9]+|drawingtype").unwrap());

const MIN_LINE_LEN: usize = 5;
const MIN_SENTENCE_LEN: usize = 5;
const MIN_TOKEN_LEN: usize = 3;
const MAX_WINDOW: usize = 2;

/// Heuristic extractor of candidate concept terms.
///
/// Pure and deterministic: the same input always yields the same ordered
/// output, at most `max_terms` long.
#[derive(Debug, Clone, Default)]
pub struct TermExtractor {
    config: ExtractionConfig,
}

impl TermExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract ranked candidate terms from raw text.
    ///
    /// Garbage-only or empty input yields an empty list, which callers treat
    /// as "no concepts found" rather than an error.
    pub fn extract(&self, raw_text: &str) -> Vec<String> {
        let cleaned = clean_lines(raw_text);
        let mut candidates: HashSet<String> = HashSet::new();

        for sentence in SENTENCE_BOUNDARY.split(&cleaned) {
            let sentence = sentence.trim();
            if sentence.chars().count() < MIN_SENTENCE_LEN {
                continue;
            }

            let words = tokenize(sentence);
            for start in 0..words.len() {
                if !can_start_phrase(&words[start]) {
                    continue;
                }
                for len in 1..=MAX_WINDOW {
                    let Some(window) = words.get(start..start + len) else {
                        break;
                    };
                    if window.iter().any(|w| is_stop_word(w)) {
                        continue;
                    }
                    let phrase = window.join(" ");
                    if self.is_valid_phrase(&phrase) {
                        candidates.insert(phrase);
                    }
                }
            }
        }

        let mut terms: Vec<String> = candidates
            .into_iter()
            .filter(|c| self.is_meaningful(c))
            .collect();
        terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        terms.truncate(self.config.max_terms);

        debug!(terms = terms.len(), "extracted candidate terms");
        terms
    }

    /// Validate terms supplied by a caller without re-deriving them from text.
    ///
    /// Terms are trimmed and lowercased, invalid ones dropped, and duplicates
    /// removed keeping the first occurrence.
    pub fn validate_terms<I, S>(&self, terms: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut valid = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if term.split(' ').any(|w| w.is_empty()) {
                continue;
            }
            if self.is_valid_phrase(&term) && self.is_meaningful(&term) && seen.insert(term.clone())
            {
                valid.push(term);
            }
        }
        valid
    }

    // Per-window checks applied while building candidates.
    fn is_valid_phrase(&self, phrase: &str) -> bool {
        phrase.chars().count() >= self.config.min_phrase_len
            && phrase.chars().any(|c| c.is_ascii_lowercase())
            && !has_repeated_run(phrase, 4)
            && !phrase.starts_with(|c: char| c.is_ascii_digit())
            && !is_stop_word(phrase)
    }

    // Final pass over the deduplicated candidates.
    fn is_meaningful(&self, candidate: &str) -> bool {
        let len = candidate.chars().count();
        if len < self.config.min_phrase_len || len > self.config.max_phrase_len {
            return false;
        }
        if !candidate.chars().any(|c| c.is_ascii_lowercase()) {
            return false;
        }
        if candidate.split(' ').all(is_stop_word) {
            return false;
        }
        !HEX_RUN.is_match(candidate) && !METADATA_TAG.is_match(candidate)
    }
}

/// Extract candidate terms with the default limits.
pub fn extract_concepts(text: &str) -> Vec<String> {
    TermExtractor::default().extract(text)
}

fn clean_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !is_noise_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_noise_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    FIELD_ASSIGNMENT.is_match(&lower)
        || DRAWING_TYPE.is_match(&lower)
        || PLAIN_TEXT.is_match(&lower)
        || UPLOADED_CONTENT.is_match(&lower)
        || UPPER_TAG.is_match(line)
        || HEX_RUN.is_match(line)
        || line.trim().chars().count() <= MIN_LINE_LEN
}

fn tokenize(sentence: &str) -> Vec<String> {
    sentence
        .split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|w| w.len() >= MIN_TOKEN_LEN)
        .collect()
}

fn can_start_phrase(word: &str) -> bool {
    !is_stop_word(word) && !PURE_NUMBER.is_match(word) && !SHORT_HEX.is_match(word)
}

/// Whether `s` contains a run of at least `n` identical characters.
fn has_repeated_run(s: &str, n: usize) -> bool {
    let mut run = 0;
    let mut prev = None;
    for c in s.chars() {
        if Some(c) == prev {
            run += 1;
        } else {
            run = 1;
            prev = Some(c);
        }
        if run >= n {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_only_input() {
        assert!(extract_concepts("Field19=467abe\nDrawingType=x\nPlain text").is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_concepts("").is_empty());
        assert!(extract_concepts("   \n\n  ").is_empty());
    }

    #[test]
    fn test_basic_extraction() {
        let terms = extract_concepts("Mitochondria produce cellular energy through respiration.");
        assert!(terms.contains(&"mitochondria produce".to_string()));
        assert!(terms.contains(&"cellular energy".to_string()));
        assert!(terms.contains(&"respiration".to_string()));
    }

    #[test]
    fn test_stop_word_windows_skipped() {
        let terms = extract_concepts("The nucleus of the eukaryotic cell stores genes.");
        assert!(!terms.iter().any(|t| t.split(' ').any(is_stop_word)));
        assert!(terms.contains(&"eukaryotic cell".to_string()));
    }

    #[test]
    fn test_ranked_by_length_then_lexicographic() {
        let terms = extract_concepts("Osmosis moves water across membranes quickly.");
        for pair in terms.windows(2) {
            assert!(
                pair[0].len() > pair[1].len()
                    || (pair[0].len() == pair[1].len() && pair[0] < pair[1])
            );
        }
    }

    #[test]
    fn test_truncated_to_max_terms() {
        let text = "Photosynthesis converts sunlight into chemical energy. \
                    Chlorophyll absorbs light within chloroplast membranes. \
                    Glucose molecules store energy for cellular respiration. \
                    Stomata regulate gas exchange between leaves and atmosphere.";
        let terms = extract_concepts(text);
        assert_eq!(terms.len(), 15);

        let extractor = TermExtractor::new(ExtractionConfig {
            max_terms: 3,
            ..Default::default()
        });
        assert_eq!(extractor.extract(text).len(), 3);
    }

    #[test]
    fn test_numbers_and_stutter_rejected() {
        let terms = extract_concepts("Sample 2024 results show zzzzz artifacts everywhere.");
        assert!(!terms.iter().any(|t| t.starts_with(|c: char| c.is_ascii_digit())));
        assert!(!terms.iter().any(|t| t.contains("zzzz")));
    }

    #[test]
    fn test_short_lines_dropped() {
        assert!(extract_concepts("Cell\nATP\nDNA").is_empty());
    }

    #[test]
    fn test_repeated_run() {
        assert!(has_repeated_run("aaaa", 4));
        assert!(has_repeated_run("xbbbby", 4));
        assert!(!has_repeated_run("aaab", 4));
        assert!(!has_repeated_run("", 4));
    }

    #[test]
    fn test_validate_terms() {
        let extractor = TermExtractor::default();
        let valid = extractor.validate_terms([
            "  Photosynthesis ",
            "photosynthesis",
            "the",
            "42 things",
            "abc",
            "deadbeef01",
            "light  reaction",
            "Calvin Cycle",
        ]);
        assert_eq!(valid, vec!["photosynthesis", "calvin cycle"]);
    }
}
