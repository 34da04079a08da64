//! Term extraction from scanned text.
//!
//! [`TermExtractor`] turns OCR output into ranked candidate terms;
//! [`extract_definition`] pulls a definition for one term back out of the
//! same text.

mod definition;
mod stop_words;
mod terms;

pub use definition::extract_definition;
pub use stop_words::{is_stop_word, STOP_WORDS};
pub use terms::{extract_concepts, TermExtractor};
