//! Turning scanned text plus candidate terms into concept records.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::classification::CategoryClassifier;
use crate::config::ExtractionConfig;
use crate::error::{ScholarError, ScholarResult};
use crate::extraction::{extract_definition, TermExtractor};
use crate::types::{Concept, Difficulty, RelatedConcept};

/// Creates concept records for newly scanned material.
///
/// Client-supplied terms are validated rather than re-derived; when none are
/// supplied the text is run through the [`TermExtractor`].
#[derive(Debug, Clone, Default)]
pub struct ConceptIngestor {
    extractor: TermExtractor,
    classifier: CategoryClassifier,
}

impl ConceptIngestor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            extractor: TermExtractor::new(config),
            classifier: CategoryClassifier::new(),
        }
    }

    /// Build concepts for `terms` found in `text`.
    ///
    /// Terms matching an entry of `existing_terms` (case-insensitive) are
    /// skipped. Each new concept gets a definition drawn from `text`, a
    /// category, and up to three other terms from the same batch as related
    /// concepts.
    pub fn ingest<T, E>(
        &self,
        text: &str,
        terms: &[T],
        existing_terms: &[E],
    ) -> ScholarResult<Vec<Concept>>
    where
        T: AsRef<str>,
        E: AsRef<str>,
    {
        if text.trim().is_empty() {
            return Err(ScholarError::validation_with_suggestion(
                "No text extracted",
                "Provide the recognized text of the scanned page",
            ));
        }

        let batch = if terms.is_empty() {
            self.extractor.extract(text)
        } else {
            self.extractor.validate_terms(terms)
        };
        let known: HashSet<String> = existing_terms
            .iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .collect();

        let concepts: Vec<Concept> = batch
            .iter()
            .filter(|term| {
                let skip = known.contains(term.as_str());
                if skip {
                    debug!(term = %term, "concept already exists");
                }
                !skip
            })
            .map(|term| self.build_concept(text, term, &batch))
            .collect();

        info!(
            candidates = batch.len(),
            created = concepts.len(),
            "ingested scanned text"
        );
        Ok(concepts)
    }

    /// Extract terms from `text` and build concepts for them.
    pub fn ingest_text<E: AsRef<str>>(
        &self,
        text: &str,
        existing_terms: &[E],
    ) -> ScholarResult<Vec<Concept>> {
        self.ingest::<&str, E>(text, &[], existing_terms)
    }

    fn build_concept(&self, text: &str, term: &str, batch: &[String]) -> Concept {
        let definition = extract_definition(text, term);
        let category = self.classifier.classify_concept(text, term, &definition);
        let related = batch
            .iter()
            .filter(|other| other.as_str() != term)
            .take(Concept::MAX_RELATED)
            .map(|other| RelatedConcept::Term(other.clone()));

        Concept::new(term, definition, category)
            .with_difficulty(Difficulty::Intermediate)
            .with_related(related)
    }
}
