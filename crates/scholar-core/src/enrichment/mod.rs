//! Concept enrichment with a deterministic fallback.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ScholarResult;
use crate::traits::ConceptEnhancer;
use crate::types::{Concept, RelatedConcept};

/// Learner-facing material for one term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enhancement {
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub misconceptions: Vec<String>,
    #[serde(default)]
    pub related_concepts: Vec<String>,
}

impl Enhancement {
    /// Fill gaps in `concept`: an empty definition and an empty related list.
    ///
    /// Values the concept already has are kept.
    pub fn apply_to(&self, concept: &mut Concept) {
        if concept.definition.trim().is_empty() && !self.definition.trim().is_empty() {
            concept.definition = self.definition.clone();
        }
        if concept.related_concepts.is_empty() {
            concept.related_concepts = self
                .related_concepts
                .iter()
                .filter(|r| !r.eq_ignore_ascii_case(&concept.term))
                .take(Concept::MAX_RELATED)
                .map(|r| RelatedConcept::Term(r.clone()))
                .collect();
        }
    }
}

/// Template enhancement, used when no AI enhancer is reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEnhancer;

impl TemplateEnhancer {
    pub fn enhance_term(&self, term: &str) -> Enhancement {
        Enhancement {
            definition: format!("Clear explanation of {} for learners", term),
            examples: (1..=3)
                .map(|i| format!("Real-world example {} of {}", i, term))
                .collect(),
            misconceptions: vec![
                format!("Common misunderstanding about {}", term),
                format!("Another misconception about {}", term),
            ],
            related_concepts: Vec::new(),
        }
    }
}

#[async_trait]
impl ConceptEnhancer for TemplateEnhancer {
    async fn enhance(&self, term: &str) -> ScholarResult<Enhancement> {
        Ok(self.enhance_term(term))
    }

    fn name(&self) -> &str {
        "template"
    }
}

/// Enhance `term` with `enhancer`, falling back to [`TemplateEnhancer`].
pub async fn enhance_or_fallback(enhancer: Option<&dyn ConceptEnhancer>, term: &str) -> Enhancement {
    if let Some(enhancer) = enhancer {
        match enhancer.enhance(term).await {
            Ok(enhancement) => return enhancement,
            Err(e) => warn!(
                enhancer = enhancer.name(),
                term,
                error = %e,
                "enhancement failed, using template"
            ),
        }
    }
    TemplateEnhancer.enhance_term(term)
}
