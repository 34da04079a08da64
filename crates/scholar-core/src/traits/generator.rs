//! Seams for the AI collaborators.
//!
//! Both traits have deterministic in-crate implementations
//! ([`crate::quiz::FallbackQuestionGenerator`],
//! [`crate::enrichment::TemplateEnhancer`]) that never fail; LLM-backed
//! implementations live in `scholar-llm`.

use async_trait::async_trait;

use crate::enrichment::Enhancement;
use crate::error::ScholarResult;
use crate::types::{Concept, Question};

/// Produces multiple-choice questions for a concept.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Generate up to `count` questions about `concept`.
    async fn generate_questions(
        &self,
        concept: &Concept,
        count: usize,
    ) -> ScholarResult<Vec<Question>>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

/// Produces explanatory material for a term.
#[async_trait]
pub trait ConceptEnhancer: Send + Sync {
    /// Enhance a single term.
    async fn enhance(&self, term: &str) -> ScholarResult<Enhancement>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}
