//! scholar-core - Core library for scholar.
//!
//! Pure building blocks for a study app: candidate-term extraction from
//! scanned text, subject classification, spaced-repetition scheduling, and a
//! derived knowledge graph, plus quiz construction with a template fallback
//! for when the AI question generator is unavailable.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use scholar_core::{classify_category, compute_review_update, extract_concepts, Category};
//!
//! let terms = extract_concepts("Mitochondria produce cellular energy.");
//! assert!(!terms.is_empty());
//!
//! assert_eq!(classify_category("The mitochondria produces ATP"), Category::Biology);
//!
//! let outcome = compute_review_update(0, 0, 100.0, Utc::now()).unwrap();
//! assert_eq!(outcome.mastery_level, 5);
//! ```

pub mod classification;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod extraction;
pub mod graph;
pub mod ingestion;
pub mod quiz;
pub mod scheduling;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use classification::{classify_category, CategoryClassifier};
pub use config::{LlmProvider, LlmProviderConfig, ScholarConfig, StrategyKind};
pub use enrichment::{enhance_or_fallback, Enhancement, TemplateEnhancer};
pub use error::{ErrorCode, ScholarError, ScholarResult};
pub use extraction::{extract_concepts, extract_definition, TermExtractor};
pub use graph::{build_knowledge_graph, GraphEdge, GraphLinker, GraphNode, KnowledgeGraph};
pub use ingestion::ConceptIngestor;
pub use quiz::{
    build_quiz, fallback_questions, normalize_questions, score_answers,
    FallbackQuestionGenerator, QuizBuilder,
};
pub use scheduling::{
    compute_review_update, due_for_review, format_next_review, review_status, ReviewOutcome,
    ReviewStrategy, Scheduler,
};
pub use traits::{ConceptEnhancer, Llm, LlmConfig, QuestionGenerator};
pub use types::{
    Category, Concept, Difficulty, Message, MessageRole, Question, Quiz, QuizResult,
    RelatedConcept, ReviewState, ReviewStatus, Score,
};
