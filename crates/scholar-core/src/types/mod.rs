//! Core types for scholar.

mod category;
mod concept;
mod message;
mod quiz;
mod review;

pub use category::Category;
pub use concept::{Concept, Difficulty, RelatedConcept};
pub use message::{Message, MessageRole};
pub use quiz::{Question, Quiz, QuizResult};
pub use review::{
    ReviewState, ReviewStatus, ReviewUpdate, Score, DEFAULT_EASE_FACTOR, MAX_MASTERY,
};
