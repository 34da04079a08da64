//! Quiz records consumed by the scheduler.

use serde::{Deserialize, Serialize};

/// A multiple-choice question.
///
/// `correct_answer` holds the text of one of the `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

impl Question {
    /// Whether `correct_answer` is one of the listed options.
    pub fn is_well_formed(&self) -> bool {
        self.options.iter().any(|o| o == &self.correct_answer)
    }
}

/// A quiz over a single concept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub concept_id: String,
    pub title: String,
    pub questions: Vec<Question>,
    /// Percentage 0..=100, set on submission.
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default)]
    pub completed: bool,
}

/// Outcome of submitting answers to a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Percentage 0..=100.
    pub score: u8,
    /// Number of questions graded.
    pub total: usize,
}
