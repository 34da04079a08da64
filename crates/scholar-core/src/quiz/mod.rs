//! Quiz construction and grading.
//!
//! A quiz is always produced: when the AI generator is missing, errors, or
//! returns nothing usable, the template questions from
//! [`fallback_questions`] are used instead.

mod fallback;
mod parse;

use std::sync::Arc;

use tracing::{debug, warn};

pub use fallback::{fallback_questions, FallbackQuestionGenerator};
pub use parse::{extract_json, normalize_questions, parse_model_json, DEFAULT_EXPLANATION};

use crate::config::QuizConfig;
use crate::traits::QuestionGenerator;
use crate::types::{Concept, Question, Quiz, QuizResult};

/// Builds quizzes from an optional AI generator with a template fallback.
#[derive(Clone)]
pub struct QuizBuilder {
    generator: Option<Arc<dyn QuestionGenerator>>,
    questions_per_quiz: usize,
}

impl Default for QuizBuilder {
    fn default() -> Self {
        Self::from_config(&QuizConfig::default())
    }
}

impl QuizBuilder {
    pub fn from_config(config: &QuizConfig) -> Self {
        Self {
            generator: None,
            questions_per_quiz: config.questions_per_quiz.max(1),
        }
    }

    /// Try `generator` before falling back to templates.
    pub fn with_generator(mut self, generator: Arc<dyn QuestionGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build a quiz for `concept`. Never fails.
    pub async fn build(&self, concept: &Concept, title: Option<&str>) -> Quiz {
        let questions = self.questions_for(concept).await;
        Quiz {
            concept_id: concept.id.clone(),
            title: title
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} Quiz", concept.term)),
            questions,
            score: None,
            completed: false,
        }
    }

    async fn questions_for(&self, concept: &Concept) -> Vec<Question> {
        if let Some(generator) = &self.generator {
            match generator
                .generate_questions(concept, self.questions_per_quiz)
                .await
            {
                Ok(questions) => {
                    let mut usable: Vec<Question> =
                        questions.into_iter().filter(Question::is_well_formed).collect();
                    usable.truncate(self.questions_per_quiz);
                    if !usable.is_empty() {
                        debug!(
                            generator = generator.name(),
                            count = usable.len(),
                            "generated quiz questions"
                        );
                        return usable;
                    }
                    warn!(
                        generator = generator.name(),
                        term = %concept.term,
                        "generator returned no usable questions, using templates"
                    );
                }
                Err(e) => {
                    warn!(
                        generator = generator.name(),
                        term = %concept.term,
                        error = %e,
                        "question generation failed, using templates"
                    );
                }
            }
        }

        let mut questions = fallback_questions(concept);
        questions.truncate(self.questions_per_quiz);
        questions
    }
}

/// Build a quiz with the default size, trying `generator` first.
pub async fn build_quiz(
    generator: Option<Arc<dyn QuestionGenerator>>,
    concept: &Concept,
    title: Option<&str>,
) -> Quiz {
    let builder = match generator {
        Some(g) => QuizBuilder::default().with_generator(g),
        None => QuizBuilder::default(),
    };
    builder.build(concept, title).await
}

/// Grade answers positionally against each question's correct answer.
///
/// The score is `round(correct / total * 100)`; an empty quiz scores 0.
/// Missing answers count as wrong.
pub fn score_answers<S: AsRef<str>>(questions: &[Question], answers: &[S]) -> QuizResult {
    let total = questions.len();
    if total == 0 {
        return QuizResult { score: 0, total };
    }
    let correct = questions
        .iter()
        .zip(answers.iter().map(|a| Some(a.as_ref())).chain(std::iter::repeat(None)))
        .filter(|(q, a)| *a == Some(q.correct_answer.as_str()))
        .count();
    let score = (correct as f64 / total as f64 * 100.0).round() as u8;
    QuizResult { score, total }
}

impl Quiz {
    /// Grade `answers`, mark the quiz completed, and return the result.
    pub fn submit<S: AsRef<str>>(&mut self, answers: &[S]) -> QuizResult {
        let result = score_answers(&self.questions, answers);
        self.score = Some(result.score);
        self.completed = true;
        result
    }
}
