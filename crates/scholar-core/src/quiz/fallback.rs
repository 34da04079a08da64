//! Template questions that need no network.

use async_trait::async_trait;

use crate::error::ScholarResult;
use crate::traits::QuestionGenerator;
use crate::types::{Concept, Question};

const MAX_DEFINITION_CHARS: usize = 80;

fn question(text: String, correct: String, distractors: [&str; 3], explanation: String) -> Question {
    let mut options = Vec::with_capacity(4);
    options.push(correct.clone());
    options.extend(distractors.iter().map(|d| d.to_string()));
    Question {
        question: text,
        options,
        correct_answer: correct,
        explanation,
    }
}

/// Five template questions seeded from a concept's term, definition, and
/// category.
///
/// Always returns exactly five questions of four options each, with the
/// correct answer among the options.
pub fn fallback_questions(concept: &Concept) -> Vec<Question> {
    let term = match concept.term.trim() {
        "" => "concept",
        t => t,
    };
    let definition = match concept.definition.trim() {
        "" => "No definition available",
        d => d,
    };
    let category = concept.category.as_str();

    let short_definition = if definition.chars().count() > MAX_DEFINITION_CHARS {
        let cut: String = definition.chars().take(MAX_DEFINITION_CHARS).collect();
        format!("{}...", cut)
    } else {
        definition.to_string()
    };

    vec![
        question(
            format!("What is the definition of {}?", term),
            short_definition,
            [
                "A process that cannot be defined",
                "An abstract concept with no real meaning",
                "None of the above",
            ],
            format!("{} is defined as: {}", term, definition),
        ),
        question(
            format!("Which category does {} belong to?", term),
            category.to_string(),
            ["Philosophy", "Art History", "Linguistics"],
            format!("{} is categorized under {}.", term, category),
        ),
        question(
            format!("What field of study is {} most associated with?", term),
            category.to_string(),
            ["Ancient History", "Music Theory", "Culinary Arts"],
            format!("{} is primarily studied in the field of {}.", term, category),
        ),
        question(
            format!("True or False: {} is an important concept in {}.", term, category),
            "True".to_string(),
            ["False", "Maybe", "Not applicable"],
            format!("{} is indeed an important concept in {}.", term, category),
        ),
        question(
            format!("Which of the following best describes {}?", term),
            format!("A concept related to {}", category),
            [
                "A cooking technique",
                "A type of musical instrument",
                "An ancient artifact",
            ],
            format!("{} is best described as a concept within {}.", term, category),
        ),
    ]
}

/// [`QuestionGenerator`] backed by [`fallback_questions`]. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackQuestionGenerator;

#[async_trait]
impl QuestionGenerator for FallbackQuestionGenerator {
    async fn generate_questions(
        &self,
        concept: &Concept,
        count: usize,
    ) -> ScholarResult<Vec<Question>> {
        let mut questions = fallback_questions(concept);
        questions.truncate(count);
        Ok(questions)
    }

    fn name(&self) -> &str {
        "template"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn test_shape() {
        let concept = Concept::new("Osmosis", "Diffusion of water", Category::Biology);
        let questions = fallback_questions(&concept);
        assert_eq!(questions.len(), 5);
        for q in &questions {
            assert_eq!(q.options.len(), 4);
            assert!(q.is_well_formed());
        }
        assert_eq!(questions[0].question, "What is the definition of Osmosis?");
        assert_eq!(questions[0].correct_answer, "Diffusion of water");
        assert_eq!(questions[1].correct_answer, "Biology");
        assert_eq!(questions[3].correct_answer, "True");
        assert_eq!(questions[4].correct_answer, "A concept related to Biology");
    }

    #[test]
    fn test_long_definition_truncated() {
        let definition = "x".repeat(120);
        let concept = Concept::new("Long", definition.clone(), Category::General);
        let questions = fallback_questions(&concept);
        assert_eq!(questions[0].correct_answer, format!("{}...", "x".repeat(80)));
        assert!(questions[0].explanation.ends_with(&definition));
    }

    #[test]
    fn test_empty_fields_defaulted() {
        let concept = Concept::new("", "", Category::General);
        let questions = fallback_questions(&concept);
        assert_eq!(questions[0].question, "What is the definition of concept?");
        assert_eq!(questions[0].correct_answer, "No definition available");
        assert_eq!(questions[1].correct_answer, "General");
    }

    #[test]
    fn test_generator_respects_count() {
        let concept = Concept::new("Lens", "Curved glass", Category::Cinematography);
        let questions =
            tokio_test::block_on(FallbackQuestionGenerator.generate_questions(&concept, 3))
                .unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(FallbackQuestionGenerator.name(), "template");
    }
}
