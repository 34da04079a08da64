//! LLM-backed quiz question generation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use scholar_core::error::{ScholarError, ScholarResult};
use scholar_core::quiz::normalize_questions;
use scholar_core::traits::{GenerationOptions, Llm, QuestionGenerator, ResponseFormat};
use scholar_core::types::{Concept, Message, Question};

/// Asks an LLM for multiple-choice questions and normalizes the reply.
///
/// Malformed replies surface as errors so that the quiz builder can fall
/// back to template questions.
pub struct LlmQuestionGenerator {
    llm: Arc<dyn Llm>,
    temperature: Option<f32>,
}

impl LlmQuestionGenerator {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self {
            llm,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn prompt(concept: &Concept, count: usize) -> String {
        let definition = if concept.definition.trim().is_empty() {
            "No definition available"
        } else {
            concept.definition.as_str()
        };
        format!(
            r#"Generate {count} multiple choice quiz questions about "{term}".
Definition: {definition}
Category: {category}

Return a JSON object with a "questions" array. Each question object should have:
- "question": the question text
- "options": array of 4 answer choices
- "correct_answer": the correct option text (matching one of the options exactly)
- "explanation": brief explanation of the answer

Example format: {{"questions": [{{"question": "...", "options": ["A", "B", "C", "D"], "correct_answer": "A", "explanation": "..."}}]}}"#,
            count = count,
            term = concept.term,
            definition = definition,
            category = concept.category,
        )
    }
}

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn generate_questions(
        &self,
        concept: &Concept,
        count: usize,
    ) -> ScholarResult<Vec<Question>> {
        let messages = [Message::user(Self::prompt(concept, count))];
        let options = GenerationOptions {
            temperature: self.temperature,
            response_format: Some(ResponseFormat::Json),
            ..Default::default()
        };

        let response = self.llm.generate(&messages, Some(options)).await?;
        let content = response.content_or_empty();
        if content.trim().is_empty() {
            return Err(ScholarError::llm_invalid_response("Model returned an empty response"));
        }

        let questions = normalize_questions(content, count)?;
        debug!(
            model = self.llm.model_name(),
            term = %concept.term,
            count = questions.len(),
            "normalized generated questions"
        );
        Ok(questions)
    }

    fn name(&self) -> &str {
        self.llm.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use scholar_core::error::ErrorCode;
    use scholar_core::traits::LlmResponse;
    use scholar_core::{build_quiz, fallback_questions, Category};

    /// Replays a fixed reply and records the prompt it was sent.
    struct ScriptedLlm {
        reply: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn new(reply: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Llm for ScriptedLlm {
        async fn generate(
            &self,
            messages: &[Message],
            options: Option<GenerationOptions>,
        ) -> ScholarResult<LlmResponse> {
            assert_eq!(
                options.and_then(|o| o.response_format),
                Some(ResponseFormat::Json)
            );
            self.prompts
                .lock()
                .unwrap()
                .extend(messages.iter().map(|m| m.content.clone()));
            Ok(LlmResponse {
                content: self.reply.clone(),
                usage: None,
            })
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    fn concept() -> Concept {
        Concept::new("Osmosis", "Diffusion of water across a membrane", Category::Biology)
    }

    const REPLY: &str = r#"```json
{"questions": [
  {"question": "What moves in osmosis?", "options": ["Water", "Salt", "Light", "Heat"], "correct_answer": "Water", "explanation": "Solvent moves."},
  {"question": "Across what?", "options": ["A membrane", "A wire", "A lens", "A gear"], "correctAnswer": "A"}
]}
```"#;

    #[tokio::test]
    async fn test_generates_and_normalizes() {
        let llm = ScriptedLlm::new(Some(REPLY));
        let generator = LlmQuestionGenerator::new(llm.clone());
        let questions = generator.generate_questions(&concept(), 5).await.unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct_answer, "Water");
        assert_eq!(questions[1].correct_answer, "A membrane");

        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].contains(r#"about "Osmosis""#));
        assert!(prompts[0].contains("Category: Biology"));
        assert!(prompts[0].starts_with("Generate 5 multiple choice"));
    }

    #[tokio::test]
    async fn test_empty_reply_is_error() {
        let generator = LlmQuestionGenerator::new(ScriptedLlm::new(None));
        let err = generator.generate_questions(&concept(), 5).await.unwrap_err();
        assert!(matches!(err, ScholarError::Llm { .. }));
        assert_eq!(err.code(), ErrorCode::LlmInvalidResponse);
    }

    #[tokio::test]
    async fn test_prose_reply_falls_back_in_quiz() {
        let generator: Arc<dyn QuestionGenerator> = Arc::new(LlmQuestionGenerator::new(
            ScriptedLlm::new(Some("Sorry, I can't produce JSON today.")),
        ));
        let quiz = build_quiz(Some(generator), &concept(), None).await;
        assert_eq!(quiz.questions, fallback_questions(&concept()));
    }

    #[tokio::test]
    async fn test_ai_quiz_used_when_valid() {
        let generator: Arc<dyn QuestionGenerator> =
            Arc::new(LlmQuestionGenerator::new(ScriptedLlm::new(Some(REPLY))));
        let quiz = build_quiz(Some(generator), &concept(), None).await;
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.title, "Osmosis Quiz");
    }
}
