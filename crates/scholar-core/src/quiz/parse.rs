//! Lenient parsing of AI-generated quiz JSON.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ErrorCode, ScholarError, ScholarResult};
use crate::types::Question;

/// Default explanation when the model omits one.
pub const DEFAULT_EXPLANATION: &str = "See the concept definition for more details.";

const DEFAULT_OPTIONS: [&str; 4] = ["A", "B", "C", "D"];

static JSON_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?\s*\n?([\s\S]*?)\n?```").unwrap());

mod raw {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct RawQuestion {
        pub question: Option<Value>,
        pub options: Option<Value>,
        pub correct_answer: Option<Value>,
        #[serde(rename = "correctAnswer")]
        pub correct_answer_camel: Option<Value>,
        pub answer: Option<Value>,
        pub explanation: Option<Value>,
    }
}

/// Extract JSON from a response, unwrapping a markdown code block if present.
pub fn extract_json(content: &str) -> &str {
    if let Some(m) = JSON_BLOCK.captures(content).and_then(|caps| caps.get(1)) {
        return m.as_str().trim();
    }
    content.trim()
}

// Repairs single quotes and trailing commas.
fn lenient_parse(json_str: &str) -> Option<Value> {
    let fixed = json_str
        .replace('\'', "\"")
        .replace(",]", "]")
        .replace(",}", "}");
    serde_json::from_str(&fixed).ok()
}

/// Parse the JSON payload of a model response.
///
/// Code fences are stripped first; single quotes and trailing commas are
/// repaired when strict parsing fails.
pub fn parse_model_json(response: &str) -> ScholarResult<Value> {
    let json_str = extract_json(response);
    match serde_json::from_str(json_str) {
        Ok(v) => Ok(v),
        Err(e) => lenient_parse(json_str).ok_or_else(|| ScholarError::Parse {
            message: format!("Failed to parse model JSON: {}", e),
            code: ErrorCode::ParseInvalidJson,
        }),
    }
}

/// Turn a raw model response into well-formed questions.
///
/// Accepts `{"questions": [...]}`, `{"quiz": [...]}`, or a bare array.
/// Missing fields get defaults; a letter answer (`"B"`) against four options
/// is mapped to that option; questions whose answer still matches no option
/// are dropped. At most `limit` questions are returned.
///
/// Fails only when the response holds no parseable JSON.
pub fn normalize_questions(response: &str, limit: usize) -> ScholarResult<Vec<Question>> {
    let value = parse_model_json(response)?;

    let items: &[Value] = match &value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("questions")
            .or_else(|| map.get("quiz"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };

    let total = items.len();
    let questions: Vec<Question> = items
        .iter()
        .filter_map(|item| serde_json::from_value::<raw::RawQuestion>(item.clone()).ok())
        .filter_map(convert_question)
        .take(limit)
        .collect();

    if questions.len() < total.min(limit) {
        debug!(
            received = total,
            kept = questions.len(),
            "dropped malformed quiz questions"
        );
    }
    Ok(questions)
}

fn convert_question(raw: raw::RawQuestion) -> Option<Question> {
    let question = text(raw.question).unwrap_or_else(|| "Question".to_string());

    let options: Vec<String> = match raw.options {
        Some(Value::Array(items)) => items.into_iter().filter_map(|v| text(Some(v))).collect(),
        _ => Vec::new(),
    };
    let options = if options.is_empty() {
        DEFAULT_OPTIONS.iter().map(|o| o.to_string()).collect()
    } else {
        options
    };

    let answer = text(raw.correct_answer)
        .or_else(|| text(raw.correct_answer_camel))
        .or_else(|| text(raw.answer))
        .unwrap_or_else(|| options[0].clone());
    let correct_answer = resolve_answer(&answer, &options)?;

    let explanation = text(raw.explanation).unwrap_or_else(|| DEFAULT_EXPLANATION.to_string());

    Some(Question {
        question,
        options,
        correct_answer,
        explanation,
    })
}

fn resolve_answer(answer: &str, options: &[String]) -> Option<String> {
    if options.iter().any(|o| o == answer) {
        return Some(answer.to_string());
    }
    if let Some(trimmed) = options.iter().find(|o| o.trim() == answer.trim()) {
        return Some(trimmed.clone());
    }
    if options.len() != 4 {
        return None;
    }
    let letter = answer
        .trim()
        .trim_end_matches(|c: char| c == ')' || c == '.' || c == ':');
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            let index = "ABCD".find(c.to_ascii_uppercase())?;
            Some(options[index].clone())
        }
        _ => None,
    }
}

// Non-empty text from a JSON scalar.
fn text(value: Option<Value>) -> Option<String> {
    let s = match value? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_code_block() {
        let input = "```json\n{\"questions\": []}\n```";
        assert_eq!(extract_json(input), "{\"questions\": []}");
        assert_eq!(extract_json("  {}  "), "{}");
    }

    #[test]
    fn test_questions_key() {
        let input = r#"{"questions": [{
            "question": "What is ATP?",
            "options": ["Energy carrier", "A sugar", "A lipid", "A virus"],
            "correct_answer": "Energy carrier",
            "explanation": "ATP stores energy."
        }]}"#;
        let questions = normalize_questions(input, 5).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, "Energy carrier");
        assert_eq!(questions[0].explanation, "ATP stores energy.");
    }

    #[test]
    fn test_quiz_key_and_aliases() {
        let input = r#"{"quiz": [
            {"question": "Q1", "options": ["a", "b", "c", "d"], "correctAnswer": "b"},
            {"question": "Q2", "options": ["a", "b", "c", "d"], "answer": "d"}
        ]}"#;
        let questions = normalize_questions(input, 5).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct_answer, "b");
        assert_eq!(questions[1].correct_answer, "d");
        assert_eq!(questions[1].explanation, DEFAULT_EXPLANATION);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let questions = normalize_questions(r#"{"questions": [{}]}"#, 5).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Question");
        assert_eq!(questions[0].options, vec!["A", "B", "C", "D"]);
        assert_eq!(questions[0].correct_answer, "A");
    }

    #[test]
    fn test_letter_answer_mapped() {
        let input = r#"{"questions": [
            {"question": "Q", "options": ["red", "green", "blue", "cyan"], "correct_answer": "C)"}
        ]}"#;
        let questions = normalize_questions(input, 5).unwrap();
        assert_eq!(questions[0].correct_answer, "blue");
    }

    #[test]
    fn test_unmatched_answer_dropped() {
        let input = r#"{"questions": [
            {"question": "Q", "options": ["red", "green"], "correct_answer": "purple"},
            {"question": "Q2", "options": ["x", "y", "z", "w"], "correct_answer": "w"}
        ]}"#;
        let questions = normalize_questions(input, 5).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Q2");
    }

    #[test]
    fn test_limit() {
        let one = r#"{"question": "Q", "options": ["a", "b", "c", "d"], "answer": "a"}"#;
        let input = format!("[{}]", vec![one; 8].join(","));
        assert_eq!(normalize_questions(&input, 5).unwrap().len(), 5);
    }

    #[test]
    fn test_lenient_repairs() {
        let input = "{'questions': [{'question': 'Q', 'options': ['a','b','c','d'], 'answer': 'a'},]}";
        assert_eq!(normalize_questions(input, 5).unwrap().len(), 1);
    }

    #[test]
    fn test_garbage_is_error() {
        assert!(normalize_questions("I cannot help with that.", 5).is_err());
    }

    #[test]
    fn test_wrong_shape_is_empty() {
        assert!(normalize_questions(r#"{"items": []}"#, 5).unwrap().is_empty());
        assert!(normalize_questions("42", 5).unwrap().is_empty());
    }
}
