//! LLM-backed concept enrichment.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use scholar_core::enrichment::Enhancement;
use scholar_core::error::{ScholarError, ScholarResult};
use scholar_core::quiz::parse_model_json;
use scholar_core::traits::{ConceptEnhancer, GenerationOptions, Llm, ResponseFormat};
use scholar_core::types::Message;

const ENHANCEMENT_KEYS: [&str; 4] = ["definition", "examples", "misconceptions", "related_concepts"];

/// Asks an LLM for a learner-friendly explanation of a term.
pub struct LlmConceptEnhancer {
    llm: Arc<dyn Llm>,
}

impl LlmConceptEnhancer {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self { llm }
    }

    fn prompt(term: &str) -> String {
        format!(
            r#"For the learning concept "{term}" provide:
1. A clear, student-friendly definition
2. 2-3 real-world examples
3. Common misconceptions
4. 2-3 related concepts

Return a JSON object with the keys "definition" (string), "examples" (array of strings), "misconceptions" (array of strings) and "related_concepts" (array of strings)."#
        )
    }
}

/// Read an enhancement from either a flat object or one keyed by the term.
fn parse_enhancement(content: &str, term: &str) -> ScholarResult<Enhancement> {
    let value = parse_model_json(content)?;
    let map = value
        .as_object()
        .ok_or_else(|| ScholarError::parse("Enhancement is not a JSON object"))?;

    let body = if ENHANCEMENT_KEYS.iter().any(|k| map.contains_key(*k)) {
        value.clone()
    } else {
        map.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(term))
            .or_else(|| map.iter().next())
            .map(|(_, v)| v.clone())
            .filter(Value::is_object)
            .ok_or_else(|| ScholarError::parse("Enhancement has no recognizable fields"))?
    };

    Ok(serde_json::from_value(body)?)
}

#[async_trait]
impl ConceptEnhancer for LlmConceptEnhancer {
    async fn enhance(&self, term: &str) -> ScholarResult<Enhancement> {
        let messages = [Message::user(Self::prompt(term))];
        let options = GenerationOptions {
            response_format: Some(ResponseFormat::Json),
            ..Default::default()
        };
        let response = self.llm.generate(&messages, Some(options)).await?;
        parse_enhancement(response.content_or_empty(), term)
    }

    fn name(&self) -> &str {
        self.llm.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_core::enhance_or_fallback;
    use scholar_core::traits::LlmResponse;
    use scholar_core::TemplateEnhancer;

    struct FixedLlm(&'static str);

    #[async_trait]
    impl Llm for FixedLlm {
        async fn generate(
            &self,
            _: &[Message],
            _: Option<GenerationOptions>,
        ) -> ScholarResult<LlmResponse> {
            Ok(LlmResponse {
                content: Some(self.0.to_string()),
                usage: None,
            })
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_parse_flat_object() {
        let e = parse_enhancement(
            r#"{"definition": "Disorder", "examples": ["Ice melting"], "related_concepts": ["Heat"]}"#,
            "entropy",
        )
        .unwrap();
        assert_eq!(e.definition, "Disorder");
        assert_eq!(e.examples, vec!["Ice melting"]);
        assert!(e.misconceptions.is_empty());
    }

    #[test]
    fn test_parse_keyed_by_term() {
        let e = parse_enhancement(
            r#"```json
{"Entropy": {"definition": "Disorder", "misconceptions": ["It always decreases"]}}
```"#,
            "entropy",
        )
        .unwrap();
        assert_eq!(e.definition, "Disorder");
        assert_eq!(e.misconceptions.len(), 1);
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(parse_enhancement("[1, 2]", "x").is_err());
        assert!(parse_enhancement(r#"{"note": "n/a"}"#, "x").is_err());
        assert!(parse_enhancement("no json here", "x").is_err());
    }

    #[test]
    fn test_enhance_via_llm() {
        let enhancer = LlmConceptEnhancer::new(Arc::new(FixedLlm(
            r#"{"definition": "Energy of motion", "examples": ["A rolling ball"]}"#,
        )));
        let e = tokio_test::block_on(enhancer.enhance("kinetic energy")).unwrap();
        assert_eq!(e.definition, "Energy of motion");
        assert_eq!(enhancer.name(), "fixed");
    }

    #[tokio::test]
    async fn test_bad_reply_uses_template() {
        let enhancer = LlmConceptEnhancer::new(Arc::new(FixedLlm("I'd rather not.")));
        let e = enhance_or_fallback(Some(&enhancer), "torque").await;
        assert_eq!(e, TemplateEnhancer.enhance_term("torque"));
    }
}
