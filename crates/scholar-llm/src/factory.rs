//! Factory for creating LLM providers.

use std::sync::Arc;

use scholar_core::config::{LlmProvider, LlmProviderConfig};
use scholar_core::error::{ScholarError, ScholarResult};
use scholar_core::traits::{Llm, LlmConfig};
use tracing::debug;

use crate::anthropic::AnthropicLlm;
use crate::ollama::OllamaLlm;
use crate::openai::OpenAIProvider;

/// Factory for creating LLM providers.
pub struct LlmFactory;

impl LlmFactory {
    /// Create an LLM provider from the given configuration.
    pub fn create(provider: LlmProvider, config: LlmConfig) -> ScholarResult<Arc<dyn Llm>> {
        let llm: Arc<dyn Llm> = match provider {
            LlmProvider::OpenAI => Arc::new(OpenAIProvider::new(config)?),
            LlmProvider::Anthropic => Arc::new(AnthropicLlm::new(config)?),
            LlmProvider::Ollama => Arc::new(OllamaLlm::new(config)?),
        };
        debug!(provider = ?provider, model = llm.model_name(), "created LLM provider");
        Ok(llm)
    }

    /// Create the provider described by a `[llm]` config section.
    pub fn from_config(config: &LlmProviderConfig) -> ScholarResult<Arc<dyn Llm>> {
        Self::create(config.provider, config.config.clone())
    }

    /// Create a provider from a name such as `"openai"` or `"claude"`.
    pub fn from_name(name: &str, config: LlmConfig) -> ScholarResult<Arc<dyn Llm>> {
        let provider =
            LlmProvider::from_name(name).ok_or_else(|| ScholarError::UnsupportedProvider {
                provider: name.to_string(),
            })?;
        Self::create(provider, config)
    }

    /// Create an OpenAI LLM provider with default configuration.
    pub fn openai() -> ScholarResult<Arc<dyn Llm>> {
        Self::create(LlmProvider::OpenAI, LlmConfig::default())
    }

    /// Create an OpenAI LLM provider with a specific model.
    pub fn openai_with_model(model: impl Into<String>) -> ScholarResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            model: model.into(),
            ..Default::default()
        };
        Self::create(LlmProvider::OpenAI, config)
    }

    /// Create an Anthropic LLM provider with default configuration.
    pub fn anthropic() -> ScholarResult<Arc<dyn Llm>> {
        Self::create(LlmProvider::Anthropic, LlmConfig::default())
    }

    /// Create an Ollama LLM provider with default configuration.
    pub fn ollama() -> ScholarResult<Arc<dyn Llm>> {
        Self::create(LlmProvider::Ollama, LlmConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_name() {
        let err = LlmFactory::from_name("watson", LlmConfig::default())
            .err()
            .expect("expected an error for unknown provider");
        assert!(matches!(err, ScholarError::UnsupportedProvider { .. }));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let llm = LlmFactory::ollama().unwrap();
        assert_eq!(llm.model_name(), "llama3.1");
    }

    #[test]
    fn test_explicit_key_and_model() {
        let config = LlmProviderConfig {
            provider: LlmProvider::Anthropic,
            config: LlmConfig {
                model: "claude-3-5-haiku-latest".to_string(),
                api_key: Some("sk-test".to_string()),
                ..Default::default()
            },
        };
        let llm = LlmFactory::from_config(&config).unwrap();
        assert_eq!(llm.model_name(), "claude-3-5-haiku-latest");
    }
}
