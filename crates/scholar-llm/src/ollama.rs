//! Ollama LLM provider implementation.

use async_trait::async_trait;

use scholar_core::error::{ScholarError, ScholarResult};
use scholar_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse};
use scholar_core::types::Message;

#[cfg(feature = "ollama")]
use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage, MessageRole as OllamaRole},
    Ollama,
};
#[cfg(feature = "ollama")]
use scholar_core::traits::ResponseFormat;
#[cfg(feature = "ollama")]
use scholar_core::types::MessageRole;

const DEFAULT_URL: &str = "http://localhost:11434";
const DEFAULT_PORT: u16 = 11434;
const DEFAULT_MODEL: &str = "llama3.1";

/// Ollama LLM provider.
pub struct OllamaLlm {
    #[cfg(feature = "ollama")]
    client: Ollama,
    config: LlmConfig,
    host: String,
    port: u16,
}

impl OllamaLlm {
    /// Create a new Ollama LLM provider.
    pub fn new(config: LlmConfig) -> ScholarResult<Self> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_URL.to_string());

        let url = url::Url::parse(&base_url)
            .map_err(|e| ScholarError::Configuration(format!("Invalid Ollama URL: {}", e)))?;

        let host = format!(
            "{}://{}",
            url.scheme(),
            url.host_str().unwrap_or("localhost")
        );
        let port = url.port().unwrap_or(DEFAULT_PORT);

        #[cfg(feature = "ollama")]
        let client = Ollama::new(host.clone(), port);

        let mut config = config;
        if config.model.is_empty() {
            config.model = DEFAULT_MODEL.to_string();
        }

        Ok(Self {
            #[cfg(feature = "ollama")]
            client,
            config,
            host,
            port,
        })
    }

    /// Endpoint this provider talks to.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[cfg(feature = "ollama")]
    fn message_to_ollama(msg: &Message) -> ChatMessage {
        let role = match msg.role {
            MessageRole::System => OllamaRole::System,
            MessageRole::User => OllamaRole::User,
            MessageRole::Assistant => OllamaRole::Assistant,
        };
        ChatMessage::new(role, msg.content.clone())
    }
}

#[async_trait]
impl Llm for OllamaLlm {
    #[cfg(feature = "ollama")]
    async fn generate(
        &self,
        messages: &[Message],
        options: Option<GenerationOptions>,
    ) -> ScholarResult<LlmResponse> {
        let options = options.unwrap_or_default();

        let mut ollama_messages: Vec<ChatMessage> =
            messages.iter().map(Self::message_to_ollama).collect();

        if options.response_format == Some(ResponseFormat::Json) {
            if let Some(last) = ollama_messages.last_mut() {
                last.content.push_str("\n\nPlease respond with valid JSON only.");
            }
        }

        let request = ChatMessageRequest::new(self.config.model.clone(), ollama_messages);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| ScholarError::llm(format!("Ollama API error: {}", e)))?;

        Ok(LlmResponse {
            content: response.message.map(|m| m.content),
            usage: None,
        })
    }

    #[cfg(not(feature = "ollama"))]
    async fn generate(
        &self,
        _messages: &[Message],
        _options: Option<GenerationOptions>,
    ) -> ScholarResult<LlmResponse> {
        Err(ScholarError::Configuration(
            "Ollama feature not enabled. Enable the 'ollama' feature.".to_string(),
        ))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let llm = OllamaLlm::new(LlmConfig::default()).unwrap();
        assert_eq!(llm.model_name(), DEFAULT_MODEL);
        assert_eq!(llm.endpoint(), "http://localhost:11434");
    }

    #[test]
    fn test_custom_endpoint() {
        let llm = OllamaLlm::new(LlmConfig {
            base_url: Some("http://gpu-box:8080".to_string()),
            model: "mistral".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(llm.endpoint(), "http://gpu-box:8080");
        assert_eq!(llm.model_name(), "mistral");
    }

    #[test]
    fn test_invalid_url() {
        let err = OllamaLlm::new(LlmConfig {
            base_url: Some("not a url".to_string()),
            ..Default::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, ScholarError::Configuration(_)));
    }
}
