//! scholar-llm - LLM providers and AI-backed collaborators for scholar.
//!
//! This crate provides LLM provider implementations plus the
//! [`LlmQuestionGenerator`] and [`LlmConceptEnhancer`] that plug into the
//! quiz and enrichment seams of `scholar-core`.
//!
//! # Supported Providers
//!
//! - **OpenAI** (feature: `openai`) - GPT-4 family, o-series, etc.
//! - **Anthropic** (feature: `anthropic`) - Claude models over the Messages API
//! - **Ollama** (feature: `ollama`) - Local models via Ollama
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use scholar_core::build_quiz;
//! use scholar_llm::{LlmFactory, LlmQuestionGenerator};
//!
//! let llm = LlmFactory::openai()?;
//! let generator = Arc::new(LlmQuestionGenerator::new(llm));
//! let quiz = build_quiz(Some(generator), &concept, None).await;
//! ```

mod anthropic;
mod enhance;
mod factory;
mod ollama;
mod openai;
mod quiz;

pub use anthropic::AnthropicLlm;
pub use enhance::LlmConceptEnhancer;
pub use factory::LlmFactory;
pub use ollama::OllamaLlm;
pub use openai::OpenAIProvider;
pub use quiz::LlmQuestionGenerator;

// Re-export core types for convenience
pub use scholar_core::config::{LlmProvider, LlmProviderConfig};
pub use scholar_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse, ResponseFormat};
