//! Configuration system for scholar.

use serde::{Deserialize, Serialize};

use crate::error::{ScholarError, ScholarResult};
use crate::scheduling::MAX_INTERVAL_DAYS;
use crate::traits::LlmConfig;

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    OpenAI,
    Anthropic,
    Ollama,
}

impl LlmProvider {
    /// Parse a provider name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "openai" => Some(Self::OpenAI),
            "anthropic" | "claude" => Some(Self::Anthropic),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }
}

/// Provider configuration with type.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LlmProviderConfig {
    /// Provider type.
    #[serde(default)]
    pub provider: LlmProvider,
    /// Provider-specific configuration.
    #[serde(flatten)]
    pub config: LlmConfig,
}

/// Term extraction limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum number of terms returned.
    pub max_terms: usize,
    /// Minimum phrase length in characters (inclusive).
    pub min_phrase_len: usize,
    /// Maximum phrase length in characters (inclusive).
    pub max_phrase_len: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_terms: 15,
            min_phrase_len: 4,
            max_phrase_len: 50,
        }
    }
}

/// Which review strategy drives the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Mastery bucketed by score quintile, fixed interval ladder.
    #[default]
    Bucketed,
    /// Classic SM-2 with ease factor.
    Sm2,
}

impl StrategyKind {
    /// Parse a strategy name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "bucketed" | "default" => Some(Self::Bucketed),
            "sm2" | "sm-2" => Some(Self::Sm2),
            _ => None,
        }
    }
}

/// Review scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Active strategy.
    pub strategy: StrategyKind,
    /// Base interval ladder in days, indexed by prior review count.
    pub intervals_days: Vec<u32>,
    /// Interval multiplier added per mastery level.
    pub mastery_bonus: f64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Bucketed,
            intervals_days: vec![1, 3, 7, 14, 30, 60],
            mastery_bonus: 0.2,
        }
    }
}

/// Quiz generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Questions per generated quiz.
    pub questions_per_quiz: usize,
    /// Whether to try the AI generator before the template fallback.
    pub ai_enabled: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_per_quiz: 5,
            ai_enabled: true,
        }
    }
}

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScholarConfig {
    pub extraction: ExtractionConfig,
    pub scheduling: SchedulingConfig,
    pub quiz: QuizConfig,
    pub llm: LlmProviderConfig,
}

impl ScholarConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ScholarResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        let config: Self = match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| ScholarError::Configuration(e.to_string()))?
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ScholarError::Configuration(e.to_string()))?,
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| ScholarError::Configuration(e.to_string()))?,
            _ => {
                return Err(ScholarError::Configuration(
                    "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables on top of defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(provider) = std::env::var("SCHOLAR_LLM_PROVIDER")
            .ok()
            .and_then(|p| LlmProvider::from_name(&p))
        {
            config.llm.provider = provider;
        }
        if let Ok(model) = std::env::var("SCHOLAR_LLM_MODEL") {
            config.llm.config.model = model;
        }
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            if config.llm.provider == LlmProvider::OpenAI {
                config.llm.config.api_key = Some(api_key);
            }
        }
        if let Some(strategy) = std::env::var("SCHOLAR_SCHEDULER")
            .ok()
            .and_then(|s| StrategyKind::from_name(&s))
        {
            config.scheduling.strategy = strategy;
        }

        config
    }

    /// Reject settings the algorithms cannot run with.
    pub fn validate(&self) -> ScholarResult<()> {
        if self.scheduling.intervals_days.is_empty() {
            return Err(ScholarError::Configuration(
                "scheduling.intervals_days must not be empty".to_string(),
            ));
        }
        if self.scheduling.intervals_days.contains(&0) {
            return Err(ScholarError::Configuration(
                "scheduling.intervals_days entries must be at least 1 day".to_string(),
            ));
        }
        if self
            .scheduling
            .intervals_days
            .iter()
            .any(|&days| days > MAX_INTERVAL_DAYS)
        {
            return Err(ScholarError::Configuration(format!(
                "scheduling.intervals_days entries must not exceed {} days",
                MAX_INTERVAL_DAYS
            )));
        }
        if !self.scheduling.mastery_bonus.is_finite() || self.scheduling.mastery_bonus < 0.0 {
            return Err(ScholarError::Configuration(
                "scheduling.mastery_bonus must be a non-negative number".to_string(),
            ));
        }
        if self.extraction.min_phrase_len > self.extraction.max_phrase_len {
            return Err(ScholarError::Configuration(
                "extraction.min_phrase_len exceeds extraction.max_phrase_len".to_string(),
            ));
        }
        Ok(())
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> ScholarConfigBuilder {
        ScholarConfigBuilder::default()
    }
}

/// Builder for ScholarConfig.
#[derive(Default)]
pub struct ScholarConfigBuilder {
    config: ScholarConfig,
}

impl ScholarConfigBuilder {
    /// Set extraction configuration.
    pub fn extraction(mut self, config: ExtractionConfig) -> Self {
        self.config.extraction = config;
        self
    }

    /// Set scheduling configuration.
    pub fn scheduling(mut self, config: SchedulingConfig) -> Self {
        self.config.scheduling = config;
        self
    }

    /// Select the scheduling strategy.
    pub fn strategy(mut self, strategy: StrategyKind) -> Self {
        self.config.scheduling.strategy = strategy;
        self
    }

    /// Set quiz configuration.
    pub fn quiz(mut self, config: QuizConfig) -> Self {
        self.config.quiz = config;
        self
    }

    /// Set LLM configuration.
    pub fn llm(mut self, config: LlmProviderConfig) -> Self {
        self.config.llm = config;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ScholarResult<ScholarConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
