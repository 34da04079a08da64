//! Error types for scholar operations.
//!
//! The pure components (extraction, classification, graph linking) never fail.
//! Errors surface from the review scheduler (invalid quiz scores), from
//! configuration loading, and from the AI collaborators behind the
//! quiz/enrichment seams.

use thiserror::Error;

/// Result type alias for scholar operations.
pub type ScholarResult<T> = Result<T, ScholarError>;

/// Main error type for all scholar operations.
#[derive(Error, Debug)]
pub enum ScholarError {
    /// Input validation failed.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        code: ErrorCode,
        suggestion: Option<String>,
    },

    /// A quiz score was not a finite percentage in `[0, 100]`.
    #[error("Invalid score: {score} (expected a finite percentage between 0 and 100)")]
    InvalidScore { score: f64 },

    /// LLM operation failed.
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Parse error.
    #[error("Parse error: {message}")]
    Parse { message: String, code: ErrorCode },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider not supported.
    #[error("Provider not supported: {provider}")]
    UnsupportedProvider { provider: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (VAL_xxx)
    ValInvalidInput,

    // Scheduling (SCH_xxx)
    SchInvalidScore,

    // LLM (LLM_xxx)
    LlmConnectionFailed,
    LlmGenerationFailed,
    LlmInvalidResponse,

    // Parse (PARSE_xxx)
    ParseInvalidJson,

    // Configuration
    Configuration,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::SchInvalidScore => "SCH_001",
            ErrorCode::LlmConnectionFailed => "LLM_001",
            ErrorCode::LlmGenerationFailed => "LLM_002",
            ErrorCode::LlmInvalidResponse => "LLM_003",
            ErrorCode::ParseInvalidJson => "PARSE_001",
            ErrorCode::Configuration => "CFG_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl ScholarError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            suggestion: None,
        }
    }

    /// Create a validation error with suggestion.
    pub fn validation_with_suggestion(
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            suggestion: Some(suggestion.into()),
        }
    }

    /// Create an invalid score error.
    pub fn invalid_score(score: f64) -> Self {
        Self::InvalidScore { score }
    }

    /// Create an LLM error.
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            code: ErrorCode::LlmGenerationFailed,
            source: None,
        }
    }

    /// Create an error for a provider that could not be reached.
    pub fn llm_connection(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            code: ErrorCode::LlmConnectionFailed,
            source: None,
        }
    }

    /// Create an error for a reply with no usable content.
    pub fn llm_invalid_response(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            code: ErrorCode::LlmInvalidResponse,
            source: None,
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            code: ErrorCode::ParseInvalidJson,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::InvalidScore { .. } => ErrorCode::SchInvalidScore,
            Self::Llm { code, .. } => *code,
            Self::Parse { code, .. } => *code,
            Self::Configuration(_) | Self::UnsupportedProvider { .. } => ErrorCode::Configuration,
            Self::Serialization(_) => ErrorCode::ParseInvalidJson,
            Self::Io(_) => ErrorCode::Internal,
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Validation { suggestion, .. } => suggestion.as_deref(),
            Self::InvalidScore { .. } => {
                Some("Pass the quiz score as a percentage between 0 and 100")
            }
            Self::Llm { .. } => Some("Please check your LLM provider configuration"),
            Self::UnsupportedProvider { .. } => {
                Some("Supported providers are openai, anthropic and ollama")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = ScholarError::validation("Invalid input");
        assert_eq!(err.code(), ErrorCode::ValInvalidInput);
        assert!(err.to_string().contains("Invalid input"));
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn test_invalid_score_error() {
        let err = ScholarError::invalid_score(150.0);
        assert_eq!(err.code(), ErrorCode::SchInvalidScore);
        assert_eq!(err.code().as_str(), "SCH_001");
        assert!(err.to_string().contains("150"));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
        let err: ScholarError = io_err.into();
        assert_eq!(err.code(), ErrorCode::Internal);
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_llm_error_codes() {
        assert_eq!(ScholarError::llm("x").code().as_str(), "LLM_002");
        assert_eq!(
            ScholarError::llm_connection("refused").code(),
            ErrorCode::LlmConnectionFailed
        );
        let err = ScholarError::llm_invalid_response("empty");
        assert_eq!(err.code().as_str(), "LLM_003");
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ScholarError = parse_err.into();
        assert_eq!(err.code(), ErrorCode::ParseInvalidJson);
    }
}
