//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid AI request timeout")]
    InvalidAiTimeout,

    #[error("Temperature must be between 0 and 2")]
    InvalidTemperature,

    #[error("max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("AI base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("SOP path must not be empty")]
    MissingSopPath,

    #[error("Simulated speech delay must not exceed {max_ms} ms")]
    SpeechDelayTooLong { max_ms: u64 },

    #[error("Session TTL and max_sessions must be greater than zero")]
    InvalidSessionRetention,

    #[error("CORS origins must be listed explicitly; '*' is not allowed with credentials")]
    WildcardCorsOrigin,

    #[error("AI timeout ({ai_secs}s) must be shorter than the request timeout ({request_secs}s)")]
    AiTimeoutNotBelowRequestTimeout { ai_secs: u64, request_secs: u64 },
}
