//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `LOAN_QA` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use loan_qa_coach::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod coach;
mod error;
mod policy;
mod server;

pub use ai::AiConfig;
pub use coach::CoachConfig;
pub use error::{ConfigError, ValidationError};
pub use policy::PolicyConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Legacy variable names still honoured on top of the prefixed ones.
const LEGACY_OVERRIDES: [(&str, &str); 3] = [
    ("PORT", "server.port"),
    ("FRONTEND_URL", "server.cors_origins"),
    ("OPENAI_API_KEY", "ai.openai_api_key"),
];

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development server (with degraded AI reviews).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// OpenAI-compatible provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// SOP document location
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Simulated speech latency for the coach
    #[serde(default)]
    pub coach: CoachConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LOAN_QA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies `PORT`, `FRONTEND_URL` and `OPENAI_API_KEY` when set
    ///
    /// # Environment Variable Format
    ///
    /// - `LOAN_QA__SERVER__PORT=3001` -> `server.port = 3001`
    /// - `LOAN_QA__AI__MODEL=gpt-4o` -> `ai.model = "gpt-4o"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder().add_source(
            config::Environment::default()
                .prefix("LOAN_QA")
                .separator("__"),
        );
        for (var, key) in LEGACY_OVERRIDES {
            let value = std::env::var(var).ok().filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.policy.validate()?;
        self.coach.validate()?;

        // A slow model must time out in the client, where it degrades, not
        // in the request layer.
        if self.ai.timeout_secs >= self.server.request_timeout_secs {
            return Err(ValidationError::AiTimeoutNotBelowRequestTimeout {
                ai_secs: self.ai.timeout_secs,
                request_secs: self.server.request_timeout_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
