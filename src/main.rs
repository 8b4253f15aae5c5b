//! Loan QA Coach server binary.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use loan_qa_coach::adapters::ai::{OpenAIConfig, OpenAIProvider, UnconfiguredProvider};
use loan_qa_coach::adapters::http::{api_router, AppState, RouterOptions};
use loan_qa_coach::adapters::policy::load_sop;
use loan_qa_coach::adapters::speech::{CannedTranscriptionProvider, MockSpeechSynthesizer};
use loan_qa_coach::adapters::storage::{InMemoryCoachSessionStore, SessionRetention};
use loan_qa_coach::application::QualityCheckSettings;
use loan_qa_coach::config::{AiConfig, AppConfig};
use loan_qa_coach::ports::AIProvider;

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    }
}

fn ai_provider(config: &AiConfig) -> Result<Arc<dyn AIProvider>> {
    match config.openai_key() {
        Some(key) => {
            let provider = OpenAIProvider::new(
                OpenAIConfig::new(key)
                    .with_model(config.model.clone())
                    .with_base_url(config.base_url.clone())
                    .with_timeout(config.timeout()),
            )
            .context("failed to build OpenAI client")?;
            info!(model = %config.model, base_url = %config.base_url, "OpenAI provider configured");
            Ok(Arc::new(provider))
        }
        None => {
            warn!("OPENAI_API_KEY is not set, quality checks will return the degraded result");
            Ok(Arc::new(UnconfiguredProvider::new(config.model.clone())))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_logging(&config);
    config.validate().context("invalid configuration")?;

    let sop = load_sop(&config.policy.sop_path)
        .await
        .context("failed to load SOP document")?;
    info!(
        path = %config.policy.sop_path.display(),
        fingerprint = %sop.short_fingerprint(),
        bytes = sop.text().len(),
        "SOP loaded"
    );

    let state = AppState::new(
        ai_provider(&config.ai)?,
        Arc::new(sop),
        QualityCheckSettings {
            max_tokens: config.ai.max_tokens,
            temperature: config.ai.temperature,
        },
        Arc::new(InMemoryCoachSessionStore::new().with_retention(SessionRetention {
            idle_ttl: config.coach.session_ttl(),
            max_sessions: config.coach.max_sessions,
        })),
        Arc::new(CannedTranscriptionProvider::random().with_delay(config.coach.transcription_delay())),
        Arc::new(MockSpeechSynthesizer::new().with_delay(config.coach.synthesis_delay())),
    );
    let app = api_router(
        state,
        &RouterOptions {
            cors_origins: config.server.cors_origins_list(),
            request_timeout: config.server.request_timeout(),
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(address = %addr, environment = ?config.server.environment, "Loan QA server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Loan QA server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
