//! RunQualityCheckHandler - Reviews a loan decision against the SOP.
//!
//! Every decision gets a result. When the model call or its reply fails, the
//! handler returns the fixed degraded result together with the cause, and the
//! caller decides how to surface it.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::loan::LoanDecision;
use crate::domain::quality::{
    parse_assessment, system_prompt, user_prompt, QualityCheckResult, Severity, SopDocument,
};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole};

/// Why a review fell back to the degraded result.
#[derive(Debug, Error)]
pub enum QualityCheckError {
    #[error("AI provider call failed: {0}")]
    Provider(#[from] AIError),

    #[error("AI provider returned no content")]
    EmptyResponse,

    #[error("AI provider returned an unusable assessment: {0}")]
    MalformedResponse(String),
}

impl QualityCheckError {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            QualityCheckError::Provider(e) => e.kind(),
            QualityCheckError::EmptyResponse => "empty_response",
            QualityCheckError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Generation settings for the review call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityCheckSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for QualityCheckSettings {
    fn default() -> Self {
        Self {
            max_tokens: 2000,
            temperature: 0.1,
        }
    }
}

/// Command to review one decision.
#[derive(Debug, Clone)]
pub struct RunQualityCheckCommand {
    pub decision: LoanDecision,
}

/// What a review produced.
#[derive(Debug)]
pub enum QualityCheckOutcome {
    /// The model reviewed the decision.
    Reviewed(QualityCheckResult),
    /// The review could not be completed; `result` is the degraded fallback.
    Degraded {
        result: QualityCheckResult,
        cause: QualityCheckError,
    },
}

impl QualityCheckOutcome {
    pub fn result(&self) -> &QualityCheckResult {
        match self {
            QualityCheckOutcome::Reviewed(result) => result,
            QualityCheckOutcome::Degraded { result, .. } => result,
        }
    }

    pub fn into_result(self) -> QualityCheckResult {
        match self {
            QualityCheckOutcome::Reviewed(result) => result,
            QualityCheckOutcome::Degraded { result, .. } => result,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, QualityCheckOutcome::Degraded { .. })
    }
}

/// Handler for quality reviews.
pub struct RunQualityCheckHandler {
    provider: Arc<dyn AIProvider>,
    sop: Arc<SopDocument>,
    settings: QualityCheckSettings,
}

impl RunQualityCheckHandler {
    pub fn new(
        provider: Arc<dyn AIProvider>,
        sop: Arc<SopDocument>,
        settings: QualityCheckSettings,
    ) -> Self {
        Self {
            provider,
            sop,
            settings,
        }
    }

    /// Reviews the decision. Never fails; see [`QualityCheckOutcome`].
    pub async fn handle(&self, cmd: RunQualityCheckCommand) -> QualityCheckOutcome {
        let model = self.provider.provider_info().model;

        match self.review(&cmd.decision).await {
            Ok(result) => {
                info!(
                    model = %model,
                    issues = result.issues.len(),
                    critical = result.count_by_severity(Severity::Critical),
                    highest_severity = ?result.highest_severity(),
                    score = result.compliance_score.value(),
                    decision = %cmd.decision.decision(),
                    "Quality check completed"
                );
                QualityCheckOutcome::Reviewed(result)
            }
            Err(cause) => {
                warn!(
                    model = %model,
                    cause = cause.kind(),
                    error = %cause,
                    "Quality check degraded"
                );
                QualityCheckOutcome::Degraded {
                    result: QualityCheckResult::degraded(),
                    cause,
                }
            }
        }
    }

    async fn review(&self, decision: &LoanDecision) -> Result<QualityCheckResult, QualityCheckError> {
        let request = CompletionRequest::new()
            .with_system_prompt(system_prompt(&self.sop))
            .with_message(MessageRole::User, user_prompt(decision))
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature)
            .with_json_output();

        let response = self.provider.complete(request).await?;
        if response.content.trim().is_empty() {
            return Err(QualityCheckError::EmptyResponse);
        }

        parse_assessment(&response.content)
            .map_err(|e| QualityCheckError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, UnconfiguredProvider};
    use crate::domain::loan::fixtures;
    use serde_json::json;

    const SOP_TEXT: &str = "SECTION 4: DTI must not exceed 43%.";

    fn handler(provider: Arc<dyn AIProvider>) -> RunQualityCheckHandler {
        RunQualityCheckHandler::new(
            provider,
            Arc::new(SopDocument::from_text(SOP_TEXT)),
            QualityCheckSettings::default(),
        )
    }

    fn command() -> RunQualityCheckCommand {
        RunQualityCheckCommand {
            decision: fixtures::reference_decision(),
        }
    }

    #[tokio::test]
    async fn successful_review_is_normalised() {
        let provider = MockAIProvider::new().with_assessment(json!({
            "issues": [{"category": "calculation", "severity": "info", "title": "LTV",
                "description": "LTV missing", "suggestion": "Add LTV"}],
            "strengths": ["Verified income"],
            "overallAssessment": "Good",
            "complianceScore": 88.4
        }));
        let outcome = handler(Arc::new(provider.clone())).handle(command()).await;

        assert!(!outcome.is_degraded());
        let result = outcome.into_result();
        assert_eq!(result.issues[0].id, "ai-issue-1");
        assert_eq!(result.compliance_score.value(), 88);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn request_embeds_sop_and_settings() {
        let provider = MockAIProvider::new();
        handler(Arc::new(provider.clone())).handle(command()).await;

        let call = &provider.calls()[0];
        assert!(call.system_prompt.ends_with(SOP_TEXT));
        assert!(call.user_prompt.contains("Loan Amount: $450,000"));
        assert_eq!(call.max_tokens, Some(2000));
        assert_eq!(call.temperature, Some(0.1));
        assert!(call.json_output);
    }

    #[tokio::test]
    async fn provider_error_degrades() {
        let provider = MockAIProvider::new().with_error(AIError::network("connection reset"));
        let outcome = handler(Arc::new(provider)).handle(command()).await;

        match outcome {
            QualityCheckOutcome::Degraded { result, cause } => {
                assert_eq!(result, QualityCheckResult::degraded());
                assert!(matches!(cause, QualityCheckError::Provider(AIError::Network(_))));
            }
            other => panic!("expected degraded outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_content_degrades() {
        let provider = MockAIProvider::new().with_raw_reply("   ");
        let outcome = handler(Arc::new(provider)).handle(command()).await;
        assert!(matches!(
            outcome,
            QualityCheckOutcome::Degraded {
                cause: QualityCheckError::EmptyResponse,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn malformed_content_degrades() {
        let provider = MockAIProvider::new().with_raw_reply("Sure! Here is my review.");
        let outcome = handler(Arc::new(provider)).handle(command()).await;
        assert!(matches!(
            outcome,
            QualityCheckOutcome::Degraded {
                cause: QualityCheckError::MalformedResponse(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unconfigured_provider_degrades() {
        let outcome = handler(Arc::new(UnconfiguredProvider::new("gpt-4o")))
            .handle(command())
            .await;
        assert!(outcome.is_degraded());
        assert_eq!(outcome.result().compliance_score.value(), 0);
    }

    #[test]
    fn degraded_causes_have_log_labels() {
        assert_eq!(QualityCheckError::Provider(AIError::NotConfigured).kind(), "not_configured");
        assert_eq!(QualityCheckError::EmptyResponse.kind(), "empty_response");
        assert_eq!(
            QualityCheckError::MalformedResponse("eof".into()).kind(),
            "malformed_response"
        );
    }
}
