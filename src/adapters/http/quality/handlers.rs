//! HTTP handlers for quality review endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::decision_payload::{decision_from_body, LoanDecisionRequest};
use crate::application::handlers::quality::{
    QualityCheckOutcome, RunQualityCheckCommand, RunQualityCheckHandler,
};

use super::dto::ValidationReport;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct QualityHandlers {
    run_handler: Arc<RunQualityCheckHandler>,
}

impl QualityHandlers {
    pub fn new(run_handler: Arc<RunQualityCheckHandler>) -> Self {
        Self { run_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/quality-check - Review a decision against the SOP
///
/// A degraded review is still a full result body, sent with status 500.
pub async fn quality_check(
    State(handlers): State<QualityHandlers>,
    body: Result<Json<LoanDecisionRequest>, JsonRejection>,
) -> Response {
    let decision = match decision_from_body(body) {
        Ok(decision) => decision,
        Err(error) => return (StatusCode::BAD_REQUEST, Json(error)).into_response(),
    };

    match handlers
        .run_handler
        .handle(RunQualityCheckCommand { decision })
        .await
    {
        QualityCheckOutcome::Reviewed(result) => (StatusCode::OK, Json(result)).into_response(),
        QualityCheckOutcome::Degraded { result, .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(result)).into_response()
        }
    }
}

/// POST /api/decisions/validate - Check a decision is ready for submission
pub async fn validate_decision(body: Result<Json<LoanDecisionRequest>, JsonRejection>) -> Response {
    match decision_from_body(body) {
        Ok(decision) => {
            let report = ValidationReport::from_problems(&decision.submission_problems());
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(error) => (StatusCode::BAD_REQUEST, Json(error)).into_response(),
    }
}
