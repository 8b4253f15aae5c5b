//! The `{ "loanDecision": ... }` envelope accepted by decision endpoints.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;

use super::error::ErrorResponse;
use crate::domain::loan::{LoanDecision, LoanDecisionDraft};

pub const MISSING_DECISION: &str = "Loan decision data is required";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDecisionRequest {
    #[serde(default)]
    pub loan_decision: Option<LoanDecisionDraft>,
}

/// Turns an extracted request body into a structurally valid decision.
///
/// A body that is not JSON, a missing or `null` `loanDecision`, and a decision
/// that fails structural validation are all client errors.
pub fn decision_from_body(
    body: Result<Json<LoanDecisionRequest>, JsonRejection>,
) -> Result<LoanDecision, ErrorResponse> {
    let Json(request) = body.map_err(|rejection| match rejection {
        JsonRejection::JsonDataError(e) => {
            ErrorResponse::bad_request(format!("Invalid loan decision: {}", e.body_text()))
        }
        _ => ErrorResponse::bad_request(MISSING_DECISION),
    })?;

    let draft = request
        .loan_decision
        .ok_or_else(|| ErrorResponse::bad_request(MISSING_DECISION))?;

    LoanDecision::try_from(draft)
        .map_err(|e| ErrorResponse::bad_request(format!("Invalid loan decision: {}", e)))
}
