//! The outcome of a quality review.

use serde::{Deserialize, Serialize};

use super::issue::{IssueCategory, QualityCheckIssue, Severity};
use crate::domain::foundation::ComplianceScore;

/// Identifier of the single issue carried by a degraded result.
pub const DEGRADED_ISSUE_ID: &str = "api-error";

/// Findings, strengths and an overall score for one loan decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityCheckResult {
    pub issues: Vec<QualityCheckIssue>,
    pub strengths: Vec<String>,
    pub overall_assessment: String,
    pub compliance_score: ComplianceScore,
}

impl QualityCheckResult {
    /// The fixed result reported whenever the model review cannot be completed.
    ///
    /// Always identical, so repeated failures serialize to the same bytes.
    pub fn degraded() -> Self {
        Self {
            issues: vec![QualityCheckIssue {
                id: DEGRADED_ISSUE_ID.to_string(),
                category: IssueCategory::Compliance,
                severity: Severity::Warning,
                title: "AI Quality Check Unavailable".to_string(),
                description: "Unable to perform AI-powered quality check. Please review manually according to SOP.".to_string(),
                suggestion: "Check server configuration or try again later.".to_string(),
                sop_reference: None,
            }],
            strengths: vec!["Decision submitted for review".to_string()],
            overall_assessment:
                "AI quality check temporarily unavailable. Manual review recommended.".to_string(),
            compliance_score: ComplianceScore::ZERO,
        }
    }

    /// True when this is the fallback result rather than a real review.
    pub fn is_degraded(&self) -> bool {
        self.issues.len() == 1 && self.issues[0].id == DEGRADED_ISSUE_ID
    }

    /// Number of issues at the given severity.
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Most serious severity among the issues, if any were raised.
    pub fn highest_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).max()
    }
}
