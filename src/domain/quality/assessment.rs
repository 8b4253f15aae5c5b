//! Interpretation of the model's JSON assessment.
//!
//! The model is asked for a fixed JSON shape but is not trusted to follow it
//! exactly. Missing issue ids are filled in, the score is normalised, and
//! optional sections default to empty. Anything that cannot be read as the
//! expected shape is rejected so the caller can degrade.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::issue::{IssueCategory, QualityCheckIssue, Severity};
use super::result::QualityCheckResult;
use crate::domain::foundation::ComplianceScore;

/// The model's reply could not be turned into a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed assessment: {0}")]
pub struct MalformedAssessment(pub String);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAssessment {
    issues: Vec<RawIssue>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    overall_assessment: String,
    compliance_score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIssue {
    #[serde(default)]
    id: Option<Value>,
    category: IssueCategory,
    severity: Severity,
    title: String,
    description: String,
    #[serde(default)]
    suggestion: String,
    #[serde(default)]
    sop_reference: Option<String>,
}

/// Id given to the issue at `position` (zero-based) when the model left it blank.
pub fn generated_issue_id(position: usize) -> String {
    format!("ai-issue-{}", position + 1)
}

/// Parses the model's reply into a normalised result.
pub fn parse_assessment(content: &str) -> Result<QualityCheckResult, MalformedAssessment> {
    let raw: RawAssessment =
        serde_json::from_str(content).map_err(|e| MalformedAssessment(e.to_string()))?;

    let compliance_score = ComplianceScore::from_reported(raw.compliance_score)
        .map_err(|e| MalformedAssessment(e.to_string()))?;

    let issues = raw
        .issues
        .into_iter()
        .enumerate()
        .map(|(position, issue)| QualityCheckIssue {
            id: reported_id(issue.id).unwrap_or_else(|| generated_issue_id(position)),
            category: issue.category,
            severity: issue.severity,
            title: issue.title,
            description: issue.description,
            suggestion: issue.suggestion,
            sop_reference: issue
                .sop_reference
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
        })
        .collect();

    Ok(QualityCheckResult {
        issues,
        strengths: raw.strengths,
        overall_assessment: raw.overall_assessment,
        compliance_score,
    })
}

// Models occasionally number their issues instead of naming them.
fn reported_id(id: Option<Value>) -> Option<String> {
    match id? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue_json(id: Option<&str>) -> String {
        let id_field = match id {
            Some(id) => format!(r#""id": {},"#, id),
            None => String::new(),
        };
        format!(
            r#"{{ {} "category": "rationale", "severity": "warning",
                "title": "Thin rationale", "description": "Rationale is brief.",
                "suggestion": "Expand it." }}"#,
            id_field
        )
    }

    #[test]
    fn parses_complete_assessment() {
        let content = r#"{
            "issues": [{
                "id": "ltv-missing", "category": "calculation", "severity": "info",
                "title": "LTV not stated", "description": "No LTV in rationale.",
                "suggestion": "State LTV.", "sopReference": "Section 3.1"
            }],
            "strengths": ["Credit score verified"],
            "overallAssessment": "Mostly compliant.",
            "complianceScore": 85
        }"#;
        let result = parse_assessment(content).unwrap();
        assert_eq!(result.issues[0].id, "ltv-missing");
        assert_eq!(result.issues[0].sop_reference.as_deref(), Some("Section 3.1"));
        assert_eq!(result.strengths, vec!["Credit score verified"]);
        assert_eq!(result.compliance_score.value(), 85);
    }

    #[test]
    fn missing_and_blank_ids_use_document_position() {
        let content = format!(
            r#"{{"issues": [{}, {}, {}, {}], "complianceScore": 70}}"#,
            issue_json(None),
            issue_json(Some(r#""keep-me""#)),
            issue_json(Some(r#""  ""#)),
            issue_json(Some("null")),
        );
        let result = parse_assessment(&content).unwrap();
        let ids: Vec<&str> = result.issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["ai-issue-1", "keep-me", "ai-issue-3", "ai-issue-4"]);
    }

    #[test]
    fn numeric_ids_are_kept_as_text() {
        let content = format!(
            r#"{{"issues": [{}], "complianceScore": 70}}"#,
            issue_json(Some("7"))
        );
        assert_eq!(parse_assessment(&content).unwrap().issues[0].id, "7");
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let result = parse_assessment(r#"{"issues": [], "complianceScore": 100}"#).unwrap();
        assert!(result.strengths.is_empty());
        assert_eq!(result.overall_assessment, "");
        assert_eq!(result.compliance_score.value(), 100);
    }

    #[test]
    fn score_is_rounded_and_clamped() {
        let high = parse_assessment(r#"{"issues": [], "complianceScore": 130.2}"#).unwrap();
        assert_eq!(high.compliance_score.value(), 100);
        let low = parse_assessment(r#"{"issues": [], "complianceScore": -4}"#).unwrap();
        assert_eq!(low.compliance_score.value(), 0);
        let frac = parse_assessment(r#"{"issues": [], "complianceScore": 72.5}"#).unwrap();
        assert_eq!(frac.compliance_score.value(), 73);
    }

    #[test]
    fn rejects_non_json() {
        assert!(parse_assessment("not json at all").is_err());
        assert!(parse_assessment("").is_err());
    }

    #[test]
    fn rejects_schema_violations() {
        assert!(parse_assessment(r#"{"complianceScore": 80}"#).is_err());
        assert!(parse_assessment(r#"{"issues": []}"#).is_err());
        assert!(parse_assessment(r#"{"issues": {}, "complianceScore": 80}"#).is_err());

        let bad_category = r#"{"issues": [{"category": "weather", "severity": "info",
            "title": "t", "description": "d"}], "complianceScore": 80}"#;
        assert!(parse_assessment(bad_category).is_err());
    }
}
