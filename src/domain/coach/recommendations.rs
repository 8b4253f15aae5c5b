//! Follow-up recommendations produced at the end of a coach session.

use serde::{Deserialize, Serialize};

use crate::domain::loan::{DecisionOutcome, LoanDecision};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One checklist item the officer can tick off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub text: String,
    pub priority: Priority,
    pub completed: bool,
}

impl Recommendation {
    fn new(id: &str, text: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: id.to_string(),
            text: text.into(),
            priority,
            completed: false,
        }
    }
}

/// Builds the recommendation list for a decision.
///
/// Three items always apply. Conditional approvals add a timeline item and
/// elevated risk adds a follow-up review.
pub fn generate_recommendations(decision: &LoanDecision) -> Vec<Recommendation> {
    let ltv = decision.ltv_percent().round() as i64;

    let mut items = vec![
        Recommendation::new(
            "1",
            format!("Update rationale to include specific LTV calculation ({}%)", ltv),
            Priority::High,
        ),
        Recommendation::new(
            "2",
            "Document consideration of employment stability vs. loan amount",
            Priority::Medium,
        ),
        Recommendation::new(
            "3",
            "Add note about comparable market analysis for collateral valuation",
            Priority::Medium,
        ),
    ];

    if decision.decision() == DecisionOutcome::Conditional {
        items.push(Recommendation::new(
            "4",
            "Specify timeline for condition fulfillment",
            Priority::High,
        ));
    }

    if decision.risk_level().is_elevated() {
        items.push(Recommendation::new(
            "5",
            "Schedule follow-up review in 6 months",
            Priority::Low,
        ));
    }

    items
}
