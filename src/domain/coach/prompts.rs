//! Scripted coach lines.

use super::state::LAST_TURN;
use crate::domain::loan::LoanDecision;

pub const CLOSING_REMARK: &str = "Thank you for that reflection. This concludes our QA conversation. I've generated some recommendations for you to review.";

/// The coach prompt for `turn`. Turns past the last template reuse it.
pub fn coach_prompt(turn: u8, decision: &LoanDecision) -> String {
    match template_index(turn) {
        0 => format!(
            "I'd like to understand your reasoning for {} this loan for {}. Can you walk me through the key factors that influenced your decision?",
            decision.decision().gerund(),
            decision.display_name()
        ),
        1 => format!(
            "That's helpful context. Given that the loan amount is ${} against an income of ${}, did you consider the payment-to-income ratio in your analysis?",
            decision.loan_amount(),
            decision.annual_income()
        ),
        _ => "Looking at this application holistically, what do you see as the primary risk factors, and how did you weigh them against the positive indicators?".to_string(),
    }
}

/// Which template a turn maps to, never past the last one.
pub fn template_index(turn: u8) -> u8 {
    turn.min(LAST_TURN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::loan::{fixtures, DecisionOutcome, RiskLevel};

    #[test]
    fn first_prompt_names_decision_and_applicant() {
        let prompt = coach_prompt(0, &fixtures::reference_decision());
        assert_eq!(
            prompt,
            "I'd like to understand your reasoning for approving this loan for Sarah Chen. Can you walk me through the key factors that influenced your decision?"
        );

        let conditional = fixtures::decision_with(DecisionOutcome::Conditional, RiskLevel::Low);
        assert!(coach_prompt(0, &conditional).contains("conditionally approving"));
        let denied = fixtures::decision_with(DecisionOutcome::Deny, RiskLevel::High);
        assert!(coach_prompt(0, &denied).contains("for denying this loan"));
    }

    #[test]
    fn second_prompt_quotes_grouped_amounts() {
        let prompt = coach_prompt(1, &fixtures::reference_decision());
        assert!(prompt.contains("the loan amount is $450,000 against an income of $95,000"));
    }

    #[test]
    fn turns_past_the_script_reuse_last_template() {
        let decision = fixtures::reference_decision();
        assert_eq!(coach_prompt(7, &decision), coach_prompt(2, &decision));
        assert_eq!(template_index(u8::MAX), LAST_TURN);
    }
}
