//! Loan decision capture.
//!
//! The officer's decision is the single input to both the quality check and
//! the coach conversation.

mod decision;

#[cfg(test)]
pub(crate) use decision::fixtures;
pub use decision::{
    DecisionOutcome, LoanDecision, LoanDecisionDraft, LoanPurpose, RiskLevel, MAX_CREDIT_SCORE,
    MIN_CREDIT_SCORE,
};
