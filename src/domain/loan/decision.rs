//! The loan decision captured from the officer's form.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{CurrencyAmount, ValidationError};

pub const MIN_CREDIT_SCORE: i64 = 300;
pub const MAX_CREDIT_SCORE: i64 = 850;

/// The officer's verdict on the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionOutcome {
    Approve,
    Deny,
    Conditional,
}

impl DecisionOutcome {
    /// Gerund used when talking about the decision ("approving this loan").
    pub fn gerund(&self) -> &'static str {
        match self {
            DecisionOutcome::Approve => "approving",
            DecisionOutcome::Deny => "denying",
            DecisionOutcome::Conditional => "conditionally approving",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionOutcome::Approve => "approve",
            DecisionOutcome::Deny => "deny",
            DecisionOutcome::Conditional => "conditional",
        }
    }
}

impl fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk level the officer assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Medium and high risk decisions warrant a scheduled follow-up.
    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskLevel::Medium | RiskLevel::High)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the loan is for. Unrecognised values collapse to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    #[default]
    HomePurchase,
    Refinance,
    CashOutRefinance,
    HomeEquity,
    SecondHome,
    InvestmentProperty,
    #[serde(other)]
    Other,
}

impl LoanPurpose {
    pub fn label(&self) -> &'static str {
        match self {
            LoanPurpose::HomePurchase => "Home purchase",
            LoanPurpose::Refinance => "Refinance",
            LoanPurpose::CashOutRefinance => "Cash-out refinance",
            LoanPurpose::HomeEquity => "Home equity",
            LoanPurpose::SecondHome => "Second home",
            LoanPurpose::InvestmentProperty => "Investment property",
            LoanPurpose::Other => "Other",
        }
    }
}

/// Raw decision as it arrives on the wire, before any invariant is checked.
///
/// Only the numeric profile, the decision and the risk level are mandatory.
/// Everything the form may leave blank has a default so that an incomplete
/// rationale can still be reviewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDecisionDraft {
    #[serde(default)]
    pub applicant_name: String,
    pub loan_amount: f64,
    pub credit_score: i64,
    pub annual_income: f64,
    pub debt_to_income_ratio: f64,
    pub employment_years: f64,
    #[serde(default)]
    pub loan_purpose: LoanPurpose,
    pub collateral_value: f64,
    pub decision: DecisionOutcome,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub conditions: Option<String>,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub follow_up_required: bool,
}

/// A structurally valid loan decision. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDecision {
    applicant_name: String,
    loan_amount: CurrencyAmount,
    credit_score: u16,
    annual_income: CurrencyAmount,
    debt_to_income_ratio: f64,
    employment_years: f64,
    loan_purpose: LoanPurpose,
    collateral_value: CurrencyAmount,
    decision: DecisionOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conditions: Option<String>,
    risk_level: RiskLevel,
    follow_up_required: bool,
}

impl TryFrom<LoanDecisionDraft> for LoanDecision {
    type Error = ValidationError;

    fn try_from(draft: LoanDecisionDraft) -> Result<Self, Self::Error> {
        let loan_amount = CurrencyAmount::try_new("loanAmount", draft.loan_amount)?;
        let annual_income = CurrencyAmount::try_new("annualIncome", draft.annual_income)?;
        let collateral_value = CurrencyAmount::try_new("collateralValue", draft.collateral_value)?;

        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&draft.credit_score) {
            return Err(ValidationError::out_of_range(
                "creditScore",
                MIN_CREDIT_SCORE as f64,
                MAX_CREDIT_SCORE as f64,
                draft.credit_score as f64,
            ));
        }

        let dti = draft.debt_to_income_ratio;
        if !dti.is_finite() || !(0.0..=100.0).contains(&dti) {
            return Err(ValidationError::out_of_range("debtToIncomeRatio", 0.0, 100.0, dti));
        }

        let years = draft.employment_years;
        if !years.is_finite() || years < 0.0 {
            return Err(ValidationError::invalid_format(
                "employmentYears",
                "must be a non-negative number of years",
            ));
        }

        Ok(Self {
            applicant_name: draft.applicant_name.trim().to_string(),
            loan_amount,
            credit_score: draft.credit_score as u16,
            annual_income,
            debt_to_income_ratio: dti,
            employment_years: years,
            loan_purpose: draft.loan_purpose,
            collateral_value,
            decision: draft.decision,
            reasoning: non_blank(draft.reasoning),
            conditions: non_blank(draft.conditions),
            risk_level: draft.risk_level,
            follow_up_required: draft.follow_up_required,
        })
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

impl LoanDecision {
    pub fn applicant_name(&self) -> &str {
        &self.applicant_name
    }

    /// Name to address the applicant by, falling back when the form left it blank.
    pub fn display_name(&self) -> &str {
        if self.applicant_name.is_empty() {
            "the applicant"
        } else {
            &self.applicant_name
        }
    }

    pub fn loan_amount(&self) -> CurrencyAmount {
        self.loan_amount
    }

    pub fn credit_score(&self) -> u16 {
        self.credit_score
    }

    pub fn annual_income(&self) -> CurrencyAmount {
        self.annual_income
    }

    pub fn debt_to_income_ratio(&self) -> f64 {
        self.debt_to_income_ratio
    }

    pub fn employment_years(&self) -> f64 {
        self.employment_years
    }

    pub fn loan_purpose(&self) -> LoanPurpose {
        self.loan_purpose
    }

    pub fn collateral_value(&self) -> CurrencyAmount {
        self.collateral_value
    }

    pub fn decision(&self) -> DecisionOutcome {
        self.decision
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning.as_deref()
    }

    pub fn conditions(&self) -> Option<&str> {
        self.conditions.as_deref()
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn follow_up_required(&self) -> bool {
        self.follow_up_required
    }

    /// Loan-to-value ratio as a percentage.
    pub fn ltv_percent(&self) -> f64 {
        self.loan_amount.value() / self.collateral_value.value() * 100.0
    }

    /// Loan amount as a multiple of annual income.
    pub fn loan_to_income(&self) -> f64 {
        self.loan_amount.value() / self.annual_income.value()
    }

    /// Fields the capture form requires before a decision counts as submitted.
    ///
    /// Returns every problem found, in form order. An empty list means the
    /// decision may be submitted.
    pub fn submission_problems(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();
        if self.reasoning.is_none() {
            problems.push(ValidationError::empty_field("reasoning"));
        }
        if self.decision == DecisionOutcome::Conditional && self.conditions.is_none() {
            problems.push(ValidationError::empty_field("conditions"));
        }
        problems
    }

    /// Fails with the first submission problem, if any.
    pub fn ensure_submittable(&self) -> Result<(), ValidationError> {
        match self.submission_problems().into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }
}
