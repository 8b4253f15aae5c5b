//! Prompt construction for the quality review.

use super::policy::SopDocument;
use crate::domain::loan::LoanDecision;

const SPECIALIST_INSTRUCTION: &str = "You are an experienced Operations Quality Assurance specialist with 15+ years in mortgage lending and underwriting. You are an expert at identifying potential errors, policy violations, and areas for improvement in loan decisioning.

Your role is to conduct a comprehensive quality assurance review of loan decisions, assessments, and rationales based strictly on the Standard Operating Procedure (SOP) provided as the authoritative source of truth.

CRITICAL INSTRUCTIONS:
1. The SOP is your ONLY source of truth for policy requirements
2. Identify ANY deviations from SOP requirements as issues
3. Provide constructive feedback to help operators improve
4. Recognize what has been done correctly according to the SOP
5. Be thorough but practical in your assessment
6. Focus on compliance, risk management, and decision quality

ASSESSMENT CRITERIA:
- Policy Compliance: Does the decision follow SOP requirements?
- Risk Assessment: Is the risk level appropriate for the application profile?
- Decision Rationale: Is the reasoning complete, clear, and well-supported?
- Calculation Accuracy: Are DTI, LTV, and other ratios calculated correctly?
- Documentation Quality: Are all required elements present and adequate?
- Regulatory Compliance: Does the decision meet fair lending and other regulatory requirements?

Provide specific, actionable feedback with SOP references where applicable.

SOP (SOURCE OF TRUTH):
";

const RESPONSE_SHAPE: &str = r#"Based on the SOP requirements, analyze this decision for:
1. Policy compliance violations
2. Risk assessment accuracy
3. Decision rationale quality
4. Missing or inadequate documentation
5. Calculation errors
6. Areas of strength and good practice

Provide your assessment in the following JSON format:
{
  "issues": [
    {
      "id": "unique_id",
      "category": "decision|risk|rationale|conditions|calculation|compliance",
      "severity": "critical|warning|info",
      "title": "Clear issue title",
      "description": "Detailed description of the issue",
      "suggestion": "Specific action to resolve the issue",
      "sopReference": "Relevant SOP section (optional)"
    }
  ],
  "strengths": [
    "List of things done correctly according to SOP"
  ],
  "overallAssessment": "Summary of the overall quality and compliance",
  "complianceScore": 85
}"#;

/// System instruction with the full SOP appended.
pub fn system_prompt(sop: &SopDocument) -> String {
    let mut prompt = String::with_capacity(SPECIALIST_INSTRUCTION.len() + sop.text().len());
    prompt.push_str(SPECIALIST_INSTRUCTION);
    prompt.push_str(sop.text());
    prompt
}

/// User prompt describing the decision under review.
pub fn user_prompt(decision: &LoanDecision) -> String {
    format!(
        "Please conduct a comprehensive quality assurance review of this loan decision:

**APPLICATION DETAILS:**
- Applicant: {applicant}
- Loan Amount: ${loan_amount}
- Annual Income: ${annual_income}
- Credit Score: {credit_score}
- Debt-to-Income Ratio: {dti}%
- Collateral Value: ${collateral}
- Employment Years: {employment}
- Loan Purpose: {purpose}

**DECISION:**
- Decision: {outcome}
- Risk Level: {risk}

**DECISION RATIONALE:**
{reasoning}

**CONDITIONS (if applicable):**
{conditions}

{shape}",
        applicant = decision.applicant_name(),
        loan_amount = decision.loan_amount(),
        annual_income = decision.annual_income(),
        credit_score = decision.credit_score(),
        dti = decision.debt_to_income_ratio(),
        collateral = decision.collateral_value(),
        employment = decision.employment_years(),
        purpose = decision.loan_purpose().label(),
        outcome = decision.decision().as_str().to_uppercase(),
        risk = decision.risk_level().as_str().to_uppercase(),
        reasoning = decision.reasoning().unwrap_or("No rationale provided"),
        conditions = decision.conditions().unwrap_or("None specified"),
        shape = RESPONSE_SHAPE,
    )
}
