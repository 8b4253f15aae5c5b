//! Property tests for id assignment, recommendation rules and the coach script.

use proptest::prelude::*;
use serde_json::json;

use loan_qa_coach::domain::coach::{
    coach_prompt, generate_recommendations, template_index, CoachSession, CoachState, Speaker,
    CLOSING_REMARK, LAST_TURN,
};
use loan_qa_coach::domain::foundation::CoachSessionId;
use loan_qa_coach::domain::loan::{
    DecisionOutcome, LoanDecision, LoanDecisionDraft, LoanPurpose, RiskLevel,
};
use loan_qa_coach::domain::quality::{generated_issue_id, parse_assessment, SopDocument};

fn outcome() -> impl Strategy<Value = DecisionOutcome> {
    prop_oneof![
        Just(DecisionOutcome::Approve),
        Just(DecisionOutcome::Deny),
        Just(DecisionOutcome::Conditional),
    ]
}

fn risk() -> impl Strategy<Value = RiskLevel> {
    prop_oneof![Just(RiskLevel::Low), Just(RiskLevel::Medium), Just(RiskLevel::High)]
}

fn any_decision() -> impl Strategy<Value = LoanDecision> {
    (
        outcome(),
        risk(),
        1_000.0f64..5_000_000.0,
        10_000.0f64..2_000_000.0,
        1_000.0f64..6_000_000.0,
        300i64..=850,
        0.0f64..=100.0,
    )
        .prop_map(|(decision, risk_level, loan, income, collateral, credit, dti)| {
            LoanDecision::try_from(LoanDecisionDraft {
                applicant_name: "Applicant".to_string(),
                loan_amount: loan,
                credit_score: credit,
                annual_income: income,
                debt_to_income_ratio: dti,
                employment_years: 2.0,
                loan_purpose: LoanPurpose::HomePurchase,
                collateral_value: collateral,
                decision,
                reasoning: Some("Reasoning".to_string()),
                conditions: Some("Conditions".to_string()),
                risk_level,
                follow_up_required: false,
            })
            .unwrap()
        })
}

proptest! {
    #[test]
    fn every_issue_gets_a_non_empty_id(ids in prop::collection::vec(prop::option::of("[ a-z0-9-]{0,8}"), 0..8)) {
        let issues: Vec<_> = ids
            .iter()
            .map(|id| {
                let mut issue = json!({
                    "category": "risk",
                    "severity": "info",
                    "title": "t",
                    "description": "d",
                    "suggestion": "s"
                });
                if let Some(id) = id {
                    issue["id"] = json!(id);
                }
                issue
            })
            .collect();
        let reply = json!({"issues": issues, "complianceScore": 50}).to_string();

        let result = parse_assessment(&reply).unwrap();

        prop_assert_eq!(result.issues.len(), ids.len());
        for (position, (issue, reported)) in result.issues.iter().zip(&ids).enumerate() {
            prop_assert!(!issue.id.is_empty());
            match reported.as_deref().map(str::trim) {
                Some(id) if !id.is_empty() => prop_assert_eq!(&issue.id, id),
                _ => prop_assert_eq!(&issue.id, &generated_issue_id(position)),
            }
        }
    }

    #[test]
    fn reported_score_is_clamped(score in -1_000.0f64..1_000.0) {
        let reply = json!({"issues": [], "complianceScore": score}).to_string();
        let result = parse_assessment(&reply).unwrap();
        prop_assert!(result.compliance_score.value() <= 100);
    }

    #[test]
    fn recommendation_rules_hold(decision in any_decision()) {
        let items = generate_recommendations(&decision);
        let ids: Vec<&str> = items.iter().map(|r| r.id.as_str()).collect();

        prop_assert!(ids.starts_with(&["1", "2", "3"]));
        prop_assert_eq!(
            ids.contains(&"4"),
            decision.decision() == DecisionOutcome::Conditional
        );
        prop_assert_eq!(
            ids.contains(&"5"),
            matches!(decision.risk_level(), RiskLevel::Medium | RiskLevel::High)
        );
        if decision.decision() == DecisionOutcome::Approve && decision.risk_level() == RiskLevel::Low {
            prop_assert_eq!(items.len(), 3);
        }
    }

    #[test]
    fn prompt_template_is_clamped(turn in any::<u8>(), decision in any_decision()) {
        prop_assert!(template_index(turn) <= LAST_TURN);
        if turn >= LAST_TURN {
            prop_assert_eq!(coach_prompt(turn, &decision), coach_prompt(LAST_TURN, &decision));
        }
    }

    #[test]
    fn three_prompts_precede_closing(decision in any_decision(), answers in prop::collection::vec(".{0,40}", 3)) {
        let mut session = CoachSession::new(CoachSessionId::new(), decision);
        session.start().unwrap();
        for answer in &answers {
            session.finish_playback().unwrap();
            session.begin_processing().unwrap();
            session.record_answer(answer.clone()).unwrap();
        }
        session.finish_playback().unwrap();

        prop_assert_eq!(session.state(), CoachState::Completed);
        let coach: Vec<_> = session
            .conversation()
            .iter()
            .filter(|t| t.speaker == Speaker::Coach)
            .collect();
        prop_assert_eq!(coach.len(), 4);
        prop_assert_eq!(coach[3].message.as_str(), CLOSING_REMARK);
        prop_assert_eq!(session.prompts_asked(), 3);
    }

    #[test]
    fn sop_fingerprint_depends_only_on_content(text in ".{0,200}") {
        let a = SopDocument::from_text(text.clone());
        let b = SopDocument::from_text(text);
        prop_assert_eq!(a.fingerprint(), b.fingerprint());
    }
}
