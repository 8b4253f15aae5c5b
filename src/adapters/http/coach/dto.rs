//! Response DTOs for coach session endpoints.

use serde::Serialize;

use crate::domain::coach::{CoachSession, CoachState, ConversationTurn, Recommendation};
use crate::domain::foundation::Timestamp;
use crate::domain::loan::LoanDecision;

/// Checklist progress, e.g. 2 of 5 recommendations done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    pub done: usize,
    pub total: usize,
}

/// Full view of a coach session as the client renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachSessionView {
    pub id: String,
    pub state: CoachState,
    pub loan_decision: LoanDecision,
    pub conversation: Vec<ConversationTurn>,
    pub recommendations: Vec<Recommendation>,
    pub progress: ProgressView,
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl CoachSessionView {
    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }
}

impl From<&CoachSession> for CoachSessionView {
    fn from(session: &CoachSession) -> Self {
        let (done, total) = session.recommendation_progress();
        Self {
            id: session.id().to_string(),
            state: session.state(),
            loan_decision: session.decision().clone(),
            conversation: session.conversation().to_vec(),
            recommendations: session.recommendations().to_vec(),
            progress: ProgressView { done, total },
            version: session.version(),
            created_at: *session.created_at(),
            updated_at: *session.updated_at(),
            notice: None,
        }
    }
}
