//! StartCoachSessionHandler - Opens a coach conversation for a decision.

use std::sync::Arc;
use tracing::info;

use super::errors::CoachCommandError;
use super::voice::voice_latest_line;
use crate::domain::coach::CoachSession;
use crate::domain::foundation::CoachSessionId;
use crate::domain::loan::LoanDecision;
use crate::ports::{CoachSessionStore, SpeechSynthesizer};

/// Command to start coaching on a submitted decision.
#[derive(Debug, Clone)]
pub struct StartCoachSessionCommand {
    pub decision: LoanDecision,
}

/// Result of a started session.
#[derive(Debug, Clone)]
pub struct StartCoachSessionResult {
    pub session: CoachSession,
}

pub struct StartCoachSessionHandler {
    store: Arc<dyn CoachSessionStore>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl StartCoachSessionHandler {
    pub fn new(store: Arc<dyn CoachSessionStore>, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { store, synthesizer }
    }

    pub async fn handle(
        &self,
        cmd: StartCoachSessionCommand,
    ) -> Result<StartCoachSessionResult, CoachCommandError> {
        // 1. Only submittable decisions are coached
        cmd.decision
            .ensure_submittable()
            .map_err(CoachCommandError::InvalidDecision)?;

        // 2. Ask the first prompt and voice it
        let mut session = CoachSession::new(CoachSessionId::new(), cmd.decision);
        session.start()?;
        voice_latest_line(self.synthesizer.as_ref(), &mut session).await;

        // 3. Persist
        let session = self.store.insert(&session).await?;

        info!(
            session_id = %session.id(),
            decision = %session.decision().decision(),
            risk = %session.decision().risk_level(),
            ltv_percent = session.decision().ltv_percent().round(),
            loan_to_income = session.decision().loan_to_income(),
            "Coach session started"
        );

        Ok(StartCoachSessionResult { session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::speech::{MockSpeechSynthesizer, MOCK_AUDIO_URL};
    use crate::adapters::storage::InMemoryCoachSessionStore;
    use crate::domain::coach::CoachState;
    use crate::domain::loan::fixtures;

    #[tokio::test]
    async fn starts_session_with_voiced_first_prompt() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let handler = StartCoachSessionHandler::new(store.clone(), Arc::new(MockSpeechSynthesizer::new()));

        let result = handler
            .handle(StartCoachSessionCommand {
                decision: fixtures::reference_decision(),
            })
            .await
            .unwrap();

        let session = result.session;
        assert_eq!(session.state(), CoachState::Prompting { turn: 0 });
        assert_eq!(session.version(), 1);
        assert_eq!(session.conversation()[0].audio_url.as_deref(), Some(MOCK_AUDIO_URL));
        assert_eq!(store.load(session.id()).await.unwrap(), session);
    }

    #[tokio::test]
    async fn synthesis_failure_keeps_text_only_prompt() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let synth = MockSpeechSynthesizer::new().failing_next(1);
        let handler = StartCoachSessionHandler::new(store, Arc::new(synth));

        let session = handler
            .handle(StartCoachSessionCommand {
                decision: fixtures::reference_decision(),
            })
            .await
            .unwrap()
            .session;

        assert_eq!(session.conversation().len(), 1);
        assert!(session.conversation()[0].audio_url.is_none());
    }

    #[tokio::test]
    async fn decision_without_reasoning_is_refused() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let handler =
            StartCoachSessionHandler::new(store.clone(), Arc::new(MockSpeechSynthesizer::new()));
        let mut draft = fixtures::reference_draft();
        draft.reasoning = None;

        let err = handler
            .handle(StartCoachSessionCommand {
                decision: LoanDecision::try_from(draft).unwrap(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CoachCommandError::InvalidDecision(_)));
        assert_eq!(store.session_count().await, 0);
    }
}
