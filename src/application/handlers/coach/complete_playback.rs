//! CompletePlaybackHandler - The client finished playing the coach's line.

use std::sync::Arc;
use tracing::info;

use super::errors::CoachCommandError;
use crate::domain::coach::CoachSession;
use crate::domain::foundation::CoachSessionId;
use crate::ports::CoachSessionStore;

#[derive(Debug, Clone)]
pub struct CompletePlaybackCommand {
    pub session_id: CoachSessionId,
}

#[derive(Debug, Clone)]
pub struct CompletePlaybackResult {
    pub session: CoachSession,
}

pub struct CompletePlaybackHandler {
    store: Arc<dyn CoachSessionStore>,
}

impl CompletePlaybackHandler {
    pub fn new(store: Arc<dyn CoachSessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: CompletePlaybackCommand,
    ) -> Result<CompletePlaybackResult, CoachCommandError> {
        let mut session = self.store.load(&cmd.session_id).await?;
        session.finish_playback()?;
        let session = self.store.save(&session).await?;

        if session.state().is_completed() {
            info!(
                session_id = %session.id(),
                recommendations = session.recommendations().len(),
                "Coach session completed"
            );
        }

        Ok(CompletePlaybackResult { session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryCoachSessionStore;
    use crate::domain::coach::{CoachError, CoachState};
    use crate::domain::loan::fixtures;

    async fn stored_session(store: &InMemoryCoachSessionStore) -> CoachSession {
        let mut session = CoachSession::new(CoachSessionId::new(), fixtures::reference_decision());
        session.start().unwrap();
        store.insert(&session).await.unwrap()
    }

    #[tokio::test]
    async fn prompting_moves_to_listening() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let session = stored_session(&store).await;
        let handler = CompletePlaybackHandler::new(store);

        let result = handler
            .handle(CompletePlaybackCommand {
                session_id: *session.id(),
            })
            .await
            .unwrap();

        assert_eq!(result.session.state(), CoachState::Listening { turn: 0 });
        assert_eq!(result.session.version(), 2);
    }

    #[tokio::test]
    async fn listening_rejects_playback_complete() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let session = stored_session(&store).await;
        let handler = CompletePlaybackHandler::new(store.clone());
        let cmd = CompletePlaybackCommand {
            session_id: *session.id(),
        };

        handler.handle(cmd.clone()).await.unwrap();
        let err = handler.handle(cmd).await.unwrap_err();

        assert!(matches!(
            err,
            CoachCommandError::Domain(CoachError::InvalidTransition(_))
        ));
        assert_eq!(store.load(session.id()).await.unwrap().version(), 2);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = CompletePlaybackHandler::new(Arc::new(InMemoryCoachSessionStore::new()));
        let id = CoachSessionId::new();
        let err = handler
            .handle(CompletePlaybackCommand { session_id: id })
            .await
            .unwrap_err();
        assert_eq!(err, CoachCommandError::NotFound(id));
    }
}
