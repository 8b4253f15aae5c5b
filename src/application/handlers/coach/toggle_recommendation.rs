//! ToggleRecommendationHandler - Checks or unchecks a recommendation.

use std::sync::Arc;
use tracing::debug;

use super::errors::CoachCommandError;
use crate::domain::coach::CoachSession;
use crate::domain::foundation::CoachSessionId;
use crate::ports::CoachSessionStore;

#[derive(Debug, Clone)]
pub struct ToggleRecommendationCommand {
    pub session_id: CoachSessionId,
    pub recommendation_id: String,
}

#[derive(Debug, Clone)]
pub struct ToggleRecommendationResult {
    pub session: CoachSession,
    /// The recommendation's completed flag after the toggle.
    pub completed: bool,
}

pub struct ToggleRecommendationHandler {
    store: Arc<dyn CoachSessionStore>,
}

impl ToggleRecommendationHandler {
    pub fn new(store: Arc<dyn CoachSessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: ToggleRecommendationCommand,
    ) -> Result<ToggleRecommendationResult, CoachCommandError> {
        let mut session = self.store.load(&cmd.session_id).await?;
        let completed = session.toggle_recommendation(&cmd.recommendation_id)?;
        let session = self.store.save(&session).await?;

        let (done, total) = session.recommendation_progress();
        debug!(
            session_id = %session.id(),
            recommendation_id = %cmd.recommendation_id,
            completed,
            done,
            total,
            "Recommendation toggled"
        );

        Ok(ToggleRecommendationResult { session, completed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryCoachSessionStore;
    use crate::domain::coach::CoachError;
    use crate::domain::loan::fixtures;

    async fn completed_session(store: &InMemoryCoachSessionStore) -> CoachSession {
        let mut session = CoachSession::new(CoachSessionId::new(), fixtures::reference_decision());
        session.start().unwrap();
        for answer in ["a", "b", "c"] {
            session.finish_playback().unwrap();
            session.begin_processing().unwrap();
            session.record_answer(answer).unwrap();
        }
        session.finish_playback().unwrap();
        store.insert(&session).await.unwrap()
    }

    fn command(session: &CoachSession, id: &str) -> ToggleRecommendationCommand {
        ToggleRecommendationCommand {
            session_id: *session.id(),
            recommendation_id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn toggling_twice_restores_flag() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let session = completed_session(&store).await;
        let handler = ToggleRecommendationHandler::new(store);

        let first = handler.handle(command(&session, "1")).await.unwrap();
        assert!(first.completed);
        assert_eq!(first.session.recommendation_progress().0, 1);

        let second = handler.handle(command(&session, "1")).await.unwrap();
        assert!(!second.completed);
        assert_eq!(second.session.recommendation_progress().0, 0);
    }

    #[tokio::test]
    async fn unknown_recommendation_is_reported() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let session = completed_session(&store).await;
        let handler = ToggleRecommendationHandler::new(store);

        let err = handler.handle(command(&session, "99")).await.unwrap_err();
        assert_eq!(
            err,
            CoachCommandError::Domain(CoachError::RecommendationNotFound("99".to_string()))
        );
    }

    #[tokio::test]
    async fn unfinished_session_has_nothing_to_toggle() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let mut session = CoachSession::new(CoachSessionId::new(), fixtures::reference_decision());
        session.start().unwrap();
        let session = store.insert(&session).await.unwrap();
        let handler = ToggleRecommendationHandler::new(store);

        let err = handler.handle(command(&session, "1")).await.unwrap_err();
        assert_eq!(err, CoachCommandError::Domain(CoachError::NotCompleted));
    }
}
