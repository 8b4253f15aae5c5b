//! GetCoachSessionHandler - Reads a coach session.

use std::sync::Arc;

use super::errors::CoachCommandError;
use crate::domain::coach::CoachSession;
use crate::domain::foundation::CoachSessionId;
use crate::ports::CoachSessionStore;

#[derive(Debug, Clone)]
pub struct GetCoachSessionQuery {
    pub session_id: CoachSessionId,
}

pub struct GetCoachSessionHandler {
    store: Arc<dyn CoachSessionStore>,
}

impl GetCoachSessionHandler {
    pub fn new(store: Arc<dyn CoachSessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetCoachSessionQuery) -> Result<CoachSession, CoachCommandError> {
        Ok(self.store.load(&query.session_id).await?)
    }
}
