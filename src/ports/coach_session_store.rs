//! Coach session store port.
//!
//! Persists coach sessions with optimistic concurrency. Each accepted save
//! advances the session's version by one; a save made from a stale copy is
//! rejected, so two racing events on one session cannot both apply.

use async_trait::async_trait;

use crate::domain::coach::CoachSession;
use crate::domain::foundation::CoachSessionId;

/// Errors that can occur during session store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Coach session not found: {0}")]
    NotFound(CoachSessionId),

    #[error("Coach session {id} was modified concurrently (saving from version {attempted}, stored version is {current})")]
    VersionConflict {
        id: CoachSessionId,
        attempted: u64,
        current: u64,
    },
}

/// Port for coach session persistence.
#[async_trait]
pub trait CoachSessionStore: Send + Sync {
    /// Store a brand-new session.
    ///
    /// Returns the stored copy with its version advanced.
    ///
    /// # Errors
    ///
    /// - `VersionConflict` if a session with this id already exists
    async fn insert(&self, session: &CoachSession) -> Result<CoachSession, StoreError>;

    /// Save changes to an existing session.
    ///
    /// The session's version must equal the stored version. Returns the stored
    /// copy with its version advanced.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session was never inserted
    /// - `VersionConflict` if the stored session moved on since it was loaded
    async fn save(&self, session: &CoachSession) -> Result<CoachSession, StoreError>;

    /// Load a session by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such session exists
    async fn load(&self, id: &CoachSessionId) -> Result<CoachSession, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coach_session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn CoachSessionStore) {}
    }

    #[test]
    fn version_conflict_names_both_versions() {
        let err = StoreError::VersionConflict {
            id: CoachSessionId::new(),
            attempted: 2,
            current: 3,
        };
        let text = err.to_string();
        assert!(text.contains("version 2"));
        assert!(text.contains("stored version is 3"));
    }
}
