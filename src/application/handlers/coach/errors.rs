//! Errors shared by the coach command handlers.

use thiserror::Error;

use crate::domain::coach::CoachError;
use crate::domain::foundation::{CoachSessionId, ValidationError};
use crate::ports::StoreError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoachCommandError {
    #[error("Coach session not found: {0}")]
    NotFound(CoachSessionId),

    /// Another request changed the session first.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Domain(#[from] CoachError),

    #[error("Decision cannot be coached yet: {0}")]
    InvalidDecision(ValidationError),

    /// The background task finishing a turn did not run to completion.
    #[error("Coach turn was interrupted: {0}")]
    Interrupted(String),
}

impl From<StoreError> for CoachCommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => CoachCommandError::NotFound(id),
            conflict @ StoreError::VersionConflict { .. } => {
                CoachCommandError::Conflict(conflict.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_command_errors() {
        let id = CoachSessionId::new();
        assert_eq!(
            CoachCommandError::from(StoreError::NotFound(id)),
            CoachCommandError::NotFound(id)
        );
        let conflict = CoachCommandError::from(StoreError::VersionConflict {
            id,
            attempted: 1,
            current: 2,
        });
        assert!(matches!(conflict, CoachCommandError::Conflict(_)));
    }
}
