//! Coach-specific error types.

use thiserror::Error;

use crate::domain::foundation::TransitionError;

/// Errors raised by the coach session aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoachError {
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    #[error("Recommendation '{0}' not found")]
    RecommendationNotFound(String),

    #[error("Recommendations are available only after the session completes")]
    NotCompleted,
}
