//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the loan QA domain.

mod amount;
mod errors;
mod ids;
mod score;
mod state_machine;
mod timestamp;

pub use amount::{group_thousands, CurrencyAmount};
pub use errors::{TransitionError, ValidationError};
pub use ids::CoachSessionId;
pub use score::ComplianceScore;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
