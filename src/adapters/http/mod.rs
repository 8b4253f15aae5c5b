//! HTTP adapters - REST API implementations.
//!
//! Each area has its own router; [`api_router`] merges them under `/api`.

pub mod coach;
mod decision_payload;
pub mod error;
pub mod health;
pub mod quality;
mod router;

pub use coach::{coach_routes, CoachHandlers, CoachSessionView};
pub use decision_payload::{LoanDecisionRequest, MISSING_DECISION};
pub use error::ErrorResponse;
pub use health::health_routes;
pub use quality::{quality_routes, QualityHandlers, ValidationReport};
pub use router::{api_router, AppState, RouterOptions};
