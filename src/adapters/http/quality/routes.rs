//! HTTP routes for quality review endpoints.

use axum::{routing::post, Router};

use super::handlers::{quality_check, validate_decision, QualityHandlers};

/// Creates the quality review router.
pub fn quality_routes(handlers: QualityHandlers) -> Router {
    Router::new()
        .route("/quality-check", post(quality_check))
        .route("/decisions/validate", post(validate_decision))
        .with_state(handlers)
}
