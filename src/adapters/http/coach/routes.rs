//! HTTP routes for coach session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    download_transcript, get_session, playback_complete, start_session, submit_recording,
    toggle_recommendation, CoachHandlers,
};

/// Creates the coach session router. Paths are relative to `/api`.
pub fn coach_routes(handlers: CoachHandlers) -> Router {
    Router::new()
        .route("/coach/sessions", post(start_session))
        .route("/coach/sessions/:id", get(get_session))
        .route("/coach/sessions/:id/playback-complete", post(playback_complete))
        .route("/coach/sessions/:id/recordings", post(submit_recording))
        .route(
            "/coach/sessions/:id/recommendations/:rec_id/toggle",
            post(toggle_recommendation),
        )
        .route("/coach/sessions/:id/transcript", get(download_transcript))
        .with_state(handlers)
}
