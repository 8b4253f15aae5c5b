//! HTTP handlers for coach session endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::adapters::http::decision_payload::{decision_from_body, LoanDecisionRequest};
use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::coach::{
    CoachCommandError, CompletePlaybackCommand, CompletePlaybackHandler, GetCoachSessionHandler,
    GetCoachSessionQuery, StartCoachSessionCommand, StartCoachSessionHandler,
    SubmitRecordingCommand, SubmitRecordingHandler, ToggleRecommendationCommand,
    ToggleRecommendationHandler,
};
use crate::domain::coach::CoachError;
use crate::domain::foundation::CoachSessionId;
use crate::ports::AudioClip;

use super::dto::CoachSessionView;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CoachHandlers {
    start_handler: Arc<StartCoachSessionHandler>,
    get_handler: Arc<GetCoachSessionHandler>,
    playback_handler: Arc<CompletePlaybackHandler>,
    recording_handler: Arc<SubmitRecordingHandler>,
    toggle_handler: Arc<ToggleRecommendationHandler>,
}

impl CoachHandlers {
    pub fn new(
        start_handler: Arc<StartCoachSessionHandler>,
        get_handler: Arc<GetCoachSessionHandler>,
        playback_handler: Arc<CompletePlaybackHandler>,
        recording_handler: Arc<SubmitRecordingHandler>,
        toggle_handler: Arc<ToggleRecommendationHandler>,
    ) -> Self {
        Self {
            start_handler,
            get_handler,
            playback_handler,
            recording_handler,
            toggle_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/coach/sessions - Start coaching on a decision
pub async fn start_session(
    State(handlers): State<CoachHandlers>,
    body: Result<Json<LoanDecisionRequest>, JsonRejection>,
) -> Response {
    let decision = match decision_from_body(body) {
        Ok(decision) => decision,
        Err(error) => return (StatusCode::BAD_REQUEST, Json(error)).into_response(),
    };

    match handlers
        .start_handler
        .handle(StartCoachSessionCommand { decision })
        .await
    {
        Ok(result) => (
            StatusCode::CREATED,
            Json(CoachSessionView::from(&result.session)),
        )
            .into_response(),
        Err(e) => handle_coach_error(e),
    }
}

/// GET /api/coach/sessions/:id - Current session view
pub async fn get_session(
    State(handlers): State<CoachHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetCoachSessionQuery { session_id })
        .await
    {
        Ok(session) => (StatusCode::OK, Json(CoachSessionView::from(&session))).into_response(),
        Err(e) => handle_coach_error(e),
    }
}

/// POST /api/coach/sessions/:id/playback-complete - The coach line finished playing
pub async fn playback_complete(
    State(handlers): State<CoachHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .playback_handler
        .handle(CompletePlaybackCommand { session_id })
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(CoachSessionView::from(&result.session)),
        )
            .into_response(),
        Err(e) => handle_coach_error(e),
    }
}

/// POST /api/coach/sessions/:id/recordings - Submit a recorded answer
pub async fn submit_recording(
    State(handlers): State<CoachHandlers>,
    Path(session_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    if body.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Recording body is empty")),
        )
            .into_response();
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let cmd = SubmitRecordingCommand {
        session_id,
        clip: AudioClip::new(body.to_vec(), content_type),
    };

    match handlers.recording_handler.handle(cmd).await {
        Ok(result) => {
            let view = CoachSessionView::from(&result.session).with_notice(result.notice);
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(e) => handle_coach_error(e),
    }
}

/// POST /api/coach/sessions/:id/recommendations/:rec_id/toggle - Flip a checklist item
pub async fn toggle_recommendation(
    State(handlers): State<CoachHandlers>,
    Path((session_id, recommendation_id)): Path<(String, String)>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = ToggleRecommendationCommand {
        session_id,
        recommendation_id,
    };

    match handlers.toggle_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(CoachSessionView::from(&result.session)),
        )
            .into_response(),
        Err(e) => handle_coach_error(e),
    }
}

/// GET /api/coach/sessions/:id/transcript - Plain-text transcript download
pub async fn download_transcript(
    State(handlers): State<CoachHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetCoachSessionQuery { session_id })
        .await
    {
        Ok(session) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                header_safe(&session.transcript_filename())
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                session.transcript(),
            )
                .into_response()
        }
        Err(e) => handle_coach_error(e),
    }
}

/// Keeps a filename usable inside a quoted header parameter.
fn header_safe(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect()
}

fn parse_session_id(raw: &str) -> Result<CoachSessionId, Response> {
    raw.parse::<CoachSessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_coach_error(error: CoachCommandError) -> Response {
    match error {
        CoachCommandError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Coach session", &id.to_string())),
        )
            .into_response(),
        CoachCommandError::Domain(CoachError::RecommendationNotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Recommendation", &id)),
        )
            .into_response(),
        CoachCommandError::Domain(e) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(e.to_string())),
        )
            .into_response(),
        CoachCommandError::Conflict(msg) => {
            (StatusCode::CONFLICT, Json(ErrorResponse::conflict(msg))).into_response()
        }
        CoachCommandError::InvalidDecision(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response(),
        CoachCommandError::Interrupted(msg) => {
            error!(error = %msg, "Coach turn did not complete");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Coach turn could not be completed")),
            )
                .into_response()
        }
    }
}
