//! Assembles the `/api` router and its middleware stack.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::application::handlers::coach::{
    CompletePlaybackHandler, GetCoachSessionHandler, StartCoachSessionHandler,
    SubmitRecordingHandler, ToggleRecommendationHandler,
};
use crate::application::handlers::quality::{QualityCheckSettings, RunQualityCheckHandler};
use crate::domain::quality::SopDocument;
use crate::ports::{AIProvider, CoachSessionStore, SpeechSynthesizer, TranscriptionProvider};

use super::coach::{coach_routes, CoachHandlers};
use super::health::health_routes;
use super::quality::{quality_routes, QualityHandlers};

/// Everything the routers need, wired from ports.
#[derive(Clone)]
pub struct AppState {
    pub quality: QualityHandlers,
    pub coach: CoachHandlers,
}

impl AppState {
    pub fn new(
        ai_provider: Arc<dyn AIProvider>,
        sop: Arc<SopDocument>,
        settings: QualityCheckSettings,
        store: Arc<dyn CoachSessionStore>,
        transcriber: Arc<dyn TranscriptionProvider>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let quality = QualityHandlers::new(Arc::new(RunQualityCheckHandler::new(
            ai_provider,
            sop,
            settings,
        )));

        let coach = CoachHandlers::new(
            Arc::new(StartCoachSessionHandler::new(store.clone(), synthesizer.clone())),
            Arc::new(GetCoachSessionHandler::new(store.clone())),
            Arc::new(CompletePlaybackHandler::new(store.clone())),
            Arc::new(SubmitRecordingHandler::new(
                store.clone(),
                transcriber,
                synthesizer,
            )),
            Arc::new(ToggleRecommendationHandler::new(store)),
        );

        Self { quality, coach }
    }
}

/// Routing-level options taken from server configuration.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

/// Builds the full application router, with every endpoint under `/api`.
pub fn api_router(state: AppState, options: &RouterOptions) -> Router {
    let api = Router::new()
        .merge(health_routes())
        .merge(quality_routes(state.quality))
        .merge(coach_routes(state.coach));

    Router::new().nest("/api", api).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(cors_layer(&options.cors_origins))
            .layer(TimeoutLayer::new(options.request_timeout)),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            // AllowOrigin::list panics on a wildcard
            Ok(value) if value != "*" => Some(value),
            _ => {
                warn!(origin = %origin, "Ignoring unusable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
