//! Liveness endpoint.

use axum::{http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

pub const SERVICE_NAME: &str = "Conversational QA Backend";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health))
}

/// GET /api/health
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "OK",
            service: SERVICE_NAME,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let (status, Json(payload)) = health().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "OK");
        assert_eq!(payload.service, "Conversational QA Backend");
    }
}
