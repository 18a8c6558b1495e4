//! Observability HTTP Routes
//!
//! Health check endpoint and per-request logging middleware.

use std::time::Instant;

use axum::{
    extract::Request, http::StatusCode, middleware::Next, response::IntoResponse,
    response::Response, routing::get, Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::observability::{log_event_with_fields, Event};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Log one `HTTP_REQUEST` line per request
pub async fn log_request(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    let elapsed_ms = started.elapsed().as_millis().to_string();
    log_event_with_fields(
        Event::HttpRequest,
        &[
            ("request_id", &request_id),
            ("method", &method),
            ("path", &path),
            ("status", &status),
            ("elapsed_ms", &elapsed_ms),
        ],
    );

    response
}
