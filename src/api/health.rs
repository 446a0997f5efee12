//! Liveness and readiness probes for the fleet API

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Name of the service answering the probe
    pub service: String,
    /// Probe result
    pub status: String,
    /// Running server version
    pub version: String,
}

fn probe_response(status: &str) -> HealthResponse {
    HealthResponse {
        service: env!("CARGO_PKG_NAME").to_string(),
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Liveness probe: the process is up and serving requests
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(probe_response("healthy"))
}

/// Readiness probe: migrations have run and the router is wired, so the
/// service can take traffic
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready for traffic", body = HealthResponse)
    )
)]
pub async fn readiness_check() -> Json<HealthResponse> {
    Json(probe_response("ready"))
}
