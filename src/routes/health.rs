//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is running.
//! Used by Kubernetes, ECS, systemd, and load balancers to verify the service is alive.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// Health probe response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub pod: String,
    pub uptime: u64,
}

/// Health check handler.
///
/// Reports the pod identity and uptime in seconds. This is a liveness probe -
/// it answers 200 whenever the process can respond to HTTP, regardless of
/// broadcast delivery or store contents.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        pod: state.config.pod.name.clone(),
        uptime: state.uptime_secs(),
    })
}
