use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::shared::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: f64, // Seconds since start-up
    pub environment: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProbeResponse {
    pub status: String,
    pub timestamp: String,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        environment: state.environment.clone(),
    })
}

/// GET /health/readiness
pub async fn readiness() -> Json<ProbeResponse> {
    probe("ready")
}

/// GET /health/liveness
pub async fn liveness() -> Json<ProbeResponse> {
    probe("alive")
}

fn probe(status: &str) -> Json<ProbeResponse> {
    Json(ProbeResponse {
        status: status.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
