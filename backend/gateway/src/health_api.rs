//! Gateway health endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthReport {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub vision_configured: bool,
    pub search_configured: bool,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /api/health`.
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok".into(),
        service: "beanscan".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        vision_configured: state.vision.is_some(),
        search_configured: state.config.search_configured(),
        timestamp: Utc::now(),
    })
}
