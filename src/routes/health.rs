use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::state::AppState;
use super::ApiResponse;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(rename = "appVersion")]
    pub app_version: String,
    /// Roster version, bumped on every mutation
    pub version: u64,
    #[serde(rename = "wsClients")]
    pub ws_clients: usize,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus {
        status: "healthy".to_string(),
        app_version: env!("CARGO_PKG_VERSION").to_string(),
        version: state.store.version().await,
        ws_clients: state.hub.client_count(),
    }))
}
