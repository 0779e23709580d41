use axum::{extract::State, response::Json};

use crate::query::{dashboard, Dashboard};
use crate::routes::ApiResponse;
use crate::state::AppState;

/// GET /api/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Json<ApiResponse<Dashboard>> {
    let snapshot = state.store.snapshot().await;
    let limit = state.config.roster.recent_hires_limit;
    Json(ApiResponse::success(dashboard(&snapshot, limit)))
}
