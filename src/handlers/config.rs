//! Configuration handlers
//!
//! Returns public configuration settings to the frontend

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::entity::{EmployeeRole, EmployeeStatus};
use crate::routes::ApiResponse;
use crate::state::AppState;

/// Public configuration response
#[derive(Debug, Serialize)]
pub struct PublicConfig {
    #[serde(rename = "recentHiresLimit")]
    pub recent_hires_limit: usize,
    #[serde(rename = "avatarBaseUrl")]
    pub avatar_base_url: String,
    /// Values accepted by the status filter and form
    pub statuses: Vec<EmployeeStatus>,
    pub roles: Vec<EmployeeRole>,
}

/// GET /api/config
pub async fn get_config(State(state): State<AppState>) -> Json<ApiResponse<PublicConfig>> {
    Json(ApiResponse::success(PublicConfig {
        recent_hires_limit: state.config.roster.recent_hires_limit,
        avatar_base_url: state.config.roster.avatar_base_url.clone(),
        statuses: EmployeeStatus::ALL.to_vec(),
        roles: vec![
            EmployeeRole::Admin,
            EmployeeRole::Manager,
            EmployeeRole::Employee,
            EmployeeRole::Intern,
        ],
    }))
}
