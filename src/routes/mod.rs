use axum::{
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;
use crate::ws;

pub mod health;

/// API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: true,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/config", get(handlers::config::get_config))
        // Dashboard
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        // Employee routes
        .route(
            "/employees",
            get(handlers::employee::list_employees).post(handlers::employee::create_employee),
        )
        .route("/employees/managers", get(handlers::employee::list_managers))
        .route(
            "/employees/:id",
            get(handlers::employee::get_employee)
                .patch(handlers::employee::update_employee)
                .delete(handlers::employee::delete_employee),
        )
        // Department routes
        .route(
            "/departments",
            get(handlers::department::list_departments)
                .post(handlers::department::create_department),
        )
        .route(
            "/departments/:id",
            get(handlers::department::get_department)
                .patch(handlers::department::update_department)
                .delete(handlers::department::delete_department),
        )
        // WebSocket change feed
        .route("/ws", get(ws::serve_ws));

    Router::new()
        .nest("/api", api_routes)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Fallback handler for 404
pub async fn fallback() -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error("Not Found")))
}
