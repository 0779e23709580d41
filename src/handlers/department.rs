//! Department handlers
//!
//! Implements department CRUD operations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::entity::{Department, DepartmentUpdate, NewDepartment};
use crate::error::{AppResult, OptionExt};
use crate::query::{department_detail, department_views, DepartmentDetail, DepartmentFilter, DepartmentView};
use crate::routes::ApiResponse;
use crate::state::AppState;

/// GET /api/departments?search=
pub async fn list_departments(
    State(state): State<AppState>,
    Query(filter): Query<DepartmentFilter>,
) -> Json<ApiResponse<Vec<DepartmentView>>> {
    let snapshot = state.store.snapshot().await;
    Json(ApiResponse::success(department_views(&snapshot, &filter)))
}

/// GET /api/departments/:id
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DepartmentDetail>>> {
    let snapshot = state.store.snapshot().await;
    let detail = department_detail(&snapshot, &id).ok_or_not_found(format!("department {}", id))?;
    Ok(Json(ApiResponse::success(detail)))
}

/// POST /api/departments
pub async fn create_department(
    State(state): State<AppState>,
    Json(req): Json<NewDepartment>,
) -> AppResult<(StatusCode, Json<ApiResponse<Department>>)> {
    let dept = state.store.create_department(req).await?;
    tracing::info!("Department added: {} {}", dept.id, dept.name);
    Ok((StatusCode::CREATED, Json(ApiResponse::success(dept))))
}

/// PATCH /api/departments/:id
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<DepartmentUpdate>,
) -> AppResult<Json<ApiResponse<Department>>> {
    let dept = state.store.update_department(&id, req).await?;
    tracing::info!("Department updated: {}", dept.id);
    Ok(Json(ApiResponse::success(dept)))
}

/// DELETE /api/departments/:id
///
/// Employees in the department keep their (now dangling) department id.
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Department>>> {
    let dept = state.store.delete_department(&id).await?;
    tracing::info!("Department removed: {} {}", dept.id, dept.name);
    Ok(Json(ApiResponse::success(dept)))
}
