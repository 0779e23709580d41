//! Employee handlers
//!
//! Implements employee CRUD operations and the employee table query

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::entity::{Employee, EmployeeUpdate, NewEmployee};
use crate::error::{AppResult, OptionExt};
use crate::query::{employee_rows, manager_candidates, EmployeeFilter, EmployeeRow};
use crate::routes::ApiResponse;
use crate::state::AppState;

/// GET /api/employees?search=&status=&department=
pub async fn list_employees(
    State(state): State<AppState>,
    Query(filter): Query<EmployeeFilter>,
) -> Json<ApiResponse<Vec<EmployeeRow>>> {
    let snapshot = state.store.snapshot().await;
    let rows = employee_rows(filter.apply(&snapshot.employees), &snapshot.departments);
    Json(ApiResponse::success(rows))
}

/// GET /api/employees/managers
pub async fn list_managers(State(state): State<AppState>) -> Json<ApiResponse<Vec<Employee>>> {
    let snapshot = state.store.snapshot().await;
    let managers: Vec<Employee> = manager_candidates(&snapshot.employees)
        .into_iter()
        .cloned()
        .collect();
    Json(ApiResponse::success(managers))
}

/// GET /api/employees/:id
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<EmployeeRow>>> {
    let snapshot = state.store.snapshot().await;
    let employee = snapshot
        .employees
        .iter()
        .find(|e| e.id == id)
        .ok_or_not_found(format!("employee {}", id))?;
    Ok(Json(ApiResponse::success(EmployeeRow::new(
        employee,
        &snapshot.departments,
    ))))
}

/// POST /api/employees
pub async fn create_employee(
    State(state): State<AppState>,
    Json(req): Json<NewEmployee>,
) -> AppResult<(StatusCode, Json<ApiResponse<Employee>>)> {
    let employee = state.store.create_employee(req).await?;
    tracing::info!("Employee added: {} {}", employee.id, employee.full_name());
    Ok((StatusCode::CREATED, Json(ApiResponse::success(employee))))
}

/// PATCH /api/employees/:id
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<EmployeeUpdate>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let employee = state.store.update_employee(&id, req).await?;
    tracing::info!("Employee updated: {}", employee.id);
    Ok(Json(ApiResponse::success(employee)))
}

/// DELETE /api/employees/:id
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let employee = state.store.delete_employee(&id).await?;
    tracing::info!("Employee removed: {} {}", employee.id, employee.full_name());
    Ok(Json(ApiResponse::success(employee)))
}
