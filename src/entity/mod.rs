//! Entity module
//!
//! Roster record types and their create/update payloads

pub mod department;
pub mod employee;

pub use department::{Department, DepartmentUpdate, NewDepartment};
pub use employee::{Employee, EmployeeRole, EmployeeStatus, EmployeeUpdate, NewEmployee};

use crate::error::{AppError, AppResult};

/// Reject empty or whitespace-only required text fields
pub(crate) fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
