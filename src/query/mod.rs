//! Query and aggregation layer
//!
//! Pure functions over a [`Snapshot`](crate::store::Snapshot). Nothing here
//! touches the store or fails on well-formed input.

pub mod filter;
pub mod stats;
pub mod views;

pub use filter::{DepartmentFilter, EmployeeFilter, Selection};
pub use stats::{
    department_distribution, headcount, headcounts, percentage, recent_hires,
    workforce_summary, DepartmentShare, WorkforceSummary,
};
pub use views::{
    dashboard, department_detail, department_name, department_views, employee_rows,
    manager_candidates, manager_name, Dashboard, DepartmentDetail, DepartmentView, EmployeeRow,
    NO_MANAGER, UNKNOWN_DEPARTMENT,
};
