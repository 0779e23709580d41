//! Workforce aggregates
//!
//! Everything here is recomputed from the employee collection on every call.

use serde::Serialize;
use std::collections::HashMap;

use crate::entity::{Employee, EmployeeStatus};
use crate::store::Snapshot;

/// Number of employees whose `departmentId` is `dept_id`
pub fn headcount(employees: &[Employee], dept_id: &str) -> usize {
    employees.iter().filter(|e| e.department_id == dept_id).count()
}

/// Headcount for every department id referenced by an employee
pub fn headcounts(employees: &[Employee]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for employee in employees {
        *counts.entry(employee.department_id.clone()).or_insert(0) += 1;
    }
    counts
}

/// `round(part / total * 100)`, 0 when `total` is 0
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkforceSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub on_leave: usize,
    pub active_percentage: u32,
    /// Summed in `u128` so any set of `u64` salaries fits
    pub total_payroll: u128,
    /// 0 when there are no employees
    pub average_salary: f64,
}

pub fn workforce_summary(employees: &[Employee]) -> WorkforceSummary {
    let count_status = |status: EmployeeStatus| employees.iter().filter(|e| e.status == status).count();

    let total = employees.len();
    let active = count_status(EmployeeStatus::Active);
    let total_payroll: u128 = employees.iter().map(|e| u128::from(e.salary)).sum();
    let average_salary = if total == 0 {
        0.0
    } else {
        total_payroll as f64 / total as f64
    };

    WorkforceSummary {
        total,
        active,
        inactive: count_status(EmployeeStatus::Inactive),
        on_leave: count_status(EmployeeStatus::OnLeave),
        active_percentage: percentage(active, total),
        total_payroll,
        average_salary,
    }
}

/// One department's slice of the workforce
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentShare {
    pub department_id: String,
    pub name: String,
    pub count: usize,
    pub percentage: u32,
}

/// Per department count and share, in department order
pub fn department_distribution(snapshot: &Snapshot) -> Vec<DepartmentShare> {
    let total = snapshot.employees.len();
    let counts = headcounts(&snapshot.employees);

    snapshot
        .departments
        .iter()
        .map(|dept| {
            let count = counts.get(&dept.id).copied().unwrap_or(0);
            DepartmentShare {
                department_id: dept.id.clone(),
                name: dept.name.clone(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect()
}

/// Newest `limit` employees by start date. Equal dates keep collection order.
pub fn recent_hires(employees: &[Employee], limit: usize) -> Vec<&Employee> {
    let mut sorted: Vec<&Employee> = employees.iter().collect();
    sorted.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    sorted.truncate(limit);
    sorted
}
