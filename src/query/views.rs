//! Read models
//!
//! Soft references are resolved here. A department id that no longer exists
//! reads as `Unknown`, a missing manager as an em-dash.

use serde::Serialize;

use super::filter::DepartmentFilter;
use super::stats::{department_distribution, headcounts, recent_hires, workforce_summary};
use super::stats::{DepartmentShare, WorkforceSummary};
use crate::entity::{Department, Employee};
use crate::store::Snapshot;

pub const UNKNOWN_DEPARTMENT: &str = "Unknown";
pub const NO_MANAGER: &str = "—";

pub fn department_name<'a>(departments: &'a [Department], id: &str) -> &'a str {
    departments
        .iter()
        .find(|d| d.id == id)
        .map(|d| d.name.as_str())
        .unwrap_or(UNKNOWN_DEPARTMENT)
}

pub fn manager_name(employees: &[Employee], manager_id: Option<&str>) -> String {
    manager_id
        .and_then(|id| employees.iter().find(|e| e.id == id))
        .map(Employee::full_name)
        .unwrap_or_else(|| NO_MANAGER.to_string())
}

/// Employees that may be picked as a department manager
pub fn manager_candidates(employees: &[Employee]) -> Vec<&Employee> {
    employees
        .iter()
        .filter(|e| e.role.can_manage_department())
        .collect()
}

/// Employee with its department resolved
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRow {
    #[serde(flatten)]
    pub employee: Employee,
    pub department_name: String,
}

impl EmployeeRow {
    pub fn new(employee: &Employee, departments: &[Department]) -> Self {
        Self {
            employee: employee.clone(),
            department_name: department_name(departments, &employee.department_id).to_string(),
        }
    }
}

pub fn employee_rows<'a, I>(employees: I, departments: &[Department]) -> Vec<EmployeeRow>
where
    I: IntoIterator<Item = &'a Employee>,
{
    employees
        .into_iter()
        .map(|e| EmployeeRow::new(e, departments))
        .collect()
}

/// Department with computed headcount and resolved manager
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentView {
    #[serde(flatten)]
    pub department: Department,
    pub headcount: usize,
    pub manager_name: String,
}

pub fn department_views(snapshot: &Snapshot, filter: &DepartmentFilter) -> Vec<DepartmentView> {
    let counts = headcounts(&snapshot.employees);
    snapshot
        .departments
        .iter()
        .filter(|d| filter.matches(d))
        .map(|d| DepartmentView {
            department: d.clone(),
            headcount: counts.get(&d.id).copied().unwrap_or(0),
            manager_name: manager_name(&snapshot.employees, d.manager_id.as_deref()),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDetail {
    #[serde(flatten)]
    pub view: DepartmentView,
    pub members: Vec<Employee>,
}

pub fn department_detail(snapshot: &Snapshot, id: &str) -> Option<DepartmentDetail> {
    let department = snapshot.departments.iter().find(|d| d.id == id)?;
    let members: Vec<Employee> = snapshot
        .employees
        .iter()
        .filter(|e| e.department_id == id)
        .cloned()
        .collect();

    Some(DepartmentDetail {
        view: DepartmentView {
            department: department.clone(),
            headcount: members.len(),
            manager_name: manager_name(&snapshot.employees, department.manager_id.as_deref()),
        },
        members,
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub version: u64,
    pub summary: WorkforceSummary,
    pub department_count: usize,
    pub distribution: Vec<DepartmentShare>,
    pub recent_hires: Vec<EmployeeRow>,
}

pub fn dashboard(snapshot: &Snapshot, recent_limit: usize) -> Dashboard {
    Dashboard {
        version: snapshot.version,
        summary: workforce_summary(&snapshot.employees),
        department_count: snapshot.departments.len(),
        distribution: department_distribution(snapshot),
        recent_hires: employee_rows(
            recent_hires(&snapshot.employees, recent_limit),
            &snapshot.departments,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EmployeeRole;
    use crate::query::tests_support::{department, employee};

    fn roster() -> Snapshot {
        let mut boss = employee("emp-1", "Grace", "Hopper", "dept-1", "2019-05-01");
        boss.role = EmployeeRole::Manager;
        let mut admin = employee("emp-2", "Alan", "Turing", "dept-2", "2020-05-01");
        admin.role = EmployeeRole::Admin;
        let dev = employee("emp-3", "Ada", "Lovelace", "dept-1", "2023-01-09");
        let stray = employee("emp-4", "Lost", "Soul", "dept-9", "2024-02-02");

        let mut eng = department("dept-1", "Engineering");
        eng.manager_id = Some("emp-1".to_string());
        let mut ops = department("dept-2", "Operations");
        ops.manager_id = Some("emp-404".to_string());

        Snapshot::new(vec![boss, admin, dev, stray], vec![eng, ops])
    }

    #[test]
    fn test_dangling_references_resolve_to_sentinels() {
        let snapshot = roster();
        assert_eq!(department_name(&snapshot.departments, "dept-1"), "Engineering");
        assert_eq!(department_name(&snapshot.departments, "dept-9"), UNKNOWN_DEPARTMENT);
        assert_eq!(manager_name(&snapshot.employees, Some("emp-1")), "Grace Hopper");
        assert_eq!(manager_name(&snapshot.employees, Some("emp-404")), NO_MANAGER);
        assert_eq!(manager_name(&snapshot.employees, None), NO_MANAGER);
    }

    #[test]
    fn test_manager_candidates_by_role() {
        let snapshot = roster();
        let ids: Vec<&str> = manager_candidates(&snapshot.employees)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["emp-1", "emp-2"]);
    }

    #[test]
    fn test_department_views_compute_headcount() {
        let snapshot = roster();
        let views = department_views(&snapshot, &DepartmentFilter::default());
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].headcount, 2);
        assert_eq!(views[0].manager_name, "Grace Hopper");
        assert_eq!(views[1].headcount, 1);
        assert_eq!(views[1].manager_name, NO_MANAGER);

        let filtered = department_views(
            &snapshot,
            &DepartmentFilter {
                search: "oper".to_string(),
            },
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].department.id, "dept-2");
    }

    #[test]
    fn test_department_detail_members() {
        let snapshot = roster();
        let detail = department_detail(&snapshot, "dept-1").unwrap();
        assert_eq!(detail.view.headcount, 2);
        let ids: Vec<&str> = detail.members.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["emp-1", "emp-3"]);
        assert!(department_detail(&snapshot, "dept-9").is_none());

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["name"], "Engineering");
        assert_eq!(value["headcount"], 2);
        assert_eq!(value["managerName"], "Grace Hopper");
    }

    #[test]
    fn test_dashboard_bundle() {
        let snapshot = roster();
        let board = dashboard(&snapshot, 2);
        assert_eq!(board.summary.total, 4);
        assert_eq!(board.department_count, 2);
        assert_eq!(board.distribution[0].percentage, 50);
        assert_eq!(board.distribution[1].percentage, 25);
        assert_eq!(board.recent_hires.len(), 2);
        assert_eq!(board.recent_hires[0].employee.id, "emp-4");
        assert_eq!(board.recent_hires[0].department_name, UNKNOWN_DEPARTMENT);
        assert_eq!(board.recent_hires[1].department_name, "Engineering");
    }
}
