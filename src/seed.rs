//! Demo roster
//!
//! Populates an empty store with a small sample organization. Records go
//! through the regular store operations so ids and events behave as for
//! user-created data.

use chrono::NaiveDate;
use tracing::info;

use crate::entity::{DepartmentUpdate, EmployeeRole, EmployeeStatus, NewDepartment, NewEmployee};
use crate::error::{AppError, AppResult};
use crate::store::HrStore;

struct DemoDepartment {
    name: &'static str,
    description: &'static str,
    location: &'static str,
    budget: u64,
    created_at: &'static str,
}

struct DemoEmployee {
    first: &'static str,
    last: &'static str,
    position: &'static str,
    /// Index into DEPARTMENTS
    dept: usize,
    status: EmployeeStatus,
    role: EmployeeRole,
    salary: u64,
    start: &'static str,
    /// Becomes manager of its department
    heads_department: bool,
}

const DEPARTMENTS: &[DemoDepartment] = &[
    DemoDepartment {
        name: "Engineering",
        description: "Product development and infrastructure",
        location: "Floor 3 - Building A",
        budget: 1_200_000,
        created_at: "2018-03-01",
    },
    DemoDepartment {
        name: "Marketing",
        description: "Brand, campaigns and growth",
        location: "Floor 2 - Building A",
        budget: 450_000,
        created_at: "2018-06-15",
    },
    DemoDepartment {
        name: "Sales",
        description: "Revenue and customer accounts",
        location: "Floor 1 - Building B",
        budget: 600_000,
        created_at: "2019-01-10",
    },
    DemoDepartment {
        name: "Human Resources",
        description: "People operations and recruiting",
        location: "Floor 2 - Building B",
        budget: 250_000,
        created_at: "2019-09-01",
    },
];

const EMPLOYEES: &[DemoEmployee] = &[
    DemoEmployee {
        first: "James",
        last: "Carter",
        position: "VP of Engineering",
        dept: 0,
        status: EmployeeStatus::Active,
        role: EmployeeRole::Manager,
        salary: 185_000,
        start: "2018-04-02",
        heads_department: true,
    },
    DemoEmployee {
        first: "Sofia",
        last: "Martinez",
        position: "Senior Software Engineer",
        dept: 0,
        status: EmployeeStatus::Active,
        role: EmployeeRole::Employee,
        salary: 142_000,
        start: "2020-08-17",
        heads_department: false,
    },
    DemoEmployee {
        first: "Liam",
        last: "Nguyen",
        position: "Software Engineer",
        dept: 0,
        status: EmployeeStatus::OnLeave,
        role: EmployeeRole::Employee,
        salary: 118_000,
        start: "2022-03-10",
        heads_department: false,
    },
    DemoEmployee {
        first: "Ava",
        last: "Patel",
        position: "Engineering Intern",
        dept: 0,
        status: EmployeeStatus::Active,
        role: EmployeeRole::Intern,
        salary: 42_000,
        start: "2024-06-03",
        heads_department: false,
    },
    DemoEmployee {
        first: "Olivia",
        last: "Brooks",
        position: "Marketing Director",
        dept: 1,
        status: EmployeeStatus::Active,
        role: EmployeeRole::Manager,
        salary: 150_000,
        start: "2019-02-11",
        heads_department: true,
    },
    DemoEmployee {
        first: "Noah",
        last: "Kim",
        position: "Content Strategist",
        dept: 1,
        status: EmployeeStatus::Inactive,
        role: EmployeeRole::Employee,
        salary: 78_000,
        start: "2021-01-04",
        heads_department: false,
    },
    DemoEmployee {
        first: "Ethan",
        last: "Wright",
        position: "Head of Sales",
        dept: 2,
        status: EmployeeStatus::Active,
        role: EmployeeRole::Manager,
        salary: 160_000,
        start: "2019-03-18",
        heads_department: true,
    },
    DemoEmployee {
        first: "Mia",
        last: "Johnson",
        position: "Account Executive",
        dept: 2,
        status: EmployeeStatus::Active,
        role: EmployeeRole::Employee,
        salary: 92_000,
        start: "2023-06-15",
        heads_department: false,
    },
    DemoEmployee {
        first: "Grace",
        last: "Okafor",
        position: "HR Administrator",
        dept: 3,
        status: EmployeeStatus::Active,
        role: EmployeeRole::Admin,
        salary: 98_000,
        start: "2019-10-07",
        heads_department: true,
    },
];

const DEMO_EMAIL_DOMAIN: &str = "datacor.com";

fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    raw.parse()
        .map_err(|e| AppError::Internal(format!("bad demo date {}: {}", raw, e)))
}

/// Load the demo organization into `store`
pub async fn seed_demo(store: &HrStore) -> AppResult<()> {
    let mut dept_ids = Vec::with_capacity(DEPARTMENTS.len());
    for d in DEPARTMENTS {
        let dept = store
            .create_department(NewDepartment {
                name: d.name.to_string(),
                description: d.description.to_string(),
                manager_id: None,
                budget: d.budget,
                location: d.location.to_string(),
                created_at: parse_date(d.created_at)?,
            })
            .await?;
        dept_ids.push(dept.id);
    }

    for e in EMPLOYEES {
        let dept_id = &dept_ids[e.dept];
        let employee = store
            .create_employee(NewEmployee {
                first_name: e.first.to_string(),
                last_name: e.last.to_string(),
                email: format!(
                    "{}.{}@{}",
                    e.first.to_lowercase(),
                    e.last.to_lowercase(),
                    DEMO_EMAIL_DOMAIN
                ),
                phone: "+1 (555) 010-0000".to_string(),
                position: e.position.to_string(),
                department_id: dept_id.clone(),
                status: e.status,
                role: e.role,
                salary: e.salary,
                start_date: parse_date(e.start)?,
                avatar: None,
                address: String::new(),
            })
            .await?;

        if e.heads_department {
            store
                .update_department(
                    dept_id,
                    DepartmentUpdate {
                        manager_id: Some(Some(employee.id)),
                        ..Default::default()
                    },
                )
                .await?;
        }
    }

    info!(
        "Demo roster loaded: {} departments, {} employees",
        DEPARTMENTS.len(),
        EMPLOYEES.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{department_views, DepartmentFilter, NO_MANAGER};

    #[tokio::test]
    async fn test_seed_demo_roster() {
        let store = HrStore::default();
        seed_demo(&store).await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.departments.len(), DEPARTMENTS.len());
        assert_eq!(snapshot.employees.len(), EMPLOYEES.len());

        let views = department_views(&snapshot, &DepartmentFilter::default());
        assert_eq!(views[0].department.name, "Engineering");
        assert_eq!(views[0].headcount, 4);
        assert_eq!(views[0].manager_name, "James Carter");
        assert!(views.iter().all(|v| v.manager_name != NO_MANAGER));
    }
}
