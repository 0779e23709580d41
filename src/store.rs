//! Roster store
//!
//! Sole owner of the employee and department collections. Every mutation
//! runs under one write lock and publishes a [`StoreEvent`] before the lock
//! is released, so subscribers see changes in commit order and readers never
//! see a half-applied update.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::config::RosterConfig;
use crate::entity::{
    Department, DepartmentUpdate, Employee, EmployeeUpdate, NewDepartment, NewEmployee,
};
use crate::error::{AppResult, OptionExt};

/// Monotonic id source, e.g. `emp-1`, `emp-2`, ...
#[derive(Debug)]
pub struct IdGenerator {
    prefix: &'static str,
    last: AtomicU64,
}

impl IdGenerator {
    pub const fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            last: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> String {
        let n = self.last.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}

/// What a committed mutation changed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum Change {
    #[serde(rename = "employeeCreated")]
    EmployeeCreated(Employee),
    #[serde(rename = "employeeUpdated")]
    EmployeeUpdated(Employee),
    #[serde(rename = "employeeDeleted")]
    EmployeeDeleted(String),
    #[serde(rename = "departmentCreated")]
    DepartmentCreated(Department),
    #[serde(rename = "departmentUpdated")]
    DepartmentUpdated(Department),
    #[serde(rename = "departmentDeleted")]
    DepartmentDeleted(String),
}

/// Change notification, tagged with the roster version it produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreEvent {
    pub version: u64,
    pub change: Change,
}

/// Read-consistent copy of both collections
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub version: u64,
    pub employees: Vec<Employee>,
    pub departments: Vec<Department>,
}

impl Snapshot {
    pub fn new(employees: Vec<Employee>, departments: Vec<Department>) -> Self {
        Self {
            version: 0,
            employees,
            departments,
        }
    }
}

#[derive(Default)]
struct Roster {
    version: u64,
    employees: Vec<Employee>,
    departments: Vec<Department>,
}

/// In-memory HR roster
pub struct HrStore {
    roster: RwLock<Roster>,
    employee_ids: IdGenerator,
    department_ids: IdGenerator,
    avatar_base_url: String,
    events: broadcast::Sender<StoreEvent>,
}

impl HrStore {
    pub fn new(config: &RosterConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            roster: RwLock::new(Roster::default()),
            employee_ids: IdGenerator::new("emp"),
            department_ids: IdGenerator::new("dept"),
            avatar_base_url: config.avatar_base_url.clone(),
            events,
        }
    }

    /// Subscribe to change events
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Clone both collections under one read lock
    pub async fn snapshot(&self) -> Snapshot {
        let roster = self.roster.read().await;
        Snapshot {
            version: roster.version,
            employees: roster.employees.clone(),
            departments: roster.departments.clone(),
        }
    }

    pub async fn version(&self) -> u64 {
        self.roster.read().await.version
    }

    pub async fn get_employee(&self, id: &str) -> Option<Employee> {
        let roster = self.roster.read().await;
        roster.employees.iter().find(|e| e.id == id).cloned()
    }

    pub async fn get_department(&self, id: &str) -> Option<Department> {
        let roster = self.roster.read().await;
        roster.departments.iter().find(|d| d.id == id).cloned()
    }

    pub async fn create_employee(&self, new: NewEmployee) -> AppResult<Employee> {
        let mut employee = Employee::from_new(String::new(), new, &self.avatar_base_url);
        employee.validate()?;

        let mut roster = self.roster.write().await;
        employee.id = self.employee_ids.next_id();
        roster.employees.push(employee.clone());
        debug!("Employee created: {} ({})", employee.id, employee.full_name());
        self.commit(&mut roster, Change::EmployeeCreated(employee.clone()));
        Ok(employee)
    }

    /// Replace only the supplied fields of an employee
    pub async fn update_employee(&self, id: &str, update: EmployeeUpdate) -> AppResult<Employee> {
        let mut roster = self.roster.write().await;
        let slot = roster
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_not_found(format!("employee {}", id))?;

        let mut updated = slot.clone();
        update.apply_to(&mut updated);
        updated.validate()?;
        *slot = updated.clone();

        debug!("Employee updated: {}", id);
        self.commit(&mut roster, Change::EmployeeUpdated(updated.clone()));
        Ok(updated)
    }

    pub async fn delete_employee(&self, id: &str) -> AppResult<Employee> {
        let mut roster = self.roster.write().await;
        let index = roster
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_not_found(format!("employee {}", id))?;

        let removed = roster.employees.remove(index);
        debug!("Employee deleted: {}", id);
        self.commit(&mut roster, Change::EmployeeDeleted(removed.id.clone()));
        Ok(removed)
    }

    pub async fn create_department(&self, new: NewDepartment) -> AppResult<Department> {
        let mut dept = Department::from_new(String::new(), new);
        dept.validate()?;

        let mut roster = self.roster.write().await;
        dept.id = self.department_ids.next_id();
        roster.departments.push(dept.clone());
        debug!("Department created: {} ({})", dept.id, dept.name);
        self.commit(&mut roster, Change::DepartmentCreated(dept.clone()));
        Ok(dept)
    }

    pub async fn update_department(
        &self,
        id: &str,
        update: DepartmentUpdate,
    ) -> AppResult<Department> {
        let mut roster = self.roster.write().await;
        let slot = roster
            .departments
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_not_found(format!("department {}", id))?;

        let mut updated = slot.clone();
        update.apply_to(&mut updated);
        updated.validate()?;
        *slot = updated.clone();

        debug!("Department updated: {}", id);
        self.commit(&mut roster, Change::DepartmentUpdated(updated.clone()));
        Ok(updated)
    }

    /// Remove a department. Employees that reference it are left as they are.
    pub async fn delete_department(&self, id: &str) -> AppResult<Department> {
        let mut roster = self.roster.write().await;
        let index = roster
            .departments
            .iter()
            .position(|d| d.id == id)
            .ok_or_not_found(format!("department {}", id))?;

        let removed = roster.departments.remove(index);
        debug!("Department deleted: {}", id);
        self.commit(&mut roster, Change::DepartmentDeleted(removed.id.clone()));
        Ok(removed)
    }

    fn commit(&self, roster: &mut Roster, change: Change) {
        roster.version += 1;
        // No subscribers is fine
        let _ = self.events.send(StoreEvent {
            version: roster.version,
            change,
        });
    }
}

impl Default for HrStore {
    fn default() -> Self {
        Self::new(&RosterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EmployeeRole, EmployeeStatus};
    use crate::error::AppError;
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_employee(first: &str, last: &str, dept: &str) -> NewEmployee {
        NewEmployee {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}@datacor.com", first, last).to_lowercase(),
            phone: "+1 (555) 000-0000".to_string(),
            position: "Analyst".to_string(),
            department_id: dept.to_string(),
            status: EmployeeStatus::Active,
            role: EmployeeRole::Employee,
            salary: 70_000,
            start_date: date(2022, 3, 10),
            avatar: None,
            address: "1 Main St".to_string(),
        }
    }

    fn new_department(name: &str) -> NewDepartment {
        NewDepartment {
            name: name.to_string(),
            description: String::new(),
            manager_id: None,
            budget: 100_000,
            location: "HQ".to_string(),
            created_at: date(2020, 1, 1),
        }
    }

    #[tokio::test]
    async fn test_ids_unique_in_tight_loop() {
        let store = HrStore::default();
        let mut ids = HashSet::new();
        for i in 0..100 {
            let emp = assert_ok!(store.create_employee(new_employee("A", &i.to_string(), "dept-1")).await);
            assert!(ids.insert(emp.id));
        }
        for _ in 0..100 {
            let dept = assert_ok!(store.create_department(new_department("Ops")).await);
            assert!(ids.insert(dept.id));
        }
        assert_eq!(store.snapshot().await.employees.len(), 100);
    }

    #[tokio::test]
    async fn test_ids_unique_across_tasks() {
        let store = Arc::new(HrStore::default());
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create_employee(new_employee("T", &i.to_string(), "dept-1"))
                    .await
                    .map(|e| e.id)
            }));
        }
        let mut ids = HashSet::new();
        for handle in handles {
            let id = handle.await.unwrap().unwrap();
            assert!(ids.insert(id));
        }
        assert_eq!(ids.len(), 20);
    }

    #[tokio::test]
    async fn test_partial_update_isolation() {
        let store = HrStore::default();
        let created = store.create_employee(new_employee("James", "Carter", "dept-1")).await.unwrap();

        let update = EmployeeUpdate {
            salary: Some(123_456),
            ..Default::default()
        };
        let updated = assert_ok!(store.update_employee(&created.id, update).await);

        assert_eq!(updated.salary, 123_456);
        let mut expected = created.clone();
        expected.salary = 123_456;
        assert_eq!(updated, expected);
        assert_eq!(store.get_employee(&created.id).await, Some(expected));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = HrStore::default();
        let err = assert_err!(store.update_employee("emp-404", EmployeeUpdate::default()).await);
        assert!(matches!(err, AppError::NotFound(_)));
        let err = assert_err!(store.delete_department("dept-404").await);
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.version().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_record() {
        let store = HrStore::default();
        let created = store.create_employee(new_employee("Ana", "Lee", "dept-1")).await.unwrap();
        let update = EmployeeUpdate {
            email: Some("  ".to_string()),
            salary: Some(1),
            ..Default::default()
        };
        let err = assert_err!(store.update_employee(&created.id, update).await);
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.get_employee(&created.id).await, Some(created));
    }

    #[tokio::test]
    async fn test_create_rejects_missing_department() {
        let store = HrStore::default();
        let err = assert_err!(store.create_employee(new_employee("Ana", "Lee", "")).await);
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.snapshot().await.employees.is_empty());

        assert_err!(store.create_department(new_department(" ")).await);
        assert!(store.snapshot().await.departments.is_empty());
    }

    #[tokio::test]
    async fn test_delete_department_does_not_cascade() {
        let store = HrStore::default();
        let dept = store.create_department(new_department("Engineering")).await.unwrap();
        let a = store.create_employee(new_employee("A", "One", &dept.id)).await.unwrap();
        let b = store.create_employee(new_employee("B", "Two", &dept.id)).await.unwrap();

        let removed = assert_ok!(store.delete_department(&dept.id).await);
        assert_eq!(removed, dept);

        let snapshot = store.snapshot().await;
        assert!(snapshot.departments.is_empty());
        assert_eq!(snapshot.employees, vec![a, b]);
    }

    #[tokio::test]
    async fn test_delete_employee_returns_record() {
        let store = HrStore::default();
        let emp = store.create_employee(new_employee("A", "One", "dept-1")).await.unwrap();
        assert_eq!(store.delete_employee(&emp.id).await.unwrap(), emp);
        assert!(store.get_employee(&emp.id).await.is_none());
        assert_err!(store.delete_employee(&emp.id).await);
    }

    #[tokio::test]
    async fn test_events_follow_commit_order() {
        let store = HrStore::default();
        let mut rx = store.subscribe();

        let dept = store.create_department(new_department("Sales")).await.unwrap();
        let emp = store.create_employee(new_employee("A", "One", &dept.id)).await.unwrap();
        store
            .update_department(
                &dept.id,
                DepartmentUpdate {
                    manager_id: Some(Some(emp.id.clone())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store.delete_employee(&emp.id).await.unwrap();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.version, 1);
        assert_eq!(first.change, Change::DepartmentCreated(dept.clone()));

        let second = rx.recv().await.unwrap();
        assert_eq!(second.version, 2);
        assert!(matches!(second.change, Change::EmployeeCreated(_)));

        let third = rx.recv().await.unwrap();
        match third.change {
            Change::DepartmentUpdated(d) => assert_eq!(d.manager_id, Some(emp.id.clone())),
            other => panic!("unexpected change: {:?}", other),
        }

        let fourth = rx.recv().await.unwrap();
        assert_eq!(fourth.version, 4);
        assert_eq!(fourth.change, Change::EmployeeDeleted(emp.id));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_mutation_emits_nothing() {
        let store = HrStore::default();
        let mut rx = store.subscribe();
        let _ = store.delete_employee("emp-1").await;
        let _ = store.create_employee(new_employee("", "", "")).await;
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_event_wire_format() {
        let event = StoreEvent {
            version: 7,
            change: Change::EmployeeDeleted("emp-3".to_string()),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["version"], 7);
        assert_eq!(value["change"]["type"], "employeeDeleted");
        assert_eq!(value["change"]["data"], "emp-3");
    }

    #[test]
    fn test_id_generator_monotonic() {
        let ids = IdGenerator::new("emp");
        assert_eq!(ids.next_id(), "emp-1");
        assert_eq!(ids.next_id(), "emp-2");
    }
}
