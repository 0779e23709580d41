//! Employee entity
//!
//! Roster record for a single person plus the payloads used to create and
//! patch it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::require_text;
use crate::error::{AppError, AppResult};

/// Employment status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    OnLeave,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 3] = [
        EmployeeStatus::Active,
        EmployeeStatus::Inactive,
        EmployeeStatus::OnLeave,
    ];

    /// Wire value, e.g. `on-leave`
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::OnLeave => "on-leave",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmployeeStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::BadRequest(format!("unknown employee status: {}", s)))
    }
}

/// Organizational role
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeRole {
    Admin,
    Manager,
    Employee,
    Intern,
}

impl EmployeeRole {
    /// Roles offered when picking a department manager
    pub fn can_manage_department(&self) -> bool {
        matches!(self, EmployeeRole::Admin | EmployeeRole::Manager)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Assigned by the store, never changes
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    /// Soft reference, may point at a deleted department
    pub department_id: String,
    pub status: EmployeeStatus,
    pub role: EmployeeRole,
    /// Annual salary in whole currency units
    pub salary: u64,
    pub start_date: NaiveDate,
    pub avatar: String,
    pub address: String,
}

impl Employee {
    /// Build a stored record from a creation payload.
    ///
    /// The avatar is derived from the name unless the payload carries one.
    pub fn from_new(id: String, new: NewEmployee, avatar_base_url: &str) -> Self {
        let avatar = match new.avatar {
            Some(url) if !url.trim().is_empty() => url,
            _ => avatar_url(avatar_base_url, &new.first_name, &new.last_name),
        };

        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            position: new.position,
            department_id: new.department_id,
            status: new.status,
            role: new.role,
            salary: new.salary,
            start_date: new.start_date,
            avatar,
            address: new.address,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check the fields a record cannot be stored without
    pub fn validate(&self) -> AppResult<()> {
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)?;
        require_text("email", &self.email)?;
        require_text("departmentId", &self.department_id)?;
        Ok(())
    }
}

/// Deterministic avatar URL seeded by the employee's name
pub fn avatar_url(base_url: &str, first_name: &str, last_name: &str) -> String {
    let seed: String = first_name
        .chars()
        .chain(last_name.chars())
        .filter(|c| !c.is_whitespace())
        .collect();
    format!("{}?seed={}", base_url, seed)
}

/// Creation payload: every field except the id
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    pub department_id: String,
    pub status: EmployeeStatus,
    pub role: EmployeeRole,
    pub salary: u64,
    pub start_date: NaiveDate,
    /// Generated from the name when absent
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub address: String,
}

/// Partial update: only `Some` fields are written
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department_id: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub role: Option<EmployeeRole>,
    pub salary: Option<u64>,
    pub start_date: Option<NaiveDate>,
    pub avatar: Option<String>,
    pub address: Option<String>,
}

impl EmployeeUpdate {
    /// Write the supplied fields onto `employee`, leaving the rest untouched
    pub fn apply_to(self, employee: &mut Employee) {
        if let Some(v) = self.first_name {
            employee.first_name = v;
        }
        if let Some(v) = self.last_name {
            employee.last_name = v;
        }
        if let Some(v) = self.email {
            employee.email = v;
        }
        if let Some(v) = self.phone {
            employee.phone = v;
        }
        if let Some(v) = self.position {
            employee.position = v;
        }
        if let Some(v) = self.department_id {
            employee.department_id = v;
        }
        if let Some(v) = self.status {
            employee.status = v;
        }
        if let Some(v) = self.role {
            employee.role = v;
        }
        if let Some(v) = self.salary {
            employee.salary = v;
        }
        if let Some(v) = self.start_date {
            employee.start_date = v;
        }
        if let Some(v) = self.avatar {
            employee.avatar = v;
        }
        if let Some(v) = self.address {
            employee.address = v;
        }
    }
}
