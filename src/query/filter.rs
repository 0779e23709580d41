//! List filters
//!
//! All active predicates must hold. A predicate set to `all` (or left empty)
//! is skipped.

use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

use crate::entity::{Department, Employee, EmployeeStatus};

/// Either every value (`all`) or exactly one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Selection::All),
            other => other.parse().map(Selection::Only),
        }
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Employee table filter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmployeeFilter {
    /// Case-insensitive substring over full name, email and position
    pub search: String,
    pub status: Selection<EmployeeStatus>,
    pub department: Selection<String>,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || employee.full_name().to_lowercase().contains(&needle)
            || employee.email.to_lowercase().contains(&needle)
            || employee.position.to_lowercase().contains(&needle);

        matches_search
            && self.status.matches(&employee.status)
            && self.department.matches(&employee.department_id)
    }

    pub fn apply<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        employees.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Department table filter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DepartmentFilter {
    /// Case-insensitive substring over name, description and location
    pub search: String,
}

impl DepartmentFilter {
    pub fn matches(&self, dept: &Department) -> bool {
        let needle = self.search.to_lowercase();
        needle.is_empty()
            || dept.name.to_lowercase().contains(&needle)
            || dept.description.to_lowercase().contains(&needle)
            || dept.location.to_lowercase().contains(&needle)
    }
}
