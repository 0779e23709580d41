//! Department entity
//!
//! Headcount is not part of the record; it is always counted from the
//! employee collection (see `query::headcount`).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::require_text;
use crate::error::AppResult;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Assigned by the store, never changes
    pub id: String,
    pub name: String,
    pub description: String,
    /// Soft reference to an employee, may dangle
    pub manager_id: Option<String>,
    /// Annual budget in whole currency units
    pub budget: u64,
    pub location: String,
    pub created_at: NaiveDate,
}

impl Department {
    pub fn from_new(id: String, new: NewDepartment) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            manager_id: new.manager_id,
            budget: new.budget,
            location: new.location,
            created_at: new.created_at,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)
    }
}

/// Creation payload
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub manager_id: Option<String>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub location: String,
    pub created_at: NaiveDate,
}

/// Partial update
///
/// `managerId` distinguishes "absent" (keep) from `null` (clear).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DepartmentUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "present")]
    pub manager_id: Option<Option<String>>,
    pub budget: Option<u64>,
    pub location: Option<String>,
    pub created_at: Option<NaiveDate>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl DepartmentUpdate {
    pub fn apply_to(self, dept: &mut Department) {
        if let Some(v) = self.name {
            dept.name = v;
        }
        if let Some(v) = self.description {
            dept.description = v;
        }
        if let Some(v) = self.manager_id {
            dept.manager_id = v;
        }
        if let Some(v) = self.budget {
            dept.budget = v;
        }
        if let Some(v) = self.location {
            dept.location = v;
        }
        if let Some(v) = self.created_at {
            dept.created_at = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engineering() -> Department {
        Department {
            id: "dept-1".to_string(),
            name: "Engineering".to_string(),
            description: "Builds things".to_string(),
            manager_id: Some("emp-1".to_string()),
            budget: 500_000,
            location: "Floor 3 - Building A".to_string(),
            created_at: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_manager_absent_keeps_value() {
        let mut dept = engineering();
        let update: DepartmentUpdate = serde_json::from_str(r#"{"budget": 600000}"#).unwrap();
        update.apply_to(&mut dept);
        assert_eq!(dept.budget, 600_000);
        assert_eq!(dept.manager_id.as_deref(), Some("emp-1"));
    }

    #[test]
    fn test_manager_null_clears_value() {
        let mut dept = engineering();
        let update: DepartmentUpdate = serde_json::from_str(r#"{"managerId": null}"#).unwrap();
        update.apply_to(&mut dept);
        assert_eq!(dept.manager_id, None);
    }

    #[test]
    fn test_serialized_shape_has_no_headcount() {
        let value = serde_json::to_value(engineering()).unwrap();
        assert_eq!(value["managerId"], "emp-1");
        assert_eq!(value["createdAt"], "2020-01-01");
        assert!(value.get("headcount").is_none());
    }

    #[test]
    fn test_blank_name_invalid() {
        let mut dept = engineering();
        dept.name = String::new();
        assert!(dept.validate().is_err());
    }
}
