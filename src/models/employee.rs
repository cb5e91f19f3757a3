//! Employee model and related types.
//!
//! This module defines the Employee struct and EmploymentType enum
//! for representing staff whose leave the engine manages.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Full-time employment (FTE is always 1.0).
    FullTime,
    /// Part-time employment with a regular weekly-hours pattern; accrues
    /// leave pro-rata to the full-time reference.
    PartTime,
    /// Casual employment (no guaranteed hours, no paid-leave entitlement).
    Casual,
    /// Contract staff paid against invoices, outside the leave system.
    Contractor,
}

impl EmploymentType {
    /// Returns the snake_case wire name for this employment type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full_time",
            EmploymentType::PartTime => "part_time",
            EmploymentType::Casual => "casual",
            EmploymentType::Contractor => "contractor",
        }
    }
}

/// Whether an employee record is live for leave purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed.
    Active,
    /// Employment has ended; balances are retained but frozen.
    Terminated,
}

/// Represents an employee subject to leave entitlement calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The type of employment arrangement.
    pub employment_type: EmploymentType,
    /// Contracted hours per week. Required for part-time pro-rata
    /// calculations; meaningless for full-time staff.
    #[serde(default)]
    pub hours_per_week: Option<Decimal>,
    /// The date the employee started employment.
    pub start_date: NaiveDate,
    /// Override for the date service is counted from, where prior service
    /// is recognized. Falls back to `start_date` when absent.
    #[serde(default)]
    pub service_start_date: Option<NaiveDate>,
    /// The department the employee belongs to.
    pub department_id: String,
    /// The legal entity (tenant) the employee belongs to.
    pub entity_id: String,
    /// The state or region the employee works in (e.g., "VIC", "NSW").
    #[serde(default)]
    pub state: Option<String>,
    /// Whether the record is live.
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns true if the employee is a casual worker.
    pub fn is_casual(&self) -> bool {
        self.employment_type == EmploymentType::Casual
    }

    /// Returns true if the employee has no paid-leave entitlement at all
    /// (casuals and contractors).
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::{Employee, EmployeeStatus, EmploymentType};
    /// use chrono::NaiveDate;
    ///
    /// let casual = Employee {
    ///     id: "emp_001".to_string(),
    ///     employment_type: EmploymentType::Casual,
    ///     hours_per_week: None,
    ///     start_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    ///     service_start_date: None,
    ///     department_id: "dept_care".to_string(),
    ///     entity_id: "entity_au".to_string(),
    ///     state: None,
    ///     status: EmployeeStatus::Active,
    /// };
    /// assert!(casual.is_unpaid_leave_only());
    /// ```
    pub fn is_unpaid_leave_only(&self) -> bool {
        matches!(
            self.employment_type,
            EmploymentType::Casual | EmploymentType::Contractor
        )
    }

    /// The date service is counted from for eligibility purposes.
    pub fn service_start(&self) -> NaiveDate {
        self.service_start_date.unwrap_or(self.start_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(employment_type: EmploymentType) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            employment_type,
            hours_per_week: None,
            start_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            service_start_date: None,
            department_id: "dept_care".to_string(),
            entity_id: "entity_au".to_string(),
            state: Some("VIC".to_string()),
            status: EmployeeStatus::Active,
        }
    }

    #[test]
    fn test_deserialize_fulltime_employee() {
        let json = r#"{
            "id": "emp_001",
            "employment_type": "full_time",
            "start_date": "2023-06-01",
            "department_id": "dept_care",
            "entity_id": "entity_au",
            "state": "VIC",
            "status": "active"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.employment_type, EmploymentType::FullTime);
        assert_eq!(employee.hours_per_week, None);
        assert_eq!(employee.service_start_date, None);
        assert_eq!(
            employee.start_date,
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
        );
        assert_eq!(employee.status, EmployeeStatus::Active);
    }

    #[test]
    fn test_deserialize_parttime_employee_with_hours() {
        let json = r#"{
            "id": "emp_002",
            "employment_type": "part_time",
            "hours_per_week": "19",
            "start_date": "2022-03-01",
            "service_start_date": "2020-01-15",
            "department_id": "dept_admin",
            "entity_id": "entity_au",
            "status": "active"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.employment_type, EmploymentType::PartTime);
        assert_eq!(employee.hours_per_week, Some(Decimal::new(19, 0)));
        assert_eq!(
            employee.service_start(),
            NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()
        );
        assert_eq!(employee.state, None);
    }

    #[test]
    fn test_serialize_employee_round_trip() {
        let employee = create_test_employee(EmploymentType::FullTime);
        let json = serde_json::to_string(&employee).unwrap();

        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_service_start_falls_back_to_start_date() {
        let employee = create_test_employee(EmploymentType::FullTime);
        assert_eq!(employee.service_start(), employee.start_date);
    }

    #[test]
    fn test_service_start_uses_override_when_present() {
        let mut employee = create_test_employee(EmploymentType::FullTime);
        let earlier = NaiveDate::from_ymd_opt(2019, 2, 1).unwrap();
        employee.service_start_date = Some(earlier);
        assert_eq!(employee.service_start(), earlier);
    }

    #[test]
    fn test_is_unpaid_leave_only() {
        assert!(create_test_employee(EmploymentType::Casual).is_unpaid_leave_only());
        assert!(create_test_employee(EmploymentType::Contractor).is_unpaid_leave_only());
        assert!(!create_test_employee(EmploymentType::FullTime).is_unpaid_leave_only());
        assert!(!create_test_employee(EmploymentType::PartTime).is_unpaid_leave_only());
    }

    #[test]
    fn test_is_casual_only_for_casual() {
        assert!(create_test_employee(EmploymentType::Casual).is_casual());
        assert!(!create_test_employee(EmploymentType::Contractor).is_casual());
    }

    #[test]
    fn test_employment_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EmploymentType::FullTime).unwrap(),
            "\"full_time\""
        );
        assert_eq!(
            serde_json::to_string(&EmploymentType::Contractor).unwrap(),
            "\"contractor\""
        );
    }

    #[test]
    fn test_employment_type_as_str_matches_wire_name() {
        for (ty, expected) in [
            (EmploymentType::FullTime, "full_time"),
            (EmploymentType::PartTime, "part_time"),
            (EmploymentType::Casual, "casual"),
            (EmploymentType::Contractor, "contractor"),
        ] {
            assert_eq!(ty.as_str(), expected);
            assert_eq!(serde_json::to_string(&ty).unwrap(), format!("\"{expected}\""));
        }
    }
}
