//! Working-day resolution.
//!
//! This module decides whether a calendar date is a working day for a given
//! employee: weekends are never working days, and neither is any active
//! public holiday whose entity and region scope match the employee.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PublicHoliday};

/// Returns true if `date` falls on a Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Finds the public holiday, if any, that applies to the employee on `date`.
///
/// The matching rule is the holiday's: active, entity scope global or equal
/// to the employee's entity, region scope global or equal to the employee's
/// state.
pub fn matching_holiday<'a>(
    date: NaiveDate,
    employee: &Employee,
    holidays: &'a [PublicHoliday],
) -> Option<&'a PublicHoliday> {
    holidays
        .iter()
        .find(|h| h.date == date && h.applies_to(employee))
}

/// Determines whether a date is a working day for an employee.
///
/// Returns false for Saturday and Sunday, false when any holiday in the
/// provided set matches the employee and falls on the date, and true
/// otherwise. Pure over the provided holiday slice.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::is_working_day;
/// use leave_engine::models::{Employee, EmployeeStatus, EmploymentType};
/// use chrono::NaiveDate;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     employment_type: EmploymentType::FullTime,
///     hours_per_week: None,
///     start_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
///     service_start_date: None,
///     department_id: "dept_care".to_string(),
///     entity_id: "entity_au".to_string(),
///     state: None,
///     status: EmployeeStatus::Active,
/// };
///
/// // 2026-03-02 is a Monday, 2026-03-07 a Saturday
/// assert!(is_working_day(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), &employee, &[]));
/// assert!(!is_working_day(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(), &employee, &[]));
/// ```
pub fn is_working_day(date: NaiveDate, employee: &Employee, holidays: &[PublicHoliday]) -> bool {
    if is_weekend(date) {
        return false;
    }
    matching_holiday(date, employee, holidays).is_none()
}

/// Counts the working days in the inclusive range `[start, end]`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateRange`] when `end < start`.
pub fn count_working_days(
    start: NaiveDate,
    end: NaiveDate,
    employee: &Employee,
    holidays: &[PublicHoliday],
) -> EngineResult<u32> {
    if end < start {
        return Err(EngineError::InvalidDateRange { start, end });
    }

    let mut count = 0;
    let mut current = start;
    while current <= end {
        if is_working_day(current, employee, holidays) {
            count += 1;
        }
        current = current.succ_opt().ok_or(EngineError::InvalidDateRange { start, end })?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeStatus, EmploymentType};

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn create_test_employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            employment_type: EmploymentType::FullTime,
            hours_per_week: None,
            start_date: make_date("2023-06-01"),
            service_start_date: None,
            department_id: "dept_care".to_string(),
            entity_id: "entity_au".to_string(),
            state: Some("VIC".to_string()),
            status: EmployeeStatus::Active,
        }
    }

    fn vic_holiday(date: &str) -> PublicHoliday {
        PublicHoliday {
            id: format!("hol_{date}"),
            date: make_date(date),
            name: "Test Holiday".to_string(),
            entity_id: None,
            state_region: Some("VIC".to_string()),
            is_paid: true,
            is_active: true,
        }
    }

    #[test]
    fn test_monday_is_working_day() {
        // 2026-03-02 is a Monday
        assert!(is_working_day(make_date("2026-03-02"), &create_test_employee(), &[]));
    }

    #[test]
    fn test_saturday_is_not_working_day() {
        // 2026-03-07 is a Saturday
        assert!(!is_working_day(make_date("2026-03-07"), &create_test_employee(), &[]));
    }

    #[test]
    fn test_sunday_is_not_working_day() {
        // 2026-03-08 is a Sunday
        assert!(!is_working_day(make_date("2026-03-08"), &create_test_employee(), &[]));
    }

    #[test]
    fn test_matching_holiday_is_not_working_day() {
        let holidays = vec![vic_holiday("2026-03-09")];
        assert!(!is_working_day(
            make_date("2026-03-09"),
            &create_test_employee(),
            &holidays
        ));
    }

    #[test]
    fn test_other_region_holiday_is_working_day() {
        let mut holiday = vic_holiday("2026-03-09");
        holiday.state_region = Some("NSW".to_string());
        assert!(is_working_day(
            make_date("2026-03-09"),
            &create_test_employee(),
            &[holiday]
        ));
    }

    #[test]
    fn test_inactive_holiday_is_working_day() {
        let mut holiday = vic_holiday("2026-03-09");
        holiday.is_active = false;
        assert!(is_working_day(
            make_date("2026-03-09"),
            &create_test_employee(),
            &[holiday]
        ));
    }

    #[test]
    fn test_count_full_week() {
        // Monday 2026-03-02 through Sunday 2026-03-08: five working days
        let count = count_working_days(
            make_date("2026-03-02"),
            make_date("2026-03-08"),
            &create_test_employee(),
            &[],
        )
        .unwrap();
        assert_eq!(count, 5);
    }

    #[test]
    fn test_count_excludes_holiday() {
        let holidays = vec![vic_holiday("2026-03-04")];
        let count = count_working_days(
            make_date("2026-03-02"),
            make_date("2026-03-06"),
            &create_test_employee(),
            &holidays,
        )
        .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_count_single_working_day() {
        let count = count_working_days(
            make_date("2026-03-02"),
            make_date("2026-03-02"),
            &create_test_employee(),
            &[],
        )
        .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_count_weekend_only_range_is_zero() {
        let count = count_working_days(
            make_date("2026-03-07"),
            make_date("2026-03-08"),
            &create_test_employee(),
            &[],
        )
        .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let result = count_working_days(
            make_date("2026-03-08"),
            make_date("2026-03-02"),
            &create_test_employee(),
            &[],
        );
        assert!(matches!(result, Err(EngineError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_matching_holiday_returns_the_holiday() {
        let holidays = vec![vic_holiday("2026-03-09")];
        let employee = create_test_employee();
        let found = matching_holiday(make_date("2026-03-09"), &employee, &holidays);
        assert_eq!(found.map(|h| h.id.as_str()), Some("hol_2026-03-09"));
        assert!(matching_holiday(make_date("2026-03-10"), &employee, &holidays).is_none());
    }
}
