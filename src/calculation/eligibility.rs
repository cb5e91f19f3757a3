//! Service-length eligibility gate.
//!
//! Some leave categories (long service leave in particular) only become
//! available after a minimum number of years of service. The gate is a
//! correctness rule, not a display preference: the approval workflow rejects
//! requests for ineligible categories at the engine boundary.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, LeavePolicy};

/// Days per year used for service arithmetic, averaging leap years.
const DAYS_PER_YEAR: Decimal = Decimal::from_parts(36525, 0, 0, false, 2);

/// The outcome of an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    /// Whether the employee may accrue and use the category today.
    pub eligible: bool,
    /// Completed years of service, as a fraction (days / 365.25), rounded
    /// to 2 decimal places for presentation.
    pub years_of_service: Decimal,
    /// For gated categories not yet reached: the date eligibility begins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility_date: Option<NaiveDate>,
}

/// Checks whether an employee has served long enough for a policy.
///
/// Service is counted from the employee's service start date (the
/// `service_start_date` override when present, otherwise `start_date`).
/// Policies without `min_service_years_before_accrual` are always eligible.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::check_eligibility;
/// use leave_engine::models::{
///     AccrualUnit, Employee, EmployeeStatus, EmploymentType, LeavePolicy, LeaveType,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let policy = LeavePolicy {
///     id: "pol_ls".to_string(),
///     leave_type: LeaveType::LongService,
///     accrual_unit: AccrualUnit::WeeksPerYear,
///     accrual_rate: Decimal::new(867, 3),
///     standard_hours_per_day: LeavePolicy::default_standard_hours_per_day(),
///     hours_per_week_reference: LeavePolicy::default_hours_per_week_reference(),
///     min_service_years_before_accrual: Some(Decimal::new(5, 0)),
///     allow_negative_balance: false,
///     is_active: true,
/// };
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     employment_type: EmploymentType::FullTime,
///     hours_per_week: None,
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     service_start_date: None,
///     department_id: "dept_care".to_string(),
///     entity_id: "entity_au".to_string(),
///     state: None,
///     status: EmployeeStatus::Active,
/// };
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let result = check_eligibility(&employee, &policy, today);
/// assert!(!result.eligible);
/// assert!(result.eligibility_date.is_some());
/// ```
pub fn check_eligibility(employee: &Employee, policy: &LeavePolicy, today: NaiveDate) -> Eligibility {
    let service_start = employee.service_start();
    let served_days = Decimal::from((today - service_start).num_days().max(0));
    let years_of_service = (served_days / DAYS_PER_YEAR).round_dp(2);

    let Some(min_years) = policy.min_service_years_before_accrual else {
        return Eligibility {
            eligible: true,
            years_of_service,
            eligibility_date: None,
        };
    };

    let required_days = (min_years * DAYS_PER_YEAR).round();
    // required_days is bounded by min_years in practice; a policy gate large
    // enough to overflow i64 days is nonsensical input.
    let eligibility_date = required_days
        .to_i64()
        .and_then(|d| service_start.checked_add_signed(Duration::days(d)));

    if served_days >= required_days {
        Eligibility {
            eligible: true,
            years_of_service,
            eligibility_date: None,
        }
    } else {
        Eligibility {
            eligible: false,
            years_of_service,
            eligibility_date,
        }
    }
}
