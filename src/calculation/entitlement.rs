//! FTE and pro-rata entitlement calculation.
//!
//! Converts an organization-level accrual policy into an individual's
//! annual entitlement, scaled by their fractional full-time-equivalent
//! status. Ledger values stay in full-precision hours; two-decimal rounding
//! happens only where the FTE rule itself demands it and at the
//! presentation boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AccrualUnit, Employee, EmploymentType, LeavePolicy};

/// An employee's fractional full-time-equivalent status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FteBreakdown {
    /// The FTE fraction, rounded to 2 decimal places. `None` when the
    /// entitlement is undefined (casuals, contractors, part-timers with no
    /// recorded weekly hours).
    pub fte: Option<Decimal>,
    /// `round(fte x 100)`, when FTE is defined.
    pub fte_percent: Option<Decimal>,
    /// The employee's contracted hours per week, when recorded.
    pub hours_per_week: Option<Decimal>,
    /// The full-time weekly-hours reference the fraction was computed
    /// against.
    pub full_time_hours: Decimal,
    /// Whether the entitlement is scaled below full time. True only for
    /// part-time employees.
    pub is_pro_rata: bool,
}

/// A policy's annual entitlement, before and after FTE scaling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementBreakdown {
    /// The policy's accrual normalized to full-time days per year.
    pub base_days_per_year: Decimal,
    /// `base_days_per_year x standard_hours_per_day`.
    pub base_hours_per_year: Decimal,
    /// `base_days_per_year x fte` (FTE defaults to 1 when undefined).
    pub pro_rata_days: Decimal,
    /// `pro_rata_days x standard_hours_per_day`, full precision.
    pub pro_rata_hours: Decimal,
}

/// Computes an employee's FTE fraction against a policy's full-time
/// reference.
///
/// Full-time staff are always FTE 1.0 regardless of any recorded weekly
/// hours. Part-time staff with recorded hours get
/// `hours_per_week / reference`, rounded to 2 decimal places. Casuals,
/// contractors, and part-timers with no recorded hours have no defined FTE.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::calculate_fte;
/// use leave_engine::models::{
///     AccrualUnit, Employee, EmployeeStatus, EmploymentType, LeavePolicy, LeaveType,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let policy = LeavePolicy {
///     id: "pol_annual".to_string(),
///     leave_type: LeaveType::Annual,
///     accrual_unit: AccrualUnit::DaysPerYear,
///     accrual_rate: Decimal::new(20, 0),
///     standard_hours_per_day: LeavePolicy::default_standard_hours_per_day(),
///     hours_per_week_reference: LeavePolicy::default_hours_per_week_reference(),
///     min_service_years_before_accrual: None,
///     allow_negative_balance: false,
///     is_active: true,
/// };
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     employment_type: EmploymentType::PartTime,
///     hours_per_week: Some(Decimal::new(19, 0)),
///     start_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
///     service_start_date: None,
///     department_id: "dept_care".to_string(),
///     entity_id: "entity_au".to_string(),
///     state: None,
///     status: EmployeeStatus::Active,
/// };
///
/// let fte = calculate_fte(&employee, &policy);
/// assert_eq!(fte.fte, Some(Decimal::new(50, 2)));
/// assert_eq!(fte.fte_percent, Some(Decimal::new(50, 0)));
/// assert!(fte.is_pro_rata);
/// ```
pub fn calculate_fte(employee: &Employee, policy: &LeavePolicy) -> FteBreakdown {
    let reference = policy.hours_per_week_reference;

    match employee.employment_type {
        EmploymentType::FullTime => FteBreakdown {
            fte: Some(Decimal::ONE),
            fte_percent: Some(Decimal::new(100, 0)),
            hours_per_week: employee.hours_per_week,
            full_time_hours: reference,
            is_pro_rata: false,
        },
        EmploymentType::PartTime => match employee.hours_per_week {
            Some(hours) => {
                let fte = (hours / reference).round_dp(2);
                let fte_percent = (fte * Decimal::new(100, 0)).round();
                FteBreakdown {
                    fte: Some(fte),
                    fte_percent: Some(fte_percent),
                    hours_per_week: Some(hours),
                    full_time_hours: reference,
                    is_pro_rata: true,
                }
            }
            None => FteBreakdown {
                fte: None,
                fte_percent: None,
                hours_per_week: None,
                full_time_hours: reference,
                is_pro_rata: true,
            },
        },
        EmploymentType::Casual | EmploymentType::Contractor => FteBreakdown {
            fte: None,
            fte_percent: None,
            hours_per_week: employee.hours_per_week,
            full_time_hours: reference,
            is_pro_rata: false,
        },
    }
}

/// Normalizes a policy's accrual rate to full-time days per year.
///
/// | accrual_unit   | base days per year                          |
/// |----------------|---------------------------------------------|
/// | hours_per_year | rate / standard_hours_per_day               |
/// | weeks_per_year | rate x weekly reference / standard hours    |
/// | days_per_year  | rate                                        |
pub fn base_days_per_year(policy: &LeavePolicy) -> Decimal {
    match policy.accrual_unit {
        AccrualUnit::HoursPerYear => policy.accrual_rate / policy.standard_hours_per_day,
        AccrualUnit::WeeksPerYear => {
            policy.accrual_rate * policy.hours_per_week_reference / policy.standard_hours_per_day
        }
        AccrualUnit::DaysPerYear => policy.accrual_rate,
    }
}

/// Scales a policy's annual entitlement by an FTE breakdown.
///
/// An undefined FTE scales as 1 (the full entitlement); suppressing the
/// display of entitlements for staff with no defined FTE is a caller
/// concern. All returned values are full precision.
pub fn calculate_pro_rata_entitlement(
    policy: &LeavePolicy,
    fte: &FteBreakdown,
) -> EntitlementBreakdown {
    let base_days = base_days_per_year(policy);
    let base_hours = base_days * policy.standard_hours_per_day;
    let fraction = fte.fte.unwrap_or(Decimal::ONE);
    let pro_rata_days = base_days * fraction;
    let pro_rata_hours = pro_rata_days * policy.standard_hours_per_day;

    EntitlementBreakdown {
        base_days_per_year: base_days,
        base_hours_per_year: base_hours,
        pro_rata_days,
        pro_rata_hours,
    }
}
