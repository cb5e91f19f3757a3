//! Chargeable leave calculation.
//!
//! Turns a requested date range plus partial-day flags into a chargeable-day
//! count with a per-day breakdown. The function is pure given a frozen
//! holiday slice: a preview computed before submission and a recomputation
//! at approval time agree as long as the holiday data has not changed in
//! between. The approval path always resolves its own fresh holiday set.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PartialDayType, PublicHoliday};

use super::calendar::{is_weekend, matching_holiday};

/// Why a day in the range was or was not charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// A working day charged against the balance.
    Working,
    /// A Saturday or Sunday; never charged.
    Weekend,
    /// A matching public holiday; never charged.
    PublicHoliday,
}

/// One day of a request's range in the chargeable breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCharge {
    /// The calendar day.
    pub date: NaiveDate,
    /// The classification of the day.
    pub kind: DayKind,
    /// The charge for the day: 1.0, 0.5, or 0 for non-working days.
    pub charge: Decimal,
    /// The name of the matching holiday, for `DayKind::PublicHoliday` days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
}

/// The result of a chargeable leave calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeableLeaveResult {
    /// Total chargeable days across the range.
    pub chargeable_days: Decimal,
    /// Per-day classification and charge, one entry per calendar day in the
    /// range, in date order.
    pub breakdown: Vec<DayCharge>,
}

/// Calculates the chargeable days for a leave range.
///
/// Walks each calendar day in `[start, end]` inclusive. Weekends and
/// matching public holidays charge nothing. Every other day charges 1.0,
/// except the range's first day charges 0.5 under
/// [`PartialDayType::HalfStart`] and the last day charges 0.5 under
/// [`PartialDayType::HalfEnd`], and only when that boundary day is itself a
/// working day.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateRange`] when `end < start`.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::calculate_chargeable_leave;
/// use leave_engine::models::{Employee, EmployeeStatus, EmploymentType, PartialDayType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
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
/// // Monday to Friday, no holidays
/// let result = calculate_chargeable_leave(
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
///     &employee,
///     PartialDayType::Full,
///     &[],
/// ).unwrap();
/// assert_eq!(result.chargeable_days, Decimal::new(5, 0));
/// ```
pub fn calculate_chargeable_leave(
    start: NaiveDate,
    end: NaiveDate,
    employee: &Employee,
    partial_day_type: PartialDayType,
    holidays: &[PublicHoliday],
) -> EngineResult<ChargeableLeaveResult> {
    if end < start {
        return Err(EngineError::InvalidDateRange { start, end });
    }

    let half = Decimal::new(5, 1);
    let mut breakdown = Vec::new();
    let mut total = Decimal::ZERO;

    let mut current = start;
    while current <= end {
        let entry = if is_weekend(current) {
            DayCharge {
                date: current,
                kind: DayKind::Weekend,
                charge: Decimal::ZERO,
                holiday_name: None,
            }
        } else if let Some(holiday) = matching_holiday(current, employee, holidays) {
            DayCharge {
                date: current,
                kind: DayKind::PublicHoliday,
                charge: Decimal::ZERO,
                holiday_name: Some(holiday.name.clone()),
            }
        } else {
            let is_half = match partial_day_type {
                PartialDayType::Full => false,
                PartialDayType::HalfStart => current == start,
                PartialDayType::HalfEnd => current == end,
            };
            DayCharge {
                date: current,
                kind: DayKind::Working,
                charge: if is_half { half } else { Decimal::ONE },
                holiday_name: None,
            }
        };

        total += entry.charge;
        breakdown.push(entry);
        current = current
            .succ_opt()
            .ok_or(EngineError::InvalidDateRange { start, end })?;
    }

    Ok(ChargeableLeaveResult {
        chargeable_days: total,
        breakdown,
    })
}
