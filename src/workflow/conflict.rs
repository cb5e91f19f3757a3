//! Advisory staffing conflict detection.
//!
//! Flags days where too many members of one department would be absent at
//! once. The result is advisory: it never blocks a transition, approvers
//! see it and decide.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveRequest, RequestStatus};
use crate::store::LeaveStore;

/// The staffing picture for a candidate request's date range.
#[derive(Debug, Clone, Serialize)]
pub struct StaffingConflict {
    /// Whether any day in the range would exceed the threshold.
    pub has_conflict: bool,
    /// The busiest day's absence count, the candidate included.
    pub concurrent_absences: u32,
    /// The configured maximum concurrent absences per department.
    pub threshold: u32,
    /// Live department requests intersecting the candidate's range.
    pub overlapping_requests: Vec<LeaveRequest>,
}

fn covers(request: &LeaveRequest, date: NaiveDate) -> bool {
    request.start_date <= date && date <= request.end_date
}

/// Checks a request against the rest of its department.
///
/// Counts distinct absent employees per day across the candidate's range,
/// considering pending and approved department requests only. Whole-day
/// granularity: a half-day absence counts as absent.
pub fn check_staffing_conflict(
    store: &dyn LeaveStore,
    config: &EngineConfig,
    request: &LeaveRequest,
) -> EngineResult<StaffingConflict> {
    let employee = store.employee(&request.employee_id)?;
    let threshold = config.settings().staffing.max_concurrent_absences;

    let overlapping: Vec<LeaveRequest> = store
        .requests_for_department(&employee.department_id)?
        .into_iter()
        .filter(|other| {
            other.id != request.id
                && matches!(
                    other.status,
                    RequestStatus::Pending | RequestStatus::Approved
                )
                && other.intersects(request.start_date, request.end_date)
        })
        .collect();

    let mut peak: u32 = 0;
    let mut day = request.start_date;
    loop {
        let mut absent: HashSet<&str> = HashSet::new();
        absent.insert(&request.employee_id);
        for other in &overlapping {
            if covers(other, day) {
                absent.insert(&other.employee_id);
            }
        }
        peak = peak.max(absent.len() as u32);

        if day == request.end_date {
            break;
        }
        day = day.succ_opt().ok_or(EngineError::InvalidDateRange {
            start: request.start_date,
            end: request.end_date,
        })?;
    }

    Ok(StaffingConflict {
        has_conflict: peak > threshold,
        concurrent_absences: peak,
        threshold,
        overlapping_requests: overlapping,
    })
}
