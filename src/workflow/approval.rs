//! The request approval state machine.
//!
//! States and transitions: `pending -> approved | declined | cancelled`,
//! `approved -> cancelled` (a recall); `declined` and `cancelled` are
//! terminal. The ledger is mutated exactly once per decision: approval
//! deducts, recall restores, decline touches nothing. Every transition is
//! guarded by the store's compare-and-set so concurrent repeats lose with
//! [`EngineError::AlreadyDecided`] instead of double-charging.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cache::LeaveCache;
use crate::calculation::{calculate_chargeable_leave, check_eligibility};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::ledger;
use crate::models::{LeaveRequest, LeaveType, PartialDayType, RequestStatus};
use crate::store::{LeaveStore, RequestTransition};

/// A new leave request as submitted by an employee.
#[derive(Debug, Clone)]
pub struct LeaveSubmission {
    /// The employee requesting leave.
    pub employee_id: String,
    /// The leave category requested.
    pub leave_type: LeaveType,
    /// First calendar day of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last calendar day of the range (inclusive).
    pub end_date: NaiveDate,
    /// How the range endpoints are charged.
    pub partial_day_type: PartialDayType,
    /// The manager expected to decide the request, when known.
    pub manager_id: Option<String>,
    /// The requester's stated reason.
    pub reason: Option<String>,
}

/// Validates and creates a leave request in the `pending` state.
///
/// Runs the eligibility gate and a balance pre-check, rejects overlapping
/// ranges and paid leave for casuals/contractors, and caches the computed
/// chargeable days on the request. No ledger mutation happens here; the
/// pre-check only guards against requests that could never be approved.
pub fn submit_leave_request(
    store: &dyn LeaveStore,
    config: &EngineConfig,
    cache: &LeaveCache,
    submission: LeaveSubmission,
    today: NaiveDate,
) -> EngineResult<LeaveRequest> {
    if submission.end_date < submission.start_date {
        return Err(EngineError::InvalidDateRange {
            start: submission.start_date,
            end: submission.end_date,
        });
    }

    let employee = store.employee(&submission.employee_id)?;
    if employee.is_unpaid_leave_only() {
        return Err(EngineError::CasualCannotTakePaidLeave {
            employment_type: employee.employment_type.as_str().to_string(),
        });
    }

    let policy = config.active_policy(submission.leave_type)?;

    let eligibility = check_eligibility(&employee, policy, today);
    if !eligibility.eligible {
        return Err(EngineError::NotEligible {
            leave_type: submission.leave_type,
            eligibility_date: eligibility.eligibility_date,
        });
    }

    // Another pending or approved request intersecting the range blocks
    // submission regardless of leave type.
    for existing in store.requests_for_employee(&submission.employee_id)? {
        let live = matches!(
            existing.status,
            RequestStatus::Pending | RequestStatus::Approved
        );
        if live && existing.intersects(submission.start_date, submission.end_date) {
            return Err(EngineError::OverlappingLeave {
                existing_request_id: existing.id,
            });
        }
    }

    let holidays = store.holidays()?;
    let chargeable = calculate_chargeable_leave(
        submission.start_date,
        submission.end_date,
        &employee,
        submission.partial_day_type,
        &holidays,
    )?;

    // Pre-check, not a deduction: the approval path re-verifies against
    // the ledger when it actually deducts.
    ledger::ensure_leave_balances(store, config, &submission.employee_id, today)?;
    let requested_hours = chargeable.chargeable_days * policy.standard_hours_per_day;
    if !policy.allow_negative_balance {
        let available = store
            .balance(&submission.employee_id, submission.leave_type)?
            .map(|b| b.available_hours)
            .unwrap_or(Decimal::ZERO);
        if requested_hours > available {
            return Err(EngineError::InsufficientBalance {
                leave_type: submission.leave_type,
                requested_hours,
                available_hours: available,
            });
        }
    }

    let request = LeaveRequest {
        id: Uuid::new_v4().to_string(),
        employee_id: submission.employee_id,
        leave_type: submission.leave_type,
        start_date: submission.start_date,
        end_date: submission.end_date,
        partial_day_type: submission.partial_day_type,
        status: RequestStatus::Pending,
        chargeable_days: chargeable.chargeable_days,
        deducted_hours: None,
        manager_id: submission.manager_id,
        reason: submission.reason,
        cancellation_reason: None,
        decided_at: None,
    };
    store.insert_request(request.clone())?;
    info!(
        request_id = %request.id,
        employee_id = %request.employee_id,
        leave_type = %request.leave_type,
        chargeable_days = %request.chargeable_days,
        "Leave request submitted"
    );

    cache.invalidate(&request.employee_id);
    Ok(request)
}

/// Approves a pending request, deducting from the ledger exactly once.
///
/// Chargeable days are recomputed against a freshly resolved holiday set;
/// the value cached at submission is never trusted here. The status flip is
/// a compare-and-set on `pending`, so of two concurrent approvals exactly
/// one reaches the ledger; the loser fails with
/// [`EngineError::AlreadyDecided`].
///
/// The flip commits before the deduction. If the deduction then fails, the
/// request is reverted to `pending` and the deduction error is surfaced; an
/// approved request whose `deducted_hours` is unset marks the residual
/// partial-failure window for external reconciliation.
pub fn approve_leave_request(
    store: &dyn LeaveStore,
    config: &EngineConfig,
    cache: &LeaveCache,
    request_id: &str,
    approver_id: &str,
    now: DateTime<Utc>,
) -> EngineResult<LeaveRequest> {
    let request = store.request(request_id)?;
    if request.status != RequestStatus::Pending {
        return Err(EngineError::AlreadyDecided {
            request_id: request_id.to_string(),
            status: request.status,
        });
    }

    let employee = store.employee(&request.employee_id)?;
    let policy = config.active_policy(request.leave_type)?;

    // Holiday data may have changed since submission; resolve fresh.
    let holidays = store.holidays()?;
    let chargeable = calculate_chargeable_leave(
        request.start_date,
        request.end_date,
        &employee,
        request.partial_day_type,
        &holidays,
    )?;
    let hours = chargeable.chargeable_days * policy.standard_hours_per_day;

    let approved = store.transition_request(
        request_id,
        RequestStatus::Pending,
        RequestTransition::Approve {
            decided_at: now,
            deducted_hours: hours,
        },
    )?;

    if let Err(deduct_error) = ledger::deduct(store, policy, &request.employee_id, hours) {
        warn!(
            request_id,
            error = %deduct_error,
            "Deduction failed after approval, reverting to pending"
        );
        if let Err(revert_error) = store.transition_request(
            request_id,
            RequestStatus::Approved,
            RequestTransition::RevertToPending,
        ) {
            warn!(
                request_id,
                error = %revert_error,
                "Revert after failed deduction also failed, request left approved without deduction"
            );
        }
        return Err(deduct_error);
    }

    info!(
        request_id,
        approver_id,
        employee_id = %approved.employee_id,
        deducted_hours = %hours,
        "Leave request approved"
    );
    cache.invalidate(&approved.employee_id);
    Ok(approved)
}

/// Declines a pending request. No ledger mutation: nothing was deducted
/// while pending.
pub fn decline_leave_request(
    store: &dyn LeaveStore,
    cache: &LeaveCache,
    request_id: &str,
    approver_id: &str,
    reason: &str,
    now: DateTime<Utc>,
) -> EngineResult<LeaveRequest> {
    if reason.trim().is_empty() {
        return Err(EngineError::InvalidRequest {
            field: "reason".to_string(),
            message: "a decline reason is required".to_string(),
        });
    }

    let declined = store.transition_request(
        request_id,
        RequestStatus::Pending,
        RequestTransition::Decline {
            decided_at: now,
            reason: reason.to_string(),
        },
    )?;

    info!(
        request_id,
        approver_id,
        employee_id = %declined.employee_id,
        "Leave request declined"
    );
    cache.invalidate(&declined.employee_id);
    Ok(declined)
}

/// Cancels a pending request or recalls an approved one.
///
/// A pending cancellation has no ledger effect. Recalling an approved
/// request restores the recorded deducted hours, keyed by request id so a
/// retried recall restores at most once. Cancellation of leave that has
/// already started requires `can_override_past`; permission computation
/// stays with the caller.
pub fn cancel_leave_request(
    store: &dyn LeaveStore,
    cache: &LeaveCache,
    request_id: &str,
    actor_id: &str,
    reason: Option<String>,
    can_override_past: bool,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> EngineResult<LeaveRequest> {
    let request = store.request(request_id)?;

    if request.start_date < today && !can_override_past {
        return Err(EngineError::NotAuthorized {
            message: "cancelling leave that has already started requires an override".to_string(),
        });
    }

    let cancelled = match request.status {
        RequestStatus::Pending => store.transition_request(
            request_id,
            RequestStatus::Pending,
            RequestTransition::Cancel {
                decided_at: now,
                reason,
            },
        )?,
        RequestStatus::Approved => {
            let hours = request.deducted_hours.unwrap_or(Decimal::ZERO);
            ledger::restore(store, &request.employee_id, request.leave_type, hours, request_id)?;
            store.transition_request(
                request_id,
                RequestStatus::Approved,
                RequestTransition::Cancel {
                    decided_at: now,
                    reason,
                },
            )?
        }
        status => {
            return Err(EngineError::AlreadyDecided {
                request_id: request_id.to_string(),
                status,
            });
        }
    };

    info!(
        request_id,
        actor_id,
        employee_id = %cancelled.employee_id,
        "Leave request cancelled"
    );
    cache.invalidate(&cancelled.employee_id);
    Ok(cancelled)
}
