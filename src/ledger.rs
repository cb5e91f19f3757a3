//! The balance ledger.
//!
//! Sole mutator of [`LeaveBalance`] rows. Every operation moves hours
//! incrementally and keeps the row invariant
//! `available = opening + accrued - taken + adjusted`; nothing here ever
//! recomputes a balance from request history. Rows are created lazily and
//! never deleted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::calculation::check_eligibility;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveBalance, LeavePolicy, LeaveType};
use crate::store::LeaveStore;

/// Ensures a ledger row exists for every leave category the employee may
/// accrue.
///
/// Walks the active policies, skips categories the employee is not yet
/// eligible for, and creates a zeroed row wherever none exists. Idempotent:
/// repeated calls never create a second row for the same
/// (employee, leave_type) pair. Returns the rows for all applicable
/// categories.
pub fn ensure_leave_balances(
    store: &dyn LeaveStore,
    config: &EngineConfig,
    employee_id: &str,
    today: NaiveDate,
) -> EngineResult<Vec<LeaveBalance>> {
    let employee = store.employee(employee_id)?;
    let mut rows = Vec::new();

    for policy in config.active_policies() {
        if !check_eligibility(&employee, policy, today).eligible {
            continue;
        }
        let row = match store.balance(employee_id, policy.leave_type)? {
            Some(existing) => existing,
            None => {
                let row = LeaveBalance::zeroed(
                    Uuid::new_v4().to_string(),
                    employee_id,
                    policy.leave_type,
                );
                store.upsert_balance(row.clone())?;
                info!(
                    employee_id,
                    leave_type = %policy.leave_type,
                    "Created leave balance row"
                );
                row
            }
        };
        rows.push(row);
    }

    Ok(rows)
}

/// Deducts hours from an employee's balance for a leave category.
///
/// # Errors
///
/// Returns [`EngineError::InsufficientBalance`] when the deduction would
/// take `available_hours` below zero and the policy does not carry the
/// `allow_negative_balance` flag, and [`EngineError::BalanceNotFound`] when
/// no ledger row exists for the pair.
pub fn deduct(
    store: &dyn LeaveStore,
    policy: &LeavePolicy,
    employee_id: &str,
    hours: Decimal,
) -> EngineResult<LeaveBalance> {
    let mut row = store
        .balance(employee_id, policy.leave_type)?
        .ok_or_else(|| EngineError::BalanceNotFound {
            employee_id: employee_id.to_string(),
            leave_type: policy.leave_type,
        })?;

    let remaining = row.available_hours - hours;
    if remaining < Decimal::ZERO && !policy.allow_negative_balance {
        return Err(EngineError::InsufficientBalance {
            leave_type: policy.leave_type,
            requested_hours: hours,
            available_hours: row.available_hours,
        });
    }

    row.available_hours = remaining;
    row.taken_hours += hours;
    store.upsert_balance(row.clone())?;
    info!(
        employee_id,
        leave_type = %policy.leave_type,
        hours = %hours,
        available = %row.available_hours,
        "Deducted leave hours"
    );
    Ok(row)
}

/// Restores a request's previously deducted hours, at most once.
///
/// The restore is keyed by `request_id` through the store's atomic restore
/// hook: the credit and the applied-marker commit together, so a retry
/// after a transient store failure still lands the credit, and however many
/// times a cancellation path runs the hours come back exactly once. Returns
/// `None` when this call was a repeat and the ledger was left untouched.
pub fn restore(
    store: &dyn LeaveStore,
    employee_id: &str,
    leave_type: LeaveType,
    hours: Decimal,
    request_id: &str,
) -> EngineResult<Option<LeaveBalance>> {
    let mut row = store
        .balance(employee_id, leave_type)?
        .ok_or_else(|| EngineError::BalanceNotFound {
            employee_id: employee_id.to_string(),
            leave_type,
        })?;

    row.available_hours += hours;
    row.taken_hours -= hours;
    if !store.restore_balance(request_id, row.clone())? {
        info!(request_id, "Restore already applied, skipping");
        return Ok(None);
    }
    info!(
        employee_id,
        request_id,
        leave_type = %leave_type,
        hours = %hours,
        "Restored leave hours"
    );
    Ok(Some(row))
}

/// Applies an administrative adjustment to an employee's balance.
///
/// Always permitted, positive or negative; creates the ledger row lazily
/// when none exists. Recording who and why is the audit collaborator's
/// concern, not this engine's; the reason is only carried into the log.
pub fn adjust(
    store: &dyn LeaveStore,
    employee_id: &str,
    leave_type: LeaveType,
    delta_hours: Decimal,
    reason: &str,
) -> EngineResult<LeaveBalance> {
    let mut row = match store.balance(employee_id, leave_type)? {
        Some(existing) => existing,
        None => LeaveBalance::zeroed(Uuid::new_v4().to_string(), employee_id, leave_type),
    };

    row.adjusted_hours += delta_hours;
    row.available_hours += delta_hours;
    store.upsert_balance(row.clone())?;
    info!(
        employee_id,
        leave_type = %leave_type,
        delta = %delta_hours,
        reason,
        "Adjusted leave balance"
    );
    Ok(row)
}
