//! Leave balance ledger row.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LeaveType;

/// One ledger row: an employee's balance for a single leave category.
///
/// All fields are decimal hours. The row is mutated incrementally by the
/// ledger; `available_hours` is never recomputed from request history.
///
/// Invariant: `available_hours = opening_balance_hours + accrued_hours
/// - taken_hours + adjusted_hours`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Unique identifier for the ledger row.
    pub id: String,
    /// The employee the row belongs to.
    pub employee_id: String,
    /// The leave category the row tracks.
    pub leave_type: LeaveType,
    /// Hours carried in when the row was created or migrated.
    pub opening_balance_hours: Decimal,
    /// Hours accrued since opening.
    pub accrued_hours: Decimal,
    /// Hours deducted for approved leave.
    pub taken_hours: Decimal,
    /// Net administrative adjustments.
    pub adjusted_hours: Decimal,
    /// Hours currently available to request.
    pub available_hours: Decimal,
}

impl LeaveBalance {
    /// Creates a zeroed ledger row for the given employee and leave type.
    pub fn zeroed(id: impl Into<String>, employee_id: impl Into<String>, leave_type: LeaveType) -> Self {
        Self {
            id: id.into(),
            employee_id: employee_id.into(),
            leave_type,
            opening_balance_hours: Decimal::ZERO,
            accrued_hours: Decimal::ZERO,
            taken_hours: Decimal::ZERO,
            adjusted_hours: Decimal::ZERO,
            available_hours: Decimal::ZERO,
        }
    }

    /// Checks the incremental-maintenance invariant. Used by tests and the
    /// in-memory store's debug assertions.
    pub fn invariant_holds(&self) -> bool {
        self.available_hours
            == self.opening_balance_hours + self.accrued_hours - self.taken_hours
                + self.adjusted_hours
    }
}
