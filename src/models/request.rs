//! Leave request model and lifecycle types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LeaveType;

/// How the endpoints of a request's range are charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialDayType {
    /// Every working day in the range is a full chargeable day.
    Full,
    /// The first day of the range is a half day.
    HalfStart,
    /// The last day of the range is a half day.
    HalfEnd,
}

impl Default for PartialDayType {
    fn default() -> Self {
        PartialDayType::Full
    }
}

/// The lifecycle state of a leave request.
///
/// Transitions: `Pending -> Approved | Declined | Cancelled`, and
/// `Approved -> Cancelled` (a recall). `Declined` and `Cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting a decision. The only state created by submission.
    Pending,
    /// Approved; chargeable hours have been deducted from the ledger.
    Approved,
    /// Declined while pending. Terminal; no ledger effect.
    Declined,
    /// Withdrawn, either while pending or by recalling an approval.
    Cancelled,
}

impl RequestStatus {
    /// Returns true if no further transition is defined out of this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Declined | RequestStatus::Cancelled)
    }

    /// Returns the snake_case wire name for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Declined => "declined",
            RequestStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An employee's request for a range of leave.
///
/// Request history is append-only; only `status` and the decision fields
/// move, and only through the approval state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The employee requesting leave.
    pub employee_id: String,
    /// The leave category requested.
    pub leave_type: LeaveType,
    /// First calendar day of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last calendar day of the range (inclusive).
    pub end_date: NaiveDate,
    /// How the range endpoints are charged.
    #[serde(default)]
    pub partial_day_type: PartialDayType,
    /// Lifecycle state.
    pub status: RequestStatus,
    /// Chargeable days cached at submission time. Recomputed at approval;
    /// the cached value is advisory only.
    pub chargeable_days: Decimal,
    /// Hours actually deducted from the ledger at approval. Set by the
    /// approve transition; the recall path restores exactly this amount.
    #[serde(default)]
    pub deducted_hours: Option<Decimal>,
    /// The manager responsible for deciding the request, when known.
    #[serde(default)]
    pub manager_id: Option<String>,
    /// The requester's stated reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// The reason recorded when the request was declined or cancelled.
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    /// When the request left the pending state.
    #[serde(default)]
    pub decided_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    /// Returns true if this request's range intersects `[start, end]`.
    ///
    /// Both ranges are inclusive on both ends.
    pub fn intersects(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}
