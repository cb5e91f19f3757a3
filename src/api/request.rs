//! Request types for the leave engine API.
//!
//! This module defines the JSON request structures for the leave endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{LeaveType, PartialDayType};
use crate::workflow::LeaveSubmission;

/// Request body for the `POST /leave/chargeable` preview endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeablePreviewRequest {
    /// The employee the preview is for.
    pub employee_id: String,
    /// The first day of the range (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the range (inclusive).
    pub end_date: NaiveDate,
    /// How the range endpoints are charged.
    #[serde(default)]
    pub partial_day_type: PartialDayType,
}

/// Request body for `POST /leave/requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// The employee requesting leave.
    pub employee_id: String,
    /// The leave category requested.
    pub leave_type: LeaveType,
    /// The first day of the range (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the range (inclusive).
    pub end_date: NaiveDate,
    /// How the range endpoints are charged.
    #[serde(default)]
    pub partial_day_type: PartialDayType,
    /// The manager expected to decide the request.
    #[serde(default)]
    pub manager_id: Option<String>,
    /// The requester's stated reason.
    #[serde(default)]
    pub reason: Option<String>,
}

impl From<SubmitRequest> for LeaveSubmission {
    fn from(request: SubmitRequest) -> Self {
        LeaveSubmission {
            employee_id: request.employee_id,
            leave_type: request.leave_type,
            start_date: request.start_date,
            end_date: request.end_date,
            partial_day_type: request.partial_day_type,
            manager_id: request.manager_id,
            reason: request.reason,
        }
    }
}

/// Request body for `POST /leave/requests/{id}/approve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveRequest {
    /// The approving manager.
    pub approver_id: String,
}

/// Request body for `POST /leave/requests/{id}/decline`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclineRequest {
    /// The declining manager.
    pub approver_id: String,
    /// The reason for the decline. Required, must be non-empty.
    pub reason: String,
}

/// Request body for `POST /leave/requests/{id}/cancel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    /// Who is cancelling: the requester or someone acting for them.
    pub actor_id: String,
    /// An optional cancellation reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Whether the actor may cancel leave that has already started.
    #[serde(default)]
    pub can_override_past: bool,
}

/// Request body for `POST /leave/balances/{employee_id}/adjust`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustRequest {
    /// The leave category to adjust.
    pub leave_type: LeaveType,
    /// Signed hours to add to the balance.
    pub delta_hours: Decimal,
    /// The audit reason for the adjustment. Required, must be non-empty.
    pub reason: String,
}
