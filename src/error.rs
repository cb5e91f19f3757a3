//! Error types for the leave entitlement engine.
//!
//! Domain-rule violations are distinct variants rather than stringly-typed
//! failures, so callers can branch on them; the API layer maps each variant
//! to a stable error code.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{LeaveType, RequestStatus};

/// The main error type for the leave entitlement engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A date range had its end before its start.
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidDateRange {
        /// The start of the range.
        start: NaiveDate,
        /// The end of the range.
        end: NaiveDate,
    },

    /// A request field was missing or malformed.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No employee record exists for the given identifier.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee identifier that was not found.
        id: String,
    },

    /// No leave request record exists for the given identifier.
    #[error("Leave request not found: {id}")]
    RequestNotFound {
        /// The request identifier that was not found.
        id: String,
    },

    /// No active policy is configured for the given leave type.
    #[error("No active leave policy for leave type '{leave_type}'")]
    PolicyNotFound {
        /// The leave type with no active policy.
        leave_type: LeaveType,
    },

    /// No ledger row exists for the employee and leave type.
    #[error("No leave balance for employee '{employee_id}' and leave type '{leave_type}'")]
    BalanceNotFound {
        /// The employee whose balance was missing.
        employee_id: String,
        /// The leave type with no ledger row.
        leave_type: LeaveType,
    },

    /// The deduction would leave the balance negative and the policy does
    /// not permit negative balances.
    #[error(
        "Insufficient {leave_type} balance: requested {requested_hours} hours, {available_hours} available"
    )]
    InsufficientBalance {
        /// The leave type being deducted.
        leave_type: LeaveType,
        /// The hours the caller tried to deduct.
        requested_hours: Decimal,
        /// The hours currently available.
        available_hours: Decimal,
    },

    /// Another pending or approved request for the same employee intersects
    /// the requested range.
    #[error("Requested range overlaps existing leave request '{existing_request_id}'")]
    OverlappingLeave {
        /// The request the candidate range collides with.
        existing_request_id: String,
    },

    /// Casual and contractor staff have no paid-leave entitlement.
    #[error("Employees with employment type '{employment_type}' cannot take paid leave")]
    CasualCannotTakePaidLeave {
        /// The offending employment type, as its wire name.
        employment_type: String,
    },

    /// The employee has not yet served long enough to use this leave type.
    #[error("Not yet eligible for {leave_type} leave")]
    NotEligible {
        /// The gated leave type.
        leave_type: LeaveType,
        /// The date at which eligibility will begin, when known.
        eligibility_date: Option<NaiveDate>,
    },

    /// The request has already left the state the transition expected.
    #[error("Leave request '{request_id}' already decided (status: {status})")]
    AlreadyDecided {
        /// The request that was already decided.
        request_id: String,
        /// The status found at write time.
        status: RequestStatus,
    },

    /// The actor lacks the capability the operation requires.
    #[error("Not authorized: {message}")]
    NotAuthorized {
        /// A description of the missing capability.
        message: String,
    },

    /// The persistence collaborator was unavailable. Retryable.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the infrastructure failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
