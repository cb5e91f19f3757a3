//! Response types for the leave engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes and stable error codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Response body for `GET /leave/entitlement/{employee_id}/{leave_type}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementResponse {
    /// The employee the entitlement is for.
    pub employee_id: String,
    /// The leave category.
    pub leave_type: crate::models::LeaveType,
    /// Identifier of the governing policy.
    pub policy_id: String,
    /// The FTE derivation used.
    pub fte: crate::calculation::FteBreakdown,
    /// Service-based eligibility for the category.
    pub eligibility: crate::calculation::Eligibility,
    /// Annual entitlement, absent while the employee is ineligible or has
    /// no paid-leave entitlement at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entitlement: Option<crate::calculation::EntitlementBreakdown>,
}

/// Response body for `GET /leave/cache/{employee_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheVersionResponse {
    /// The employee the version belongs to.
    pub employee_id: String,
    /// The current cache version.
    pub version: u64,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            ref err @ EngineError::InvalidDateRange { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_DATE_RANGE", err.to_string()),
            },
            ref err @ EngineError::InvalidRequest { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(err.to_string()),
            },
            ref err @ EngineError::EmployeeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", err.to_string()),
            },
            ref err @ EngineError::RequestNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("REQUEST_NOT_FOUND", err.to_string()),
            },
            ref err @ EngineError::PolicyNotFound { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("POLICY_NOT_FOUND", err.to_string()),
            },
            ref err @ EngineError::BalanceNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("BALANCE_NOT_FOUND", err.to_string()),
            },
            ref err @ EngineError::InsufficientBalance { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new("INSUFFICIENT_BALANCE", err.to_string()),
            },
            ref err @ EngineError::OverlappingLeave { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("OVERLAPPING_LEAVE", err.to_string()),
            },
            ref err @ EngineError::CasualCannotTakePaidLeave { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new("CASUAL_CANNOT_TAKE_PAID_LEAVE", err.to_string()),
            },
            EngineError::NotEligible {
                ref leave_type,
                eligibility_date,
            } => {
                let details = match eligibility_date {
                    Some(date) => format!("Eligible from {}", date),
                    None => "Eligibility date cannot be determined".to_string(),
                };
                ApiErrorResponse {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    error: ApiError::with_details(
                        "NOT_ELIGIBLE",
                        format!("Not yet eligible for {} leave", leave_type),
                        details,
                    ),
                }
            }
            ref err @ EngineError::AlreadyDecided { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("ALREADY_DECIDED", err.to_string()),
            },
            ref err @ EngineError::NotAuthorized { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("NOT_AUTHORIZED", err.to_string()),
            },
            ref err @ EngineError::StoreUnavailable { .. } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::new("STORE_UNAVAILABLE", err.to_string()),
            },
        }
    }
}
