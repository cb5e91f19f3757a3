//! HTTP request handlers for the leave engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::str::FromStr;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_chargeable_leave, calculate_fte, calculate_pro_rata_entitlement, check_eligibility,
};
use crate::error::EngineError;
use crate::ledger;
use crate::models::LeaveType;
use crate::workflow::{
    approve_leave_request, cancel_leave_request, check_staffing_conflict, decline_leave_request,
    get_leave_context, submit_leave_request,
};

use super::request::{
    AdjustRequest, ApproveRequest, CancelRequest, ChargeablePreviewRequest, DeclineRequest,
    SubmitRequest,
};
use super::response::{ApiError, ApiErrorResponse, CacheVersionResponse, EntitlementResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/leave/chargeable", post(preview_chargeable_handler))
        .route(
            "/leave/entitlement/:employee_id/:leave_type",
            get(entitlement_handler),
        )
        .route("/leave/context/:employee_id", get(context_handler))
        .route("/leave/requests", post(submit_handler))
        .route("/leave/requests/:id/approve", post(approve_handler))
        .route("/leave/requests/:id/decline", post(decline_handler))
        .route("/leave/requests/:id/cancel", post(cancel_handler))
        .route("/leave/requests/:id/conflict", get(conflict_handler))
        .route("/leave/balances/:employee_id/ensure", post(ensure_handler))
        .route("/leave/balances/:employee_id/adjust", post(adjust_handler))
        .route("/leave/cache/:employee_id", get(cache_version_handler))
        .with_state(state)
}

/// Extracts a JSON body, mapping axum's rejection into the API error shape.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response())
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: EngineError, correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    let api_error: ApiErrorResponse = error.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Handler for POST /leave/chargeable.
///
/// Previews the chargeable days for a date range without creating a
/// request or touching the ledger.
async fn preview_chargeable_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChargeablePreviewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        "Processing chargeable preview"
    );

    let result = state
        .store()
        .employee(&request.employee_id)
        .and_then(|employee| {
            let holidays = state.store().holidays()?;
            calculate_chargeable_leave(
                request.start_date,
                request.end_date,
                &employee,
                request.partial_day_type,
                &holidays,
            )
        });

    match result {
        Ok(preview) => json_response(StatusCode::OK, preview),
        Err(error) => error_response(error, correlation_id),
    }
}

/// Handler for GET /leave/entitlement/{employee_id}/{leave_type}.
async fn entitlement_handler(
    State(state): State<AppState>,
    Path((employee_id, leave_type)): Path<(String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let leave_type = match LeaveType::from_str(&leave_type) {
        Ok(leave_type) => leave_type,
        Err(error) => return error_response(error, correlation_id),
    };

    let result = state.store().employee(&employee_id).and_then(|employee| {
        let policy = state.config().active_policy(leave_type)?;
        let fte = calculate_fte(&employee, policy);
        let eligibility = check_eligibility(&employee, policy, Utc::now().date_naive());
        let entitlement = if eligibility.eligible && !employee.is_unpaid_leave_only() {
            Some(calculate_pro_rata_entitlement(policy, &fte))
        } else {
            None
        };
        Ok(EntitlementResponse {
            employee_id: employee.id,
            leave_type,
            policy_id: policy.id.clone(),
            fte,
            eligibility,
            entitlement,
        })
    });

    match result {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(error) => error_response(error, correlation_id),
    }
}

/// Handler for GET /leave/context/{employee_id}.
async fn context_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = get_leave_context(
        state.store(),
        state.config().config(),
        state.cache(),
        &employee_id,
        Utc::now().date_naive(),
    );
    match result {
        Ok(context) => json_response(StatusCode::OK, context),
        Err(error) => error_response(error, correlation_id),
    }
}

/// Handler for POST /leave/requests.
async fn submit_handler(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        leave_type = %request.leave_type,
        "Processing leave submission"
    );

    let result = submit_leave_request(
        state.store(),
        state.config().config(),
        state.cache(),
        request.into(),
        Utc::now().date_naive(),
    );
    match result {
        Ok(created) => json_response(StatusCode::CREATED, created),
        Err(error) => error_response(error, correlation_id),
    }
}

/// Handler for POST /leave/requests/{id}/approve.
async fn approve_handler(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    payload: Result<Json<ApproveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let body = match parse_json(payload, correlation_id) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let result = approve_leave_request(
        state.store(),
        state.config().config(),
        state.cache(),
        &request_id,
        &body.approver_id,
        Utc::now(),
    );
    match result {
        Ok(approved) => json_response(StatusCode::OK, approved),
        Err(error) => error_response(error, correlation_id),
    }
}

/// Handler for POST /leave/requests/{id}/decline.
async fn decline_handler(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    payload: Result<Json<DeclineRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let body = match parse_json(payload, correlation_id) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let result = decline_leave_request(
        state.store(),
        state.cache(),
        &request_id,
        &body.approver_id,
        &body.reason,
        Utc::now(),
    );
    match result {
        Ok(declined) => json_response(StatusCode::OK, declined),
        Err(error) => error_response(error, correlation_id),
    }
}

/// Handler for POST /leave/requests/{id}/cancel.
async fn cancel_handler(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    payload: Result<Json<CancelRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let body = match parse_json(payload, correlation_id) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let result = cancel_leave_request(
        state.store(),
        state.cache(),
        &request_id,
        &body.actor_id,
        body.reason,
        body.can_override_past,
        Utc::now().date_naive(),
        Utc::now(),
    );
    match result {
        Ok(cancelled) => json_response(StatusCode::OK, cancelled),
        Err(error) => error_response(error, correlation_id),
    }
}

/// Handler for GET /leave/requests/{id}/conflict.
async fn conflict_handler(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.store().request(&request_id).and_then(|request| {
        check_staffing_conflict(state.store(), state.config().config(), &request)
    });
    match result {
        Ok(conflict) => json_response(StatusCode::OK, conflict),
        Err(error) => error_response(error, correlation_id),
    }
}

/// Handler for POST /leave/balances/{employee_id}/ensure.
///
/// Creates any missing ledger rows for the employee's eligible leave
/// categories. Idempotent.
async fn ensure_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = ledger::ensure_leave_balances(
        state.store(),
        state.config().config(),
        &employee_id,
        Utc::now().date_naive(),
    );
    match result {
        Ok(balances) => json_response(StatusCode::OK, balances),
        Err(error) => error_response(error, correlation_id),
    }
}

/// Handler for POST /leave/balances/{employee_id}/adjust.
async fn adjust_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<AdjustRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let body = match parse_json(payload, correlation_id) {
        Ok(body) => body,
        Err(response) => return response,
    };
    if body.reason.trim().is_empty() {
        return error_response(
            EngineError::InvalidRequest {
                field: "reason".to_string(),
                message: "an adjustment reason is required".to_string(),
            },
            correlation_id,
        );
    }

    let result = state.store().employee(&employee_id).and_then(|_| {
        let balance = ledger::adjust(
            state.store(),
            &employee_id,
            body.leave_type,
            body.delta_hours,
            &body.reason,
        )?;
        state.cache().invalidate(&employee_id);
        Ok(balance)
    });
    match result {
        Ok(balance) => json_response(StatusCode::OK, balance),
        Err(error) => error_response(error, correlation_id),
    }
}

/// Handler for GET /leave/cache/{employee_id}.
async fn cache_version_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let version = state.cache().version(&employee_id);
    json_response(
        StatusCode::OK,
        CacheVersionResponse {
            employee_id,
            version,
        },
    )
}
