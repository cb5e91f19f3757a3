//! HTTP API module for the leave entitlement engine.
//!
//! This module provides the REST endpoints for chargeable-day previews,
//! entitlement reads, the request workflow and ledger maintenance.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AdjustRequest, ApproveRequest, CancelRequest, ChargeablePreviewRequest, DeclineRequest,
    SubmitRequest,
};
pub use response::{ApiError, CacheVersionResponse, EntitlementResponse};
pub use state::AppState;
