//! Calculation logic for the leave entitlement engine.
//!
//! This module contains the pure calculation functions: working-day
//! resolution, chargeable-day calculation over a date range, FTE and
//! pro-rata entitlement derivation, and the service-length eligibility
//! gate. Everything here is stateless and safe to call concurrently; the
//! holiday and policy inputs are supplied by the caller.

mod calendar;
mod chargeable;
mod eligibility;
mod entitlement;

pub use calendar::{count_working_days, is_weekend, is_working_day, matching_holiday};
pub use chargeable::{ChargeableLeaveResult, DayCharge, DayKind, calculate_chargeable_leave};
pub use eligibility::{Eligibility, check_eligibility};
pub use entitlement::{
    EntitlementBreakdown, FteBreakdown, base_days_per_year, calculate_fte,
    calculate_pro_rata_entitlement,
};
