//! One-read bundle of an employee's leave standing.

use chrono::NaiveDate;
use serde::Serialize;

use crate::cache::LeaveCache;
use crate::calculation::{
    calculate_fte, calculate_pro_rata_entitlement, check_eligibility, Eligibility,
    EntitlementBreakdown, FteBreakdown,
};
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::ledger;
use crate::models::{LeaveBalance, LeaveRequest, LeaveType, RequestStatus};
use crate::store::LeaveStore;

/// One leave category's standing for an employee.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveCategoryContext {
    /// The leave category.
    pub leave_type: LeaveType,
    /// Identifier of the governing policy.
    pub policy_id: String,
    /// Service-based eligibility for this category.
    pub eligibility: Eligibility,
    /// Annual entitlement, absent while the employee is ineligible or has
    /// no published hours to pro-rata against.
    pub entitlement: Option<EntitlementBreakdown>,
}

/// Everything a balance view needs about one employee.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveContext {
    /// The employee the context describes.
    pub employee_id: String,
    /// FTE derivation shared by every category.
    pub fte: FteBreakdown,
    /// Current ledger rows, one per eligible category.
    pub balances: Vec<LeaveBalance>,
    /// Per-category policy, eligibility and entitlement.
    pub categories: Vec<LeaveCategoryContext>,
    /// The employee's pending requests.
    pub pending_requests: Vec<LeaveRequest>,
    /// Cache version at read time, for staleness comparison.
    pub cache_version: u64,
}

/// Bundles balances, entitlements, eligibility and pending requests into a
/// single read. Missing ledger rows for eligible categories are created on
/// the way through, so a first read after onboarding already shows rows.
pub fn get_leave_context(
    store: &dyn LeaveStore,
    config: &EngineConfig,
    cache: &LeaveCache,
    employee_id: &str,
    today: NaiveDate,
) -> EngineResult<LeaveContext> {
    let employee = store.employee(employee_id)?;

    let balances = ledger::ensure_leave_balances(store, config, employee_id, today)?;

    // Headline FTE, derived against the first active policy's full-time
    // reference. Each category's entitlement below is scaled by an FTE
    // computed against its own policy's reference.
    let fte = match config.active_policies().next() {
        Some(policy) => calculate_fte(&employee, policy),
        None => FteBreakdown {
            fte: None,
            fte_percent: None,
            hours_per_week: employee.hours_per_week,
            full_time_hours: crate::models::LeavePolicy::default_hours_per_week_reference(),
            is_pro_rata: false,
        },
    };

    let mut categories = Vec::new();
    for policy in config.active_policies() {
        let eligibility = check_eligibility(&employee, policy, today);
        let entitlement = if eligibility.eligible && !employee.is_unpaid_leave_only() {
            let policy_fte = calculate_fte(&employee, policy);
            Some(calculate_pro_rata_entitlement(policy, &policy_fte))
        } else {
            None
        };
        categories.push(LeaveCategoryContext {
            leave_type: policy.leave_type,
            policy_id: policy.id.clone(),
            eligibility,
            entitlement,
        });
    }

    let pending_requests = store
        .requests_for_employee(employee_id)?
        .into_iter()
        .filter(|r| r.status == RequestStatus::Pending)
        .collect();

    Ok(LeaveContext {
        employee_id: employee_id.to_string(),
        fte,
        balances,
        categories,
        pending_requests,
        cache_version: cache.version(employee_id),
    })
}
