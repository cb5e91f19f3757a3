//! Configuration types for the leave entitlement engine.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{LeavePolicy, LeaveType};

/// Settings for the advisory staffing-conflict check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffingSettings {
    /// A staffing conflict is flagged when the number of concurrently
    /// absent department members would exceed this count.
    pub max_concurrent_absences: u32,
}

/// Engine-wide settings loaded from `engine.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Staffing-conflict configuration.
    pub staffing: StaffingSettings,
}

/// The `policies.yaml` document: the organization's leave policies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoliciesConfig {
    /// All configured policies, active or not.
    pub policies: Vec<LeavePolicy>,
}

/// The complete engine configuration.
///
/// Holds the engine settings and the policy set, and answers policy
/// lookups. One active policy per leave type is assumed; when data contains
/// more than one, the first wins and the duplicate is a data-integrity
/// concern outside this engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: EngineSettings,
    policies: Vec<LeavePolicy>,
}

impl EngineConfig {
    /// Creates a configuration from already-loaded parts.
    pub fn new(settings: EngineSettings, policies: Vec<LeavePolicy>) -> Self {
        Self { settings, policies }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the active policy for a leave type.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PolicyNotFound`] when no active policy is
    /// configured for the leave type.
    pub fn active_policy(&self, leave_type: LeaveType) -> EngineResult<&LeavePolicy> {
        self.policies
            .iter()
            .find(|p| p.is_active && p.leave_type == leave_type)
            .ok_or(EngineError::PolicyNotFound { leave_type })
    }

    /// Returns all active policies.
    pub fn active_policies(&self) -> impl Iterator<Item = &LeavePolicy> {
        self.policies.iter().filter(|p| p.is_active)
    }
}
