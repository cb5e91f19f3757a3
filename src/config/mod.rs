//! Configuration for the leave entitlement engine.
//!
//! Leave policies are reference data: one active policy per leave type,
//! loaded from YAML alongside the engine settings.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineSettings, PoliciesConfig, StaffingSettings};
