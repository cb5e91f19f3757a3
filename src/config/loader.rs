//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{LeavePolicy, LeaveType};

use super::types::{EngineConfig, EngineSettings, PoliciesConfig};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// answers policy and settings lookups.
///
/// # Directory Structure
///
/// ```text
/// config/leave/
/// ├── engine.yaml     # Engine settings (staffing threshold)
/// └── policies.yaml   # Leave policies, one active per leave type
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
/// use leave_engine::models::LeaveType;
///
/// let loader = ConfigLoader::load("./config/leave").unwrap();
/// let policy = loader.active_policy(LeaveType::Annual).unwrap();
/// println!("Annual accrual rate: {}", policy.accrual_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] when a required file is
    /// missing and [`EngineError::ConfigParseError`] when a file contains
    /// invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let policies = Self::load_yaml::<PoliciesConfig>(&path.join("policies.yaml"))?;

        Ok(Self {
            config: EngineConfig::new(settings, policies.policies),
        })
    }

    /// Wraps an already-built configuration, for tests and embedders.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the active policy for a leave type.
    pub fn active_policy(&self, leave_type: LeaveType) -> EngineResult<&LeavePolicy> {
        self.config.active_policy(leave_type)
    }
}
