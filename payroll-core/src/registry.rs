use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::models::PolicyYearConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no policy registered for year {0}")]
    UnknownYear(i32),
}

/// Registry of [`PolicyYearConfig`] instances, keyed by policy year.
///
/// Typical lifetime:
/// 1. Create with `PolicyRegistry::with_builtin()`.
/// 2. Call `register` for any year loaded from a file.
/// 3. Call `get` whenever a calculation needs a policy.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    policies: HashMap<i32, PolicyYearConfig>,
}

impl PolicyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in policy year.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(PolicyYearConfig::year_2025());
        registry
    }

    /// Register a policy.
    ///
    /// If a policy for the same year is already present it is replaced.
    pub fn register(
        &mut self,
        policy: PolicyYearConfig,
    ) {
        debug!(policy_year = policy.policy_year, "registering policy");
        self.policies.insert(policy.policy_year, policy);
    }

    /// Years with a registered policy, sorted ascending.
    pub fn available_years(&self) -> Vec<i32> {
        let mut years: Vec<_> = self.policies.keys().copied().collect();
        years.sort_unstable();
        years
    }

    /// Look up the policy for `year`.
    pub fn get(
        &self,
        year: i32,
    ) -> Result<&PolicyYearConfig, RegistryError> {
        self.policies
            .get(&year)
            .ok_or(RegistryError::UnknownYear(year))
    }

    /// The most recent registered policy, if any.
    pub fn latest(&self) -> Option<&PolicyYearConfig> {
        self.policies
            .iter()
            .max_by_key(|(year, _)| **year)
            .map(|(_, policy)| policy)
    }
}
