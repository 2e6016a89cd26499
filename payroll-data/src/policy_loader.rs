//! TOML loader for policy-year configurations.
//!
//! The file mirrors [`PolicyYearConfig`] field for field. Decimal values are
//! written as quoted strings so they parse exactly:
//!
//! ```toml
//! policy_year = 2026
//!
//! [allowances]
//! base_personal_allowance = "12348"
//! # ...
//!
//! [church_tax]
//! reduced_rate = "0.08"
//! standard_rate = "0.09"
//! reduced_rate_regions = ["BY", "BW"]
//! ```
//!
//! [`PolicyLoader::to_toml_string`] renders the built-in schedule as a
//! starting template.

use std::path::Path;

use payroll_core::{PolicyError, PolicyYearConfig};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PolicyLoadError {
    #[error("cannot read policy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML render error: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("policy {year} is invalid: {source}")]
    Invalid { year: i32, source: PolicyError },
}

/// Loads and validates [`PolicyYearConfig`] values from TOML.
pub struct PolicyLoader;

impl PolicyLoader {
    /// Parses and validates a policy from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyLoadError::Parse`] for malformed TOML or missing
    /// fields, and [`PolicyLoadError::Invalid`] if the parsed values fail
    /// [`PolicyYearConfig::validate`].
    pub fn load_from_str(input: &str) -> Result<PolicyYearConfig, PolicyLoadError> {
        let policy: PolicyYearConfig = toml::from_str(input)?;
        policy
            .validate()
            .map_err(|source| PolicyLoadError::Invalid {
                year: policy.policy_year,
                source,
            })?;
        Ok(policy)
    }

    /// Reads a file from disk and delegates to [`PolicyLoader::load_from_str`].
    pub fn load_from_file(path: &Path) -> Result<PolicyYearConfig, PolicyLoadError> {
        let contents = std::fs::read_to_string(path)?;
        let policy = Self::load_from_str(&contents)?;
        info!(
            policy_year = policy.policy_year,
            path = %path.display(),
            "loaded policy file"
        );
        Ok(policy)
    }

    /// Renders a policy as TOML.
    pub fn to_toml_string(policy: &PolicyYearConfig) -> Result<String, PolicyLoadError> {
        Ok(toml::to_string(policy)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn rendered_builtin_policy_loads_back_unchanged() {
        let builtin = PolicyYearConfig::year_2025();

        let rendered = PolicyLoader::to_toml_string(&builtin).unwrap();
        let loaded = PolicyLoader::load_from_str(&rendered).unwrap();

        assert_eq!(loaded, builtin);
    }

    #[test]
    fn rendered_policy_quotes_decimals_and_lists_regions() {
        let rendered = PolicyLoader::to_toml_string(&PolicyYearConfig::year_2025()).unwrap();

        assert!(rendered.contains("policy_year = 2025"));
        assert!(rendered.contains("base_personal_allowance = \"12096\""));
        assert!(rendered.contains("reduced_rate_regions = [\"BY\", \"BW\"]"));
        assert!(rendered.contains("[contributions.nursing_care]"));
    }

    #[test]
    fn edited_value_is_picked_up() {
        let rendered = PolicyLoader::to_toml_string(&PolicyYearConfig::year_2025())
            .unwrap()
            .replace("policy_year = 2025", "policy_year = 2026")
            .replace(
                "base_personal_allowance = \"12096\"",
                "base_personal_allowance = \"12348\"",
            );

        let policy = PolicyLoader::load_from_str(&rendered).unwrap();

        assert_eq!(policy.policy_year, 2026);
        assert_eq!(policy.allowances.base_personal_allowance, dec!(12348));
    }

    #[test]
    fn invalid_values_are_rejected_after_parsing() {
        let rendered = PolicyLoader::to_toml_string(&PolicyYearConfig::year_2025())
            .unwrap()
            .replace("phase_in_rate = \"0.119\"", "phase_in_rate = \"0.05\"");

        let err = PolicyLoader::load_from_str(&rendered).expect_err("should fail");

        assert!(matches!(
            err,
            PolicyLoadError::Invalid {
                year: 2025,
                source: PolicyError::PhaseInRateTooLow { .. },
            }
        ));
    }

    #[test]
    fn missing_section_is_a_parse_error() {
        let err = PolicyLoader::load_from_str("policy_year = 2025\n").expect_err("should fail");

        let PolicyLoadError::Parse(inner) = err else {
            panic!("expected Parse error, got: {err:?}");
        };
        assert!(inner.to_string().contains("missing field"));
    }
}
