//! Policy-year configuration for the deduction engine.
//!
//! All statutory constants for one year live in a [`PolicyYearConfig`]. The
//! formulas in [`crate::calculations`] never embed literals; adding a new
//! year means adding a new configuration, not touching formula code.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::PolicyYearConfig;
//!
//! let policy = PolicyYearConfig::year_2025();
//! assert_eq!(policy.policy_year, 2025);
//! assert_eq!(policy.allowances.base_personal_allowance, dec!(12096));
//! assert!(policy.validate().is_ok());
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Region;

/// Errors raised when a policy configuration holds values the formulas
/// cannot work with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// An allowance amount is negative.
    #[error("allowance '{name}' must be non-negative, got {value}")]
    NegativeAllowance { name: &'static str, value: Decimal },

    /// The bracket boundaries are not strictly ascending from a non-negative start.
    #[error("income tax boundaries must satisfy 0 <= b0 < b1 < b2 < b3, got {b0}, {b1}, {b2}, {b3}")]
    BoundariesNotAscending {
        b0: Decimal,
        b1: Decimal,
        b2: Decimal,
        b3: Decimal,
    },

    /// A rate lies outside [0, 1].
    #[error("rate '{name}' must be between 0 and 1, got {value}")]
    RateOutOfRange { name: &'static str, value: Decimal },

    /// The phase-in rate must exceed the surcharge rate for the band to close.
    #[error("phase-in rate {phase_in_rate} must be greater than surcharge rate {surcharge_rate}")]
    PhaseInRateTooLow {
        surcharge_rate: Decimal,
        phase_in_rate: Decimal,
    },

    /// A threshold is negative.
    #[error("threshold '{name}' must be non-negative, got {value}")]
    NegativeThreshold { name: &'static str, value: Decimal },

    /// A contribution ceiling is zero or negative.
    #[error("contribution ceiling '{name}' must be positive, got {value}")]
    NonPositiveCeiling { name: &'static str, value: Decimal },
}

/// Tax-free allowances subtracted from gross income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceConfig {
    /// Basic personal allowance; doubled for married profiles.
    pub base_personal_allowance: Decimal,
    /// Employee flat-rate expense deduction.
    pub employee_expense_allowance: Decimal,
    pub special_expenses_single: Decimal,
    pub special_expenses_married: Decimal,
    pub per_child_allowance: Decimal,
    /// Single-parent relief for the first child.
    pub single_parent_base: Decimal,
    /// Single-parent relief added for each child after the first.
    pub single_parent_per_extra_child: Decimal,
}

/// Five-segment progressive income tax schedule.
///
/// ```text
/// x <= b0         0
/// b0 < x <= b1    (k1·y + k2)·y           y = (x − b0) / 10000
/// b1 < x <= b2    (k3·z + k4)·z + k5      z = (x − b1) / 10000
/// b2 < x <= b3    r_high1·x − c1
/// x > b3          r_high2·x − c2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxSchedule {
    pub b0: Decimal,
    pub b1: Decimal,
    pub b2: Decimal,
    pub b3: Decimal,
    pub k1: Decimal,
    pub k2: Decimal,
    pub k3: Decimal,
    pub k4: Decimal,
    pub k5: Decimal,
    pub r_high1: Decimal,
    pub c1: Decimal,
    pub r_high2: Decimal,
    pub c2: Decimal,
}

/// Solidarity surcharge parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeConfig {
    pub surcharge_rate: Decimal,
    pub phase_in_rate: Decimal,
    /// Income tax up to which no surcharge is due; doubled for married profiles.
    pub exemption_threshold: Decimal,
}

/// Church tax rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurchTaxConfig {
    pub reduced_rate: Decimal,
    pub standard_rate: Decimal,
    /// Regions that levy `reduced_rate`; all others levy `standard_rate`.
    pub reduced_rate_regions: Vec<Region>,
}

/// Employee share of the statutory health insurance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthConfig {
    pub base_rate: Decimal,
    pub ceiling: Decimal,
    /// Supplemental rate (percent) used when the caller supplies none.
    pub default_supplemental_rate_percent: Decimal,
}

/// Employee share of the nursing care insurance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NursingCareConfig {
    /// Combined employer and employee rate.
    pub total_rate: Decimal,
    /// Default employee rate outside Saxony.
    pub employee_rate: Decimal,
    /// Saxony's employer share; the employee pays `total_rate` minus this.
    pub saxony_employer_rate: Decimal,
    pub childless_surcharge: Decimal,
    pub per_child_reduction: Decimal,
    /// Maximum number of reduction steps (children two through five).
    pub max_reduction_steps: u32,
    pub minimum_employee_rate: Decimal,
    pub ceiling: Decimal,
}

/// Social insurance contribution parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionConfig {
    pub pension_rate: Decimal,
    pub pension_ceiling: Decimal,
    pub unemployment_rate: Decimal,
    pub unemployment_ceiling: Decimal,
    pub health: HealthConfig,
    pub nursing_care: NursingCareConfig,
}

/// Every constant the engine needs for one policy year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyYearConfig {
    pub policy_year: i32,
    pub allowances: AllowanceConfig,
    pub income_tax: IncomeTaxSchedule,
    pub surcharge: SurchargeConfig,
    pub church_tax: ChurchTaxConfig,
    pub contributions: ContributionConfig,
}

impl PolicyYearConfig {
    /// The 2025 schedule.
    pub fn year_2025() -> Self {
        Self {
            policy_year: 2025,
            allowances: AllowanceConfig {
                base_personal_allowance: dec!(12096),
                employee_expense_allowance: dec!(1230),
                special_expenses_single: dec!(36),
                special_expenses_married: dec!(72),
                per_child_allowance: dec!(9600),
                single_parent_base: dec!(4260),
                single_parent_per_extra_child: dec!(240),
            },
            income_tax: IncomeTaxSchedule {
                b0: dec!(12096),
                b1: dec!(17443),
                b2: dec!(68480),
                b3: dec!(277825),
                k1: dec!(932.30),
                k2: dec!(1400),
                k3: dec!(176.64),
                k4: dec!(2397),
                k5: dec!(1015.13),
                r_high1: dec!(0.42),
                c1: dec!(10911.92),
                r_high2: dec!(0.45),
                c2: dec!(19246.67),
            },
            surcharge: SurchargeConfig {
                surcharge_rate: dec!(0.055),
                phase_in_rate: dec!(0.119),
                exemption_threshold: dec!(19950),
            },
            church_tax: ChurchTaxConfig {
                reduced_rate: dec!(0.08),
                standard_rate: dec!(0.09),
                reduced_rate_regions: vec![Region::Bavaria, Region::BadenWuerttemberg],
            },
            contributions: ContributionConfig {
                pension_rate: dec!(0.093),
                pension_ceiling: dec!(96600),
                unemployment_rate: dec!(0.013),
                unemployment_ceiling: dec!(96600),
                health: HealthConfig {
                    base_rate: dec!(0.073),
                    ceiling: dec!(66150),
                    default_supplemental_rate_percent: dec!(2.5),
                },
                nursing_care: NursingCareConfig {
                    total_rate: dec!(0.036),
                    employee_rate: dec!(0.018),
                    saxony_employer_rate: dec!(0.013),
                    childless_surcharge: dec!(0.006),
                    per_child_reduction: dec!(0.0025),
                    max_reduction_steps: 4,
                    minimum_employee_rate: dec!(0.008),
                    ceiling: dec!(66150),
                },
            },
        }
    }

    /// Validates every value in the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`PolicyError`] found.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use payroll_core::{PolicyError, PolicyYearConfig};
    ///
    /// let mut policy = PolicyYearConfig::year_2025();
    /// policy.contributions.pension_ceiling = dec!(0);
    ///
    /// assert_eq!(
    ///     policy.validate(),
    ///     Err(PolicyError::NonPositiveCeiling { name: "pension_ceiling", value: dec!(0) })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), PolicyError> {
        self.validate_allowances()?;
        self.validate_income_tax()?;
        self.validate_surcharge()?;
        self.validate_church_tax()?;
        self.validate_contributions()
    }

    fn validate_allowances(&self) -> Result<(), PolicyError> {
        let a = &self.allowances;
        for (name, value) in [
            ("base_personal_allowance", a.base_personal_allowance),
            ("employee_expense_allowance", a.employee_expense_allowance),
            ("special_expenses_single", a.special_expenses_single),
            ("special_expenses_married", a.special_expenses_married),
            ("per_child_allowance", a.per_child_allowance),
            ("single_parent_base", a.single_parent_base),
            ("single_parent_per_extra_child", a.single_parent_per_extra_child),
        ] {
            if value < Decimal::ZERO {
                return Err(PolicyError::NegativeAllowance { name, value });
            }
        }
        Ok(())
    }

    fn validate_income_tax(&self) -> Result<(), PolicyError> {
        let s = &self.income_tax;
        if s.b0 < Decimal::ZERO || s.b0 >= s.b1 || s.b1 >= s.b2 || s.b2 >= s.b3 {
            return Err(PolicyError::BoundariesNotAscending {
                b0: s.b0,
                b1: s.b1,
                b2: s.b2,
                b3: s.b3,
            });
        }
        check_rate("r_high1", s.r_high1)?;
        check_rate("r_high2", s.r_high2)
    }

    fn validate_surcharge(&self) -> Result<(), PolicyError> {
        let s = &self.surcharge;
        check_rate("surcharge_rate", s.surcharge_rate)?;
        check_rate("phase_in_rate", s.phase_in_rate)?;
        if s.phase_in_rate <= s.surcharge_rate {
            return Err(PolicyError::PhaseInRateTooLow {
                surcharge_rate: s.surcharge_rate,
                phase_in_rate: s.phase_in_rate,
            });
        }
        if s.exemption_threshold < Decimal::ZERO {
            return Err(PolicyError::NegativeThreshold {
                name: "exemption_threshold",
                value: s.exemption_threshold,
            });
        }
        Ok(())
    }

    fn validate_church_tax(&self) -> Result<(), PolicyError> {
        check_rate("church_reduced_rate", self.church_tax.reduced_rate)?;
        check_rate("church_standard_rate", self.church_tax.standard_rate)
    }

    fn validate_contributions(&self) -> Result<(), PolicyError> {
        let c = &self.contributions;
        let n = &c.nursing_care;
        for (name, value) in [
            ("pension_rate", c.pension_rate),
            ("unemployment_rate", c.unemployment_rate),
            ("health_base_rate", c.health.base_rate),
            ("nursing_total_rate", n.total_rate),
            ("nursing_employee_rate", n.employee_rate),
            ("nursing_saxony_employer_rate", n.saxony_employer_rate),
            ("nursing_childless_surcharge", n.childless_surcharge),
            ("nursing_per_child_reduction", n.per_child_reduction),
            ("nursing_minimum_employee_rate", n.minimum_employee_rate),
        ] {
            check_rate(name, value)?;
        }
        for (name, value) in [
            ("pension_ceiling", c.pension_ceiling),
            ("unemployment_ceiling", c.unemployment_ceiling),
            ("health_ceiling", c.health.ceiling),
            ("nursing_care_ceiling", n.ceiling),
        ] {
            if value <= Decimal::ZERO {
                return Err(PolicyError::NonPositiveCeiling { name, value });
            }
        }
        if c.health.default_supplemental_rate_percent < Decimal::ZERO {
            return Err(PolicyError::NegativeThreshold {
                name: "default_supplemental_rate_percent",
                value: c.health.default_supplemental_rate_percent,
            });
        }
        Ok(())
    }
}

fn check_rate(
    name: &'static str,
    value: Decimal,
) -> Result<(), PolicyError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(PolicyError::RateOutOfRange { name, value });
    }
    Ok(())
}
