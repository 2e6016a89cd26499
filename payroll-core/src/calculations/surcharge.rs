//! Solidarity surcharge.
//!
//! The surcharge is zero up to an exemption threshold on income tax, rises at
//! the phase-in rate on the excess, and switches to the flat surcharge rate
//! where both formulas meet. The threshold doubles for married profiles.

use rust_decimal::Decimal;
use tracing::debug;

use super::CalculationError;
use super::common::{floor_units, require_non_negative};
use crate::models::{PolicyError, SurchargeConfig};

impl SurchargeConfig {
    /// Exemption threshold for the given marital status.
    pub fn threshold(
        &self,
        is_married: bool,
    ) -> Decimal {
        if is_married {
            self.exemption_threshold * Decimal::TWO
        } else {
            self.exemption_threshold
        }
    }

    /// Income tax at which the phase-in amount reaches the full-rate amount.
    ///
    /// Solving `(tax − threshold) · phase_in = tax · surcharge` gives
    /// `threshold · phase_in / (phase_in − surcharge)`. `None` when the
    /// phase-in rate does not exceed the surcharge rate, since the two
    /// formulas then never meet.
    pub fn phase_in_upper_bound(
        &self,
        is_married: bool,
    ) -> Option<Decimal> {
        if self.phase_in_rate <= self.surcharge_rate {
            return None;
        }
        self.threshold(is_married)
            .checked_mul(self.phase_in_rate)?
            .checked_div(self.phase_in_rate - self.surcharge_rate)
    }
}

/// Computes the solidarity surcharge from income tax.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::PolicyYearConfig;
/// use payroll_core::calculations::SurchargeEngine;
///
/// let policy = PolicyYearConfig::year_2025();
/// let engine = SurchargeEngine::new(&policy.surcharge);
///
/// assert_eq!(engine.compute(dec!(19950), false).unwrap(), dec!(0));
/// assert_eq!(engine.compute(dec!(25000), false).unwrap(), dec!(600));
/// assert_eq!(engine.compute(dec!(50000), false).unwrap(), dec!(2750));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SurchargeEngine<'a> {
    config: &'a SurchargeConfig,
}

impl<'a> SurchargeEngine<'a> {
    pub fn new(config: &'a SurchargeConfig) -> Self {
        Self { config }
    }

    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidPolicy`] when the phase-in rate does
    /// not exceed the surcharge rate, and
    /// [`CalculationError::InvalidArgument`] for negative income tax.
    pub fn compute(
        &self,
        income_tax: Decimal,
        is_married: bool,
    ) -> Result<Decimal, CalculationError> {
        let upper_bound = self.config.phase_in_upper_bound(is_married).ok_or(
            PolicyError::PhaseInRateTooLow {
                surcharge_rate: self.config.surcharge_rate,
                phase_in_rate: self.config.phase_in_rate,
            },
        )?;
        let income_tax = require_non_negative("income_tax", income_tax)?;
        let threshold = self.config.threshold(is_married);

        if income_tax <= threshold {
            return Ok(Decimal::ZERO);
        }

        let surcharge = if income_tax <= upper_bound {
            floor_units((income_tax - threshold) * self.config.phase_in_rate)
        } else {
            floor_units(income_tax * self.config.surcharge_rate)
        };

        debug!(
            income_tax = %income_tax,
            threshold = %threshold,
            upper_bound = %upper_bound,
            surcharge = %surcharge,
            "computed solidarity surcharge"
        );

        Ok(surcharge)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::PolicyYearConfig;

    fn surcharge(
        income_tax: Decimal,
        is_married: bool,
    ) -> Decimal {
        let policy = PolicyYearConfig::year_2025();
        SurchargeEngine::new(&policy.surcharge)
            .compute(income_tax, is_married)
            .unwrap()
    }

    // =========================================================================
    // SurchargeConfig tests
    // =========================================================================

    #[test]
    fn threshold_doubles_when_married() {
        let config = PolicyYearConfig::year_2025().surcharge;

        assert_eq!(config.threshold(false), dec!(19950));
        assert_eq!(config.threshold(true), dec!(39900));
    }

    #[test]
    fn upper_bound_is_where_both_formulas_meet() {
        let config = PolicyYearConfig::year_2025().surcharge;

        assert_eq!(config.phase_in_upper_bound(false), Some(dec!(37094.53125)));
        assert_eq!(config.phase_in_upper_bound(true), Some(dec!(74189.0625)));

        let bound = config.phase_in_upper_bound(false).unwrap();
        let phase_in = (bound - config.threshold(false)) * config.phase_in_rate;
        let full = bound * config.surcharge_rate;
        assert!((phase_in - full).abs() < dec!(0.0001));
    }

    #[test]
    fn no_upper_bound_when_rates_never_meet() {
        let mut config = PolicyYearConfig::year_2025().surcharge;
        config.phase_in_rate = config.surcharge_rate;

        assert_eq!(config.phase_in_upper_bound(false), None);

        config.phase_in_rate = dec!(0.03);
        assert_eq!(config.phase_in_upper_bound(true), None);
    }

    // =========================================================================
    // compute tests
    // =========================================================================

    #[test]
    fn zero_at_and_below_threshold() {
        assert_eq!(surcharge(dec!(0), false), dec!(0));
        assert_eq!(surcharge(dec!(19950), false), dec!(0));
        assert_eq!(surcharge(dec!(39900), true), dec!(0));
    }

    #[test]
    fn phase_in_applies_to_excess_only() {
        // (19951 - 19950) * 0.119
        assert_eq!(surcharge(dec!(19951), false), dec!(0));
        assert_eq!(surcharge(dec!(20000), false), dec!(5));
        assert_eq!(surcharge(dec!(25000), false), dec!(600));
    }

    #[test]
    fn zones_agree_at_upper_bound() {
        // Last phase-in value and first full-rate value
        assert_eq!(surcharge(dec!(37094), false), dec!(2040));
        assert_eq!(surcharge(dec!(37095), false), dec!(2040));
        assert_eq!(surcharge(dec!(37095), false), (dec!(37095) * dec!(0.055)).floor());
    }

    #[test]
    fn full_rate_above_upper_bound() {
        assert_eq!(surcharge(dec!(37200), false), dec!(2046));
        assert_eq!(surcharge(dec!(50000), false), dec!(2750));
    }

    #[test]
    fn married_threshold_exempts_single_phase_in_range() {
        assert_eq!(surcharge(dec!(25000), true), dec!(0));
        // (45000 - 39900) * 0.119 = 606.9
        assert_eq!(surcharge(dec!(45000), true), dec!(606));
    }

    #[test]
    fn non_decreasing_over_income_tax() {
        let mut previous = Decimal::ZERO;
        let mut tax = dec!(19000);
        while tax <= dec!(40000) {
            let current = surcharge(tax, false);
            assert!(current >= previous, "surcharge fell at {tax}");
            previous = current;
            tax += dec!(7);
        }
    }

    #[test]
    fn equal_rates_are_rejected_instead_of_dividing_by_zero() {
        let mut policy = PolicyYearConfig::year_2025();
        policy.surcharge.phase_in_rate = dec!(0.055);
        let engine = SurchargeEngine::new(&policy.surcharge);

        for income_tax in [dec!(0), dec!(30000)] {
            assert_eq!(
                engine.compute(income_tax, false),
                Err(CalculationError::InvalidPolicy(
                    PolicyError::PhaseInRateTooLow {
                        surcharge_rate: dec!(0.055),
                        phase_in_rate: dec!(0.055),
                    }
                ))
            );
        }
    }

    #[test]
    fn negative_income_tax_is_rejected() {
        let policy = PolicyYearConfig::year_2025();

        let result = SurchargeEngine::new(&policy.surcharge).compute(dec!(-5), false);

        assert_eq!(
            result,
            Err(CalculationError::InvalidArgument {
                field: "income_tax",
                value: dec!(-5),
            })
        );
    }
}
