//! Employee social insurance contributions.
//!
//! Each contribution is `floor(min(gross, ceiling) × rate)`. Pension and
//! unemployment use fixed rates; health adds half the caller's supplemental
//! rate; nursing care adjusts its rate for Saxony and the number of children.
//! All four are based on gross income, never on taxable income.
//!
//! # Nursing care rate
//!
//! ```text
//! base      = total − saxony_employer        (in Saxony)
//!           = employee_rate                  (elsewhere)
//! + childless_surcharge                      (no children)
//! − per_child_reduction × min(children − 1, max_steps)   (children ≥ 2)
//! floored at minimum_employee_rate
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::CalculationError;
use super::common::{capped_contribution, max, require_non_negative};
use crate::models::ContributionConfig;

/// Percent-to-fraction divisor combined with the employee's half share.
const SUPPLEMENTAL_RATE_DIVISOR: Decimal = dec!(200);

/// Computes the four employee contributions.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::PolicyYearConfig;
/// use payroll_core::calculations::ContributionEngine;
///
/// let policy = PolicyYearConfig::year_2025();
/// let engine = ContributionEngine::new(&policy.contributions);
///
/// assert_eq!(engine.pension(dec!(30000)).unwrap(), dec!(2790));
/// assert_eq!(engine.unemployment(dec!(30000)).unwrap(), dec!(390));
/// assert_eq!(engine.health(dec!(30000), dec!(2.5), false).unwrap(), dec!(2565));
/// assert_eq!(engine.nursing_care(dec!(30000), 0, false).unwrap(), dec!(720));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContributionEngine<'a> {
    config: &'a ContributionConfig,
}

impl<'a> ContributionEngine<'a> {
    pub fn new(config: &'a ContributionConfig) -> Self {
        Self { config }
    }

    /// Pension insurance at a fixed rate.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidArgument`] for negative gross income.
    pub fn pension(
        &self,
        gross_income: Decimal,
    ) -> Result<Decimal, CalculationError> {
        let gross_income = require_non_negative("gross_income", gross_income)?;
        Ok(self.apply(
            "pension",
            gross_income,
            self.config.pension_ceiling,
            self.config.pension_rate,
        ))
    }

    /// Unemployment insurance at a fixed rate.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidArgument`] for negative gross income.
    pub fn unemployment(
        &self,
        gross_income: Decimal,
    ) -> Result<Decimal, CalculationError> {
        let gross_income = require_non_negative("gross_income", gross_income)?;
        Ok(self.apply(
            "unemployment",
            gross_income,
            self.config.unemployment_ceiling,
            self.config.unemployment_rate,
        ))
    }

    /// Employee health rate: base rate plus half the supplemental percentage.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidArgument`] for a negative supplemental rate.
    pub fn health_rate(
        &self,
        supplemental_rate_percent: Decimal,
    ) -> Result<Decimal, CalculationError> {
        let supplemental =
            require_non_negative("supplemental_rate_percent", supplemental_rate_percent)?;
        Ok(self.config.health.base_rate + supplemental / SUPPLEMENTAL_RATE_DIVISOR)
    }

    /// Statutory health insurance; zero for privately insured employees.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidArgument`] for negative gross income
    /// or a negative supplemental rate.
    pub fn health(
        &self,
        gross_income: Decimal,
        supplemental_rate_percent: Decimal,
        is_privately_insured: bool,
    ) -> Result<Decimal, CalculationError> {
        let gross_income = require_non_negative("gross_income", gross_income)?;
        if is_privately_insured {
            return Ok(Decimal::ZERO);
        }
        let rate = self.health_rate(supplemental_rate_percent)?;
        Ok(self.apply("health", gross_income, self.config.health.ceiling, rate))
    }

    /// Employee nursing care rate; never below the configured minimum.
    pub fn nursing_care_rate(
        &self,
        num_children: u32,
        is_in_saxony: bool,
    ) -> Decimal {
        let n = &self.config.nursing_care;

        let mut rate = if is_in_saxony {
            n.total_rate - n.saxony_employer_rate
        } else {
            n.employee_rate
        };

        if num_children == 0 {
            rate += n.childless_surcharge;
        }

        let reduction_steps = num_children.saturating_sub(1).min(n.max_reduction_steps);
        rate -= Decimal::from(reduction_steps) * n.per_child_reduction;

        max(rate, n.minimum_employee_rate)
    }

    /// Nursing care insurance.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidArgument`] for negative gross income.
    pub fn nursing_care(
        &self,
        gross_income: Decimal,
        num_children: u32,
        is_in_saxony: bool,
    ) -> Result<Decimal, CalculationError> {
        let gross_income = require_non_negative("gross_income", gross_income)?;
        let rate = self.nursing_care_rate(num_children, is_in_saxony);
        Ok(self.apply(
            "nursing_care",
            gross_income,
            self.config.nursing_care.ceiling,
            rate,
        ))
    }

    fn apply(
        &self,
        contribution: &'static str,
        gross_income: Decimal,
        ceiling: Decimal,
        rate: Decimal,
    ) -> Decimal {
        let amount = capped_contribution(gross_income, ceiling, rate);
        debug!(
            contribution,
            gross_income = %gross_income,
            capped = gross_income > ceiling,
            rate = %rate,
            amount = %amount,
            "computed contribution"
        );
        amount
    }
}
