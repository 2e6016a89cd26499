//! Full deduction pipeline.
//!
//! ```text
//! profile ─► allowances ─► taxable income ─► income tax ─┬─► surcharge
//!                                                        └─► church tax
//! gross ───► pension, unemployment, health, nursing care
//! ```
//!
//! Every step is pure; identical inputs always produce identical breakdowns.

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::common::{max, require_non_negative};
use super::{
    AllowanceAggregator, CalculationError, ChurchTaxEngine, ContributionEngine,
    ProgressiveTaxEngine, SurchargeEngine,
};
use crate::models::{AllowanceInput, DeductionBreakdown, PersonalProfile, PolicyYearConfig};

/// One entry of a batch: an annual gross income and the profile it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRequest {
    pub gross_income: Decimal,
    pub profile: PersonalProfile,
}

/// Composes the individual engines into a complete breakdown.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::{DeductionCalculator, PersonalProfile, PolicyYearConfig};
///
/// let policy = PolicyYearConfig::year_2025();
/// let calculator = DeductionCalculator::new(&policy);
///
/// let breakdown = calculator
///     .compute_breakdown(dec!(30000), &PersonalProfile::new())
///     .unwrap();
///
/// assert_eq!(breakdown.taxable_income, dec!(16638));
/// assert_eq!(breakdown.income_tax, dec!(828));
/// assert_eq!(breakdown.solidarity_surcharge, dec!(0));
/// assert_eq!(breakdown.total_deductions, dec!(7293));
/// assert_eq!(breakdown.net_income, dec!(22707));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DeductionCalculator<'a> {
    policy: &'a PolicyYearConfig,
}

impl<'a> DeductionCalculator<'a> {
    pub fn new(policy: &'a PolicyYearConfig) -> Self {
        Self { policy }
    }

    /// Computes the annual breakdown for `gross_income`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidPolicy`] if the policy fails
    /// validation, or [`CalculationError::InvalidArgument`] for a negative
    /// gross income or supplemental health rate.
    pub fn compute_breakdown(
        &self,
        gross_income: Decimal,
        profile: &PersonalProfile,
    ) -> Result<DeductionBreakdown, CalculationError> {
        self.policy.validate()?;
        let gross_income = require_non_negative("gross_income", gross_income)?;

        let allowances = AllowanceAggregator::new(&self.policy.allowances)
            .compute(AllowanceInput::from(profile));
        let taxable_income = self.taxable_income(gross_income, allowances);

        let income_tax = ProgressiveTaxEngine::new(&self.policy.income_tax).compute(taxable_income)?;
        let solidarity_surcharge =
            SurchargeEngine::new(&self.policy.surcharge).compute(income_tax, profile.is_married)?;
        let church_tax = ChurchTaxEngine::new(&self.policy.church_tax).compute(
            income_tax,
            profile.is_church_member,
            profile.region,
        );

        let contributions = ContributionEngine::new(&self.policy.contributions);
        let pension_contribution = contributions.pension(gross_income)?;
        let unemployment_contribution = contributions.unemployment(gross_income)?;
        let health_contribution = contributions.health(
            gross_income,
            profile.additional_health_rate_percent,
            profile.is_privately_insured,
        )?;
        let nursing_care_contribution = contributions.nursing_care(
            gross_income,
            profile.num_children,
            profile.is_in_saxony,
        )?;

        let total_deductions = income_tax
            + solidarity_surcharge
            + church_tax
            + pension_contribution
            + unemployment_contribution
            + health_contribution
            + nursing_care_contribution;
        let net_income = gross_income - total_deductions;

        debug!(
            policy_year = self.policy.policy_year,
            gross_income = %gross_income,
            total_deductions = %total_deductions,
            net_income = %net_income,
            "computed deduction breakdown"
        );

        Ok(DeductionBreakdown {
            gross_income,
            allowances,
            taxable_income,
            income_tax,
            solidarity_surcharge,
            church_tax,
            pension_contribution,
            unemployment_contribution,
            health_contribution,
            nursing_care_contribution,
            total_deductions,
            net_income,
        })
    }

    /// Computes every request independently, in parallel.
    ///
    /// Results are returned in input order; a failing entry does not affect
    /// the others.
    pub fn compute_batch(
        &self,
        requests: &[PayrollRequest],
    ) -> Vec<Result<DeductionBreakdown, CalculationError>> {
        requests
            .par_iter()
            .map(|request| self.compute_breakdown(request.gross_income, &request.profile))
            .collect()
    }

    /// Gross income minus allowances, clamped at zero.
    fn taxable_income(
        &self,
        gross_income: Decimal,
        allowances: Decimal,
    ) -> Decimal {
        let taxable = gross_income - allowances;
        if taxable < Decimal::ZERO {
            warn!(
                gross_income = %gross_income,
                allowances = %allowances,
                "allowances exceed gross income; taxable income clamped to zero"
            );
        }
        max(taxable, Decimal::ZERO)
    }
}
