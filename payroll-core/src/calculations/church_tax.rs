//! Church tax.
//!
//! Members pay a flat percentage of income tax. The percentage depends on
//! the region; non-members pay nothing.

use rust_decimal::Decimal;
use tracing::debug;

use super::common::floor_units;
use crate::models::{ChurchTaxConfig, Region};

impl ChurchTaxConfig {
    pub fn rate_for(
        &self,
        region: Region,
    ) -> Decimal {
        if self.reduced_rate_regions.contains(&region) {
            self.reduced_rate
        } else {
            self.standard_rate
        }
    }
}

/// Region-dependent flat percentage of income tax for church members.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::{PolicyYearConfig, Region};
/// use payroll_core::calculations::ChurchTaxEngine;
///
/// let policy = PolicyYearConfig::year_2025();
/// let engine = ChurchTaxEngine::new(&policy.church_tax);
///
/// assert_eq!(engine.compute(dec!(25476), true, Region::Other), dec!(2292));
/// assert_eq!(engine.compute(dec!(25476), true, Region::Bavaria), dec!(2038));
/// assert_eq!(engine.compute(dec!(25476), false, Region::Other), dec!(0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChurchTaxEngine<'a> {
    config: &'a ChurchTaxConfig,
}

impl<'a> ChurchTaxEngine<'a> {
    pub fn new(config: &'a ChurchTaxConfig) -> Self {
        Self { config }
    }

    /// Zero for non-members and for income tax at or below zero.
    pub fn compute(
        &self,
        income_tax: Decimal,
        is_member: bool,
        region: Region,
    ) -> Decimal {
        if !is_member || income_tax <= Decimal::ZERO {
            debug!(is_member, income_tax = %income_tax, "no church tax due");
            return Decimal::ZERO;
        }

        let rate = self.config.rate_for(region);
        let church_tax = floor_units(income_tax * rate);
        debug!(
            income_tax = %income_tax,
            region = region.as_str(),
            rate = %rate,
            church_tax = %church_tax,
            "computed church tax"
        );
        church_tax
    }
}
