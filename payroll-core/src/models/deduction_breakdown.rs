use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayPeriod;
use crate::calculations::common::round_half_up;

/// Annual deduction breakdown for one gross income and profile.
///
/// Every amount except `gross_income` is derived, floor-truncated to whole
/// currency units at the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    pub gross_income: Decimal,
    pub allowances: Decimal,
    pub taxable_income: Decimal,

    // Taxes
    pub income_tax: Decimal,
    pub solidarity_surcharge: Decimal,
    pub church_tax: Decimal,

    // Social insurance (employee share)
    pub pension_contribution: Decimal,
    pub unemployment_contribution: Decimal,
    pub health_contribution: Decimal,
    pub nursing_care_contribution: Decimal,

    pub total_deductions: Decimal,
    pub net_income: Decimal,
}

impl DeductionBreakdown {
    /// Sum of the three tax components.
    pub fn total_taxes(&self) -> Decimal {
        self.income_tax + self.solidarity_surcharge + self.church_tax
    }

    /// Sum of the four social-insurance components.
    pub fn total_contributions(&self) -> Decimal {
        self.pension_contribution
            + self.unemployment_contribution
            + self.health_contribution
            + self.nursing_care_contribution
    }

    /// Spreads the annual figures over `period` for display.
    ///
    /// Each field is divided independently and rounded half-up to cents, so
    /// the per-period total may differ from the sum of its rounded parts by
    /// a cent or two.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use payroll_core::{DeductionCalculator, PayPeriod, PersonalProfile, PolicyYearConfig};
    ///
    /// let policy = PolicyYearConfig::year_2025();
    /// let calculator = DeductionCalculator::new(&policy);
    /// let breakdown = calculator
    ///     .compute_breakdown(dec!(30000), &PersonalProfile::new())
    ///     .unwrap();
    ///
    /// let monthly = breakdown.per_period(PayPeriod::Monthly);
    /// assert_eq!(monthly.gross_income, dec!(2500.00));
    /// assert_eq!(monthly.pension_contribution, dec!(232.50));
    /// ```
    pub fn per_period(
        &self,
        period: PayPeriod,
    ) -> PeriodBreakdown {
        let spread = |amount: Decimal| round_half_up(period.from_annual(amount));

        PeriodBreakdown {
            period,
            gross_income: spread(self.gross_income),
            income_tax: spread(self.income_tax),
            solidarity_surcharge: spread(self.solidarity_surcharge),
            church_tax: spread(self.church_tax),
            pension_contribution: spread(self.pension_contribution),
            unemployment_contribution: spread(self.unemployment_contribution),
            health_contribution: spread(self.health_contribution),
            nursing_care_contribution: spread(self.nursing_care_contribution),
            total_deductions: spread(self.total_deductions),
            net_income: spread(self.net_income),
        }
    }
}

impl fmt::Display for DeductionBreakdown {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{:<28}{:>14}", "Gross income", self.gross_income)?;
        writeln!(f, "{:<28}{:>14}", "Allowances", self.allowances)?;
        writeln!(f, "{:<28}{:>14}", "Taxable income", self.taxable_income)?;
        writeln!(f, "{:<28}{:>14}", "Income tax", self.income_tax)?;
        writeln!(f, "{:<28}{:>14}", "Solidarity surcharge", self.solidarity_surcharge)?;
        writeln!(f, "{:<28}{:>14}", "Church tax", self.church_tax)?;
        writeln!(f, "{:<28}{:>14}", "Pension insurance", self.pension_contribution)?;
        writeln!(f, "{:<28}{:>14}", "Unemployment insurance", self.unemployment_contribution)?;
        writeln!(f, "{:<28}{:>14}", "Health insurance", self.health_contribution)?;
        writeln!(f, "{:<28}{:>14}", "Nursing care insurance", self.nursing_care_contribution)?;
        writeln!(f, "{:<28}{:>14}", "Total deductions", self.total_deductions)?;
        write!(f, "{:<28}{:>14}", "Net income", self.net_income)
    }
}

/// A [`DeductionBreakdown`] spread over one pay period, rounded to cents.
///
/// This is a presentation view; it never feeds back into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBreakdown {
    pub period: PayPeriod,
    pub gross_income: Decimal,
    pub income_tax: Decimal,
    pub solidarity_surcharge: Decimal,
    pub church_tax: Decimal,
    pub pension_contribution: Decimal,
    pub unemployment_contribution: Decimal,
    pub health_contribution: Decimal,
    pub nursing_care_contribution: Decimal,
    pub total_deductions: Decimal,
    pub net_income: Decimal,
}

impl fmt::Display for PeriodBreakdown {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "[{}]", self.period.as_str())?;
        writeln!(f, "{:<28}{:>14}", "Gross income", self.gross_income)?;
        writeln!(f, "{:<28}{:>14}", "Income tax", self.income_tax)?;
        writeln!(f, "{:<28}{:>14}", "Solidarity surcharge", self.solidarity_surcharge)?;
        writeln!(f, "{:<28}{:>14}", "Church tax", self.church_tax)?;
        writeln!(f, "{:<28}{:>14}", "Pension insurance", self.pension_contribution)?;
        writeln!(f, "{:<28}{:>14}", "Unemployment insurance", self.unemployment_contribution)?;
        writeln!(f, "{:<28}{:>14}", "Health insurance", self.health_contribution)?;
        writeln!(f, "{:<28}{:>14}", "Nursing care insurance", self.nursing_care_contribution)?;
        writeln!(f, "{:<28}{:>14}", "Total deductions", self.total_deductions)?;
        write!(f, "{:<28}{:>14}", "Net income", self.net_income)
    }
}
