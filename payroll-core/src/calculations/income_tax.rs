//! Progressive income tax.
//!
//! Taxable income is truncated to whole units, placed in one of five
//! segments and evaluated with that segment's formula. Intermediate products
//! keep full decimal precision; only the segment result is floored.
//!
//! | Segment | Range | Formula |
//! |---------|-------|---------|
//! | Zero    | x ≤ b0 | 0 |
//! | Entry   | b0 < x ≤ b1 | (k1·y + k2)·y, y = (x − b0)/10000 |
//! | Progression | b1 < x ≤ b2 | (k3·z + k4)·z + k5, z = (x − b1)/10000 |
//! | Upper   | b2 < x ≤ b3 | r_high1·x − c1 |
//! | Top     | x > b3 | r_high2·x − c2 |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::CalculationError;
use super::common::{floor_units, require_non_negative};
use crate::models::IncomeTaxSchedule;

const NORMALIZATION_DIVISOR: Decimal = dec!(10000);

/// The five segments of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxSegment {
    Zero,
    Entry,
    Progression,
    Upper,
    Top,
}

impl IncomeTaxSchedule {
    /// Locates the segment a whole-unit income falls in.
    pub fn segment_for(
        &self,
        income: Decimal,
    ) -> TaxSegment {
        if income <= self.b0 {
            TaxSegment::Zero
        } else if income <= self.b1 {
            TaxSegment::Entry
        } else if income <= self.b2 {
            TaxSegment::Progression
        } else if income <= self.b3 {
            TaxSegment::Upper
        } else {
            TaxSegment::Top
        }
    }

    /// Evaluates one segment's formula at `income` without truncation.
    ///
    /// Used to compare adjacent segments at a shared boundary.
    pub fn segment_value(
        &self,
        segment: TaxSegment,
        income: Decimal,
    ) -> Decimal {
        match segment {
            TaxSegment::Zero => Decimal::ZERO,
            TaxSegment::Entry => {
                let y = (income - self.b0) / NORMALIZATION_DIVISOR;
                (self.k1 * y + self.k2) * y
            }
            TaxSegment::Progression => {
                let z = (income - self.b1) / NORMALIZATION_DIVISOR;
                (self.k3 * z + self.k4) * z + self.k5
            }
            TaxSegment::Upper => self.r_high1 * income - self.c1,
            TaxSegment::Top => self.r_high2 * income - self.c2,
        }
    }

    /// Differences between adjacent segment formulas at b1, b2 and b3.
    ///
    /// Each entry is `upper_segment(b) − lower_segment(b)`. A schedule is
    /// continuous when every gap is within one currency unit.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_core::PolicyYearConfig;
    ///
    /// let schedule = PolicyYearConfig::year_2025().income_tax;
    /// for gap in schedule.boundary_gaps() {
    ///     assert!(gap.abs() < rust_decimal::Decimal::ONE);
    /// }
    /// ```
    pub fn boundary_gaps(&self) -> [Decimal; 3] {
        [
            self.segment_value(TaxSegment::Progression, self.b1)
                - self.segment_value(TaxSegment::Entry, self.b1),
            self.segment_value(TaxSegment::Upper, self.b2)
                - self.segment_value(TaxSegment::Progression, self.b2),
            self.segment_value(TaxSegment::Top, self.b3)
                - self.segment_value(TaxSegment::Upper, self.b3),
        ]
    }
}

/// Maps taxable income to income tax.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::PolicyYearConfig;
/// use payroll_core::calculations::ProgressiveTaxEngine;
///
/// let policy = PolicyYearConfig::year_2025();
/// let engine = ProgressiveTaxEngine::new(&policy.income_tax);
///
/// assert_eq!(engine.compute(dec!(12096)).unwrap(), dec!(0));
/// assert_eq!(engine.compute(dec!(16638)).unwrap(), dec!(828));
/// assert_eq!(engine.compute(dec!(100000)).unwrap(), dec!(31088));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProgressiveTaxEngine<'a> {
    schedule: &'a IncomeTaxSchedule,
}

impl<'a> ProgressiveTaxEngine<'a> {
    pub fn new(schedule: &'a IncomeTaxSchedule) -> Self {
        Self { schedule }
    }

    /// Computes income tax, floored to whole units.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidArgument`] for negative taxable income.
    pub fn compute(
        &self,
        taxable_income: Decimal,
    ) -> Result<Decimal, CalculationError> {
        let income = floor_units(require_non_negative("taxable_income", taxable_income)?);
        let segment = self.schedule.segment_for(income);
        let tax = floor_units(self.schedule.segment_value(segment, income));

        debug!(income = %income, ?segment, tax = %tax, "computed income tax");

        Ok(tax)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::PolicyYearConfig;

    fn tax(income: Decimal) -> Decimal {
        let policy = PolicyYearConfig::year_2025();
        ProgressiveTaxEngine::new(&policy.income_tax)
            .compute(income)
            .unwrap()
    }

    // =========================================================================
    // segment tests
    // =========================================================================

    #[test]
    fn segment_for_uses_inclusive_upper_bounds() {
        let schedule = PolicyYearConfig::year_2025().income_tax;

        assert_eq!(schedule.segment_for(dec!(12096)), TaxSegment::Zero);
        assert_eq!(schedule.segment_for(dec!(12097)), TaxSegment::Entry);
        assert_eq!(schedule.segment_for(dec!(17443)), TaxSegment::Entry);
        assert_eq!(schedule.segment_for(dec!(17444)), TaxSegment::Progression);
        assert_eq!(schedule.segment_for(dec!(68480)), TaxSegment::Progression);
        assert_eq!(schedule.segment_for(dec!(68481)), TaxSegment::Upper);
        assert_eq!(schedule.segment_for(dec!(277825)), TaxSegment::Upper);
        assert_eq!(schedule.segment_for(dec!(277826)), TaxSegment::Top);
    }

    #[test]
    fn boundary_gaps_for_2025_are_below_one_unit() {
        let schedule = PolicyYearConfig::year_2025().income_tax;

        for gap in schedule.boundary_gaps() {
            assert!(gap.abs() < Decimal::ONE, "gap {gap} too large");
        }
    }

    #[test]
    fn boundary_gaps_detect_discontinuous_schedule() {
        let mut schedule = PolicyYearConfig::year_2025().income_tax;
        schedule.k5 = dec!(938.24);

        let [at_b1, _, _] = schedule.boundary_gaps();

        assert!(at_b1 < dec!(-70));
    }

    // =========================================================================
    // compute tests
    // =========================================================================

    #[test]
    fn zero_tax_up_to_first_boundary() {
        assert_eq!(tax(dec!(0)), dec!(0));
        assert_eq!(tax(dec!(12096)), dec!(0));
        assert_eq!(tax(dec!(12096.99)), dec!(0));
    }

    #[test]
    fn entry_segment_just_above_first_boundary() {
        // y = 0.0001 -> 0.14...
        assert_eq!(tax(dec!(12097)), dec!(0));
        assert_eq!(tax(dec!(13000)), dec!(134));
    }

    #[test]
    fn entry_segment_truncates_fractional_income_first() {
        assert_eq!(tax(dec!(16638.99)), tax(dec!(16638)));
        assert_eq!(tax(dec!(16638)), dec!(828));
    }

    #[test]
    fn progression_segment_values() {
        assert_eq!(tax(dec!(17443)), dec!(1015));
        assert_eq!(tax(dec!(17444)), dec!(1015));
        assert_eq!(tax(dec!(30000)), dec!(4303));
        assert_eq!(tax(dec!(50000)), dec!(10691));
        assert_eq!(tax(dec!(68480)), dec!(17849));
    }

    #[test]
    fn upper_segment_is_linear() {
        assert_eq!(tax(dec!(68481)), dec!(17850));
        assert_eq!(tax(dec!(100000)), dec!(31088));
        assert_eq!(tax(dec!(277825)), dec!(105774));
    }

    #[test]
    fn top_segment_is_linear() {
        assert_eq!(tax(dec!(277826)), dec!(105775));
        assert_eq!(tax(dec!(300000)), dec!(115753));
    }

    #[test]
    fn replaced_constants_change_result_without_code_change() {
        let mut schedule = PolicyYearConfig::year_2025().income_tax;
        schedule.r_high1 = dec!(0.40);
        schedule.c1 = dec!(9000);

        let result = ProgressiveTaxEngine::new(&schedule)
            .compute(dec!(100000))
            .unwrap();

        assert_eq!(result, dec!(31000));
    }

    #[test]
    fn negative_income_is_rejected() {
        let policy = PolicyYearConfig::year_2025();

        let result = ProgressiveTaxEngine::new(&policy.income_tax).compute(dec!(-1));

        assert_eq!(
            result,
            Err(CalculationError::InvalidArgument {
                field: "taxable_income",
                value: dec!(-1),
            })
        );
    }
}
