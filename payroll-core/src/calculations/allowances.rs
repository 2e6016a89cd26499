//! Tax-free allowance aggregation.
//!
//! | Component | Amount |
//! |-----------|--------|
//! | Basic personal allowance | base, doubled when married |
//! | Employee expense flat rate | fixed |
//! | Special expenses flat rate | single or married amount |
//! | Child allowance | per child |
//! | Single-parent relief | base + per additional child, only with children |

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{AllowanceConfig, AllowanceInput};

/// Sums the tax-free allowances for a profile.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::{AllowanceInput, PolicyYearConfig};
/// use payroll_core::calculations::AllowanceAggregator;
///
/// let policy = PolicyYearConfig::year_2025();
/// let aggregator = AllowanceAggregator::new(&policy.allowances);
///
/// let total = aggregator.compute(AllowanceInput::default());
///
/// // 12096 + 1230 + 36
/// assert_eq!(total, dec!(13362));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AllowanceAggregator<'a> {
    config: &'a AllowanceConfig,
}

impl<'a> AllowanceAggregator<'a> {
    pub fn new(config: &'a AllowanceConfig) -> Self {
        Self { config }
    }

    /// Returns the total allowance; never less than the basic personal allowance.
    pub fn compute(
        &self,
        input: AllowanceInput,
    ) -> Decimal {
        let children = Decimal::from(input.num_children);

        let total = self.personal_allowance(input.is_married)
            + self.config.employee_expense_allowance
            + self.special_expenses(input.is_married)
            + children * self.config.per_child_allowance
            + self.single_parent_relief(input.is_single_parent, input.num_children);

        debug!(
            is_married = input.is_married,
            num_children = input.num_children,
            is_single_parent = input.is_single_parent,
            total = %total,
            "computed allowances"
        );

        total
    }

    fn personal_allowance(
        &self,
        is_married: bool,
    ) -> Decimal {
        if is_married {
            self.config.base_personal_allowance * Decimal::TWO
        } else {
            self.config.base_personal_allowance
        }
    }

    fn special_expenses(
        &self,
        is_married: bool,
    ) -> Decimal {
        if is_married {
            self.config.special_expenses_married
        } else {
            self.config.special_expenses_single
        }
    }

    /// The first child earns the base relief, each further child the increment.
    fn single_parent_relief(
        &self,
        is_single_parent: bool,
        num_children: u32,
    ) -> Decimal {
        if !is_single_parent || num_children == 0 {
            return Decimal::ZERO;
        }
        let extra_children = Decimal::from(num_children - 1);
        self.config.single_parent_base + extra_children * self.config.single_parent_per_extra_child
    }
}
