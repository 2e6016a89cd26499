//! Common utility functions for deduction calculations.
//!
//! Statutory amounts are truncated to whole currency units with
//! [`floor_units`] at the exact step that defines them. [`round_half_up`] is
//! only used for display views.

use rust_decimal::Decimal;

use super::CalculationError;

/// Truncates a value down to whole currency units.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::floor_units;
///
/// assert_eq!(floor_units(dec!(1587.60)), dec!(1587));
/// assert_eq!(floor_units(dec!(2790)), dec!(2790));
/// ```
pub fn floor_units(value: Decimal) -> Decimal {
    value.floor()
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Rejects negative inputs with [`CalculationError::InvalidArgument`].
pub fn require_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, CalculationError> {
    if value < Decimal::ZERO {
        return Err(CalculationError::InvalidArgument { field, value });
    }
    Ok(value)
}

/// Applies `rate` to `amount` capped at `ceiling`, truncated to whole units.
pub fn capped_contribution(
    amount: Decimal,
    ceiling: Decimal,
    rate: Decimal,
) -> Decimal {
    floor_units(amount.min(ceiling) * rate)
}
