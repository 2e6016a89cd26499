use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::PolicyError;

/// Errors that can occur during deduction calculations.
///
/// The engine is total over non-negative inputs; anything else is rejected
/// up front instead of producing negative deductions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// An input lies outside the documented domain.
    #[error("invalid argument '{field}': {value} must be non-negative")]
    InvalidArgument { field: &'static str, value: Decimal },

    /// The policy configuration failed validation.
    #[error("invalid policy configuration: {0}")]
    InvalidPolicy(#[from] PolicyError),
}
