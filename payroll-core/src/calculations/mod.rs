//! Payroll deduction calculations.
//!
//! Each engine borrows the part of a [`crate::PolicyYearConfig`] it needs
//! and exposes pure functions over annual amounts. [`DeductionCalculator`]
//! chains them into a full [`crate::DeductionBreakdown`].

pub mod allowances;
pub mod breakdown;
pub mod church_tax;
pub mod common;
pub mod contributions;
mod error;
pub mod income_tax;
pub mod surcharge;

pub use allowances::AllowanceAggregator;
pub use breakdown::{DeductionCalculator, PayrollRequest};
pub use church_tax::ChurchTaxEngine;
pub use contributions::ContributionEngine;
pub use error::CalculationError;
pub use income_tax::{ProgressiveTaxEngine, TaxSegment};
pub use surcharge::SurchargeEngine;
