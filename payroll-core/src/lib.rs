pub mod calculations;
pub mod models;
pub mod registry;

pub use calculations::{CalculationError, DeductionCalculator, PayrollRequest};
pub use models::*;
pub use registry::{PolicyRegistry, RegistryError};
