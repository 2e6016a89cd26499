mod deduction_breakdown;
mod pay_period;
mod personal_profile;
mod policy_year_config;
mod region;

pub use deduction_breakdown::{DeductionBreakdown, PeriodBreakdown};
pub use pay_period::PayPeriod;
pub use personal_profile::{AllowanceInput, PersonalProfile};
pub use policy_year_config::{
    AllowanceConfig, ChurchTaxConfig, ContributionConfig, HealthConfig, IncomeTaxSchedule,
    NursingCareConfig, PolicyError, PolicyYearConfig, SurchargeConfig,
};
pub use region::Region;
