use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::Region;

/// Personal attributes that drive allowances, surcharges and contribution rates.
///
/// A profile is built fresh for every calculation and carries no identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalProfile {
    pub is_married: bool,
    pub num_children: u32,
    pub is_single_parent: bool,
    pub is_church_member: bool,
    pub region: Region,
    pub is_privately_insured: bool,
    pub is_in_saxony: bool,

    /// Health-fund supplemental rate in percent (2.5 means 2.5 %).
    ///
    /// Only half of it is borne by the employee.
    pub additional_health_rate_percent: Decimal,
}

impl PersonalProfile {
    /// A single, childless, publicly insured employee outside Saxony who is
    /// not a church member, paying a 2.5 % supplemental health rate.
    pub fn new() -> Self {
        Self {
            is_married: false,
            num_children: 0,
            is_single_parent: false,
            is_church_member: false,
            region: Region::Other,
            is_privately_insured: false,
            is_in_saxony: false,
            additional_health_rate_percent: dec!(2.5),
        }
    }
}

impl Default for PersonalProfile {
    fn default() -> Self {
        Self::new()
    }
}

/// The subset of a profile the allowance aggregator looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllowanceInput {
    pub is_married: bool,
    pub num_children: u32,
    pub is_single_parent: bool,
}

impl From<&PersonalProfile> for AllowanceInput {
    fn from(profile: &PersonalProfile) -> Self {
        Self {
            is_married: profile.is_married,
            num_children: profile.num_children,
            is_single_parent: profile.is_single_parent,
        }
    }
}
