use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Period a gross figure is quoted in.
///
/// The engine itself only works on annual amounts; callers convert at the
/// boundary with [`PayPeriod::to_annual`] and [`PayPeriod::from_annual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayPeriod {
    #[default]
    Monthly,
    Yearly,
}

impl PayPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "yearly" | "annual" | "year" | "y" => Some(Self::Yearly),
            _ => None,
        }
    }

    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Yearly => 1,
        }
    }

    /// Scales an amount quoted in this period up to a full year.
    ///
    /// Returns `None` if the annual amount does not fit in a [`Decimal`].
    pub fn to_annual(
        &self,
        amount: Decimal,
    ) -> Option<Decimal> {
        amount.checked_mul(Decimal::from(self.periods_per_year()))
    }

    /// Spreads an annual amount evenly over this period. No rounding is applied.
    pub fn from_annual(
        &self,
        amount: Decimal,
    ) -> Decimal {
        amount / Decimal::from(self.periods_per_year())
    }
}
