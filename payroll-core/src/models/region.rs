use serde::{Deserialize, Serialize};

/// Federal state grouping relevant to church tax.
///
/// Only two states levy the reduced church-tax rate; every other state is
/// folded into [`Region::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "BY")]
    Bavaria,
    #[serde(rename = "BW")]
    BadenWuerttemberg,
    #[default]
    #[serde(rename = "OTHER")]
    Other,
}

impl Region {
    pub fn all() -> &'static [Region] {
        &[Region::Bavaria, Region::BadenWuerttemberg, Region::Other]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bavaria => "BY",
            Self::BadenWuerttemberg => "BW",
            Self::Other => "OTHER",
        }
    }

    /// Parses a region code. Matching ignores case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BY" => Some(Self::Bavaria),
            "BW" => Some(Self::BadenWuerttemberg),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}
