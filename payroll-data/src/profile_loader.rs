//! CSV loader for batch payroll requests.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive. Every column except `gross_income` is optional
//! and may also be left empty per row.
//!
//! | Column | Type | Default | Notes |
//! |----------------------------------|---------|---------|------------------------------------|
//! | `gross_income` | decimal | required | Must be non-negative |
//! | `period` | string | yearly | `monthly` or `yearly` |
//! | `is_married` | bool | false | `true` / `false` |
//! | `num_children` | integer | 0 | Must be non-negative |
//! | `is_single_parent` | bool | false | |
//! | `is_church_member` | bool | false | |
//! | `region` | string | OTHER | One of `BY`, `BW`, `OTHER` |
//! | `is_privately_insured` | bool | false | |
//! | `is_in_saxony` | bool | false | |
//! | `additional_health_rate_percent` | decimal | policy | Percent, e.g. `2.5` |
//!
//! Monthly amounts are converted to annual before the request is built.
//!
//! ### Example
//!
//! ```csv
//! gross_income,period,is_married,num_children,is_church_member,region
//! 30000,yearly,false,0,false,OTHER
//! 4500,monthly,true,2,true,BY
//! ```
use std::path::Path;

use payroll_core::{PayPeriod, PayrollRequest, PersonalProfile, Region};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    gross_income: Decimal,
    #[serde(default)]
    period: Option<String>,
    #[serde(default)]
    is_married: Option<bool>,
    #[serde(default)]
    num_children: Option<i64>,
    #[serde(default)]
    is_single_parent: Option<bool>,
    #[serde(default)]
    is_church_member: Option<bool>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    is_privately_insured: Option<bool>,
    #[serde(default)]
    is_in_saxony: Option<bool>,
    #[serde(default)]
    additional_health_rate_percent: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum ProfileLoadError {
    /// The file could not be read.
    #[error("cannot read payroll file: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `region` cell held an unrecognised code. `row` is 1-based
    /// (header = row 0).
    #[error("unrecognised region '{region}' on row {row}")]
    InvalidRegion { region: String, row: usize },

    /// A `period` cell held an unrecognised value.
    #[error("unrecognised pay period '{period}' on row {row}")]
    InvalidPeriod { period: String, row: usize },

    /// A numeric cell that must be non-negative was negative.
    #[error("'{field}' must be non-negative on row {row}, got {value}")]
    NegativeValue {
        field: &'static str,
        value: Decimal,
        row: usize,
    },

    /// A numeric cell exceeded the range its field can hold.
    #[error("'{field}' is out of range on row {row}")]
    ValueTooLarge { field: &'static str, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Loader for batch payroll requests from CSV.
///
/// Rows that omit `additional_health_rate_percent` fall back to the rate the
/// loader was created with (normally the policy's default).
#[derive(Debug, Clone)]
pub struct ProfileLoader {
    default_supplemental_rate_percent: Decimal,
}

impl ProfileLoader {
    pub fn new(default_supplemental_rate_percent: Decimal) -> Self {
        Self {
            default_supplemental_rate_percent,
        }
    }

    /// Parse CSV text and return requests in file order, gross income annualised.
    ///
    /// # Errors
    ///
    /// * [ProfileLoadError::Parse] if the CSV is structurally invalid or a
    ///   field cannot be deserialised.
    /// * [ProfileLoadError::InvalidRegion] / [ProfileLoadError::InvalidPeriod]
    ///   for unrecognised codes.
    /// * [ProfileLoadError::NegativeValue] for negative income, children or rate.
    pub fn load_from_str(
        &self,
        input: &str,
    ) -> Result<Vec<PayrollRequest>, ProfileLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All) // tolerate whitespace around values
            .flexible(false) // strict column count
            .from_reader(input.as_bytes());

        let requests = reader
            .deserialize::<CsvRow>()
            .enumerate()
            .map(|(idx, result)| {
                let row = result?;
                let row_number = idx + 1; // 1-based for user-facing messages
                self.convert_row(row, row_number)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(rows = requests.len(), "loaded payroll requests");
        Ok(requests)
    }

    /// Read a file from disk and delegate to [ProfileLoader::load_from_str].
    pub fn load_from_file(
        &self,
        path: &Path,
    ) -> Result<Vec<PayrollRequest>, ProfileLoadError> {
        let contents = std::fs::read_to_string(path)?;
        self.load_from_str(&contents)
    }

    fn convert_row(
        &self,
        row: CsvRow,
        row_number: usize,
    ) -> Result<PayrollRequest, ProfileLoadError> {
        let period = match row.period {
            Some(period) => PayPeriod::parse(&period).ok_or(ProfileLoadError::InvalidPeriod {
                period,
                row: row_number,
            })?,
            None => PayPeriod::Yearly,
        };

        let region = match row.region {
            Some(region) => Region::parse(&region).ok_or(ProfileLoadError::InvalidRegion {
                region,
                row: row_number,
            })?,
            None => Region::Other,
        };

        let gross_income = non_negative("gross_income", row.gross_income, row_number)?;
        let num_children = row.num_children.unwrap_or(0);
        non_negative("num_children", Decimal::from(num_children), row_number)?;
        let num_children =
            u32::try_from(num_children).map_err(|_| ProfileLoadError::ValueTooLarge {
                field: "num_children",
                row: row_number,
            })?;
        let additional_health_rate_percent = non_negative(
            "additional_health_rate_percent",
            row.additional_health_rate_percent
                .unwrap_or(self.default_supplemental_rate_percent),
            row_number,
        )?;

        let gross_income = period
            .to_annual(gross_income)
            .ok_or(ProfileLoadError::ValueTooLarge {
                field: "gross_income",
                row: row_number,
            })?;

        Ok(PayrollRequest {
            gross_income,
            profile: PersonalProfile {
                is_married: row.is_married.unwrap_or(false),
                num_children,
                is_single_parent: row.is_single_parent.unwrap_or(false),
                is_church_member: row.is_church_member.unwrap_or(false),
                region,
                is_privately_insured: row.is_privately_insured.unwrap_or(false),
                is_in_saxony: row.is_in_saxony.unwrap_or(false),
                additional_health_rate_percent,
            },
        })
    }
}

fn non_negative(
    field: &'static str,
    value: Decimal,
    row: usize,
) -> Result<Decimal, ProfileLoadError> {
    if value < Decimal::ZERO {
        return Err(ProfileLoadError::NegativeValue { field, value, row });
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
