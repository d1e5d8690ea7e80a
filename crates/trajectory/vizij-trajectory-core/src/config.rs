//! Field configuration: playing-field dimensions and the year → symmetry table.
//!
//! Plain data with a `Default` matching the fields this crate ships with.
//! Years missing from the table fall back to `default_year`, which must be
//! present in the table.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::flip::{Flipper, Symmetry};

/// Field length in meters (x axis, driver station to driver station).
pub const FIELD_LENGTH: f64 = 16.5811;
/// Field width in meters (y axis).
pub const FIELD_WIDTH: f64 = 8.19912;
/// Year used when a requested year has no table entry.
pub const DEFAULT_YEAR: i32 = 2025;

const DEFAULT_YEARS: [YearSymmetry; 4] = [
    YearSymmetry::new(2022, Symmetry::RotateAround),
    YearSymmetry::new(2023, Symmetry::Mirrored),
    YearSymmetry::new(2024, Symmetry::Mirrored),
    YearSymmetry::new(2025, Symmetry::RotateAround),
];

/// One row of the flip table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSymmetry {
    pub year: i32,
    pub symmetry: Symmetry,
}

impl YearSymmetry {
    pub const fn new(year: i32, symmetry: Symmetry) -> Self {
        Self { year, symmetry }
    }
}

/// Validated field configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    field_length: f64,
    field_width: f64,
    years: Vec<YearSymmetry>,
    default_year: i32,
}

/// Unvalidated serde shape of `FieldConfig`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFieldConfig {
    field_length: f64,
    field_width: f64,
    years: Vec<YearSymmetry>,
    default_year: i32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            field_length: FIELD_LENGTH,
            field_width: FIELD_WIDTH,
            years: DEFAULT_YEARS.to_vec(),
            default_year: DEFAULT_YEAR,
        }
    }
}

impl FieldConfig {
    pub fn new(
        field_length: f64,
        field_width: f64,
        years: Vec<YearSymmetry>,
        default_year: i32,
    ) -> Result<Self, ConfigError> {
        let valid = |d: f64| d.is_finite() && d > 0.0;
        if !valid(field_length) || !valid(field_width) {
            return Err(ConfigError::InvalidDimensions {
                length: field_length,
                width: field_width,
            });
        }
        for (i, row) in years.iter().enumerate() {
            if years[..i].iter().any(|prev| prev.year == row.year) {
                return Err(ConfigError::DuplicateYear { year: row.year });
            }
        }
        if !years.iter().any(|row| row.year == default_year) {
            return Err(ConfigError::MissingDefaultYear { year: default_year });
        }
        Ok(Self {
            field_length,
            field_width,
            years,
            default_year,
        })
    }

    /// Parse and validate a JSON field configuration, e.g.
    /// `{"fieldLength":17.5,"fieldWidth":8.0,"years":[{"year":2025,"symmetry":"rotateAround"}],"defaultYear":2025}`.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawFieldConfig =
            serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::new(raw.field_length, raw.field_width, raw.years, raw.default_year)
    }

    #[inline]
    pub fn field_length(&self) -> f64 {
        self.field_length
    }

    #[inline]
    pub fn field_width(&self) -> f64 {
        self.field_width
    }

    #[inline]
    pub fn default_year(&self) -> i32 {
        self.default_year
    }

    pub fn years(&self) -> &[YearSymmetry] {
        &self.years
    }

    fn lookup(&self, year: i32) -> Option<Symmetry> {
        self.years
            .iter()
            .find(|row| row.year == year)
            .map(|row| row.symmetry)
    }

    /// Symmetry for `year`, falling back to the default year's entry.
    pub fn symmetry_for_year(&self, year: i32) -> Symmetry {
        self.lookup(year)
            .or_else(|| {
                log::debug!(
                    "no flip entry for year {year}; using default year {}",
                    self.default_year
                );
                self.lookup(self.default_year)
            })
            // `new` guarantees the default year is present.
            .unwrap_or(Symmetry::RotateAround)
    }

    pub fn flipper_for_year(&self, year: i32) -> Flipper {
        Flipper::new(
            self.symmetry_for_year(year),
            self.field_length,
            self.field_width,
        )
    }

    /// Flipper for the default year.
    pub fn flipper(&self) -> Flipper {
        self.flipper_for_year(self.default_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_known_years() {
        let cfg = FieldConfig::default();
        assert_eq!(cfg.symmetry_for_year(2022), Symmetry::RotateAround);
        assert_eq!(cfg.symmetry_for_year(2023), Symmetry::Mirrored);
        assert_eq!(cfg.symmetry_for_year(2024), Symmetry::Mirrored);
        assert_eq!(cfg.symmetry_for_year(2025), Symmetry::RotateAround);
    }

    #[test]
    fn unknown_year_falls_back_to_default_year() {
        let cfg = FieldConfig::new(
            16.0,
            8.0,
            vec![
                YearSymmetry::new(2023, Symmetry::Mirrored),
                YearSymmetry::new(2030, Symmetry::RotateAround),
            ],
            2023,
        )
        .unwrap();
        assert_eq!(cfg.symmetry_for_year(1999), Symmetry::Mirrored);
        let f = cfg.flipper_for_year(1999);
        assert_eq!(f.field_length, 16.0);
        assert_eq!(f.field_width, 8.0);
    }

    #[test]
    fn rejects_missing_default_and_duplicates() {
        let missing = FieldConfig::new(
            16.0,
            8.0,
            vec![YearSymmetry::new(2024, Symmetry::Mirrored)],
            2025,
        );
        assert_eq!(missing, Err(ConfigError::MissingDefaultYear { year: 2025 }));

        let dup = FieldConfig::new(
            16.0,
            8.0,
            vec![
                YearSymmetry::new(2024, Symmetry::Mirrored),
                YearSymmetry::new(2024, Symmetry::RotateAround),
            ],
            2024,
        );
        assert_eq!(dup, Err(ConfigError::DuplicateYear { year: 2024 }));
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        let bad = FieldConfig::new(0.0, 8.0, DEFAULT_YEARS.to_vec(), DEFAULT_YEAR);
        assert!(matches!(bad, Err(ConfigError::InvalidDimensions { .. })));
    }

    #[test]
    fn parses_json_config() {
        let cfg = FieldConfig::from_json_str(
            r#"{
                "fieldLength": 17.548,
                "fieldWidth": 8.052,
                "years": [{"year": 2025, "symmetry": "rotateAround"}],
                "defaultYear": 2025
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.field_length(), 17.548);
        assert_eq!(cfg.flipper().symmetry, Symmetry::RotateAround);

        let err = FieldConfig::from_json_str("{}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
