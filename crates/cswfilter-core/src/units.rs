//! Linear distance units accepted by distance-bearing spatial predicates.

use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// US survey foot, exactly 1200/3937 m.
const METERS_PER_FOOT: f64 = 1200.0 / 3937.0;
const METERS_PER_STATUTE_MILE: f64 = 5280.0 * METERS_PER_FOOT;
const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;
const METERS_PER_KILOMETER: f64 = 1000.0;

///
/// UnitError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum UnitError {
    #[error("unknown distance unit '{unit}'")]
    Unknown { unit: String },
}

///
/// LinearUnit
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LinearUnit {
    Meter,
    Kilometer,
    Foot,
    StatuteMile,
    NauticalMile,
}

impl LinearUnit {
    /// Canonical unit every emitted distance is expressed in.
    pub const CANONICAL: Self = Self::Meter;

    #[must_use]
    pub const fn meters_per_unit(self) -> f64 {
        match self {
            Self::Meter => 1.0,
            Self::Kilometer => METERS_PER_KILOMETER,
            Self::Foot => METERS_PER_FOOT,
            Self::StatuteMile => METERS_PER_STATUTE_MILE,
            Self::NauticalMile => METERS_PER_NAUTICAL_MILE,
        }
    }

    #[must_use]
    pub fn to_meters(self, distance: f64) -> f64 {
        distance * self.meters_per_unit()
    }

    /// Name written back into rewritten distance predicates.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Meter => "meters",
            Self::Kilometer => "kilometers",
            Self::Foot => "feet",
            Self::StatuteMile => "statute miles",
            Self::NauticalMile => "nautical miles",
        }
    }
}

impl fmt::Display for LinearUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LinearUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");

        let unit = match normalized.as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Self::Meter,
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => Self::Kilometer,
            "ft" | "foot" | "feet" | "us survey foot" | "us survey feet" => Self::Foot,
            "mi" | "mile" | "miles" | "statute mile" | "statute miles" => Self::StatuteMile,
            "nmi" | "nm" | "nautical mile" | "nautical miles" => Self::NauticalMile,
            _ => {
                return Err(UnitError::Unknown {
                    unit: s.to_string(),
                });
            }
        };

        Ok(unit)
    }
}

/// Convert a distance in the named unit to meters.
pub fn convert_to_meters(distance: f64, unit: &str) -> Result<f64, UnitError> {
    let unit = unit.parse::<LinearUnit>()?;

    Ok(unit.to_meters(distance))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn feet_use_the_survey_foot() {
        assert_close(convert_to_meters(10.0, "feet").unwrap(), 3.048_006_096_012_192);
        assert_close(convert_to_meters(1.0, "FT").unwrap(), 0.304_800_609_601_219_2);
    }

    #[test]
    fn mile_variants_convert() {
        assert_close(
            convert_to_meters(1.0, "statute miles").unwrap(),
            1_609.347_218_694_437,
        );
        assert_close(convert_to_meters(2.0, "nautical_mile").unwrap(), 3_704.0);
        assert_close(convert_to_meters(1.5, "km").unwrap(), 1_500.0);
        assert_close(convert_to_meters(7.0, " Metres ").unwrap(), 7.0);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = convert_to_meters(1.0, "furlong").unwrap_err();

        assert_eq!(
            err,
            UnitError::Unknown {
                unit: "furlong".to_string()
            }
        );
    }

    #[test]
    fn canonical_name_parses_back() {
        let unit: LinearUnit = LinearUnit::CANONICAL.name().parse().unwrap();
        assert_eq!(unit, LinearUnit::Meter);
    }
}
