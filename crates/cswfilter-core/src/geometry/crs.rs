use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

/// Geographic EPSG codes whose URN/URI forms are latitude-first.
const LAT_FIRST_GEOGRAPHIC: &[&str] = &["4326", "4258", "4269", "4979"];

///
/// CrsError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CrsError {
    #[error("unrecognized coordinate reference system '{0}'")]
    Unrecognized(String),
}

///
/// AxisOrder
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AxisOrder {
    /// x = longitude/easting, y = latitude/northing.
    EastNorth,

    /// x = latitude/northing, y = longitude/easting.
    NorthEast,
}

///
/// Crs
///
/// Authority-qualified coordinate reference system identifier plus the axis
/// order implied by the notation it was written in.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Crs {
    authority: String,
    code: String,
    axis: AxisOrder,
}

impl Crs {
    #[must_use]
    pub fn epsg(code: u32) -> Self {
        Self {
            authority: "EPSG".to_string(),
            code: code.to_string(),
            axis: AxisOrder::EastNorth,
        }
    }

    /// WGS84 geographic, longitude first. This is the catalog's storage CRS.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::epsg(4326)
    }

    #[must_use]
    pub fn crs84() -> Self {
        Self {
            authority: "OGC".to_string(),
            code: "CRS84".to_string(),
            axis: AxisOrder::EastNorth,
        }
    }

    #[must_use]
    pub fn with_axis(mut self, axis: AxisOrder) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub const fn axis(&self) -> AxisOrder {
        self.axis
    }

    /// Construct from an EPSG code written in URN/URI notation, which
    /// follows the authority's declared axis order.
    fn epsg_authority_axis(code: &str) -> Result<Self, CrsError> {
        let code = parse_code(code)?;
        let axis = if LAT_FIRST_GEOGRAPHIC.contains(&code.as_str()) {
            AxisOrder::NorthEast
        } else {
            AxisOrder::EastNorth
        };

        Ok(Self {
            authority: "EPSG".to_string(),
            code,
            axis,
        })
    }

    fn epsg_east_north(code: &str) -> Result<Self, CrsError> {
        Ok(Self {
            authority: "EPSG".to_string(),
            code: parse_code(code)?,
            axis: AxisOrder::EastNorth,
        })
    }
}

impl FromStr for Crs {
    type Err = CrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        let unrecognized = || CrsError::Unrecognized(trimmed.to_string());

        if matches!(
            lower.as_str(),
            "crs:84"
                | "crs84"
                | "urn:ogc:def:crs:ogc:1.3:crs84"
                | "urn:ogc:def:crs:ogc::crs84"
                | "http://www.opengis.net/def/crs/ogc/1.3/crs84"
        ) {
            return Ok(Self::crs84());
        }

        if let Some(code) = lower.strip_prefix("epsg:") {
            return Self::epsg_east_north(code).map_err(|_| unrecognized());
        }

        if let Some(code) = lower.strip_prefix("http://www.opengis.net/gml/srs/epsg.xml#") {
            return Self::epsg_east_north(code).map_err(|_| unrecognized());
        }

        if let Some(code) = lower.strip_prefix("http://www.opengis.net/def/crs/epsg/") {
            // http://www.opengis.net/def/crs/EPSG/{version}/{code}
            let code = code.rsplit('/').next().ok_or_else(unrecognized)?;
            return Self::epsg_authority_axis(code).map_err(|_| unrecognized());
        }

        for prefix in ["urn:ogc:def:crs:epsg:", "urn:x-ogc:def:crs:epsg:"] {
            if let Some(rest) = lower.strip_prefix(prefix) {
                // urn:ogc:def:crs:EPSG:{version}:{code}, version may be empty
                let code = rest.rsplit(':').next().ok_or_else(unrecognized)?;
                return Self::epsg_authority_axis(code).map_err(|_| unrecognized());
            }
        }

        Err(unrecognized())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.authority.as_str(), self.axis) {
            ("OGC", _) => write!(f, "CRS:84"),
            (authority, AxisOrder::EastNorth) => write!(f, "{authority}:{}", self.code),
            (authority, AxisOrder::NorthEast) => {
                write!(f, "urn:ogc:def:crs:{authority}::{}", self.code)
            }
        }
    }
}

fn parse_code(code: &str) -> Result<String, CrsError> {
    let code = code.trim();
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CrsError::Unrecognized(code.to_string()));
    }

    Ok(code.to_string())
}
