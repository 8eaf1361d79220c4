use crate::geometry::{AxisOrder, Coord, Crs, Geometry};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// WGS84 semi-major axis used by the spherical Web Mercator projection.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude at which Web Mercator's square world ends.
const MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

const WEB_MERCATOR_CODES: &[&str] = &["3857", "900913", "3785", "102100", "102113"];
const GEOGRAPHIC_CODES: &[&str] = &["4326"];

///
/// TransformError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TransformError {
    #[error("no transform available for CRS '{crs}'")]
    UnsupportedCrs { crs: String },

    #[error("transform from '{source_crs}' to '{target}' produced non-finite coordinates")]
    NonFinite { source_crs: String, target: String },
}

///
/// CrsTransform
///
/// Reprojects a geometry literal into a target CRS.
///

pub trait CrsTransform: Send + Sync {
    fn transform(&self, geometry: &Geometry, target: &Crs) -> Result<Geometry, TransformError>;
}

///
/// BuiltinTransforms
///
/// Geographic WGS84 (either axis order) and spherical Web Mercator.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinTransforms;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Family {
    Geographic,
    WebMercator,
}

fn family_of(crs: &Crs) -> Result<Family, TransformError> {
    match crs.authority() {
        "OGC" if crs.code() == "CRS84" => Ok(Family::Geographic),
        "EPSG" if GEOGRAPHIC_CODES.contains(&crs.code()) => Ok(Family::Geographic),
        "EPSG" if WEB_MERCATOR_CODES.contains(&crs.code()) => Ok(Family::WebMercator),
        _ => Err(TransformError::UnsupportedCrs {
            crs: crs.to_string(),
        }),
    }
}

impl CrsTransform for BuiltinTransforms {
    fn transform(&self, geometry: &Geometry, target: &Crs) -> Result<Geometry, TransformError> {
        let source = geometry.crs.clone().unwrap_or_else(Crs::wgs84);
        let source_family = family_of(&source)?;
        let target_family = family_of(target)?;

        let shape = geometry.shape.try_map_coords(|coord| {
            // source axis order -> east/north
            let coord = match source.axis() {
                AxisOrder::EastNorth => coord,
                AxisOrder::NorthEast => coord.swapped(),
            };

            let lon_lat = match source_family {
                Family::Geographic => coord,
                Family::WebMercator => mercator_to_geographic(coord),
            };

            let projected = match target_family {
                Family::Geographic => lon_lat,
                Family::WebMercator => geographic_to_mercator(lon_lat),
            };

            let projected = match target.axis() {
                AxisOrder::EastNorth => projected,
                AxisOrder::NorthEast => projected.swapped(),
            };

            if projected.is_finite() {
                Ok(projected)
            } else {
                Err(TransformError::NonFinite {
                    source_crs: source.to_string(),
                    target: target.to_string(),
                })
            }
        })?;

        Ok(Geometry {
            shape,
            crs: Some(target.clone()),
        })
    }
}

fn mercator_to_geographic(coord: Coord) -> Coord {
    let lon = (coord.x / EARTH_RADIUS_M).to_degrees();
    let lat = 2.0f64.mul_add((coord.y / EARTH_RADIUS_M).exp().atan(), -FRAC_PI_2);

    Coord::new(lon, lat.to_degrees())
}

fn geographic_to_mercator(coord: Coord) -> Coord {
    let lat = coord.y.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT).to_radians();
    let x = EARTH_RADIUS_M * coord.x.to_radians();
    let y = EARTH_RADIUS_M * (FRAC_PI_4 + lat / 2.0).tan().ln();

    Coord::new(x, y)
}
