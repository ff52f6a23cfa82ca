//! Geodesic math and unit conversion
//!
//! Great-circle distance and speed between GPS fixes, plus conversion of
//! SI quantities into nautical and conventional units.

use std::str::FromStr;

use crate::error::TelemetryError;
use crate::record::TelemetryRecord;

/// Earth radius used for all great-circle math, in metres.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Metres in one nautical mile.
const NAUTICAL_MILE: f64 = 1852.0;

/// Great-circle (Haversine) distance in metres between two points.
///
/// Points are `(latitude, longitude)` pairs in degrees. Note that the
/// wire codes store longitude under `X` and latitude under `Y`, so when
/// converting from raw fields the arguments are `(Y, X)`, not `(X, Y)`.
pub fn orthodromic_distance(point_a: (f64, f64), point_b: (f64, f64)) -> f64 {
    let (a_lat, a_lon) = (point_a.0.to_radians(), point_a.1.to_radians());
    let (b_lat, b_lon) = (point_b.0.to_radians(), point_b.1.to_radians());
    let d_lat = b_lat - a_lat;
    let d_lon = b_lon - a_lon;
    let h = (d_lat / 2.0).sin().powi(2)
        + a_lat.cos() * b_lat.cos() * (d_lon / 2.0).sin().powi(2);
    // Floating-point error can push the intermediate just past 1 for
    // near-coincident or near-antipodal points, which would make asin
    // return NaN.
    let h = h.clamp(0.0, 1.0);
    2.0 * h.sqrt().asin() * EARTH_RADIUS
}

/// Average speed in m/s between two records.
///
/// Zero elapsed time (the same record passed twice, or two samples with
/// the same timestamp) is ill-posed and rejected with
/// [`TelemetryError::DegenerateInterval`]. Two records at the same
/// position over a measured interval are fine: that is a real speed of 0.
pub fn orthodromic_speed(
    a: &TelemetryRecord,
    b: &TelemetryRecord,
) -> Result<f64, TelemetryError> {
    let elapsed = a.seconds_to(b).abs();
    if elapsed == 0.0 {
        return Err(TelemetryError::DegenerateInterval);
    }
    Ok(orthodromic_distance(a.position(), b.position()) / elapsed)
}

/// Physical dimension of a quantity handed to [`convert_from_si`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Lengths, in metres on the SI side
    Distance,
    /// Speeds, in m/s on the SI side
    Speed,
}

impl FromStr for Dimension {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "distance" => Ok(Dimension::Distance),
            "speed" => Ok(Dimension::Speed),
            _ => Err(TelemetryError::Configuration {
                kind: "dimension",
                value: s.to_string(),
            }),
        }
    }
}

/// Target unit system for [`convert_from_si`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    /// Metres and metres per second (identity conversion)
    Si,
    /// Nautical miles and knots
    Nautical,
    /// Kilometres and kilometres per hour
    Conventional,
}

impl FromStr for UnitSystem {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "si" => Ok(UnitSystem::Si),
            "nautical" => Ok(UnitSystem::Nautical),
            "conventional" => Ok(UnitSystem::Conventional),
            _ => Err(TelemetryError::Configuration {
                kind: "unit system",
                value: s.to_string(),
            }),
        }
    }
}

/// Convert an SI quantity (metres or m/s) into the given unit system.
pub fn convert_from_si(dimension: Dimension, quantity: f64, system: UnitSystem) -> f64 {
    match (dimension, system) {
        (_, UnitSystem::Si) => quantity,
        (Dimension::Distance, UnitSystem::Nautical) => quantity / NAUTICAL_MILE,
        (Dimension::Distance, UnitSystem::Conventional) => quantity / 1000.0,
        (Dimension::Speed, UnitSystem::Nautical) => quantity * 3600.0 / NAUTICAL_MILE,
        (Dimension::Speed, UnitSystem::Conventional) => quantity * 3.6,
    }
}
