//! Low-precision solar position model.
//!
//! Orbital elements are linear functions of the day count since 2000-01-01 and
//! Kepler's equation is solved with a single first-order term. That keeps rise
//! and set times within about a minute for dates a few centuries either side of
//! the epoch, which is all a scheduler needs.

use crate::constants::SUN_APPARENT_RADIUS_AT_1AU;
use crate::geo::angles::{atan2d, cosd, revolution, sind};

// Mean anomaly and mean longitude of perihelion at the epoch, and their daily rates
const MEAN_ANOMALY_EPOCH: f64 = 356.0470;
const MEAN_ANOMALY_RATE: f64 = 0.985_600_258_5;
const PERIHELION_EPOCH: f64 = 282.9404;
const PERIHELION_RATE: f64 = 4.709_35e-5;
const ECCENTRICITY_EPOCH: f64 = 0.016709;
const ECCENTRICITY_RATE: f64 = 1.151e-9;
const OBLIQUITY_EPOCH: f64 = 23.4393;
const OBLIQUITY_RATE: f64 = 3.563e-7;

/// Where the sun is on a given day, as seen from the centre of the earth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// True ecliptic longitude, degrees in [0, 360).
    pub ecliptic_longitude: f64,
    /// Right ascension, degrees in [0, 360).
    pub right_ascension: f64,
    /// Declination, degrees.
    pub declination: f64,
    /// Earth-sun distance in astronomical units.
    pub distance_au: f64,
    /// Apparent angular radius of the solar disc, degrees.
    pub apparent_radius: f64,
}

/// Ecliptic longitude (degrees) and distance (AU) of the sun.
///
/// The ecliptic latitude is always close to zero and is not computed.
fn ecliptic_position(d: f64) -> (f64, f64) {
    let mean_anomaly = revolution(MEAN_ANOMALY_EPOCH + MEAN_ANOMALY_RATE * d);
    let perihelion = PERIHELION_EPOCH + PERIHELION_RATE * d;
    let e = ECCENTRICITY_EPOCH - ECCENTRICITY_RATE * d;

    // One-term approximation of the eccentric anomaly, no iteration
    let eccentric_anomaly = mean_anomaly
        + e.to_degrees() * sind(mean_anomaly) * (1.0 + e * cosd(mean_anomaly));

    let x = cosd(eccentric_anomaly) - e;
    let y = (1.0 - e * e).sqrt() * sind(eccentric_anomaly);

    let distance = x.hypot(y);
    let true_anomaly = atan2d(y, x);

    (revolution(true_anomaly + perihelion), distance)
}

/// Compute the sun's equatorial position for a day count.
pub fn sun_position(day_count: i64) -> SolarPosition {
    let d = day_count as f64;
    let (longitude, distance) = ecliptic_position(d);

    // Rectangular ecliptic coordinates, z = 0 since the sun sits on the ecliptic
    let xs = distance * cosd(longitude);
    let ys = distance * sind(longitude);

    let obliquity = OBLIQUITY_EPOCH - OBLIQUITY_RATE * d;

    let xe = xs;
    let ye = ys * cosd(obliquity);
    let ze = ys * sind(obliquity);

    SolarPosition {
        ecliptic_longitude: longitude,
        right_ascension: revolution(atan2d(ye, xe)),
        declination: atan2d(ze, xe.hypot(ye)),
        distance_au: distance,
        apparent_radius: SUN_APPARENT_RADIUS_AT_1AU / distance,
    }
}

/// Greenwich mean sidereal time at 0h UT, in degrees.
///
/// Equal to the sun's mean longitude plus 180 degrees, ignoring aberration.
pub fn gmst0(day_count: i64) -> f64 {
    let d = day_count as f64;
    revolution(
        (180.0 + MEAN_ANOMALY_EPOCH + PERIHELION_EPOCH)
            + (MEAN_ANOMALY_RATE + PERIHELION_RATE) * d,
    )
}

/// Sidereal time at 00:00 UTC of the day, at the given longitude (degrees east).
///
/// The extra 180 degrees move the reference from the antimeridian, where the
/// UTC day starts, to Greenwich.
pub fn sidereal_time_at_utc0(day_count: i64, longitude: f64) -> f64 {
    revolution(gmst0(day_count) + 180.0 + longitude)
}
