//! Angle normalization, trigonometry in degrees and the day count used by the solar model.

use chrono::{Datelike, NaiveDate};

use crate::constants::{DAY_COUNT_EPOCH_FROM_CE, POLE_LATITUDE_LIMIT};

/// Reduce an angle to [0, 360).
pub fn revolution(degrees: f64) -> f64 {
    let reduced = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if reduced >= 360.0 { 0.0 } else { reduced }
}

/// Reduce an angle to (-180, 180].
pub fn rev180(degrees: f64) -> f64 {
    let reduced = revolution(degrees);
    if reduced <= 180.0 {
        reduced
    } else {
        reduced - 360.0
    }
}

pub fn sind(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

pub fn cosd(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

pub fn acosd(x: f64) -> f64 {
    x.acos().to_degrees()
}

pub fn atan2d(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Whole days from 2000-01-01 to `date` (2000-01-01 itself is day 0).
///
/// Dates before the epoch give negative counts.
pub fn day_count(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - DAY_COUNT_EPOCH_FROM_CE
}

/// Normalize a longitude to [0, 360) degrees east.
pub fn fix_longitude(longitude: f64) -> f64 {
    revolution(longitude)
}

/// Fold any angle onto a latitude in (-90, 90).
///
/// Angles past a pole come back down the other side of the meridian, so 100
/// becomes 80 and 270 becomes -90. The poles themselves are nudged inwards.
pub fn fix_latitude(latitude: f64) -> f64 {
    let y = revolution(latitude);

    let folded = if y <= 90.0 {
        y
    } else if y <= 270.0 {
        180.0 - y
    } else {
        y - 360.0
    };

    folded.clamp(-POLE_LATITUDE_LIMIT, POLE_LATITUDE_LIMIT)
}
