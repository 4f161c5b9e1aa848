//! Astronomical calculations for sunrise, sunset and twilight.
//!
//! This module provides functionality for:
//! - Angle normalization and the day count used by the solar model
//! - Parsing compass bearings into coordinates
//! - The sun's position for a given day
//! - Solving the diurnal arc and transit hour for a twilight angle
//! - Converting between local calendar days and UTC
//!
//! Data flows one way: date -> day count -> solar position -> rise/set arc.
//! Nothing here holds state, so every function is safe to call from anywhere.

pub mod angles;
pub mod bearing;
pub mod riseset;
pub mod solar;
pub mod timezone;

pub use angles::{day_count, fix_latitude, fix_longitude};
pub use bearing::Bearing;
pub use riseset::{DayKind, SunArc, TwilightAngle, solve};
pub use solar::{SolarPosition, sun_position};
pub use timezone::{midnight_utc, try_utc_bias_hours, utc_bias_hours};
