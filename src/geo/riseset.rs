//! Rise/set solver: diurnal arc and transit hour for a twilight angle.
//!
//! The solver works on whole UTC days. Everything it returns is an hour on the
//! UTC axis of that day, and the diurnal arc is always symmetric around the transit:
//! rise = transit - arc / 2, set = transit + arc / 2.

use crate::constants::{
    DEGREES_PER_HOUR, HOURS_PER_DAY, MAXIMUM_TWILIGHT_ANGLE, MINIMUM_TWILIGHT_ANGLE,
    TWILIGHT_ANGLE_ASTRONOMICAL, TWILIGHT_ANGLE_CIVIL, TWILIGHT_ANGLE_DAYLIGHT,
    TWILIGHT_ANGLE_NAUTICAL,
};
use crate::error::SunwaitError;
use crate::geo::angles::{acosd, cosd, rev180, sind};
use crate::geo::solar::{sidereal_time_at_utc0, sun_position};

/// The solar altitude that marks a rise/set boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TwilightAngle {
    /// Ordinary sunrise/sunset, measured at the upper limb.
    #[default]
    Daylight,
    Civil,
    Nautical,
    Astronomical,
    /// Any other altitude in (-90, 90), measured at the centre of the sun.
    Custom(f64),
}

impl TwilightAngle {
    /// Build a twilight angle from degrees, recognising the preset values.
    pub fn from_degrees(degrees: f64) -> Result<Self, SunwaitError> {
        if !(degrees > MINIMUM_TWILIGHT_ANGLE && degrees < MAXIMUM_TWILIGHT_ANGLE) {
            return Err(SunwaitError::TwilightAngleOutOfRange(degrees));
        }

        let angle = if degrees == TWILIGHT_ANGLE_DAYLIGHT {
            Self::Daylight
        } else if degrees == TWILIGHT_ANGLE_CIVIL {
            Self::Civil
        } else if degrees == TWILIGHT_ANGLE_NAUTICAL {
            Self::Nautical
        } else if degrees == TWILIGHT_ANGLE_ASTRONOMICAL {
            Self::Astronomical
        } else {
            Self::Custom(degrees)
        };
        Ok(angle)
    }

    pub fn degrees(&self) -> f64 {
        match self {
            Self::Daylight => TWILIGHT_ANGLE_DAYLIGHT,
            Self::Civil => TWILIGHT_ANGLE_CIVIL,
            Self::Nautical => TWILIGHT_ANGLE_NAUTICAL,
            Self::Astronomical => TWILIGHT_ANGLE_ASTRONOMICAL,
            Self::Custom(degrees) => *degrees,
        }
    }

    /// Only ordinary sunrise/sunset is measured at the upper limb of the disc.
    pub fn uses_upper_limb(&self) -> bool {
        matches!(self, Self::Daylight)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Daylight => "daylight",
            Self::Civil => "civil",
            Self::Nautical => "nautical",
            Self::Astronomical => "astronomical",
            Self::Custom(_) => "custom angle",
        }
    }
}

/// How a (possibly offset-adjusted) diurnal arc classifies the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    /// Distinct rise and set.
    Normal,
    /// The sun never goes below the twilight angle.
    MidnightSun,
    /// The sun never gets above the twilight angle.
    PolarNight,
}

impl DayKind {
    pub fn from_arc(diurnal_arc: f64) -> Self {
        if diurnal_arc >= HOURS_PER_DAY {
            Self::MidnightSun
        } else if diurnal_arc <= 0.0 {
            Self::PolarNight
        } else {
            Self::Normal
        }
    }
}

/// Result of one rise/set solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunArc {
    /// Hours the sun spends above the twilight angle, in [0, 24].
    pub diurnal_arc: f64,
    /// Hour (UTC) the sun crosses the meridian. May leave [0, 24) once shifted.
    pub transit_hour_utc: f64,
}

impl SunArc {
    pub fn new(diurnal_arc: f64, transit_hour_utc: f64) -> Self {
        Self {
            diurnal_arc: diurnal_arc.clamp(0.0, HOURS_PER_DAY),
            transit_hour_utc,
        }
    }

    /// Move the transit by whole days worth of hours, keeping the arc.
    ///
    /// Used to put yesterday (-24) and tomorrow (+24) on today's hour axis.
    pub fn shifted(&self, hours: f64) -> Self {
        Self {
            diurnal_arc: self.diurnal_arc,
            transit_hour_utc: self.transit_hour_utc + hours,
        }
    }

    /// Diurnal arc after removing `offset_hours` at both ends, clamped to [0, 24].
    ///
    /// A positive offset moves rise later and set earlier.
    pub fn arc_with_offset(&self, offset_hours: f64) -> f64 {
        (self.diurnal_arc - 2.0 * offset_hours).clamp(0.0, HOURS_PER_DAY)
    }

    pub fn rise_hour_utc(&self, offset_hours: f64) -> f64 {
        self.transit_hour_utc - self.arc_with_offset(offset_hours) / 2.0
    }

    pub fn set_hour_utc(&self, offset_hours: f64) -> f64 {
        self.transit_hour_utc + self.arc_with_offset(offset_hours) / 2.0
    }

    pub fn kind(&self, offset_hours: f64) -> DayKind {
        DayKind::from_arc(self.arc_with_offset(offset_hours))
    }
}

/// Solve the diurnal arc and transit for a day.
///
/// # Arguments
/// * `day_count` - Days since 2000-01-01 (UTC calendar day)
/// * `latitude` - Degrees north, already kept off the poles
/// * `longitude` - Degrees east
/// * `twilight` - Altitude that marks rise and set
pub fn solve(day_count: i64, latitude: f64, longitude: f64, twilight: TwilightAngle) -> SunArc {
    let sidereal_time = sidereal_time_at_utc0(day_count, longitude);
    let position = sun_position(day_count);

    // rev180 picks the nearest transit rather than one a sidereal day away
    let transit_hour = 12.0 - rev180(sidereal_time - position.right_ascension) / DEGREES_PER_HOUR;

    let altitude = if twilight.uses_upper_limb() {
        twilight.degrees() - position.apparent_radius
    } else {
        twilight.degrees()
    };

    let cos_arg = (sind(altitude) - sind(latitude) * sind(position.declination))
        / (cosd(latitude) * cosd(position.declination));

    let diurnal_arc = if cos_arg.abs() < 1.0 {
        2.0 * acosd(cos_arg) / DEGREES_PER_HOUR
    } else if cos_arg >= 1.0 {
        0.0
    } else {
        HOURS_PER_DAY
    };

    SunArc::new(diurnal_arc, transit_hour)
}
