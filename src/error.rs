//! Error types for sunwait operations.
//!
//! None of these abort the process. Polar days and nights in particular are an
//! expected outcome of a wait request near the poles, not a failure of the model.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a wait request has nothing to wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoEventReason {
    /// The sun stays above the twilight angle (offset included) all day.
    MidnightSun,
    /// The sun stays below the twilight angle (offset included) all day.
    PolarNight,
    /// The requested event is already behind us.
    AlreadyPassed,
    /// The opposite event comes first and the requested one is more than six hours away.
    OppositeEventFirst,
}

/// Errors produced by the sunwait library.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SunwaitError {
    /// Twilight angle outside (-90, 90). The angle has been reset to the daylight preset.
    TwilightAngleOutOfRange(f64),
    /// A coordinate bearing such as `65N` could not be parsed.
    InvalidBearing(String),
    /// No sunrise or sunset to wait for.
    NoEvent(NoEventReason),
    /// Calendar or clock conversion failed.
    PlatformTime(String),
    /// A target year, month and day that make no calendar date, e.g. 31 February.
    InvalidDate(String),
}

impl Display for NoEventReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MidnightSun => write!(f, "midnight sun, the sun does not set"),
            Self::PolarNight => write!(f, "polar night, the sun does not rise"),
            Self::AlreadyPassed => write!(f, "event already passed"),
            Self::OppositeEventFirst => {
                write!(f, "the opposite event happens first and the requested one is not imminent")
            }
        }
    }
}

impl Display for SunwaitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TwilightAngleOutOfRange(angle) => write!(
                f,
                "twilight angle must be between -90 and +90 (-ve = below horizon), got {angle}"
            ),
            Self::InvalidBearing(bearing) => write!(f, "could not parse bearing '{bearing}'"),
            Self::NoEvent(reason) => write!(f, "nothing to wait for: {reason}"),
            Self::PlatformTime(msg) => write!(f, "time conversion failed: {msg}"),
            Self::InvalidDate(date) => write!(f, "no such date: {date}"),
        }
    }
}

impl Error for SunwaitError {}

impl From<NoEventReason> for SunwaitError {
    fn from(reason: NoEventReason) -> Self {
        Self::NoEvent(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SunwaitError::InvalidBearing("garbage".to_string());
        assert_eq!(err.to_string(), "could not parse bearing 'garbage'");

        let err: SunwaitError = NoEventReason::MidnightSun.into();
        assert!(err.to_string().contains("midnight sun"));

        let err = SunwaitError::InvalidDate("2025-02-31".to_string());
        assert_eq!(err.to_string(), "no such date: 2025-02-31");
    }

    #[test]
    fn test_converts_into_anyhow() {
        let result: anyhow::Result<()> = Err(SunwaitError::PlatformTime("bad".into()).into());
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<SunwaitError>().is_some());
    }
}
