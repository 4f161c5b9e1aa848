//! Compass bearings such as `65N`, `25.5E`, `36S` or `N36.513679`.
//!
//! A bearing is a number with a compass letter somewhere in it. The letter
//! decides whether it is a latitude (N/S) or a longitude (E/W). Digits after
//! the letter count as decimals, so `36N513679` reads as 36.513679. A leading
//! sign is allowed, a space ends the bearing.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::SunwaitError;
use crate::geo::angles::{fix_latitude, fix_longitude, revolution};

/// A parsed, normalized bearing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bearing {
    /// Degrees north, in (-90, 90).
    Latitude(f64),
    /// Degrees east, in [0, 360).
    Longitude(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compass {
    North,
    East,
    South,
    West,
}

impl Compass {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }
}

impl FromStr for Bearing {
    type Err = SunwaitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SunwaitError::InvalidBearing(s.to_string());

        let mut value = 0.0_f64;
        let mut decimals = 0_i32;
        let mut in_fraction = false;
        let mut negative = false;
        let mut digits = 0_usize;
        let mut compass: Option<Compass> = None;

        for (i, c) in s.chars().enumerate() {
            match c {
                '0'..='9' => {
                    value = value * 10.0 + f64::from(c as u8 - b'0');
                    digits += 1;
                    if in_fraction {
                        decimals += 1;
                    }
                }
                '.' | ',' => {
                    in_fraction = true;
                    decimals = 0;
                }
                '+' | '-' => {
                    if i > 0 {
                        return Err(invalid());
                    }
                    negative = c == '-';
                }
                ' ' => break,
                _ => {
                    let letter = Compass::from_char(c).ok_or_else(invalid)?;
                    if compass.is_some() {
                        return Err(invalid());
                    }
                    compass = Some(letter);
                    in_fraction = true;
                }
            }
        }

        let compass = compass.ok_or_else(invalid)?;
        if digits == 0 {
            return Err(invalid());
        }

        if decimals > 0 {
            value /= 10f64.powi(decimals);
        }

        let mut degrees = revolution(value);
        if negative {
            degrees = 360.0 - degrees;
        }

        let bearing = match compass {
            Compass::North => Bearing::Latitude(fix_latitude(degrees)),
            Compass::South => Bearing::Latitude(fix_latitude(360.0 - degrees)),
            Compass::East => Bearing::Longitude(fix_longitude(degrees)),
            Compass::West => Bearing::Longitude(fix_longitude(360.0 - degrees)),
        };
        Ok(bearing)
    }
}

impl Display for Bearing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Latitude(lat) if lat < 0.0 => write!(f, "{:.6}S", -lat),
            Self::Latitude(lat) => write!(f, "{lat:.6}N"),
            Self::Longitude(lon) if lon > 180.0 => write!(f, "{:.6}W", 360.0 - lon),
            Self::Longitude(lon) => write!(f, "{lon:.6}E"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latitude(s: &str) -> f64 {
        match s.parse::<Bearing>() {
            Ok(Bearing::Latitude(lat)) => lat,
            other => panic!("expected latitude from {s}, got {other:?}"),
        }
    }

    fn longitude(s: &str) -> f64 {
        match s.parse::<Bearing>() {
            Ok(Bearing::Longitude(lon)) => lon,
            other => panic!("expected longitude from {s}, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_bearings() {
        assert!((latitude("65N") - 65.0).abs() < 1e-9);
        assert!((longitude("25.5E") - 25.5).abs() < 1e-9);
        assert!((latitude("36S") + 36.0).abs() < 1e-9);
        assert!((longitude("74W") - 286.0).abs() < 1e-9);
    }

    #[test]
    fn test_lowercase_and_comma() {
        assert!((latitude("51,5n") - 51.5).abs() < 1e-9);
        assert!((longitude("0.1278w") - 359.8722).abs() < 1e-9);
    }

    #[test]
    fn test_compass_letter_as_decimal_point() {
        assert!((latitude("36N513679") - 36.513679).abs() < 1e-9);
        assert!((latitude("N36.513679") - 36.513679).abs() < 1e-9);
    }

    #[test]
    fn test_signs() {
        assert!((latitude("-36N") + 36.0).abs() < 1e-9);
        assert!((latitude("+36N") - 36.0).abs() < 1e-9);
        // A negative southing is a northing
        assert!((latitude("-36S") - 36.0).abs() < 1e-9);
        assert!("3-6N".parse::<Bearing>().is_err());
    }

    #[test]
    fn test_space_terminates() {
        assert!((latitude("65N trailing") - 65.0).abs() < 1e-9);
    }

    #[test]
    fn test_latitude_past_the_pole_folds() {
        assert!((latitude("100N") - 80.0).abs() < 1e-9);
        assert!(latitude("90N") < 90.0);
    }

    #[test]
    fn test_rejects_garbage() {
        for input in ["garbage", "", "65", "N", "65X", "65NE", "65N5E", "--65N"] {
            assert_eq!(
                input.parse::<Bearing>(),
                Err(SunwaitError::InvalidBearing(input.to_string())),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Bearing::Latitude(-36.0).to_string(), "36.000000S");
        assert_eq!(Bearing::Longitude(286.0).to_string(), "74.000000W");
        assert_eq!(Bearing::Longitude(25.5).to_string(), "25.500000E");
    }
}
