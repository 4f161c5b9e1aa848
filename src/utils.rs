//! Utility functions shared across the codebase.
//!
//! Formatting of hours and event times for output, and parsing of the offset
//! syntax accepted on the command line.

use anyhow::{Context, Result};
use chrono::{FixedOffset, Offset, Utc};

use crate::constants::{MAXIMUM_OFFSET_HOURS, SECONDS_PER_HOUR};
use crate::time_state::EventTime;

/// Split fractional hours into whole hours and minutes, truncating both.
///
/// The minutes carry no sign: `-1.5` gives `(-1, 30)`.
///
/// # Examples
/// ```
/// use sunwait::utils::hours_minutes;
/// assert_eq!(hours_minutes(12.75), (12, 45));
/// assert_eq!(hours_minutes(-0.25), (0, 15));
/// ```
pub fn hours_minutes(hours: f64) -> (i64, u32) {
    let whole = hours.trunc() as i64;
    let minutes = ((hours.abs() * 60.0) % 60.0).trunc() as u32;
    (whole, minutes)
}

/// Format a duration in hours as `HH:MM`, with a leading `-` when negative.
pub fn format_hours(hours: f64) -> String {
    let sign = if hours < 0.0 { "-" } else { "" };
    let (whole, minutes) = hours_minutes(hours.abs());
    format!("{}{:02}:{:02}", sign, whole, minutes)
}

/// Parse an offset given as `[-]MM` minutes or `[-]HH:MM`, returning hours.
///
/// Offsets of twelve hours or more either way are rejected.
///
/// # Examples
/// ```
/// use sunwait::utils::parse_offset;
/// assert_eq!(parse_offset("15").unwrap(), 0.25);
/// assert_eq!(parse_offset("-1:30").unwrap(), -1.5);
/// ```
pub fn parse_offset(input: &str) -> Result<f64> {
    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let minutes = match body.split_once(':') {
        Some((hours, minutes)) => {
            let hours: u64 = hours
                .parse()
                .with_context(|| format!("Invalid hours in offset '{}'", input))?;
            let minutes: u64 = minutes
                .parse()
                .with_context(|| format!("Invalid minutes in offset '{}'", input))?;
            if minutes >= 60 {
                anyhow::bail!("Minutes must be below 60 in offset '{}'", input);
            }
            hours
                .checked_mul(60)
                .and_then(|total| total.checked_add(minutes))
                .with_context(|| format!("Offset '{}' is too large", input))?
        }
        None => body
            .parse::<u64>()
            .with_context(|| format!("Invalid offset '{}', expected [-]MM or [-]HH:MM", input))?,
    };

    let hours = minutes as f64 / 60.0;
    if hours >= MAXIMUM_OFFSET_HOURS {
        anyhow::bail!(
            "Offset must be less than {} hours either way (got '{}')",
            MAXIMUM_OFFSET_HOURS,
            input
        );
    }
    Ok(if negative { -hours } else { hours })
}

/// Format an event as `HH:MM` in a fixed UTC bias, or `--:--` for polar days and nights.
pub fn format_event_time(event: &EventTime, utc_bias_hours: f64) -> String {
    match event.instant() {
        Some(instant) => {
            let offset = FixedOffset::east_opt((utc_bias_hours * SECONDS_PER_HOUR).round() as i32)
                .unwrap_or_else(|| Utc.fix());
            instant.with_timezone(&offset).format("%H:%M").to_string()
        }
        None => "--:--".to_string(),
    }
}
