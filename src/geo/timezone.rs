//! UTC bias of a local calendar day and the UTC midnight that anchors rise/set hours.
//!
//! The solar model only knows UTC. These helpers translate between that axis
//! and whichever timezone the user reads clock times in.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

use crate::constants::HOURS_PER_DAY;
use crate::error::SunwaitError;
use crate::logger::Log;

/// Local time minus UTC, in hours, for a calendar day in `tz`.
///
/// The day is sampled at local noon so DST changes around midnight do not
/// affect the result. Hours and minutes are compared field by field and a
/// change of calendar day between the two representations adds or removes 24
/// hours.
pub fn try_utc_bias_hours<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Result<f64, SunwaitError> {
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));

    let instant = tz
        .from_local_datetime(&noon)
        .earliest()
        .ok_or_else(|| SunwaitError::PlatformTime(format!("local noon does not exist on {date}")))?;

    let local = instant.naive_local();
    let utc = instant.naive_utc();

    let mut bias = f64::from(local.hour() as i32 - utc.hour() as i32)
        + f64::from(local.minute() as i32 - utc.minute() as i32) / 60.0;

    if local.year() > utc.year() {
        bias += HOURS_PER_DAY;
    } else if local.year() < utc.year() {
        bias -= HOURS_PER_DAY;
    } else {
        bias += f64::from(local.ordinal() as i32 - utc.ordinal() as i32) * HOURS_PER_DAY;
    }

    if bias.abs() > HOURS_PER_DAY {
        return Err(SunwaitError::PlatformTime(format!(
            "UTC bias of {bias} hours on {date} is larger than a day"
        )));
    }

    Ok(bias)
}

/// Like [`try_utc_bias_hours`], but falls back to zero with a warning.
pub fn utc_bias_hours<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> f64 {
    match try_utc_bias_hours(tz, date) {
        Ok(bias) => bias,
        Err(e) => {
            Log::log_warning(&format!("{e}, assuming UTC"));
            0.0
        }
    }
}

/// 00:00 UTC of the UTC calendar day containing `instant`.
pub fn midnight_utc(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// 00:00 UTC of a calendar day.
pub fn date_midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
