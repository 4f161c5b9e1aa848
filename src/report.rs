//! Structured day report: location, transit, rise/set windows for every preset.
//!
//! Only data lives here. The binary decides how it is printed.

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};

use crate::constants::{NO_OFFSET, SECONDS_PER_HOUR};
use crate::geo::timezone::date_midnight_utc;
use crate::geo::{TwilightAngle, day_count, solve};
use crate::sunwait::SunWait;
use crate::time_state::{EventPair, TimeState};

/// The four named twilights in report order.
pub const REPORT_PRESETS: [TwilightAngle; 4] = [
    TwilightAngle::Daylight,
    TwilightAngle::Civil,
    TwilightAngle::Nautical,
    TwilightAngle::Astronomical,
];

#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    /// Instant the report was made for, used for `state`.
    pub now: DateTime<Utc>,
    pub utc_bias_hours: f64,
    /// Sun due north or south.
    pub transit: DateTime<Utc>,
    pub twilight: TwilightAngle,
    pub offset_hours: f64,
    /// Configured twilight, no offset.
    pub with_twilight: EventPair,
    /// Configured twilight with the offset, only when one is set.
    pub with_offset: Option<EventPair>,
    pub state: TimeState,
    /// Every named twilight, no offset, in [`REPORT_PRESETS`] order.
    pub presets: [EventPair; 4],
}

impl DayReport {
    pub fn build(sunwait: &SunWait, date: NaiveDate, now: DateTime<Utc>) -> Self {
        let days = day_count(date);
        let arc = sunwait.sun_arc(days);
        let transit = date_midnight_utc(date)
            + ChronoDuration::seconds((SECONDS_PER_HOUR * arc.transit_hour_utc) as i64);

        let with_offset = (sunwait.offset_hours() != NO_OFFSET)
            .then(|| EventPair::from_arc(date, &arc, sunwait.offset_hours()));

        let presets = REPORT_PRESETS.map(|twilight| {
            let preset_arc = solve(days, sunwait.latitude(), sunwait.longitude(), twilight);
            EventPair::from_arc(date, &preset_arc, NO_OFFSET)
        });

        Self {
            latitude: sunwait.latitude(),
            longitude: sunwait.longitude(),
            date,
            now,
            utc_bias_hours: sunwait.utc_bias_hours(date),
            transit,
            twilight: sunwait.twilight(),
            offset_hours: sunwait.offset_hours(),
            with_twilight: EventPair::from_arc(date, &arc, NO_OFFSET),
            with_offset,
            state: sunwait.poll(now),
            presets,
        }
    }
}
