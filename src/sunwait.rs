//! The `SunWait` handle: location and event settings plus the queries built on them.
//!
//! Setters take `&mut self` and belong to setup. Every query takes `&self` and
//! an explicit instant, so the same inputs always give the same answer and a
//! configured handle can be shared freely.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use std::time::Duration as StdDuration;

use crate::config::Config;
use crate::constants::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE, NO_OFFSET};
use crate::error::SunwaitError;
use crate::geo::{
    Bearing, SunArc, TwilightAngle, fix_latitude, fix_longitude, solve, utc_bias_hours,
};
use crate::logger::Log;
use crate::report::DayReport;
use crate::time_state::{self, EventPair, EventSelection, TimeState};

/// Location, twilight and output settings for sunrise/sunset queries.
#[derive(Debug, Clone, PartialEq)]
pub struct SunWait {
    latitude: f64,
    longitude: f64,
    twilight: TwilightAngle,
    offset_hours: f64,
    utc_output: bool,
    debug: bool,
    /// `None` means the system local timezone.
    timezone: Option<Tz>,
}

impl Default for SunWait {
    fn default() -> Self {
        Self {
            latitude: fix_latitude(DEFAULT_LATITUDE),
            longitude: fix_longitude(DEFAULT_LONGITUDE),
            twilight: TwilightAngle::Daylight,
            offset_hours: NO_OFFSET,
            utc_output: false,
            debug: false,
            timezone: None,
        }
    }
}

impl SunWait {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coordinates(latitude: f64, longitude: f64) -> Self {
        let mut sunwait = Self::default();
        sunwait.set_coordinates(latitude, longitude);
        sunwait
    }

    /// Build a handle from a loaded configuration.
    ///
    /// An out of range twilight angle is not fatal: it is reset to the
    /// daylight preset with a warning.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut sunwait = Self::default();

        if let Some(coordinates) = &config.coordinates {
            let [latitude, longitude] = coordinates.as_slice() else {
                anyhow::bail!(
                    "coordinates must hold exactly two bearings, e.g. [\"65N\", \"25.5E\"]"
                );
            };
            sunwait
                .set_coordinates_from_bearings(latitude, longitude)
                .context("Invalid coordinates in configuration")?;
        } else if let (Some(latitude), Some(longitude)) = (config.latitude, config.longitude) {
            sunwait.set_coordinates(latitude, longitude);
        }

        sunwait.set_twilight(config.twilight_preset());
        if let Some(angle) = config.twilight_angle {
            if let Err(e) = sunwait.set_twilight_angle(angle) {
                Log::log_warning(&format!("{e}, using the daylight preset"));
            }
        }

        sunwait.set_offset_hours(config.offset.unwrap_or(NO_OFFSET));
        sunwait.set_utc_output(config.utc.unwrap_or(false));
        sunwait.set_debug(config.debug.unwrap_or(false));
        sunwait.set_timezone(config.timezone()?);

        Ok(sunwait)
    }

    // ═══ Setup ═══

    /// Set coordinates in decimal degrees (north and east positive).
    pub fn set_coordinates(&mut self, latitude: f64, longitude: f64) {
        self.latitude = fix_latitude(latitude);
        self.longitude = fix_longitude(longitude);
    }

    /// Set coordinates from two compass bearings such as `"65N"` and `"25.5E"`.
    ///
    /// The bearings may come in either order. Nothing changes unless both parse.
    pub fn set_coordinates_from_bearings(
        &mut self,
        first: &str,
        second: &str,
    ) -> Result<(), SunwaitError> {
        let first: Bearing = first.parse()?;
        let second: Bearing = second.parse()?;

        for bearing in [first, second] {
            match bearing {
                Bearing::Latitude(latitude) => self.latitude = latitude,
                Bearing::Longitude(longitude) => self.longitude = longitude,
            }
        }
        Ok(())
    }

    pub fn set_twilight(&mut self, twilight: TwilightAngle) {
        self.twilight = twilight;
    }

    /// Set a twilight angle in degrees.
    ///
    /// Outside (-90, 90) the angle falls back to the daylight preset and the
    /// error is returned so the caller can tell the reset happened.
    pub fn set_twilight_angle(&mut self, degrees: f64) -> Result<(), SunwaitError> {
        match TwilightAngle::from_degrees(degrees) {
            Ok(twilight) => {
                self.twilight = twilight;
                Ok(())
            }
            Err(e) => {
                self.twilight = TwilightAngle::Daylight;
                Err(e)
            }
        }
    }

    /// Positive offsets narrow the day at both ends, negative ones widen it.
    pub fn set_offset_hours(&mut self, offset_hours: f64) {
        self.offset_hours = offset_hours;
    }

    pub fn set_utc_output(&mut self, utc_output: bool) {
        self.utc_output = utc_output;
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn set_timezone(&mut self, timezone: Option<Tz>) {
        self.timezone = timezone;
    }

    // ═══ Accessors ═══

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn twilight(&self) -> TwilightAngle {
        self.twilight
    }

    pub fn offset_hours(&self) -> f64 {
        self.offset_hours
    }

    pub fn utc_output(&self) -> bool {
        self.utc_output
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }

    // ═══ Queries ═══

    /// Solve the configured twilight for a day count.
    pub fn sun_arc(&self, day_count: i64) -> SunArc {
        solve(day_count, self.latitude, self.longitude, self.twilight)
    }

    pub fn poll(&self, instant: DateTime<Utc>) -> TimeState {
        time_state::poll(self, instant)
    }

    pub fn poll_now(&self) -> TimeState {
        self.poll(Utc::now())
    }

    /// How long to wait from `now` for the selected event.
    ///
    /// Returns the duration rather than sleeping so callers can choose how to wait.
    pub fn wait_duration(
        &self,
        now: DateTime<Utc>,
        selection: EventSelection,
    ) -> Result<StdDuration, SunwaitError> {
        time_state::time_until_next_event(self, now, self.target_date(now), selection)
    }

    pub fn wait_duration_now(
        &self,
        selection: EventSelection,
    ) -> Result<StdDuration, SunwaitError> {
        self.wait_duration(Utc::now(), selection)
    }

    /// Rise/set pairs for `days` days starting at `start`.
    pub fn list(&self, days: usize, start: NaiveDate) -> Vec<EventPair> {
        time_state::list_events(self, start, days)
    }

    /// The calendar day the user means by "today" at `now`.
    ///
    /// That is the day in the configured timezone, or the UTC day when output is in UTC.
    pub fn target_date(&self, now: DateTime<Utc>) -> NaiveDate {
        if self.utc_output {
            return now.date_naive();
        }
        match self.timezone {
            Some(tz) => now.with_timezone(&tz).date_naive(),
            None => now.with_timezone(&Local).date_naive(),
        }
    }

    /// [`target_date`](Self::target_date) with any of year (years since 2000),
    /// month and day of month replaced.
    ///
    /// # Errors
    /// `InvalidDate` when the combination is not a calendar date.
    pub fn target_date_with(
        &self,
        now: DateTime<Utc>,
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Result<NaiveDate, SunwaitError> {
        let today = self.target_date(now);
        let year = year.map_or(today.year(), |years| 2000 + years);
        let month = month.unwrap_or(today.month());
        let day = day.unwrap_or(today.day());

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| SunwaitError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))?;

        if self.debug {
            Log::log_debug(&format!("Target date {date}"));
        }
        Ok(date)
    }

    /// Local time minus UTC on `date`, zero when output is in UTC.
    pub fn utc_bias_hours(&self, date: NaiveDate) -> f64 {
        if self.utc_output {
            return 0.0;
        }
        match self.timezone {
            Some(tz) => utc_bias_hours(&tz, date),
            None => utc_bias_hours(&Local, date),
        }
    }

    /// Everything known about `date`, with the day/night state at `now`.
    pub fn report(&self, date: NaiveDate, now: DateTime<Utc>) -> DayReport {
        DayReport::build(self, date, now)
    }
}
