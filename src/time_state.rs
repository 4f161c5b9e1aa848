//! Day/night state, the wait scheduler and event listing.
//!
//! Rise/set hours come from the solver on a UTC axis. Near the date line, or
//! with a large offset, the daylight window that matters for "now" may belong
//! to the UTC day before or after. Both the poller and the scheduler therefore
//! look at yesterday, today and tomorrow, with yesterday's hours shifted by -24
//! and tomorrow's by +24 so all three windows share today's axis.
//!
//! ## Key Functionality
//! - **State Detection**: [`poll`] decides DAY or NIGHT for an instant
//! - **Scheduling**: [`time_until_next_event`] computes how long to wait for the
//!   next sunrise and/or sunset, or why there is nothing to wait for
//! - **Listing**: [`list_events`] gives rise/set instants for a run of days

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use std::time::Duration as StdDuration;

use crate::constants::{
    EXIT_DAY, EXIT_NIGHT, HOURS_PER_DAY, IMMINENT_EVENT_WINDOW_SECS, SECONDS_PER_HOUR,
};
use crate::error::{NoEventReason, SunwaitError};
use crate::geo::timezone::{date_midnight_utc, midnight_utc};
use crate::geo::{DayKind, SunArc, day_count};
use crate::logger::Log;
use crate::sunwait::SunWait;

/// Whether the sun is above the twilight angle (offset included).
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum TimeState {
    Day,   // Between rise and set of one of the three windows
    Night, // Outside all of them
}

impl TimeState {
    /// Exit code the binary reports for a poll.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Day => EXIT_DAY,
            Self::Night => EXIT_NIGHT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "DAY",
            Self::Night => "NIGHT",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum EventKind {
    Sunrise,
    Sunset,
}

/// Position of a day in the three-day window.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum DayOffset {
    Yesterday,
    Today,
    Tomorrow,
}

impl DayOffset {
    pub const ALL: [DayOffset; 3] = [Self::Yesterday, Self::Today, Self::Tomorrow];

    pub fn days(self) -> i64 {
        match self {
            Self::Yesterday => -1,
            Self::Today => 0,
            Self::Tomorrow => 1,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Yesterday => Some(Self::Today),
            Self::Today => Some(Self::Tomorrow),
            Self::Tomorrow => None,
        }
    }

    fn index(self) -> usize {
        (self.days() + 1) as usize
    }
}

/// Which event a wait request is interested in.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum EventSelection {
    Sunrise,
    Sunset,
    /// Whichever comes first.
    Either,
}

impl EventSelection {
    /// Map the `rise`/`set` command-line switches. Neither means both.
    pub fn from_flags(sunrise: bool, sunset: bool) -> Self {
        match (sunrise, sunset) {
            (true, false) => Self::Sunrise,
            (false, true) => Self::Sunset,
            _ => Self::Either,
        }
    }
}

/// One rise or set of the three-day window, in signed seconds from now.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Boundary {
    pub day: DayOffset,
    pub kind: EventKind,
    pub secs_from_now: i64,
}

/// Solved arcs for yesterday, today and tomorrow, on today's UTC hour axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreeDayWindow {
    arcs: [SunArc; 3],
    offset_hours: f64,
}

impl ThreeDayWindow {
    /// Solve the three days around `today` (a day count) with the handle's settings.
    pub fn around(sunwait: &SunWait, today: i64) -> Self {
        let arcs = DayOffset::ALL.map(|day| {
            sunwait
                .sun_arc(today + day.days())
                .shifted(day.days() as f64 * HOURS_PER_DAY)
        });
        Self {
            arcs,
            offset_hours: sunwait.offset_hours(),
        }
    }

    pub fn arc(&self, day: DayOffset) -> SunArc {
        self.arcs[day.index()]
    }

    pub fn rise_hour(&self, day: DayOffset) -> f64 {
        self.arc(day).rise_hour_utc(self.offset_hours)
    }

    pub fn set_hour(&self, day: DayOffset) -> f64 {
        self.arc(day).set_hour_utc(self.offset_hours)
    }

    pub fn kind(&self, day: DayOffset) -> DayKind {
        self.arc(day).kind(self.offset_hours)
    }

    /// Whether an hour on today's axis falls inside any rise..=set window.
    pub fn contains_hour(&self, hour: f64) -> bool {
        DayOffset::ALL
            .iter()
            .any(|&day| hour >= self.rise_hour(day) && hour <= self.set_hour(day))
    }

    /// The six boundaries in scan order, relative to now.
    ///
    /// `secs_to_midnight` is the signed distance from now to 00:00 UTC of
    /// today, so it is negative once that midnight has passed.
    pub fn boundaries(&self, secs_to_midnight: i64) -> [Boundary; 6] {
        let at = |day: DayOffset, kind: EventKind| {
            let hour = match kind {
                EventKind::Sunrise => self.rise_hour(day),
                EventKind::Sunset => self.set_hour(day),
            };
            Boundary {
                day,
                kind,
                secs_from_now: secs_to_midnight + (SECONDS_PER_HOUR * hour) as i64,
            }
        };

        [
            at(DayOffset::Yesterday, EventKind::Sunrise),
            at(DayOffset::Yesterday, EventKind::Sunset),
            at(DayOffset::Today, EventKind::Sunrise),
            at(DayOffset::Today, EventKind::Sunset),
            at(DayOffset::Tomorrow, EventKind::Sunrise),
            at(DayOffset::Tomorrow, EventKind::Sunset),
        ]
    }
}

fn boundary_secs(boundaries: &[Boundary; 6], day: DayOffset, kind: EventKind) -> i64 {
    let index = day.index() * 2
        + match kind {
            EventKind::Sunrise => 0,
            EventKind::Sunset => 1,
        };
    boundaries[index].secs_from_now
}

/// Next rise and set, in seconds from now, and the state in between.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct NextEvents {
    pub rise_secs: i64,
    pub set_secs: i64,
    pub state: TimeState,
}

impl NextEvents {
    /// Scan the boundaries for the first one still ahead.
    ///
    /// A pending rise means it is night and the set follows on the same day.
    /// A pending set means it is day and the next rise belongs to the following
    /// day, or is unknown (0) when the set is tomorrow's.
    pub fn from_boundaries(boundaries: &[Boundary; 6]) -> Self {
        match boundaries.iter().find(|b| b.secs_from_now > 0) {
            Some(b) if b.kind == EventKind::Sunrise => Self {
                rise_secs: b.secs_from_now,
                set_secs: boundary_secs(boundaries, b.day, EventKind::Sunset),
                state: TimeState::Night,
            },
            Some(b) => Self {
                rise_secs: b
                    .day
                    .next()
                    .map_or(0, |next| boundary_secs(boundaries, next, EventKind::Sunrise)),
                set_secs: b.secs_from_now,
                state: TimeState::Day,
            },
            None => Self {
                rise_secs: 0,
                set_secs: 0,
                state: TimeState::Night,
            },
        }
    }
}

/// Day whose arc decides whether there is anything to wait for.
///
/// That is the first of yesterday and today whose set is still ahead, otherwise tomorrow.
fn polar_anchor(boundaries: &[Boundary; 6]) -> DayOffset {
    [DayOffset::Yesterday, DayOffset::Today]
        .into_iter()
        .find(|&day| boundary_secs(boundaries, day, EventKind::Sunset) > 0)
        .unwrap_or(DayOffset::Tomorrow)
}

/// Pick the wait in seconds for a selection.
///
/// A single-event request waits for its event only when the opposite event is
/// not next, or when its own event is less than six hours away anyway.
pub fn select_wait(next: &NextEvents, selection: EventSelection) -> Result<i64, SunwaitError> {
    let wait = match selection {
        EventSelection::Sunrise => {
            if next.state == TimeState::Night || next.rise_secs < IMMINENT_EVENT_WINDOW_SECS {
                next.rise_secs
            } else {
                return Err(NoEventReason::OppositeEventFirst.into());
            }
        }
        EventSelection::Sunset => {
            if next.state == TimeState::Day || next.set_secs < IMMINENT_EVENT_WINDOW_SECS {
                next.set_secs
            } else {
                return Err(NoEventReason::OppositeEventFirst.into());
            }
        }
        EventSelection::Either => next.rise_secs.min(next.set_secs),
    };

    if wait <= 0 {
        return Err(NoEventReason::AlreadyPassed.into());
    }
    Ok(wait)
}

/// Decide whether `instant` is in daylight.
///
/// Uses the UTC calendar day of the instant as "today".
pub fn poll(sunwait: &SunWait, instant: DateTime<Utc>) -> TimeState {
    let window = ThreeDayWindow::around(sunwait, day_count(instant.date_naive()));
    let now_hour = (instant - midnight_utc(instant)).num_seconds() as f64 / SECONDS_PER_HOUR;

    let state = if window.contains_hour(now_hour) {
        TimeState::Day
    } else {
        TimeState::Night
    };

    if sunwait.debug() {
        Log::log_debug(&format!("Poll at {instant}: hour {now_hour:.4} UTC is {}", state.label()));
        for day in DayOffset::ALL {
            Log::log_indented(&format!(
                "{day:?}: {:.4} to {:.4}",
                window.rise_hour(day),
                window.set_hour(day)
            ));
        }
    }

    state
}

/// Time from `now` until the next requested event.
///
/// `target` is the calendar day the user thinks of as today. Its 00:00 UTC is
/// the origin of the rise/set hours.
///
/// # Errors
/// `NoEvent` when the anchoring day is polar (offset included), when the
/// opposite event comes first, or when the event has already passed.
pub fn time_until_next_event(
    sunwait: &SunWait,
    now: DateTime<Utc>,
    target: NaiveDate,
    selection: EventSelection,
) -> Result<StdDuration, SunwaitError> {
    let window = ThreeDayWindow::around(sunwait, day_count(target));
    let secs_to_midnight = (date_midnight_utc(target) - now).num_seconds();
    let boundaries = window.boundaries(secs_to_midnight);

    if sunwait.debug() {
        Log::log_debug(&format!("Wait from {now}, target day {target}"));
        for b in &boundaries {
            Log::log_indented(&format!("{:?} {:?}: {} s", b.day, b.kind, b.secs_from_now));
        }
    }

    match window.kind(polar_anchor(&boundaries)) {
        DayKind::MidnightSun => {
            if sunwait.debug() {
                Log::log_debug("Midnight sun or large offset, there's nothing to wait for");
            }
            return Err(NoEventReason::MidnightSun.into());
        }
        DayKind::PolarNight => {
            if sunwait.debug() {
                Log::log_debug("Polar night or large offset, there's nothing to wait for");
            }
            return Err(NoEventReason::PolarNight.into());
        }
        DayKind::Normal => {}
    }

    let next = NextEvents::from_boundaries(&boundaries);
    let secs = select_wait(&next, selection);

    if sunwait.debug() {
        Log::log_debug(&format!(
            "Next rise {} s, next set {} s, currently {}",
            next.rise_secs,
            next.set_secs,
            next.state.label()
        ));
        if let Err(e) = &secs {
            Log::log_indented(&format!("{e}"));
        }
    }

    Ok(StdDuration::from_secs(secs?.unsigned_abs()))
}

/// A rise or set instant, or the polar condition that replaces it.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum EventTime {
    At(DateTime<Utc>),
    /// Midnight sun: the sun stays up all day.
    PolarDay,
    /// The sun stays down all day.
    PolarNight,
}

impl EventTime {
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::At(instant) => Some(*instant),
            _ => None,
        }
    }
}

/// Offset-adjusted rise and set of one calendar day.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct EventPair {
    pub date: NaiveDate,
    pub rise: EventTime,
    pub set: EventTime,
    /// Hours between rise and set, in [0, 24].
    pub diurnal_arc: f64,
}

impl EventPair {
    pub fn from_arc(date: NaiveDate, arc: &SunArc, offset_hours: f64) -> Self {
        let diurnal_arc = arc.arc_with_offset(offset_hours);
        let midnight = date_midnight_utc(date);
        let at = |hour: f64| {
            EventTime::At(midnight + ChronoDuration::seconds((SECONDS_PER_HOUR * hour) as i64))
        };

        let (rise, set) = match DayKind::from_arc(diurnal_arc) {
            DayKind::MidnightSun => (EventTime::PolarDay, EventTime::PolarDay),
            DayKind::PolarNight => (EventTime::PolarNight, EventTime::PolarNight),
            DayKind::Normal => (
                at(arc.rise_hour_utc(offset_hours)),
                at(arc.set_hour_utc(offset_hours)),
            ),
        };

        Self {
            date,
            rise,
            set,
            diurnal_arc,
        }
    }

    pub fn kind(&self) -> DayKind {
        DayKind::from_arc(self.diurnal_arc)
    }
}

/// Rise/set pairs for `days` consecutive days starting at `start`.
pub fn list_events(sunwait: &SunWait, start: NaiveDate, days: usize) -> Vec<EventPair> {
    start
        .iter_days()
        .take(days)
        .map(|date| {
            let arc = sunwait.sun_arc(day_count(date));
            let pair = EventPair::from_arc(date, &arc, sunwait.offset_hours());
            if sunwait.debug() {
                Log::log_debug(&format!("{date}: {:?} to {:?}", pair.rise, pair.set));
            }
            pair
        })
        .collect()
}
