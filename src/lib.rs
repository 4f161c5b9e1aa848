//! # Sunwait
//!
//! Sunrise, sunset and twilight calculations for scheduling actions at dawn and dusk.
//!
//! A [`SunWait`] handle carries a location, a twilight angle and an offset. From
//! it you can ask whether it is day or night now, how long until the next
//! sunrise or sunset, or for the rise and set times of a run of days.
//!
//! ## Architecture
//!
//! - **args**: Command-line parsing for the `sunwait` binary
//! - **config**: Configuration loading, validation, and default generation
//! - **constants**: Application-wide constants and defaults
//! - **error**: Library error types
//! - **geo**: Solar model, rise/set solver, bearings and timezone helpers
//! - **logger**: Structured logging with visual formatting
//! - **report**: Full day report data
//! - **sunwait**: The configured handle and its queries
//! - **time_state**: Day/night state, wait selection and event listing
//! - **utils**: Time formatting and offset parsing

pub mod args;
pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod logger;
pub mod report;
pub mod sunwait;
pub mod time_state;
pub mod utils;

// Re-export important types for easier access
pub use config::Config;
pub use error::{NoEventReason, SunwaitError};
pub use geo::TwilightAngle;
pub use logger::{Log, LogLevel};
pub use report::DayReport;
pub use sunwait::SunWait;
pub use time_state::{EventPair, EventSelection, EventTime, TimeState};
