//! Application constants and default values for sunwait.
//!
//! This module contains the configuration defaults, the named twilight angles,
//! the astronomical constants of the solar model and the exit codes of the binary.

// ═══ Location Defaults ═══
// Used when no coordinates are configured

pub const DEFAULT_LATITUDE: f64 = 65.0; // Degrees north
pub const DEFAULT_LONGITUDE: f64 = 25.5; // Degrees east
pub const NO_OFFSET: f64 = 0.0; // Hours

// ═══ Twilight Angles ═══
// Altitude of the sun (degrees, negative = below the horizon) that marks each event.
//
// Sunrise/set happens when the upper limb is 50 arc minutes below the horizon,
// which accounts for atmospheric refraction. The three twilights use the centre
// of the sun.

pub const TWILIGHT_ANGLE_DAYLIGHT: f64 = -50.0 / 60.0;
pub const TWILIGHT_ANGLE_CIVIL: f64 = -6.0;
pub const TWILIGHT_ANGLE_NAUTICAL: f64 = -12.0;
pub const TWILIGHT_ANGLE_ASTRONOMICAL: f64 = -18.0;

// Open interval: both limits are rejected
pub const MINIMUM_TWILIGHT_ANGLE: f64 = -90.0;
pub const MAXIMUM_TWILIGHT_ANGLE: f64 = 90.0;

// Offsets beyond half a day remove every event anyway
pub const MAXIMUM_OFFSET_HOURS: f64 = 12.0;

// ═══ Solar Model Constants ═══

pub const SUN_APPARENT_RADIUS_AT_1AU: f64 = 0.2666; // Degrees
pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const HOURS_PER_DAY: f64 = 24.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

// Latitude of exactly +/-90 puts cos(lat) = 0 in the rise/set solver
pub const POLE_LATITUDE_LIMIT: f64 = 89.999_999_9;

// Days from 0001-01-01 (day 1 of the common era) to 2000-01-01
pub const DAY_COUNT_EPOCH_FROM_CE: i64 = 730_120;

// ═══ Scheduler Constants ═══

// Single-event waits accept events this close
pub const IMMINENT_EVENT_WINDOW_SECS: i64 = 6 * 60 * 60;
pub const DEBUG_WAIT_SECS: u64 = 10; // Debug mode sleeps this long instead of the real wait

// ═══ Configuration File ═══

pub const CONFIG_DIR_NAME: &str = "sunwait";
pub const CONFIG_FILE_NAME: &str = "sunwait.toml";

// ═══ Exit Codes ═══

pub const EXIT_OK: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_DAY: i32 = 2;
pub const EXIT_NIGHT: i32 = 3;
