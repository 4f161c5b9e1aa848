//! Configuration system for sunwait.
//!
//! Settings live in `sunwait.toml` under the XDG config directory
//! (`$XDG_CONFIG_HOME/sunwait/sunwait.toml`). Every key is optional, and
//! command-line options override whatever the file says.
//!
//! ```toml
//! # Location, either as decimal degrees ...
//! latitude = 65.0                   # North positive
//! longitude = 25.5                  # East positive
//! # ... or as compass bearings
//! coordinates = ["65N", "25.5E"]
//!
//! # Events
//! twilight = "daylight"             # "daylight", "civil", "nautical" or "astronomical"
//! twilight_angle = -3.0             # Custom angle in degrees, overrides `twilight`
//! offset = 0.25                     # Hours; narrows the day at both ends
//!
//! # Output
//! utc = false                       # Report times in UTC
//! debug = false                     # Print the calculation trace
//! timezone = "Europe/Helsinki"      # IANA name, defaults to the system timezone
//! ```
//!
//! ## Validation
//!
//! - **Range validation**: latitude (-90 to +90), longitude (-180 to +360), offset (under 12 hours)
//! - **Format validation**: bearings and timezone names must parse
//! - **Logical validation**: coordinates cannot be given both ways at once
//!
//! A twilight angle outside (-90, 90) is deliberately not an error here. The
//! runtime handle resets it to the daylight preset with a warning.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::geo::{Bearing, TwilightAngle};
use crate::logger::Log;

/// Named twilight presets as written in the config file.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TwilightPreset {
    /// Ordinary sunrise and sunset.
    Daylight,
    /// Sun 6 degrees below the horizon.
    Civil,
    /// Sun 12 degrees below the horizon.
    Nautical,
    /// Sun 18 degrees below the horizon.
    Astronomical,
}

impl TwilightPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TwilightPreset::Daylight => "daylight",
            TwilightPreset::Civil => "civil",
            TwilightPreset::Nautical => "nautical",
            TwilightPreset::Astronomical => "astronomical",
        }
    }
}

impl From<TwilightPreset> for TwilightAngle {
    fn from(preset: TwilightPreset) -> Self {
        match preset {
            TwilightPreset::Daylight => TwilightAngle::Daylight,
            TwilightPreset::Civil => TwilightAngle::Civil,
            TwilightPreset::Nautical => TwilightAngle::Nautical,
            TwilightPreset::Astronomical => TwilightAngle::Astronomical,
        }
    }
}

/// Settings loaded from `sunwait.toml`.
///
/// ## Configuration Categories
///
/// - **Location**: `latitude`/`longitude` or `coordinates`
/// - **Events**: `twilight`, `twilight_angle`, `offset`
/// - **Output**: `utc`, `debug`, `timezone`
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    pub latitude: Option<f64>,  // Degrees north
    pub longitude: Option<f64>, // Degrees east

    /// Compass bearings, e.g. `["65N", "25.5E"]`. Replaces `latitude`/`longitude`.
    pub coordinates: Option<Vec<String>>,

    pub twilight: Option<TwilightPreset>,
    /// Custom twilight angle in degrees, negative below the horizon.
    pub twilight_angle: Option<f64>,

    pub offset: Option<f64>, // hours
    pub utc: Option<bool>,
    pub debug: Option<bool>,
    /// IANA timezone name. The system timezone is used when absent.
    pub timezone: Option<String>,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from the default location, or use defaults when there is no file.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path).with_context(|| {
            format!(
                "Failed to load configuration from {}",
                config_path.display()
            )
        })
    }

    /// Load and validate a specific file. The file must exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Configuration file not found at specified path: {}",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        validate_config(&config)?;

        Ok(config)
    }

    /// Write a commented default configuration file.
    pub fn create_default_config(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Configuration file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_content = ConfigBuilder::new()
            .add_section("Location")
            .add_setting(
                "latitude",
                &format!("{DEFAULT_LATITUDE:.6}"),
                "Degrees north, negative for south",
            )
            .add_setting(
                "longitude",
                &format!("{DEFAULT_LONGITUDE:.6}"),
                "Degrees east, negative for west",
            )
            .add_section("Events")
            .add_setting(
                "twilight",
                &format!("\"{}\"", TwilightPreset::Daylight.as_str()),
                "\"daylight\", \"civil\", \"nautical\" or \"astronomical\"",
            )
            .add_setting(
                "offset",
                &format!("{NO_OFFSET:.1}"),
                "Hours to narrow the day by at both ends (negative widens)",
            )
            .add_section("Output")
            .add_setting("utc", "false", "Report times in UTC instead of local time")
            .add_setting("debug", "false", "Print the calculation trace")
            .build();

        fs::write(path, config_content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// The preset twilight, ignoring any custom angle.
    pub fn twilight_preset(&self) -> TwilightAngle {
        self.twilight.unwrap_or(TwilightPreset::Daylight).into()
    }

    /// Parse the configured timezone name.
    pub fn timezone(&self) -> Result<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|e| anyhow::anyhow!("Unknown timezone '{}': {}", name, e))
            })
            .transpose()
    }

    pub fn log_config(&self, path: &Path) {
        Log::log_block_start(&format!("Loaded configuration from {}", path.display()));

        if let Some(coordinates) = &self.coordinates {
            Log::log_indented(&format!("Coordinates: {}", coordinates.join(", ")));
        } else if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            Log::log_indented(&format!("Location: {lat:.4}, {lon:.4}"));
        }

        match self.twilight_angle {
            Some(angle) => Log::log_indented(&format!("Twilight angle: {angle} degrees")),
            None => Log::log_indented(&format!(
                "Twilight: {}",
                self.twilight.unwrap_or(TwilightPreset::Daylight).as_str()
            )),
        }

        if let Some(offset) = self.offset {
            Log::log_indented(&format!("Offset: {offset} hours"));
        }
        Log::log_indented(&format!("UTC output: {}", self.utc.unwrap_or(false)));
        if let Some(timezone) = &self.timezone {
            Log::log_indented(&format!("Timezone: {timezone}"));
        }
    }
}

/// Check a configuration for values that cannot work.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.coordinates.is_some() && (config.latitude.is_some() || config.longitude.is_some()) {
        anyhow::bail!("Use either `coordinates` or `latitude`/`longitude`, not both");
    }

    if config.latitude.is_some() != config.longitude.is_some() {
        anyhow::bail!("`latitude` and `longitude` must be set together");
    }

    if let Some(lat) = config.latitude {
        if !(-90.0..=90.0).contains(&lat) {
            anyhow::bail!("Latitude must be between -90 and 90 degrees (got {})", lat);
        }
    }

    if let Some(lon) = config.longitude {
        if !(-180.0..360.0).contains(&lon) {
            anyhow::bail!("Longitude must be between -180 and 360 degrees (got {})", lon);
        }
    }

    if let Some(coordinates) = &config.coordinates {
        if coordinates.len() != 2 {
            anyhow::bail!(
                "`coordinates` must hold two bearings, e.g. [\"65N\", \"25.5E\"] (got {})",
                coordinates.len()
            );
        }
        for bearing in coordinates {
            bearing
                .parse::<Bearing>()
                .with_context(|| format!("Invalid bearing in `coordinates`: {bearing}"))?;
        }
    }

    if let Some(offset) = config.offset {
        if !(offset.abs() < MAXIMUM_OFFSET_HOURS) {
            anyhow::bail!(
                "Offset must be less than {} hours either way (got {})",
                MAXIMUM_OFFSET_HOURS,
                offset
            );
        }
    }

    config.timezone()?;

    Ok(())
}

/// Builds the default config file, aligning the trailing comments.
struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

#[derive(Clone)]
struct ConfigEntry {
    content: String,
    entry_type: EntryType,
}

#[derive(Clone)]
enum EntryType {
    Section,
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry {
            content: format!("#[{}]", title),
            entry_type: EntryType::Section,
        });
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        let line = format!("{} = {}", key, value);
        self.entries.push(ConfigEntry {
            content: line.clone(),
            entry_type: EntryType::Setting {
                line,
                comment: format!("# {}", comment),
            },
        });
        self
    }

    fn build(self) -> String {
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match &entry.entry_type {
                EntryType::Setting { line, .. } => Some(line.len()),
                EntryType::Section => None,
            })
            .max()
            .unwrap_or(0)
            + 1; // one space before the comment

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry.entry_type {
                EntryType::Section => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(entry.content);
                    first_section = false;
                }
                EntryType::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{}{}{}", line, padding, comment));
                }
            }
        }

        result.push(String::new());
        result.join("\n")
    }
}
