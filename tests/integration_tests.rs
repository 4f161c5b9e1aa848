use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serial_test::serial;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

use sunwait::geo::DayKind;
use sunwait::utils::format_event_time;
use sunwait::{
    Config, EventSelection, EventTime, NoEventReason, SunWait, SunwaitError, TimeState,
    TwilightAngle,
};

fn create_test_config_file(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("sunwait").join("sunwait.toml");

    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, content).unwrap();

    (temp_dir, config_path)
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn hours(duration: Duration) -> f64 {
    duration.as_secs_f64() / 3600.0
}

/// Equator at Greenwich around the March equinox, times in UTC.
fn equator() -> SunWait {
    let mut sunwait = SunWait::with_coordinates(0.0, 0.0);
    sunwait.set_utc_output(true);
    sunwait
}

fn no_event(reason: NoEventReason) -> Result<Duration, SunwaitError> {
    Err(SunwaitError::NoEvent(reason))
}

#[test]
fn test_integration_equator_before_sunrise() {
    let sunwait = equator();
    let now = utc(2024, 3, 20, 3, 0);

    assert_eq!(sunwait.poll(now), TimeState::Night);

    // Sunrise is a little after 06:03 UTC
    let wait = sunwait.wait_duration(now, EventSelection::Either).unwrap();
    assert!((hours(wait) - 3.06).abs() < 0.1, "waited {} h", hours(wait));
    assert_eq!(sunwait.wait_duration(now, EventSelection::Sunrise).unwrap(), wait);

    // Sunset is over fifteen hours off and sunrise comes first
    assert_eq!(
        sunwait.wait_duration(now, EventSelection::Sunset),
        no_event(NoEventReason::OppositeEventFirst)
    );
}

#[test]
fn test_integration_equator_at_noon() {
    let sunwait = equator();
    let now = utc(2024, 3, 20, 12, 0);

    assert_eq!(sunwait.poll(now), TimeState::Day);

    let wait = sunwait.wait_duration(now, EventSelection::Sunset).unwrap();
    assert!((hours(wait) - 6.2).abs() < 0.1, "waited {} h", hours(wait));
    assert_eq!(sunwait.wait_duration(now, EventSelection::Either).unwrap(), wait);
    assert_eq!(
        sunwait.wait_duration(now, EventSelection::Sunrise),
        no_event(NoEventReason::OppositeEventFirst)
    );
}

#[test]
fn test_integration_equator_after_sunset() {
    let sunwait = equator();
    let now = utc(2024, 3, 20, 20, 0);

    assert_eq!(sunwait.poll(now), TimeState::Night);

    // Tomorrow's sunrise
    let wait = sunwait.wait_duration(now, EventSelection::Sunrise).unwrap();
    assert!((hours(wait) - 10.05).abs() < 0.1, "waited {} h", hours(wait));
}

#[test]
fn test_integration_offset_swallows_the_day() {
    let mut sunwait = equator();
    let now = utc(2024, 3, 20, 3, 0);

    // Twelve hours of daylight cannot lose six and a half at each end
    sunwait.set_offset_hours(6.5);
    assert_eq!(
        sunwait.wait_duration(now, EventSelection::Either),
        no_event(NoEventReason::PolarNight)
    );
    assert_eq!(sunwait.poll(now), TimeState::Night);

    sunwait.set_offset_hours(-6.5);
    assert_eq!(
        sunwait.wait_duration(now, EventSelection::Either),
        no_event(NoEventReason::MidnightSun)
    );
    assert_eq!(sunwait.poll(now), TimeState::Day);
}

#[test]
fn test_integration_arctic_summer() {
    let mut sunwait = SunWait::with_coordinates(70.0, 25.5);
    sunwait.set_utc_output(true);
    let now = utc(2024, 6, 21, 12, 0);

    assert_eq!(sunwait.poll(now), TimeState::Day);
    assert_eq!(
        sunwait.wait_duration(now, EventSelection::Sunset),
        no_event(NoEventReason::MidnightSun)
    );
}

#[test]
fn test_integration_default_location_civil_midsummer() {
    // The default location has a short night at midsummer, but no civil dusk
    let mut sunwait = SunWait::new();
    sunwait.set_utc_output(true);
    let now = utc(2024, 6, 21, 22, 0);

    assert!(sunwait.wait_duration(now, EventSelection::Either).is_ok());

    sunwait.set_twilight(TwilightAngle::Civil);
    assert_eq!(
        sunwait.wait_duration(now, EventSelection::Either),
        no_event(NoEventReason::MidnightSun)
    );
}

#[test]
fn test_integration_arctic_winter() {
    let mut sunwait = SunWait::with_coordinates(70.0, 25.5);
    sunwait.set_utc_output(true);
    let now = utc(2024, 12, 21, 10, 0);

    assert_eq!(sunwait.poll(now), TimeState::Night);
    assert_eq!(
        sunwait.wait_duration(now, EventSelection::Sunrise),
        no_event(NoEventReason::PolarNight)
    );
}

#[test]
fn test_integration_list_polar_sentinels() {
    let mut sunwait = SunWait::with_coordinates(70.0, 25.5);
    sunwait.set_utc_output(true);

    let summer = sunwait.list(3, NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
    assert_eq!(summer.len(), 3);
    for pair in &summer {
        assert_eq!(pair.kind(), DayKind::MidnightSun);
        assert_eq!(pair.rise, EventTime::PolarDay);
        assert_eq!(format_event_time(&pair.set, 0.0), "--:--");
    }

    let winter = sunwait.list(2, NaiveDate::from_ymd_opt(2024, 12, 20).unwrap());
    assert!(winter.iter().all(|pair| pair.set == EventTime::PolarNight));
}

#[test]
fn test_integration_list_consecutive_days() {
    let sunwait = equator();
    let start = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
    let pairs = sunwait.list(7, start);

    assert_eq!(pairs.len(), 7);
    for (i, pair) in pairs.iter().enumerate() {
        assert_eq!(pair.date, start + chrono::Duration::days(i as i64));
        assert_eq!(pair.kind(), DayKind::Normal);
        let (rise, set) = (pair.rise.instant().unwrap(), pair.set.instant().unwrap());
        assert!(rise < set);
        assert_eq!(rise.date_naive(), pair.date);
    }
    assert_eq!(format_event_time(&pairs[0].rise, 0.0), "06:03");
}

#[test]
fn test_integration_bearings() {
    let mut sunwait = SunWait::new();

    sunwait.set_coordinates_from_bearings("25.5E", "36S").unwrap();
    assert!((sunwait.latitude() + 36.0).abs() < 1e-9);
    assert!((sunwait.longitude() - 25.5).abs() < 1e-9);

    // A bad bearing leaves both coordinates alone
    let result = sunwait.set_coordinates_from_bearings("65N", "garbage");
    assert_eq!(
        result,
        Err(SunwaitError::InvalidBearing("garbage".to_string()))
    );
    assert!((sunwait.latitude() + 36.0).abs() < 1e-9);
    assert!((sunwait.longitude() - 25.5).abs() < 1e-9);
}

#[test]
fn test_integration_config_with_bearings() {
    let config_content = r#"
coordinates = ["36S", "74W"]
twilight = "nautical"
offset = 0.25
utc = true
"#;

    let (_temp_dir, config_path) = create_test_config_file(config_content);
    let config = Config::load_from_path(&config_path).unwrap();
    let sunwait = SunWait::from_config(&config).unwrap();

    assert!((sunwait.latitude() + 36.0).abs() < 1e-9);
    assert!((sunwait.longitude() - 286.0).abs() < 1e-9);
    assert_eq!(sunwait.twilight(), TwilightAngle::Nautical);
    assert_eq!(sunwait.offset_hours(), 0.25);
    assert!(sunwait.utc_output());
}

#[test]
fn test_integration_config_custom_angle_overrides_preset() {
    let config_content = r#"
latitude = 51.5
longitude = -0.13
twilight = "civil"
twilight_angle = -3.0
"#;

    let (_temp_dir, config_path) = create_test_config_file(config_content);
    let config = Config::load_from_path(&config_path).unwrap();
    let sunwait = SunWait::from_config(&config).unwrap();

    assert_eq!(sunwait.twilight(), TwilightAngle::Custom(-3.0));
    assert!((sunwait.longitude() - 359.87).abs() < 1e-9);
}

#[test]
fn test_integration_config_rejects_mixed_location() {
    let config_content = r#"
latitude = 51.5
longitude = -0.13
coordinates = ["51.5N", "0.13W"]
"#;

    let (_temp_dir, config_path) = create_test_config_file(config_content);
    assert!(Config::load_from_path(&config_path).is_err());
}

#[test]
fn test_integration_config_timezone_sets_target_date() {
    let config_content = r#"
latitude = -36.85
longitude = 174.76
timezone = "Pacific/Auckland"
"#;

    let (_temp_dir, config_path) = create_test_config_file(config_content);
    let config = Config::load_from_path(&config_path).unwrap();
    let sunwait = SunWait::from_config(&config).unwrap();

    // 20:00 UTC on the 20th is already the 21st in Auckland
    let now = utc(2024, 3, 20, 20, 0);
    assert_eq!(
        sunwait.target_date(now),
        NaiveDate::from_ymd_opt(2024, 3, 21).unwrap()
    );
    assert_eq!(sunwait.utc_bias_hours(sunwait.target_date(now)), 13.0);

    // Early morning of the 21st in Auckland: the sun is up and sets around 19:30 local
    assert_eq!(sunwait.poll(now), TimeState::Day);
    let wait = sunwait.wait_duration(now, EventSelection::Sunset).unwrap();
    assert!((hours(wait) - 10.57).abs() < 0.1, "waited {} h", hours(wait));
    assert_eq!(sunwait.wait_duration(now, EventSelection::Either).unwrap(), wait);
    assert_eq!(
        sunwait.wait_duration(now, EventSelection::Sunrise),
        no_event(NoEventReason::OppositeEventFirst)
    );
}

#[test]
#[serial]
fn test_integration_default_config_round_trip() {
    let temp_dir = tempdir().unwrap();

    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let path = Config::get_config_path().unwrap();
    let created = Config::create_default_config(&path);
    let second = Config::create_default_config(&path);
    let loaded = Config::load();

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    assert!(created.is_ok());
    assert!(second.is_err(), "existing config must not be overwritten");

    let sunwait = SunWait::from_config(&loaded.unwrap()).unwrap();
    assert_eq!(sunwait, SunWait::new());
}
