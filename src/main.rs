use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::{thread, time::Duration};

use sunwait::args::{
    CliAction, CliOptions, Command, ParsedArgs, display_help, display_version_info,
};
use sunwait::constants::{DEBUG_WAIT_SECS, EXIT_ERROR, EXIT_OK};
use sunwait::geo::DayKind;
use sunwait::report::{DayReport, REPORT_PRESETS};
use sunwait::time_state::EventSelection;
use sunwait::utils::{format_event_time, format_hours};
use sunwait::{Config, EventPair, EventTime, Log, SunWait};

fn main() -> Result<()> {
    let parsed = ParsedArgs::from_env();

    match parsed.action {
        CliAction::ShowVersion => {
            display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            display_help();
            std::process::exit(EXIT_ERROR);
        }
        CliAction::InitConfig => {
            let path = Config::get_config_path()?;
            Config::create_default_config(&path)?;
            Log::log_info(&format!("Wrote default configuration to {}", path.display()));
            Ok(())
        }
        CliAction::Run { command, options } => {
            let sunwait = build_sunwait(&options)?;
            let code = run_command(&sunwait, command, &options)?;
            std::process::exit(code);
        }
    }
}

/// Load the config file and apply command-line overrides on top.
fn build_sunwait(options: &CliOptions) -> Result<SunWait> {
    let config = Config::load()?;
    let mut sunwait = SunWait::from_config(&config)?;

    if options.debug_enabled {
        sunwait.set_debug(true);
    }

    if sunwait.debug() {
        Log::log_version();
        let path = Config::get_config_path()?;
        if path.exists() {
            config.log_config(&path);
        }
    }

    if let [latitude, longitude] = options.bearings.as_slice() {
        sunwait
            .set_coordinates_from_bearings(latitude, longitude)
            .context("Invalid coordinates")?;
    }
    if let Some(twilight) = options.twilight {
        sunwait.set_twilight(twilight);
    }
    if let Some(angle) = options.twilight_angle {
        if let Err(e) = sunwait.set_twilight_angle(angle) {
            Log::log_warning(&format!("{e}, using daylight"));
        }
    }
    if let Some(offset) = options.offset_hours {
        sunwait.set_offset_hours(offset);
    }
    if options.utc {
        sunwait.set_utc_output(true);
    }

    if sunwait.debug() {
        Log::log_block_start("Effective settings");
        Log::log_indented(&format!(
            "Location: {:.6}, {:.6}",
            sunwait.latitude(),
            sunwait.longitude()
        ));
        Log::log_indented(&format!(
            "Twilight: {} ({:.4} degrees)",
            sunwait.twilight().name(),
            sunwait.twilight().degrees()
        ));
        Log::log_indented(&format!("Offset: {}", format_hours(sunwait.offset_hours())));
        Log::log_indented(&format!("UTC output: {}", sunwait.utc_output()));
    }

    Ok(sunwait)
}

/// Run one command and return the process exit code.
fn run_command(sunwait: &SunWait, command: Command, options: &CliOptions) -> Result<i32> {
    match command {
        Command::Poll => {
            let state = sunwait.poll_now();
            println!("{}", state.label());
            Ok(state.exit_code())
        }
        Command::Wait { selection } => Ok(wait(sunwait, selection)),
        Command::List { days } => {
            let Some(start) = requested_date(sunwait, options, Utc::now()) else {
                return Ok(EXIT_ERROR);
            };
            for pair in sunwait.list(days, start) {
                let bias = sunwait.utc_bias_hours(pair.date);
                let suffix = match pair.kind() {
                    DayKind::Normal => "",
                    DayKind::MidnightSun => " (Midnight sun)",
                    DayKind::PolarNight => " (Polar night)",
                };
                println!(
                    "{}, {}{}",
                    format_event_time(&pair.rise, bias),
                    format_event_time(&pair.set, bias),
                    suffix
                );
            }
            Ok(EXIT_OK)
        }
        Command::Report => {
            let now = Utc::now();
            let Some(date) = requested_date(sunwait, options, now) else {
                return Ok(EXIT_ERROR);
            };
            let report = sunwait.report(date, now);
            print_report(&report);
            Ok(EXIT_OK)
        }
    }
}

/// The day `list` and `report` start from, with any year, month or day override applied.
fn requested_date(
    sunwait: &SunWait,
    options: &CliOptions,
    now: DateTime<Utc>,
) -> Option<NaiveDate> {
    match sunwait.target_date_with(
        now,
        options.target_year,
        options.target_month,
        options.target_day,
    ) {
        Ok(date) => Some(date),
        Err(e) => {
            Log::log_error(&format!("{e}"));
            None
        }
    }
}

fn wait(sunwait: &SunWait, selection: EventSelection) -> i32 {
    let duration = match sunwait.wait_duration_now(selection) {
        Ok(duration) => duration,
        Err(e) => {
            Log::log_error(&format!("{e}"));
            return EXIT_ERROR;
        }
    };

    if sunwait.debug() {
        Log::log_debug(&format!(
            "Event in {}, sleeping {} seconds instead",
            format_hours(duration.as_secs_f64() / 3600.0),
            DEBUG_WAIT_SECS
        ));
        thread::sleep(Duration::from_secs(DEBUG_WAIT_SECS));
    } else {
        thread::sleep(duration);
    }

    EXIT_OK
}

fn print_report(report: &DayReport) {
    let bias = report.utc_bias_hours;
    let pair_line = |pair: &EventPair| {
        format!(
            "{} to {}, {} hours",
            format_event_time(&pair.rise, bias),
            format_event_time(&pair.set, bias),
            format_hours(pair.diurnal_arc)
        )
    };

    Log::log_version();
    Log::log_block_start("Location");
    Log::log_indented(&format!("Date: {}", report.date.format("%d-%b-%Y")));
    Log::log_indented(&format!(
        "Coordinates: {:.6}, {:.6}",
        report.latitude, report.longitude
    ));
    Log::log_indented(&format!("UTC bias: {} hours", format_hours(bias)));
    Log::log_indented(&format!(
        "Sun directly north/south: {}",
        format_event_time(&EventTime::At(report.transit), bias)
    ));

    Log::log_block_start(&format!(
        "Twilight: {} ({:.4} degrees)",
        report.twilight.name(),
        report.twilight.degrees()
    ));
    Log::log_indented(&pair_line(&report.with_twilight));
    if let Some(with_offset) = &report.with_offset {
        Log::log_indented(&format!(
            "With offset {}: {}",
            format_hours(report.offset_hours),
            pair_line(with_offset)
        ));
    }
    Log::log_indented(&format!("It is {} now", report.state.label()));

    Log::log_block_start("All twilights");
    for (twilight, pair) in REPORT_PRESETS.iter().zip(&report.presets) {
        Log::log_indented(&format!("{:<13} {}", twilight.name(), pair_line(pair)));
    }
    Log::log_end();
}
