//! Command-line argument parsing and processing.
//!
//! sunwait takes plain words rather than dashed options, so a typical call
//! looks like `sunwait wait set offset 15 civil 65N 25.5E`. Only help,
//! version, debug and `--init-config` have dashed spellings.

use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::geo::{Bearing, TwilightAngle};
use crate::logger::Log;
use crate::time_state::EventSelection;
use crate::utils::parse_offset;

/// What to compute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Print DAY or NIGHT and exit with the matching code.
    Poll,
    /// Sleep until the next selected event.
    Wait { selection: EventSelection },
    /// Print rise/set times for a number of days.
    List { days: usize },
    /// Print a full report for one day.
    Report,
}

/// Settings given on the command line. They override the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub twilight: Option<TwilightAngle>,
    pub twilight_angle: Option<f64>,
    pub offset_hours: Option<f64>,
    pub utc: bool,
    pub debug_enabled: bool,
    /// Exactly two bearings, or none.
    pub bearings: Vec<String>,
    /// Target date fields for `list` and `report`. The year counts from 2000.
    pub target_year: Option<i32>,
    pub target_month: Option<u32>,
    pub target_day: Option<u32>,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run a command with these settings
    Run { command: Command, options: CliOptions },
    /// Write a default configuration file
    InitConfig,
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown or malformed arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut display_help = false;
        let mut display_version = false;
        let mut init_config = false;
        let mut unknown_arg_found = false;

        let mut command: Option<Command> = None;
        let mut report_sunrise = false;
        let mut report_sunset = false;
        let mut list_days: usize = 1;
        let mut options = CliOptions::default();

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut i = 0;
        while i < args_vec.len() {
            let arg_str = args_vec[i].as_str();
            match arg_str {
                "--help" | "-h" | "help" => display_help = true,
                "--version" | "-V" | "-v" | "version" => display_version = true,
                "--debug" | "-d" | "debug" => options.debug_enabled = true,
                "--init-config" => init_config = true,
                "poll" => command = Some(Command::Poll),
                "wait" => command = Some(Command::Wait { selection: EventSelection::Either }),
                "report" => command = Some(Command::Report),
                "list" => {
                    command = Some(Command::List { days: 1 });
                    // Optional day count
                    if let Some(days) = args_vec.get(i + 1).and_then(|s| s.parse::<usize>().ok()) {
                        list_days = days;
                        i += 1;
                    }
                }
                "rise" | "sunrise" => report_sunrise = true,
                "set" | "sunset" => report_sunset = true,
                "daylight" | "sun" => options.twilight = Some(TwilightAngle::Daylight),
                "civil" => options.twilight = Some(TwilightAngle::Civil),
                "nautical" => options.twilight = Some(TwilightAngle::Nautical),
                "astronomical" => options.twilight = Some(TwilightAngle::Astronomical),
                "utc" | "gmt" => options.utc = true,
                "angle" => match args_vec.get(i + 1).map(|s| s.parse::<f64>()) {
                    Some(Ok(angle)) => {
                        options.twilight_angle = Some(angle);
                        i += 1;
                    }
                    _ => {
                        Log::log_warning(
                            "Missing or invalid value for angle. Usage: angle <degrees>",
                        );
                        unknown_arg_found = true;
                    }
                },
                "year" | "y" => match parse_in_range(args_vec.get(i + 1), 0..=99) {
                    Some(year) => {
                        options.target_year = Some(year);
                        i += 1;
                    }
                    None => {
                        Log::log_warning("Year must be between 0 and 99. Usage: year <YY>");
                        unknown_arg_found = true;
                    }
                },
                "month" | "m" => match parse_in_range(args_vec.get(i + 1), 1..=12) {
                    Some(month) => {
                        options.target_month = Some(month);
                        i += 1;
                    }
                    None => {
                        Log::log_warning("Month must be between 1 and 12. Usage: month <MM>");
                        unknown_arg_found = true;
                    }
                },
                "day" | "d" => match parse_in_range(args_vec.get(i + 1), 1..=31) {
                    Some(day) => {
                        options.target_day = Some(day);
                        i += 1;
                    }
                    None => {
                        Log::log_warning("Day of month must be between 1 and 31. Usage: day <DD>");
                        unknown_arg_found = true;
                    }
                },
                "offset" => match args_vec.get(i + 1).map(|s| parse_offset(s)) {
                    Some(Ok(offset)) => {
                        options.offset_hours = Some(offset);
                        i += 1;
                    }
                    Some(Err(e)) => {
                        Log::log_warning(&format!("{e}"));
                        unknown_arg_found = true;
                        i += 1;
                    }
                    None => {
                        Log::log_warning(
                            "Missing value for offset. Usage: offset <[-]MM|[-]HH:MM>",
                        );
                        unknown_arg_found = true;
                    }
                },
                _ => {
                    if arg_str.parse::<Bearing>().is_ok() {
                        options.bearings.push(arg_str.to_string());
                    } else {
                        Log::log_warning(&format!("Unknown option: {}", arg_str));
                        unknown_arg_found = true;
                    }
                }
            }
            i += 1;
        }

        if !options.bearings.is_empty() && options.bearings.len() != 2 {
            Log::log_warning("Coordinates need both a latitude and a longitude, e.g. 65N 25.5E");
            unknown_arg_found = true;
        }

        let command = match command.unwrap_or(Command::Poll) {
            Command::Wait { .. } => Command::Wait {
                selection: EventSelection::from_flags(report_sunrise, report_sunset),
            },
            Command::List { .. } => Command::List { days: list_days },
            other => other,
        };

        let action = if display_version {
            CliAction::ShowVersion
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else if display_help {
            CliAction::ShowHelp
        } else if init_config {
            CliAction::InitConfig
        } else {
            CliAction::Run { command, options }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Parse an optional argument value and keep it only when it falls in `range`.
fn parse_in_range<T>(value: Option<&String>, range: RangeInclusive<T>) -> Option<T>
where
    T: FromStr + PartialOrd,
{
    value
        .and_then(|s| s.parse::<T>().ok())
        .filter(|v| range.contains(v))
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    Log::log_version();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    Log::log_version();
    Log::log_block_start(env!("CARGO_PKG_DESCRIPTION"));
    Log::log_block_start("Usage: sunwait [COMMAND] [OPTIONS] [LATITUDE LONGITUDE]");
    Log::log_block_start("Commands:");
    Log::log_indented("poll                      Print DAY or NIGHT (default, exit code 2 or 3)");
    Log::log_indented("wait                      Sleep until the next sunrise or sunset");
    Log::log_indented("list [days]               Print rise and set times for [days] days");
    Log::log_indented("report                    Print a full report for today or the target date");
    Log::log_block_start("Options:");
    Log::log_indented("rise | set                Only wait for sunrise or sunset");
    Log::log_indented("daylight                  Ordinary sunrise and sunset (default)");
    Log::log_indented("civil                     Civil twilight, sun 6 degrees down");
    Log::log_indented("nautical                  Nautical twilight, sun 12 degrees down");
    Log::log_indented("astronomical              Astronomical twilight, sun 18 degrees down");
    Log::log_indented("angle <degrees>           Custom twilight angle, negative below horizon");
    Log::log_indented("offset <[-]MM|[-]HH:MM>   Narrow the day by this much at both ends");
    Log::log_indented("utc                       Report times in UTC");
    Log::log_indented("year <YY> | y <YY>        Target year for list and report, 0 to 99");
    Log::log_indented("month <MM> | m <MM>       Target month for list and report");
    Log::log_indented("day <DD> | d <DD>         Target day of month for list and report");
    Log::log_indented("-d, debug                 Print the calculation trace, wait 10 s only");
    Log::log_indented("--init-config             Write a default configuration file");
    Log::log_indented("-h, --help                Print help information");
    Log::log_indented("-V, --version             Print version information");
    Log::log_block_start("Coordinates are bearings like 65N 25.5E or 36.5S 74W");
    Log::log_end();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> (Command, CliOptions) {
        match ParsedArgs::parse(args.iter().copied()).action {
            CliAction::Run { command, options } => (command, options),
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_no_args_polls() {
        let (command, options) = run(&["sunwait"]);
        assert_eq!(command, Command::Poll);
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn test_parse_wait_selection() {
        assert_eq!(
            run(&["sunwait", "wait"]).0,
            Command::Wait { selection: EventSelection::Either }
        );
        assert_eq!(
            run(&["sunwait", "wait", "rise"]).0,
            Command::Wait { selection: EventSelection::Sunrise }
        );
        assert_eq!(
            run(&["sunwait", "set", "wait"]).0,
            Command::Wait { selection: EventSelection::Sunset }
        );
        assert_eq!(
            run(&["sunwait", "wait", "rise", "set"]).0,
            Command::Wait { selection: EventSelection::Either }
        );
    }

    #[test]
    fn test_parse_list_days() {
        assert_eq!(run(&["sunwait", "list"]).0, Command::List { days: 1 });
        assert_eq!(run(&["sunwait", "list", "7"]).0, Command::List { days: 7 });
        // A bearing after list is not a day count
        let (command, options) = run(&["sunwait", "list", "65N", "25.5E"]);
        assert_eq!(command, Command::List { days: 1 });
        assert_eq!(options.bearings, vec!["65N", "25.5E"]);
    }

    #[test]
    fn test_parse_twilight_and_angle() {
        assert_eq!(run(&["sunwait", "civil"]).1.twilight, Some(TwilightAngle::Civil));
        assert_eq!(run(&["sunwait", "astronomical"]).1.twilight, Some(TwilightAngle::Astronomical));
        assert_eq!(run(&["sunwait", "angle", "-3.5"]).1.twilight_angle, Some(-3.5));
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(run(&["sunwait", "offset", "15"]).1.offset_hours, Some(0.25));
        assert_eq!(run(&["sunwait", "offset", "-1:30"]).1.offset_hours, Some(-1.5));

        Log::set_enabled(false);
        let parsed = ParsedArgs::parse(["sunwait", "offset", "soon"]);
        Log::set_enabled(true);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_offset_out_of_range() {
        Log::set_enabled(false);
        let huge = ParsedArgs::parse(["sunwait", "wait", "offset", "99999999:00"]);
        let twelve = ParsedArgs::parse(["sunwait", "wait", "offset", "-12:00"]);
        Log::set_enabled(true);
        assert_eq!(huge.action, CliAction::ShowHelpDueToError);
        assert_eq!(twelve.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_target_date() {
        let (command, options) = run(&["sunwait", "report", "y", "25", "m", "6", "d", "21"]);
        assert_eq!(command, Command::Report);
        assert_eq!(options.target_year, Some(25));
        assert_eq!(options.target_month, Some(6));
        assert_eq!(options.target_day, Some(21));

        let (command, options) = run(&["sunwait", "list", "3", "day", "1"]);
        assert_eq!(command, Command::List { days: 3 });
        assert_eq!(options.target_day, Some(1));
        assert_eq!(options.target_year, None);
    }

    #[test]
    fn test_parse_target_date_out_of_range() {
        Log::set_enabled(false);
        let actions: Vec<CliAction> = [
            ["sunwait", "y", "100"],
            ["sunwait", "m", "13"],
            ["sunwait", "d", "0"],
            ["sunwait", "day", "first"],
        ]
        .into_iter()
        .map(|args| ParsedArgs::parse(args).action)
        .collect();
        Log::set_enabled(true);
        assert!(actions.iter().all(|a| *a == CliAction::ShowHelpDueToError));
    }

    #[test]
    fn test_parse_bearings_with_sign() {
        let (_, options) = run(&["sunwait", "report", "-36N", "74W", "utc"]);
        assert_eq!(options.bearings, vec!["-36N", "74W"]);
        assert!(options.utc);
    }

    #[test]
    fn test_parse_single_bearing_is_error() {
        Log::set_enabled(false);
        let parsed = ParsedArgs::parse(["sunwait", "poll", "65N"]);
        Log::set_enabled(true);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_debug_flag() {
        assert!(run(&["sunwait", "--debug"]).1.debug_enabled);
        assert!(run(&["sunwait", "-d", "wait"]).1.debug_enabled);
        assert!(run(&["sunwait", "debug"]).1.debug_enabled);
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(ParsedArgs::parse(["sunwait", "--help"]).action, CliAction::ShowHelp);
        assert_eq!(ParsedArgs::parse(["sunwait", "-h"]).action, CliAction::ShowHelp);
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(ParsedArgs::parse(["sunwait", "-V"]).action, CliAction::ShowVersion);
        assert_eq!(ParsedArgs::parse(["sunwait", "--version"]).action, CliAction::ShowVersion);
    }

    #[test]
    fn test_version_takes_precedence() {
        let parsed = ParsedArgs::parse(["sunwait", "--version", "--help", "--debug"]);
        assert_eq!(parsed.action, CliAction::ShowVersion);
    }

    #[test]
    fn test_parse_unknown_flag() {
        Log::set_enabled(false);
        let parsed = ParsedArgs::parse(["sunwait", "--unknown"]);
        Log::set_enabled(true);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_init_config() {
        assert_eq!(ParsedArgs::parse(["sunwait", "--init-config"]).action, CliAction::InitConfig);
    }
}
