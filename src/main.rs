mod logging;
mod report;

use chrono::Local;
use nongli::{
    BuildResult, CalendarConfig, LunarDate, SolarDate, YearSpan, list_days, list_months, list_years, load_with_metrics,
    lunar_to_solar, solar_to_lunar,
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::str::FromStr;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    logging::init(config.verbosity);

    let build = match load_with_metrics(&config.calendar) {
        Ok(build) => build,
        Err(err) => {
            tracing::error!(error = %err, "calendar build failed");
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let printer = report::Printer::new(config.color, config.json);
    match run(&config.command, &build, &printer) {
        Ok(true) => {}
        Ok(false) => std::process::exit(3),
        Err(err) => {
            eprintln!("error: failed to write output: {err}");
            std::process::exit(1);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Today,
    Solar(SolarDate),
    Lunar(LunarDate),
    Year(i32),
    Month { year: i32, month: u8, leap: bool },
    Years,
    Stats,
}

struct CliConfig {
    calendar: CalendarConfig,
    command: Command,
    json: bool,
    color: bool,
    verbosity: u8,
}

/// Execute `command`; `Ok(false)` means the requested key is not in the calendar.
fn run(command: &Command, build: &BuildResult, printer: &report::Printer) -> Result<bool, serde_json::Error> {
    let calendar = &build.calendar;

    let solar = |date: SolarDate| -> Result<bool, serde_json::Error> {
        match solar_to_lunar(calendar, date) {
            Some(info) => printer.lunar(date, &info).map(|_| true),
            None => {
                printer.not_found(&format!("solar date {date}"));
                Ok(false)
            }
        }
    };

    match *command {
        Command::Today => solar(SolarDate::from(Local::now().date_naive())),
        Command::Solar(date) => solar(date),
        Command::Lunar(date) => match lunar_to_solar(calendar, date) {
            Some(info) => printer.solar(date, info).map(|_| true),
            None => {
                printer.not_found(&format!("lunar date {date}"));
                Ok(false)
            }
        },
        Command::Year(year) => {
            let info = list_years(calendar).into_iter().find(|info| info.num == year);
            match info.zip(list_months(calendar, year)) {
                Some((info, months)) => printer.year(&info, &months).map(|_| true),
                None => {
                    printer.not_found(&format!("lunar year {year}"));
                    Ok(false)
                }
            }
        }
        Command::Month { year, month, leap } => match list_days(calendar, year, month, leap) {
            Some(days) => {
                let name = nongli::tables::month_name(month, leap).unwrap_or_default();
                printer.month(&format!("{year}年 {name}"), &days).map(|_| true)
            }
            None => {
                printer.not_found(&format!("lunar month {year}-{month}{}", if leap { "L" } else { "" }));
                Ok(false)
            }
        },
        Command::Years => printer.years(&list_years(calendar)).map(|_| true),
        Command::Stats => printer.stats(calendar.span(), calendar.len(), &build.metrics).map(|_| true),
    }
}

fn parse_args() -> Result<CliConfig, String> {
    let mut calendar = CalendarConfig::from_env();
    let mut start = calendar.span.start;
    let mut end = calendar.span.end;
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut verbosity = 0u8;
    let mut leap = false;
    let mut positional: Vec<String> = Vec::new();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("nongli {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--json" => json = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "--leap" => leap = true,
            _ if is_verbosity_flag(&arg) => {
                verbosity = verbosity.saturating_add(u8::try_from(arg.len() - 1).unwrap_or(u8::MAX));
            }
            "-d" | "--data" => {
                let value = args.next().ok_or_else(|| "error: --data expects a directory".to_string())?;
                calendar.data_dir = PathBuf::from(value);
            }
            "--start" => {
                let value = args.next().ok_or_else(|| "error: --start expects a year".to_string())?;
                start = number("--start", &value)?;
            }
            "--end" => {
                let value = args.next().ok_or_else(|| "error: --end expects a year".to_string())?;
                end = number("--end", &value)?;
            }
            _ if arg.starts_with("--data=") => {
                calendar.data_dir = PathBuf::from(arg.trim_start_matches("--data="));
            }
            _ if arg.starts_with("--start=") => start = number("--start", arg.trim_start_matches("--start="))?,
            _ if arg.starts_with("--end=") => end = number("--end", arg.trim_start_matches("--end="))?,
            _ if arg.starts_with('-') && !is_negative_number(&arg) => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => positional.push(arg),
        }
    }

    calendar.span = YearSpan::new(start, end).map_err(|err| format!("error: {err}"))?;
    let command = parse_command(&positional, leap)?;

    Ok(CliConfig { calendar, command, json, color, verbosity })
}

fn parse_command(positional: &[String], leap: bool) -> Result<Command, String> {
    let Some((name, rest)) = positional.split_first() else {
        return Ok(Command::Today);
    };
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

    let command = match (name.as_str(), rest.as_slice()) {
        ("today", []) => Command::Today,
        ("solar", [y, m, d]) => Command::Solar(SolarDate::new(number("year", y)?, number("month", m)?, number("day", d)?)),
        ("lunar", [y, m, d]) => {
            Command::Lunar(LunarDate::new(number("year", y)?, number("month", m)?, leap, number("day", d)?))
        }
        ("year", [y]) => Command::Year(number("year", y)?),
        ("month", [y, m]) => Command::Month { year: number("year", y)?, month: number("month", m)?, leap },
        ("years", []) => Command::Years,
        ("stats", []) => Command::Stats,
        ("today" | "solar" | "lunar" | "year" | "month" | "years" | "stats", _) => {
            return Err(format!("error: wrong number of arguments for '{name}'\n\n{}", help_text()));
        }
        _ => return Err(format!("error: unknown command '{name}'\n\n{}", help_text())),
    };
    Ok(command)
}

fn number<T: FromStr>(what: &str, value: &str) -> Result<T, String> {
    value.parse().map_err(|_| format!("error: invalid {what} '{value}'"))
}

fn is_verbosity_flag(arg: &str) -> bool {
    arg.strip_prefix('-').is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b == b'v'))
}

fn is_negative_number(arg: &str) -> bool {
    arg.strip_prefix('-').is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "nongli {version}

Lunisolar calendar lookup over a per-year text feed.

Usage:
  nongli [OPTIONS] [command]

Commands:
  today                      Lunar date of today (default).
  solar <year> <month> <day> Lunar date of a solar date.
  lunar <year> <month> <day> Solar date of a lunar date (add --leap for a
                             leap month).
  year <year>                Cyclic names and months of a lunar year.
  month <year> <month>       Days of a lunar month (add --leap for a leap
                             month).
  years                      Every year of the span.
  stats                      Feed counts and build timings.

Options:
  -d, --data <dir>           Directory holding <year>.txt files.
                             Default: ${env} or {dir}
  --start <year>             First solar year of the feed. Default: {start}
  --end <year>               Year after the last one. Default: {end}
  --leap                     Address the leap month (lunar, month).
  --json                     Print JSON instead of a report.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -v, -vv, -vvv              Log at info, debug or trace level (stderr);
                             more v's stay at trace.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Calendar build or output failure.
  2  Invalid arguments.
  3  Requested date, month or year is outside the calendar.
",
        version = env!("CARGO_PKG_VERSION"),
        env = nongli::DATA_DIR_ENV,
        dir = CalendarConfig::default().data_dir.display(),
        start = YearSpan::DEFAULT_START,
        end = YearSpan::DEFAULT_END,
    )
}
