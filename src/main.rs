//! Inspect and convert UTC timestamps from the command line.
//!
//! This application is a thin front end to the [`utctime`] crate: it reads the system clocks,
//! converts between microseconds since the Unix epoch and the ISO-8601 form
//! `YYYY-MM-DDThh:mm:ss.ffffffZ`, and measures sleeps on the monotonic clock.
//!
//! # Command Line Arguments
//!
//! General form: `isostamp [options...] command [parameter]`
//!
//! | Short form | Long form | Argument           | Default                  | Description           |
//! | ---------- | --------- | ------------------ | ------------------------ | --------------------- |
//! | `-l`       | `--log`   | [Filter directive] | `RUST_LOG`, else `warn`  | Diagnostic log filter |
//! | `-h`       | `--help`  |                    |                          | Print usage and exit  |
//!
//! The command must be one of:
//! - `now`: print the current UTC time and the monotonic clock reading
//! - `parse <TIMESTAMP>`: print the microseconds since the epoch for an ISO-8601 timestamp
//! - `format <USEC>`: print the ISO-8601 form of a microsecond count
//! - `sleep <USEC>`: sleep for a number of microseconds and print the measured duration
//!
//! Diagnostic logs are written to stderr; results are written to stdout.
//!
//! [Filter directive]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
//!
//! # Examples
//!
//! ```sh
//! isostamp now
//! isostamp parse 2024-02-29T12:00:00.25Z
//! isostamp format 1709208000250000
//! isostamp -l debug sleep 250000
//! ```

use std::process::ExitCode;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utctime::{sleep_until, MonotonicTime, UtcTime};

use args::{Arguments, ArgumentsError, Command};

mod args;

/// Build the log filter.
///
/// `directive` takes precedence over `RUST_LOG`. If neither is set or the chosen one does not
/// parse, only warnings and errors are logged.
fn log_filter(directive: Option<&str>) -> EnvFilter {
	match directive {
		Some(d) => EnvFilter::try_new(d).ok(),
		None => EnvFilter::try_from_default_env().ok()
	}.unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Install the stderr log subscriber, filtered by [`log_filter`].
fn init_logging(directive: Option<&str>) {
	tracing_subscriber::registry()
		.with(log_filter(directive))
		.with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
		.init();
}

/// Run a single command, printing its result to stdout.
fn run(command: Command) -> ExitCode {
	match command {
		Command::Now => {
			let utc = UtcTime::now();
			let monotonic = MonotonicTime::now();
			println!("utc       {}", utc.to_iso8601());
			println!("monotonic {}", monotonic);
		},
		Command::Parse(t) => {
			debug!(time = %t, "parsed");
			println!("{}", t.to_usec());
		},
		Command::Format(t) => println!("{}", t.to_iso8601()),
		Command::Sleep(d) => {
			let start = MonotonicTime::now();
			let deadline = start + d;
			info!(duration = %d, %deadline, "sleeping");
			sleep_until(deadline);
			println!("{}", start.elapsed());
		}
	}

	ExitCode::SUCCESS
}

/// Main program entry point.
///
/// Parses input arguments and runs the requested command. See [`crate`] documentation for
/// details.
fn main() -> ExitCode {
	let args = match Arguments::parse(std::env::args_os().skip(1)) {
		Ok(a) => a,
		Err(e) => {
			return if let ArgumentsError::Help = e {
				println!("\
Inspect and convert UTC timestamps.

Usage: isostamp [OPTIONS] <COMMAND> [PARAMETER]

Options:
  -l, --log <FILTER>  the diagnostic log filter, default RUST_LOG or warn
  -h, --help          print this help

Commands:
  now                 print the current UTC time and monotonic clock reading
  parse <TIMESTAMP>   print microseconds since the epoch for an ISO-8601 timestamp
  format <USEC>       print the ISO-8601 form of microseconds since the epoch
  sleep <USEC>        sleep for USEC microseconds and print the measured duration

Examples:
  isostamp now
  isostamp parse 2024-02-29T12:00:00.25Z
  isostamp format 1709208000250000
  isostamp -l debug sleep 250000\n");
				ExitCode::SUCCESS
			} else {
				eprintln!("{}", e);
				ExitCode::FAILURE
			}
		}
	};

	init_logging(args.log.as_deref());
	run(args.command)
}
