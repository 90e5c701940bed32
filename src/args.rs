//! Support for command line argument parsing.
//!
//! See [crate] documentation for details on command line arguments and examples.

use std::ffi::OsString;
use std::str::FromStr;
use thiserror::Error;
use utctime::{Duration, ParseError, UtcTime};

/// Known commands, before their parameter is attached.
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub enum CommandKind {
	/// Print the current time.
	Now,
	/// Parse an ISO-8601 timestamp.
	Parse,
	/// Format a microsecond count.
	Format,
	/// Sleep and measure.
	Sleep
}

impl CommandKind {
	/// The name used to select this command on the command line.
	pub fn name(&self) -> &'static str {
		match self {
			CommandKind::Now => "now",
			CommandKind::Parse => "parse",
			CommandKind::Format => "format",
			CommandKind::Sleep => "sleep"
		}
	}
}

impl FromStr for CommandKind {
	type Err = ArgumentsError;

	/// Parse a string into a [`CommandKind`].
	///
	/// The parsing is case insensitive. Returns [`ArgumentsError::InvalidCommand`] if the input
	/// string is not one of the defined commands.
	///
	/// # Examples
	///
	/// ```
	/// assert_eq!(CommandKind::from_str("now"), Ok(CommandKind::Now));
	/// assert_eq!(CommandKind::from_str("PARSE"), Ok(CommandKind::Parse));
	/// assert_eq!(
	///		CommandKind::from_str("nap"),
	///		Err(ArgumentsError::InvalidCommand(String::from("nap")))
	/// );
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"now" => Ok(CommandKind::Now),
			"parse" => Ok(CommandKind::Parse),
			"format" => Ok(CommandKind::Format),
			"sleep" => Ok(CommandKind::Sleep),
			_ => Err(ArgumentsError::InvalidCommand(s.to_string()))
		}
	}
}

/// A command with its validated parameter.
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub enum Command {
	/// Print the current UTC time and monotonic clock reading.
	Now,
	/// Print the microseconds since the epoch of the parsed timestamp.
	Parse(UtcTime),
	/// Print the timestamp as ISO-8601.
	Format(UtcTime),
	/// Sleep for the duration and print how long it actually took.
	Sleep(Duration)
}

/// The error type for parsing command line arguments.
#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ArgumentsError {
	/// The option was unrecognized. The option is returned as the payload of this variant.
	#[error("Unrecognized option: {0}")]
	UnrecognizedOption(String),
	/// Error converting an option or parameter to UTF-8. Options are required to be UTF-8, as are
	/// most parameters (except the timestamp given to `parse`, which is checked byte by byte). The
	/// argument index and original [`OsString`] that could not be converted are returned as the
	/// payload of this variant.
	#[error("Invalid UTF-8 in argument {0}: {1:?}")]
	InvalidUTF8(usize, OsString),
	/// The required command was missing.
	#[error("Missing command")]
	MissingCommand,
	/// The provided command was invalid. The supplied command argument is returned as the payload
	/// of this variant.
	#[error("Invalid command: {0}")]
	InvalidCommand(String),
	/// The parameter for an option or command was not supplied. The option or command is returned
	/// as the payload for this variant.
	#[error("Missing parameter for {0}")]
	MissingParameter(String),
	/// More arguments were supplied than the command takes. The first extra argument is returned as
	/// the payload for this variant.
	#[error("Unexpected argument: {0}")]
	UnexpectedArgument(String),
	/// The provided microsecond count was not a non-negative integer. The supplied argument is
	/// returned as the payload of this variant.
	#[error("Invalid microseconds: {0}")]
	InvalidMicroseconds(String),
	/// An error occured while parsing the provided timestamp. The underlying parse error is
	/// returned as the payload for this variant.
	#[error("Datetime parsing error: {0}")]
	DateTimeParseError(#[from] ParseError),
	/// Help option (-h) was included, so print help details and exit.
	#[error("Help requested")]
	Help
}

/// Convert an argument to [`&str`].
///
/// The function takes the argument index `i`, optional argument name `a`, and the argument `s`.
///
/// # Errors
///
/// Returns [`ArgumentsError::InvalidUTF8`] if the argument could not be converted to UTF-8 or
/// [`ArgumentsError::MissingParameter`] if the argument is `None`.
fn arg_to_str<'a, 'b>(i: usize, a: Option<&'a str>, s: Option<&'b OsString>)
	-> Result<&'b str, ArgumentsError>
{
	match s {
		Some(v) => v.to_str().ok_or_else(|| ArgumentsError::InvalidUTF8(i, v.clone())),
		None => Err(ArgumentsError::MissingParameter(a.map(String::from).unwrap_or_default()))
	}
}

/// Parse a non-negative microsecond count.
fn parse_usec(i: usize, s: &OsString) -> Result<i64, ArgumentsError> {
	let v = arg_to_str(i, None, Some(s))?;
	match v.parse::<i64>() {
		Ok(usec) if usec >= 0 => Ok(usec),
		_ => Err(ArgumentsError::InvalidMicroseconds(v.to_string()))
	}
}

/// Parsed command line arguments.
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Arguments {
	/// The command to run.
	pub command: Command,
	/// The configured log filter directive (if provided).
	pub log: Option<String>
}

impl Arguments {
	/// Parse command line arguments.
	///
	/// The input can be any type that implements [`Iterator`] that yields [`OsString`], though
	/// typically this would be [`std::env::args_os`]. This function assumes that the application
	/// name is **not** supplied as the first item yielded by `args`, see examples for common use.
	///
	/// Options may appear anywhere. The first other argument names the command and the second is
	/// its parameter.
	///
	/// # Errors
	///
	/// This function can return any of the variants in [`ArgumentsError`]. See that documentation
	/// for more details.
	///
	/// # Examples
	///
	/// ```
	/// let args = match Arguments::parse(std::env::args_os().skip(1)) {
	/// 	Ok(a) => a,
	/// 	Err(e) => {
	/// 		// Handle error
	/// 		panic!("{}", e);
	/// 	}
	/// };
	/// ```
	pub fn parse(mut args: impl Iterator<Item = OsString>) -> Result<Arguments, ArgumentsError>
	{
		let mut kind: Option<CommandKind> = None;
		// The command parameter and its argument index
		let mut param: Option<(usize, OsString)> = None;
		let mut log: Option<String> = None;
		let mut i = 0;
		while let Some(arg) = args.next() {
			match arg.to_str() {
				Some(l @ ("-l" | "--log")) => {
					log = Some(String::from(arg_to_str(i+1, Some(l), args.next().as_ref())?));
					// Increment because we called args.next()
					i += 1;
				},
				Some("-h" | "--help") => return Err(ArgumentsError::Help),
				Some(v) if kind.is_none() => {
					if v.starts_with('-') {
						return Err(ArgumentsError::UnrecognizedOption(v.to_string()));
					}

					kind = Some(CommandKind::from_str(v)?)
				},
				None if kind.is_none() => return Err(ArgumentsError::InvalidUTF8(i, arg.clone())),
				// The parameter may be raw bytes, so it is only decoded once the command is known
				_ if param.is_none() => param = Some((i, arg.clone())),
				_ => return Err(ArgumentsError::UnexpectedArgument(arg.to_string_lossy().into_owned()))
			}
			i += 1;
		}

		let kind = kind.ok_or(ArgumentsError::MissingCommand)?;
		let command = match (kind, param) {
			(CommandKind::Now, None) => Command::Now,
			(CommandKind::Now, Some((_, p))) => {
				return Err(ArgumentsError::UnexpectedArgument(p.to_string_lossy().into_owned()))
			},
			(CommandKind::Parse, Some((_, p))) => Command::Parse(UtcTime::parse(p.as_encoded_bytes())?),
			(CommandKind::Format, Some((i, p))) => Command::Format(UtcTime::from_usec(parse_usec(i, &p)?)),
			(CommandKind::Sleep, Some((i, p))) => Command::Sleep(Duration::from_usec(parse_usec(i, &p)?)),
			(k, None) => return Err(ArgumentsError::MissingParameter(String::from(k.name())))
		};

		Ok(Arguments { command, log })
	}
}
