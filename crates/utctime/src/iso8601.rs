//! Format and parse UTC timestamps as `YYYY-MM-DDThh:mm:ss.ffffffZ`.
//!
//! This is the only textual form of a [`UtcTime`]. Formatting always produces every field with
//! microsecond precision, so anything stored or sent in this form parses back to the exact same
//! timestamp.
//!
//! # Examples
//!
//! ```
//! # use utctime::{iso8601, UtcTime};
//! let t = UtcTime::from_usec(1_739_881_845_123_000);
//! assert_eq!(iso8601::format(t), "2025-02-18T12:30:45.123000Z");
//! assert_eq!(iso8601::parse(b"2025-02-18T12:30:45.123Z"), Ok(t));
//!
//! let e = iso8601::parse(b"2025-02-30T12:30:45Z").unwrap_err();
//! assert_eq!(e.to_string(), "\"2025-02-30T12:30:45Z\" invalid day");
//! ```
//!
//! See [`parse`] for the exact grammar accepted.

use core::fmt;
use thiserror::Error;
use crate::calendar::{Invalid, TimeComponents};
use crate::utc::UtcTime;

/// Most fractional digits accepted, i.e. microsecond precision.
const SUBSECOND_DIGITS: usize = 6;
/// Fewest digits accepted for the month.
const MONTH_DIGITS: usize = 2;
/// Stands in for a fraction finer than a microsecond, which [`TimeComponents::valid`] rejects.
const TOO_PRECISE: i64 = 1_000_000;

/// Why a timestamp could not be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Reason {
	/// A separator was expected but a different byte was found.
	#[error("expect '{}' got '{}'", .expected.escape_ascii(), .got.escape_ascii())]
	Expected {
		/// The separator required by the format.
		expected: u8,
		/// The byte actually found.
		got: u8,
	},
	/// A number was expected but a non-digit byte was found.
	#[error("expect digit got '{}'", .0.escape_ascii())]
	ExpectedDigit(u8),
	/// The input ended before the timestamp was complete.
	#[error("premature ending")]
	PrematureEnding,
	/// The input continued after the trailing `Z`.
	#[error("more chars than expected")]
	TrailingInput,
	/// The timestamp was well formed but names an instant that does not exist.
	#[error(transparent)]
	Invalid(#[from] Invalid),
}

/// The error type for [`parse`].
///
/// Displays as the quoted input followed by the reason, e.g.
/// `"1970-13-01T00:00:00.000000Z" invalid month`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("\"{input}\" {reason}")]
pub struct ParseError {
	input: String,
	reason: Reason,
}

impl ParseError {
	fn new(input: &[u8], reason: Reason) -> ParseError {
		ParseError { input: input.escape_ascii().to_string(), reason }
	}

	/// Why parsing failed.
	pub fn reason(&self) -> Reason {
		self.reason
	}

	/// The rejected input, with non-printable bytes escaped.
	pub fn input(&self) -> &str {
		&self.input
	}
}

/// Display adapter writing a [`UtcTime`] as `YYYY-MM-DDThh:mm:ss.ffffffZ`.
///
/// The year is padded to four digits and grows past that as needed; every other field has a fixed
/// width.
///
/// # Examples
///
/// ```
/// # use utctime::{iso8601::Iso8601, UtcTime};
/// assert_eq!(Iso8601(UtcTime::EPOCH).to_string(), "1970-01-01T00:00:00.000000Z");
/// assert_eq!(
/// 	Iso8601(UtcTime::from_usec(253_402_300_800_000_000)).to_string(),
/// 	"10000-01-01T00:00:00.000000Z"
/// );
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Iso8601(pub UtcTime);

impl fmt::Display for Iso8601 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let tc = self.0.decompose();
		write!(
			f,
			"{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}Z",
			tc.year, tc.month, tc.day, tc.hour, tc.minute, tc.second, tc.usec
		)
	}
}

/// Format `time` as `YYYY-MM-DDThh:mm:ss.ffffffZ`.
pub fn format(time: UtcTime) -> String {
	Iso8601(time).to_string()
}

/// Consume `expected` from the front of `bytes`.
fn expect(bytes: &[u8], expected: u8) -> Result<&[u8], Reason> {
	match bytes.split_first() {
		Some((&got, rest)) if got == expected => Ok(rest),
		Some((&got, _)) => Err(Reason::Expected { expected, got }),
		None => Err(Reason::PrematureEnding),
	}
}

/// Count the leading ASCII digits of `bytes`.
fn digits(bytes: &[u8]) -> usize {
	bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parse `min` or more digits from the front of `bytes`.
///
/// `overflow` is reported if the number does not fit in an `i64`; any such value is out of range
/// for the field anyway.
fn parse_num(bytes: &[u8], min: usize, overflow: Invalid) -> Result<(&[u8], i64), Reason> {
	let n = digits(bytes);
	if n < min {
		return Err(match bytes.get(n) {
			Some(&b) => Reason::ExpectedDigit(b),
			None => Reason::PrematureEnding,
		});
	}

	let mut r: i64 = 0;
	for &b in &bytes[..n] {
		r = r
			.checked_mul(10)
			.and_then(|r| r.checked_add((b - b'0') as i64))
			.ok_or(Reason::Invalid(overflow))?;
	}
	Ok((&bytes[n..], r))
}

/// Parse an optional `.` followed by up to six digits, as microseconds.
///
/// Fewer than six digits are scaled up, so `.5` is 500000 microseconds. More than six give
/// [`TOO_PRECISE`], left for validation to report once the rest of the input is parsed.
fn parse_subsecond(bytes: &[u8]) -> Result<(&[u8], i64), Reason> {
	let Some((b'.', bytes)) = bytes.split_first() else {
		return Ok((bytes, 0));
	};

	let n = digits(bytes);
	if n > SUBSECOND_DIGITS {
		return Ok((&bytes[n..], TOO_PRECISE));
	}
	let mut usec = bytes[..n].iter().fold(0, |r, &b| r * 10 + (b - b'0') as i64);
	for _ in n..SUBSECOND_DIGITS {
		usec *= 10;
	}
	Ok((&bytes[n..], usec))
}

/// Split a timestamp into its fields, checking only the syntax.
fn parse_components(bytes: &[u8]) -> Result<TimeComponents, Reason> {
	let (bytes, year) = parse_num(bytes, 1, Invalid::Year)?;
	let bytes = expect(bytes, b'-')?;
	let (bytes, month) = parse_num(bytes, MONTH_DIGITS, Invalid::Month)?;
	let bytes = expect(bytes, b'-')?;
	let (bytes, day) = parse_num(bytes, 1, Invalid::Day)?;
	let bytes = expect(bytes, b'T')?;
	let (bytes, hour) = parse_num(bytes, 1, Invalid::Hour)?;
	let bytes = expect(bytes, b':')?;
	let (bytes, minute) = parse_num(bytes, 1, Invalid::Minute)?;
	let bytes = expect(bytes, b':')?;
	let (bytes, second) = parse_num(bytes, 1, Invalid::Second)?;
	let (bytes, usec) = parse_subsecond(bytes)?;
	let bytes = expect(bytes, b'Z')?;
	if !bytes.is_empty() {
		return Err(Reason::TrailingInput);
	}
	Ok(TimeComponents { year, month, day, hour, minute, second, usec })
}

/// Parse a `YYYY-MM-DDThh:mm:ss[.ffffff]Z` timestamp.
///
/// The grammar is strict and read left to right with no whitespace allowed anywhere:
/// - the month is two or more decimal digits, and the year, day, hour, minute and second are
///   each one or more, so only the month needs zero padding;
/// - the separators `-`, `-`, `T`, `:`, `:` must appear exactly;
/// - an optional `.` may follow the seconds, with zero to six fractional digits (missing digits
///   count as zeros);
/// - a final `Z` must end the input.
///
/// After the syntax is checked, the fields must name a real instant at or after the Unix epoch,
/// e.g. February 29 only exists in leap years.
///
/// # Errors
///
/// Returns [`ParseError`] carrying the input and a [`Reason`]. Parsing never panics, whatever
/// the input.
///
/// # Examples
///
/// ```
/// # use utctime::{iso8601::{parse, Reason}, Invalid, UtcTime};
/// assert_eq!(parse(b"1970-01-01T00:00:00.000000Z"), Ok(UtcTime::EPOCH));
/// assert_eq!(parse(b"1970-01-1T0:0:0Z"), Ok(UtcTime::EPOCH));
/// assert_eq!(parse(b"1970-01-01T00:00:00.5Z"), Ok(UtcTime::from_usec(500_000)));
///
/// let e = parse(b"1970-01-01X00:00:00.000000Z").unwrap_err();
/// assert_eq!(e.reason(), Reason::Expected { expected: b'T', got: b'X' });
/// assert_eq!(e.to_string(), "\"1970-01-01X00:00:00.000000Z\" expect 'T' got 'X'");
///
/// let e = parse(b"1970-01-01T00:00:00.0000001Z").unwrap_err();
/// assert_eq!(e.reason(), Reason::Invalid(Invalid::TooPrecise));
/// ```
pub fn parse(bytes: &[u8]) -> Result<UtcTime, ParseError> {
	parse_components(bytes)
		.and_then(|tc| UtcTime::compose(&tc).map_err(Reason::from))
		.map_err(|reason| ParseError::new(bytes, reason))
}
