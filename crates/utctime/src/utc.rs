//! Wall-clock timestamps in UTC, with microsecond granularity.
//!
//! A [`UtcTime`] counts microseconds since the Unix epoch (1970-01-01T00:00:00Z) and is never
//! negative. Converting it to and from calendar fields goes through a precomputed table of one
//! 400-year Gregorian cycle, so it is thread safe and does not call into libc's `gmtime` or
//! `mktime`.
//!
//! # Examples
//!
//! ```
//! # use utctime::{Duration, UtcTime};
//! let t = UtcTime::from_usec(1_739_881_845_000_000);
//! assert_eq!(t.to_iso8601(), "2025-02-18T12:30:45.000000Z");
//! assert_eq!(t.to_string(), "\"2025-02-18T12:30:45.000000Z\"");
//! assert_eq!(t - UtcTime::EPOCH, Duration::from_sec(1_739_881_845));
//! ```

use core::fmt;
use core::ops::{Add, Sub};
use core::str::FromStr;
use crate::calendar::{CalendarCycle, Invalid, TimeComponents, YEARS_PER_CYCLE};
use crate::duration::{Duration, USEC_PER_SEC};
use crate::iso8601::{self, Iso8601, ParseError};

/// Seconds per minute.
const SECONDS_PER_MINUTE: i64 = 60;
/// Minutes per hour.
const MINUTES_PER_HOUR: i64 = 60;
/// Hours per day.
const HOURS_PER_DAY: i64 = 24;

/// Microseconds since the Unix epoch.
///
/// The value is never negative; every constructor and operator that would produce a negative
/// value panics instead.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcTime(i64);

impl UtcTime {
	/// 1970-01-01T00:00:00Z.
	pub const EPOCH: UtcTime = UtcTime(0);

	/// Sample the system's wall clock.
	///
	/// # Panics
	///
	/// Panics if the clock cannot be read or reports a time before the Unix epoch.
	///
	/// # Examples
	///
	/// ```
	/// # use utctime::UtcTime;
	/// assert!(UtcTime::now() > UtcTime::EPOCH);
	/// ```
	#[cfg_attr(docsrs, doc(cfg(feature = "now")))]
	#[cfg(feature = "now")]
	pub fn now() -> UtcTime {
		UtcTime::from_usec(crate::clock::realtime_usec())
	}

	/// Create a timestamp `usec` microseconds after the epoch.
	///
	/// # Panics
	///
	/// Panics if `usec` is negative.
	#[inline(always)]
	pub fn from_usec(usec: i64) -> UtcTime {
		assert!(usec >= 0, "UtcTime must not be negative, got {} microseconds", usec);
		UtcTime(usec)
	}

	/// The number of microseconds since the epoch, never negative.
	#[inline(always)]
	pub const fn to_usec(self) -> i64 {
		self.0
	}

	/// Format as `YYYY-MM-DDThh:mm:ss.ffffffZ`. See [`iso8601`] for details.
	pub fn to_iso8601(self) -> String {
		iso8601::format(self)
	}

	/// Parse a `YYYY-MM-DDThh:mm:ss[.ffffff]Z` timestamp. See [`iso8601::parse`] for details.
	///
	/// # Errors
	///
	/// Returns [`ParseError`] if `bytes` is malformed or names an instant that does not exist.
	pub fn parse(bytes: &[u8]) -> Result<UtcTime, ParseError> {
		iso8601::parse(bytes)
	}

	/// Split into calendar fields.
	pub(crate) fn decompose(self) -> TimeComponents {
		assert!(self.0 >= 0, "UtcTime must not be negative, got {} microseconds", self.0);
		let mut t = self.0;
		let usec = t % USEC_PER_SEC;
		t /= USEC_PER_SEC;
		let second = t % SECONDS_PER_MINUTE;
		t /= SECONDS_PER_MINUTE;
		let minute = t % MINUTES_PER_HOUR;
		t /= MINUTES_PER_HOUR;
		let hour = t % HOURS_PER_DAY;
		t /= HOURS_PER_DAY;

		// t is now whole days since the epoch
		let cycle = CalendarCycle::get();
		let period = t / cycle.total_days();
		let date = cycle.entry(t % cycle.total_days());
		TimeComponents {
			year: date.year + period * YEARS_PER_CYCLE,
			month: date.month,
			day: date.day,
			hour,
			minute,
			second,
			usec,
		}
	}

	/// Join calendar fields back into a timestamp, the inverse of [`UtcTime::decompose`].
	///
	/// # Errors
	///
	/// Returns the first out of range field, or [`Invalid::Year`] if the instant is too far in the
	/// future to count in microseconds.
	pub(crate) fn compose(tc: &TimeComponents) -> Result<UtcTime, Invalid> {
		tc.valid()?;
		let cycle = CalendarCycle::get();
		let period = cycle.period(tc);
		let offset = cycle.days(&cycle.reduce(tc));
		period
			.checked_mul(cycle.total_days())
			.and_then(|days| days.checked_add(offset))
			.and_then(|days| days.checked_mul(HOURS_PER_DAY))
			.and_then(|hours| hours.checked_add(tc.hour))
			.and_then(|hours| hours.checked_mul(MINUTES_PER_HOUR))
			.and_then(|minutes| minutes.checked_add(tc.minute))
			.and_then(|minutes| minutes.checked_mul(SECONDS_PER_MINUTE))
			.and_then(|seconds| seconds.checked_add(tc.second))
			.and_then(|seconds| seconds.checked_mul(USEC_PER_SEC))
			.and_then(|usec| usec.checked_add(tc.usec))
			.map(UtcTime)
			.ok_or(Invalid::Year)
	}
}

impl Sub for UtcTime {
	type Output = Duration;

	fn sub(self, rhs: UtcTime) -> Self::Output {
		Duration::from_usec(self.0 - rhs.0)
	}
}

impl Add<Duration> for UtcTime {
	type Output = Self;

	/// Move the timestamp forward by `rhs`. Panics if the result is before the epoch.
	fn add(self, rhs: Duration) -> Self::Output {
		UtcTime::from_usec(self.0 + rhs.to_usec())
	}
}

impl Sub<Duration> for UtcTime {
	type Output = Self;

	/// Move the timestamp back by `rhs`. Panics if the result is before the epoch.
	fn sub(self, rhs: Duration) -> Self::Output {
		UtcTime::from_usec(self.0 - rhs.to_usec())
	}
}

impl fmt::Display for UtcTime {
	/// Render the ISO-8601 form in double quotes, for logs and error messages.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "\"{}\"", Iso8601(*self))
	}
}

impl fmt::Debug for UtcTime {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "UtcTime({})", Iso8601(*self))
	}
}

impl FromStr for UtcTime {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		iso8601::parse(s.as_bytes())
	}
}
