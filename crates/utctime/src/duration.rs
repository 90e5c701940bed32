//! Signed time spans with microsecond granularity.
//!
//! [`Duration`] is the result of subtracting two [`UtcTime`](crate::UtcTime)s or two
//! [`MonotonicTime`](crate::MonotonicTime)s, and the argument to
//! [`sleep_for`](crate::sleep_for). Unlike [`std::time::Duration`], it may be negative.
//!
//! # Examples
//!
//! ```
//! # use utctime::Duration;
//! let d = Duration::from_hour(1) + Duration::from_min(1) + Duration::from_sec(1);
//! assert_eq!(d + Duration::from_usec(1), Duration::from_usec(3_661_000_001));
//! assert_eq!(d.to_string(), "1:01:01.000000");
//! ```

use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use thiserror::Error;

/// Microseconds per millisecond.
pub(crate) const USEC_PER_MSEC: i64 = 1000;
/// Microseconds per second.
pub(crate) const USEC_PER_SEC: i64 = USEC_PER_MSEC * 1000;
/// Microseconds per minute.
pub(crate) const USEC_PER_MIN: i64 = USEC_PER_SEC * 60;
/// Microseconds per hour.
pub(crate) const USEC_PER_HOUR: i64 = USEC_PER_MIN * 60;

/// A signed span of time, counted in microseconds.
///
/// Arithmetic is plain integer arithmetic on the microsecond count. Spans beyond roughly 292,000
/// years overflow `i64` and are not supported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl Duration {
	/// The empty span.
	pub const ZERO: Duration = Duration(0);

	/// Create a span of `usec` microseconds.
	#[inline(always)]
	pub const fn from_usec(usec: i64) -> Duration {
		Duration(usec)
	}

	/// Create a span of `msec` milliseconds.
	#[inline(always)]
	pub const fn from_msec(msec: i64) -> Duration {
		Duration(msec * USEC_PER_MSEC)
	}

	/// Create a span of `sec` seconds.
	#[inline(always)]
	pub const fn from_sec(sec: i64) -> Duration {
		Duration(sec * USEC_PER_SEC)
	}

	/// Create a span of `min` minutes.
	#[inline(always)]
	pub const fn from_min(min: i64) -> Duration {
		Duration(min * USEC_PER_MIN)
	}

	/// Create a span of `hour` hours.
	#[inline(always)]
	pub const fn from_hour(hour: i64) -> Duration {
		Duration(hour * USEC_PER_HOUR)
	}

	/// Convert a [`std::time::Duration`], saturating at the largest representable span.
	///
	/// Nanoseconds below a whole microsecond are dropped.
	///
	/// # Examples
	///
	/// ```
	/// # use utctime::Duration;
	/// let d = Duration::from_std(std::time::Duration::from_nanos(1_999));
	/// assert_eq!(d, Duration::from_usec(1));
	/// ```
	pub fn from_std(d: std::time::Duration) -> Duration {
		Duration(i64::try_from(d.as_micros()).unwrap_or(i64::MAX))
	}

	/// The number of microseconds in this span.
	#[inline(always)]
	pub const fn to_usec(self) -> i64 {
		self.0
	}

	/// The number of whole milliseconds in this span, truncated toward zero.
	#[inline(always)]
	pub const fn to_msec(self) -> i64 {
		self.0 / USEC_PER_MSEC
	}

	/// The number of whole seconds in this span, truncated toward zero.
	#[inline(always)]
	pub const fn to_sec(self) -> i64 {
		self.0 / USEC_PER_SEC
	}

	/// Whether this span is strictly below zero.
	#[inline(always)]
	pub const fn is_negative(self) -> bool {
		self.0 < 0
	}
}

/// Write `usec` as `H:MM:SS.ffffff`.
///
/// The hour count is not padded and may grow past two digits. Negative values are written as
/// their magnitude with a leading `-`.
pub(crate) fn clock_face(f: &mut fmt::Formatter<'_>, usec: i64) -> fmt::Result {
	if usec < 0 {
		f.write_str("-")?;
	}
	// unsigned_abs keeps i64::MIN printable
	let usec = usec.unsigned_abs();
	let hour = USEC_PER_HOUR as u64;
	let min = USEC_PER_MIN as u64;
	let sec = USEC_PER_SEC as u64;
	write!(
		f,
		"{}:{:02}:{:02}.{:06}",
		usec / hour,
		usec % hour / min,
		usec % min / sec,
		usec % sec
	)
}

impl fmt::Display for Duration {
	/// Render as `H:MM:SS.ffffff`.
	///
	/// # Examples
	///
	/// ```
	/// # use utctime::Duration;
	/// assert_eq!(Duration::from_usec(3_661_000_001).to_string(), "1:01:01.000001");
	/// assert_eq!(Duration::from_hour(100).to_string(), "100:00:00.000000");
	/// assert_eq!(Duration::from_msec(-1500).to_string(), "-0:00:01.500000");
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		clock_face(f, self.0)
	}
}

impl Add for Duration {
	type Output = Self;

	fn add(self, rhs: Duration) -> Self::Output {
		Duration(self.0 + rhs.0)
	}
}

impl AddAssign for Duration {
	fn add_assign(&mut self, rhs: Duration) {
		*self = *self + rhs;
	}
}

impl Sub for Duration {
	type Output = Self;

	fn sub(self, rhs: Duration) -> Self::Output {
		Duration(self.0 - rhs.0)
	}
}

impl SubAssign for Duration {
	fn sub_assign(&mut self, rhs: Duration) {
		*self = *self - rhs;
	}
}

impl Neg for Duration {
	type Output = Self;

	fn neg(self) -> Self::Output {
		Duration(-self.0)
	}
}

impl Mul<i64> for Duration {
	type Output = Self;

	/// Scale the span by `rhs`.
	fn mul(self, rhs: i64) -> Self::Output {
		Duration(self.0 * rhs)
	}
}

impl Div<i64> for Duration {
	type Output = Self;

	/// Divide the span by `rhs`, truncating toward zero. Panics if `rhs` is zero.
	fn div(self, rhs: i64) -> Self::Output {
		Duration(self.0 / rhs)
	}
}

/// The error returned when converting a negative [`Duration`] to [`std::time::Duration`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("negative duration cannot be converted: {0}")]
pub struct NegativeDuration(pub Duration);

impl TryFrom<Duration> for std::time::Duration {
	type Error = NegativeDuration;

	fn try_from(value: Duration) -> Result<Self, Self::Error> {
		u64::try_from(value.0)
			.map(std::time::Duration::from_micros)
			.map_err(|_| NegativeDuration(value))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn constructors_test() {
		assert_eq!(Duration::from_msec(3), Duration::from_usec(3_000));
		assert_eq!(Duration::from_sec(3), Duration::from_usec(3_000_000));
		assert_eq!(Duration::from_min(2), Duration::from_sec(120));
		assert_eq!(Duration::from_hour(2), Duration::from_min(120));
		assert_eq!(Duration::default(), Duration::ZERO);

		assert_eq!(Duration::from_usec(1_999_999).to_sec(), 1);
		assert_eq!(Duration::from_usec(-1_999_999).to_sec(), -1);
		assert_eq!(Duration::from_usec(1_999).to_msec(), 1);
	}

	#[test]
	fn arithmetic_test() {
		let a = Duration::from_sec(5);
		let b = Duration::from_msec(1500);
		assert_eq!(a + b, Duration::from_usec(6_500_000));
		assert_eq!(b - a, Duration::from_usec(-3_500_000));
		assert_eq!(-a, Duration::from_sec(-5));
		assert_eq!(a * 3, Duration::from_sec(15));
		assert_eq!(a / 2, Duration::from_msec(2500));

		let mut c = a;
		c += b;
		c -= a;
		assert_eq!(c, b);

		assert!(b < a);
		assert!(-a < b);
		assert!((b - a).is_negative());
		assert!(!Duration::ZERO.is_negative());
	}

	#[test]
	fn display_test() {
		assert_eq!(Duration::ZERO.to_string(), "0:00:00.000000");
		assert_eq!(Duration::from_usec(1).to_string(), "0:00:00.000001");
		assert_eq!(Duration::from_usec(3_661_000_001).to_string(), "1:01:01.000001");
		assert_eq!(Duration::from_usec(86_399_999_999).to_string(), "23:59:59.999999");
		assert_eq!(Duration::from_hour(1234).to_string(), "1234:00:00.000000");
		assert_eq!(Duration::from_usec(-3_661_000_001).to_string(), "-1:01:01.000001");

		// Make sure extreme inputs cannot panic
		Duration::from_usec(i64::MIN).to_string();
		Duration::from_usec(i64::MAX).to_string();
	}

	#[test]
	fn std_conversion_test() {
		assert_eq!(
			std::time::Duration::try_from(Duration::from_usec(1_500_000)),
			Ok(std::time::Duration::from_millis(1500))
		);
		assert_eq!(
			std::time::Duration::try_from(Duration::from_usec(-1)),
			Err(NegativeDuration(Duration::from_usec(-1)))
		);
		assert_eq!(Duration::from_std(std::time::Duration::from_secs(2)), Duration::from_sec(2));
		assert_eq!(Duration::from_std(std::time::Duration::MAX), Duration::from_usec(i64::MAX));
	}
}
