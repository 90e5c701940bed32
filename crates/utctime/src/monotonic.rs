//! Monotonic clock samples and blocking sleeps.
//!
//! A [`MonotonicTime`] never runs backward within a process, which makes it the right clock for
//! measuring elapsed time and building deadlines. Its origin is whatever the operating system
//! picked (often boot), so samples are meaningless across processes or reboots and cannot be
//! converted to a calendar time.
//!
//! # Examples
//!
//! ```
//! # use utctime::{sleep_until, Duration, MonotonicTime};
//! let start = MonotonicTime::now();
//! sleep_until(start + Duration::from_msec(2));
//! assert!(start.elapsed() >= Duration::from_msec(2));
//! ```

use core::fmt;
use core::ops::{Add, Sub};
use std::thread;
use tracing::trace;
use crate::duration::{clock_face, Duration};

/// A sample of the monotonic clock, in microseconds since an unspecified origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonotonicTime(i64);

impl MonotonicTime {
	/// Sample the monotonic clock.
	///
	/// For two samples taken in order on the same thread, the later one is never smaller.
	///
	/// # Panics
	///
	/// Panics if the clock cannot be read.
	#[cfg_attr(docsrs, doc(cfg(feature = "now")))]
	#[cfg(feature = "now")]
	pub fn now() -> MonotonicTime {
		MonotonicTime(crate::clock::monotonic_usec())
	}

	/// Create a sample from a raw microsecond count.
	#[inline(always)]
	pub const fn from_usec(usec: i64) -> MonotonicTime {
		MonotonicTime(usec)
	}

	/// The raw microsecond count since the clock's origin.
	#[inline(always)]
	pub const fn to_usec(self) -> i64 {
		self.0
	}

	/// Time passed since `self` was sampled.
	#[cfg_attr(docsrs, doc(cfg(feature = "now")))]
	#[cfg(feature = "now")]
	pub fn elapsed(self) -> Duration {
		MonotonicTime::now() - self
	}
}

impl Sub for MonotonicTime {
	type Output = Duration;

	fn sub(self, rhs: MonotonicTime) -> Self::Output {
		Duration::from_usec(self.0 - rhs.0)
	}
}

impl Add<Duration> for MonotonicTime {
	type Output = Self;

	fn add(self, rhs: Duration) -> Self::Output {
		MonotonicTime(self.0 + rhs.to_usec())
	}
}

impl Sub<Duration> for MonotonicTime {
	type Output = Self;

	fn sub(self, rhs: Duration) -> Self::Output {
		MonotonicTime(self.0 - rhs.to_usec())
	}
}

impl fmt::Display for MonotonicTime {
	/// Render the time since the clock's origin as `H:MM:SS.ffffff`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		clock_face(f, self.0)
	}
}

/// Block the calling thread for at least `d`.
///
/// Zero and negative durations return immediately. The sleep cannot be interrupted.
///
/// # Examples
///
/// ```
/// # use utctime::{sleep_for, Duration, MonotonicTime};
/// let start = MonotonicTime::now();
/// sleep_for(Duration::from_msec(1));
/// assert!(MonotonicTime::now() - start >= Duration::from_msec(1));
///
/// // Returns right away
/// sleep_for(Duration::from_sec(-10));
/// ```
pub fn sleep_for(d: Duration) {
	if let Ok(s) = std::time::Duration::try_from(d) {
		if !s.is_zero() {
			trace!(duration = %d, "sleeping");
			thread::sleep(s);
		}
	}
}

/// Block the calling thread until the monotonic clock reaches `target`.
///
/// Returns immediately if `target` has already passed.
#[cfg_attr(docsrs, doc(cfg(feature = "now")))]
#[cfg(feature = "now")]
pub fn sleep_until(target: MonotonicTime) {
	let d = target - MonotonicTime::now();
	if d > Duration::ZERO {
		sleep_for(d);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn arithmetic_test() {
		let a = MonotonicTime::from_usec(5_000_000);
		let b = MonotonicTime::from_usec(7_500_000);
		assert_eq!(b - a, Duration::from_msec(2500));
		assert_eq!(a - b, Duration::from_msec(-2500));
		assert_eq!(a + Duration::from_msec(2500), b);
		assert_eq!(b - Duration::from_msec(2500), a);
		assert!(a < b);
	}

	#[test]
	fn display_test() {
		assert_eq!(MonotonicTime::from_usec(3_661_000_001).to_string(), "1:01:01.000001");
		assert_eq!(MonotonicTime::from_usec(0).to_string(), "0:00:00.000000");
	}

	#[test]
	#[cfg(feature = "now")]
	fn now_test() {
		let mut last = MonotonicTime::now();
		for _ in 0..1000 {
			let next = MonotonicTime::now();
			assert!(next - last >= Duration::ZERO);
			last = next;
		}
	}

	#[test]
	#[cfg(feature = "now")]
	fn sleep_for_test() {
		let start = MonotonicTime::now();
		sleep_for(Duration::from_msec(5));
		assert!(start.elapsed() >= Duration::from_msec(5));

		// Must not panic or block
		sleep_for(Duration::ZERO);
		sleep_for(Duration::from_usec(i64::MIN));
	}

	#[test]
	#[cfg(feature = "now")]
	fn sleep_until_test() {
		let target = MonotonicTime::now() + Duration::from_msec(5);
		sleep_until(target);
		assert!(MonotonicTime::now() >= target);

		// Already passed
		let start = MonotonicTime::now();
		sleep_until(start - Duration::from_sec(60));
		assert!(start.elapsed() < Duration::from_sec(60));
	}
}
