//! Gregorian calendar lookups over one 400-year cycle.
//!
//! The Gregorian calendar repeats exactly every 400 years: 400 years hold 97 leap days, so every
//! cycle is 146097 days long and starts on the same month, day and weekday. [`CalendarCycle`]
//! enumerates each day of the first cycle after the Unix epoch (1970-01-01 through 2369-12-31)
//! once, and every later date is reduced into that cycle before lookup. Converting a day count to
//! a date is then a table index, and converting a date to a day count a binary search. No step
//! uses floating point or the host's `gmtime`/`mktime`.
//!
//! [`TimeComponents`] is the decomposed form of an instant, only used while converting between
//! [`UtcTime`](crate::UtcTime) and its calendar representation.

use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

/// Year of the Unix epoch.
pub(crate) const EPOCH_YEAR: i64 = 1970;
/// Years before the Gregorian calendar repeats.
pub(crate) const YEARS_PER_CYCLE: i64 = 400;
/// Days per 400-year cycle: 400 * 365 days plus 97 leap days.
const DAYS_PER_CYCLE: usize = 146097;
/// Days per month, with February at its leap year length.
const DAYS_PER_MONTH: [i64; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Check whether a given absolute Gregorian `year` is a leap year.
#[inline(always)]
pub(crate) fn is_leap_year(year: i64) -> bool {
	// Divisible by 4 unless a century, in which case divisible by 16 (i.e. by 400)
	let l = if year % 100 != 0 { 3 } else { 15 };
	(year & l) == 0
}

/// The number of days in `month` (1-indexed) of `year`.
///
/// `month` must be within [1, 12].
#[inline(always)]
fn days_per_month(year: i64, month: i64) -> i64 {
	if month == 2 && !is_leap_year(year) {
		28
	} else {
		DAYS_PER_MONTH[(month - 1) as usize]
	}
}

/// The reason a set of [`TimeComponents`] does not describe a real instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Invalid {
	/// The year is before 1970, or so far in the future that the instant overflows.
	#[error("invalid year")]
	Year,
	/// The month is outside of [1, 12].
	#[error("invalid month")]
	Month,
	/// The day is outside of [1, 28|29|30|31] depending on the month and year.
	#[error("invalid day")]
	Day,
	/// The hour is outside of [0, 23].
	#[error("invalid hour")]
	Hour,
	/// The minute is outside of [0, 59].
	#[error("invalid minute")]
	Minute,
	/// The second is outside of [0, 59].
	#[error("invalid second")]
	Second,
	/// The microsecond is negative.
	#[error("invalid subsecond")]
	Subsecond,
	/// The microsecond is 1,000,000 or more, i.e. finer than microsecond precision was supplied.
	#[error("too precise")]
	TooPrecise,
}

/// An instant split into Gregorian calendar fields.
///
/// The derived ordering compares fields in declaration order, which is chronological order for
/// valid components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct TimeComponents {
	/// Absolute Gregorian year, at least 1970
	pub year: i64,
	/// Month of the year, ranged [1, 12]
	pub month: i64,
	/// Day of the month, ranged [1, 31]
	pub day: i64,
	/// Hours, ranged [0, 23]
	pub hour: i64,
	/// Minutes, ranged [0, 59]
	pub minute: i64,
	/// Seconds, ranged [0, 59]
	pub second: i64,
	/// Microseconds, ranged [0, 999999]
	pub usec: i64,
}

impl TimeComponents {
	/// Midnight on the given date.
	pub(crate) const fn date(year: i64, month: i64, day: i64) -> TimeComponents {
		TimeComponents { year, month, day, hour: 0, minute: 0, second: 0, usec: 0 }
	}

	/// Check that every field is within range.
	///
	/// Only the lower bound of the year is checked here; an instant too far in the future to
	/// represent is reported by [`UtcTime::compose`](crate::UtcTime).
	pub(crate) fn valid(&self) -> Result<(), Invalid> {
		if self.year < EPOCH_YEAR {
			return Err(Invalid::Year);
		}
		if !(1..=12).contains(&self.month) {
			return Err(Invalid::Month);
		}
		if self.day < 1 || self.day > days_per_month(self.year, self.month) {
			return Err(Invalid::Day);
		}
		if !(0..24).contains(&self.hour) {
			return Err(Invalid::Hour);
		}
		if !(0..60).contains(&self.minute) {
			return Err(Invalid::Minute);
		}
		if !(0..60).contains(&self.second) {
			return Err(Invalid::Second);
		}
		if self.usec < 0 {
			return Err(Invalid::Subsecond);
		}
		if self.usec >= 1_000_000 {
			return Err(Invalid::TooPrecise);
		}
		Ok(())
	}

	/// Advance the date by one calendar day, leaving the time of day untouched.
	fn next_day(&mut self) {
		self.day += 1;
		if self.day <= days_per_month(self.year, self.month) {
			return;
		}
		self.day = 1;
		self.month += 1;
		if self.month <= 12 {
			return;
		}
		self.month = 1;
		self.year += 1;
	}
}

/// One table entry. Stored compactly since the table holds 146097 of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct CycleDay {
	year: u16,
	month: u8,
	day: u8,
}

/// Every calendar day from 1970-01-01 through 2369-12-31, in order.
pub(crate) struct CalendarCycle {
	days: Vec<CycleDay>,
}

/// Built on first use, read-only afterwards.
static CYCLE: LazyLock<CalendarCycle> = LazyLock::new(CalendarCycle::build);

impl CalendarCycle {
	/// The process-wide table, building it if this is the first access.
	///
	/// Concurrent first accesses block until the single build completes.
	pub(crate) fn get() -> &'static CalendarCycle {
		&CYCLE
	}

	fn build() -> CalendarCycle {
		let mut days = Vec::with_capacity(DAYS_PER_CYCLE);
		let mut tc = TimeComponents::date(EPOCH_YEAR, 1, 1);
		while tc.year < EPOCH_YEAR + YEARS_PER_CYCLE {
			days.push(CycleDay { year: tc.year as u16, month: tc.month as u8, day: tc.day as u8 });
			tc.next_day();
		}
		assert_eq!(days.len(), DAYS_PER_CYCLE, "Gregorian cycle has an unexpected length");
		debug!(days = days.len(), "built calendar cycle");
		CalendarCycle { days }
	}

	/// The number of days in the cycle, always 146097.
	#[inline(always)]
	pub(crate) fn total_days(&self) -> i64 {
		self.days.len() as i64
	}

	/// Which 400-year cycle after the epoch `tc` falls in, starting at 0.
	///
	/// Panics if `tc.year` is before 1970.
	pub(crate) fn period(&self, tc: &TimeComponents) -> i64 {
		assert!(tc.year >= EPOCH_YEAR, "year {} is before {}", tc.year, EPOCH_YEAR);
		(tc.year - EPOCH_YEAR) / YEARS_PER_CYCLE
	}

	/// `tc` moved into the first cycle by rewriting its year.
	///
	/// Components already in the first cycle are returned unchanged. Panics if `tc.year` is before
	/// 1970.
	pub(crate) fn reduce(&self, tc: &TimeComponents) -> TimeComponents {
		assert!(tc.year >= EPOCH_YEAR, "year {} is before {}", tc.year, EPOCH_YEAR);
		TimeComponents { year: EPOCH_YEAR + (tc.year - EPOCH_YEAR) % YEARS_PER_CYCLE, ..*tc }
	}

	/// Midnight on the `index`-th day (zero-based) of the cycle.
	///
	/// Panics if `index` is outside of [0, 146097).
	pub(crate) fn entry(&self, index: i64) -> TimeComponents {
		assert!(
			index >= 0 && index < self.total_days(),
			"day index {} out of bounds of {}", index, self.total_days()
		);
		let d = self.days[index as usize];
		TimeComponents::date(d.year as i64, d.month as i64, d.day as i64)
	}

	/// The zero-based index of the last day in the cycle that starts at or before `tc`.
	///
	/// Panics if `tc.year` is outside of [1970, 2370). Use [`CalendarCycle::reduce`] first for
	/// later years.
	pub(crate) fn days(&self, tc: &TimeComponents) -> i64 {
		assert!(
			tc.year >= EPOCH_YEAR && tc.year < EPOCH_YEAR + YEARS_PER_CYCLE,
			"year {} outside of the first cycle", tc.year
		);
		// Entries are at midnight, so for valid components only the date decides the order
		let key = CycleDay {
			year: tc.year as u16,
			month: tc.month.clamp(0, u8::MAX as i64) as u8,
			day: tc.day.clamp(0, u8::MAX as i64) as u8,
		};
		let index = match self.days.binary_search(&key) {
			Ok(i) => i,
			// Err is the insertion point, so the day before it is the last one not after `tc`
			Err(i) => {
				assert!(i > 0, "{:?} is before the first day of the cycle", tc);
				i - 1
			}
		};
		index as i64
	}
}
