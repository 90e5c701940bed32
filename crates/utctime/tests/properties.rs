use proptest::prelude::*;
use utctime::iso8601::{self, Reason};
use utctime::{Duration, Invalid, MonotonicTime, UtcTime};

/// Last microsecond of 9999-12-31, the largest time with a four digit year.
const MAX_4_DIGIT_YEAR: i64 = 253_402_300_799_999_999;

fn is_leap_year(year: i64) -> bool {
	(year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i64, month: i64) -> i64 {
	match month {
		2 if is_leap_year(year) => 29,
		2 => 28,
		4 | 6 | 9 | 11 => 30,
		_ => 31,
	}
}

proptest! {
	#[test]
	fn iso8601_round_trip(usec in 0i64..=i64::MAX) {
		let t = UtcTime::from_usec(usec);
		prop_assert_eq!(iso8601::parse(t.to_iso8601().as_bytes()), Ok(t));
	}

	#[test]
	fn iso8601_layout(usec in 0i64..=MAX_4_DIGIT_YEAR) {
		let s = UtcTime::from_usec(usec).to_iso8601();
		let b = s.as_bytes();
		prop_assert_eq!(b.len(), 27);
		prop_assert_eq!(b[4], b'-');
		prop_assert_eq!(b[7], b'-');
		prop_assert_eq!(b[10], b'T');
		prop_assert_eq!(b[13], b':');
		prop_assert_eq!(b[16], b':');
		prop_assert_eq!(b[19], b'.');
		prop_assert_eq!(b[26], b'Z');
		prop_assert!(b.iter().enumerate().all(|(i, c)| [4, 7, 10, 13, 16, 19, 26].contains(&i) || c.is_ascii_digit()));
	}

	#[test]
	fn iso8601_order_matches_time_order(a in 0i64..=MAX_4_DIGIT_YEAR, b in 0i64..=MAX_4_DIGIT_YEAR) {
		let (a, b) = (UtcTime::from_usec(a), UtcTime::from_usec(b));
		prop_assert_eq!(a.to_iso8601().cmp(&b.to_iso8601()), a.cmp(&b));
	}

	#[test]
	fn valid_dates_parse(
		year in 1970i64..=20000,
		month in 1i64..=12,
		day in 1i64..=31,
		hour in 0i64..=23,
		minute in 0i64..=59,
		second in 0i64..=59,
		usec in 0i64..=999_999,
	) {
		let s = format!("{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}Z", year, month, day, hour, minute, second, usec);
		let r = iso8601::parse(s.as_bytes());
		if day <= days_in_month(year, month) {
			let t = r.unwrap();
			prop_assert_eq!(t.to_iso8601(), s);
			prop_assert_eq!(t.to_usec() % 1_000_000, usec);
		} else {
			prop_assert_eq!(r.unwrap_err().reason(), Reason::Invalid(Invalid::Day));
		}
	}

	#[test]
	fn short_fractions_pad(usec in 0i64..=999_999, len in 1usize..=6) {
		let digits = format!("{:06}", usec);
		let s = format!("1970-01-01T00:00:00.{}Z", &digits[..len]);
		let expected: i64 = digits[..len].parse::<i64>().unwrap() * 10i64.pow((6 - len) as u32);
		prop_assert_eq!(iso8601::parse(s.as_bytes()), Ok(UtcTime::from_usec(expected)));
	}

	#[test]
	fn parse_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..40)) {
		if let Err(e) = iso8601::parse(&bytes) {
			prop_assert!(e.to_string().starts_with('"'));
		}
	}

	#[test]
	fn trailing_bytes_rejected(usec in 0i64..=MAX_4_DIGIT_YEAR, tail in proptest::collection::vec(any::<u8>(), 1..8)) {
		let mut s = UtcTime::from_usec(usec).to_iso8601().into_bytes();
		s.extend_from_slice(&tail);
		prop_assert_eq!(iso8601::parse(&s).unwrap_err().reason(), Reason::TrailingInput);
	}

	#[test]
	fn utc_difference_matches_usec(a in 0i64..=MAX_4_DIGIT_YEAR, b in 0i64..=MAX_4_DIGIT_YEAR) {
		let d = UtcTime::from_usec(a) - UtcTime::from_usec(b);
		prop_assert_eq!(d, Duration::from_usec(a - b));
		prop_assert_eq!(UtcTime::from_usec(b) + d, UtcTime::from_usec(a));
	}

	#[test]
	fn duration_display_fields(usec in 0i64..=i64::MAX / 2) {
		let s = Duration::from_usec(usec).to_string();
		let (hours, rest) = s.split_once(':').unwrap();
		prop_assert_eq!(hours.parse::<i64>().unwrap(), usec / 3_600_000_000);
		prop_assert_eq!(rest.len(), 12);
		prop_assert_eq!(&rest[2..3], ":");
		prop_assert_eq!(&rest[5..6], ".");
		prop_assert_eq!(rest[..2].parse::<i64>().unwrap(), usec / 60_000_000 % 60);
		prop_assert_eq!(rest[3..5].parse::<i64>().unwrap(), usec / 1_000_000 % 60);
		prop_assert_eq!(rest[6..].parse::<i64>().unwrap(), usec % 1_000_000);
	}

	#[test]
	fn duration_arithmetic(a in -1i64 << 40..1i64 << 40, b in -1i64 << 40..1i64 << 40) {
		let (da, db) = (Duration::from_usec(a), Duration::from_usec(b));
		prop_assert_eq!(da + db - db, da);
		prop_assert_eq!(da - db, -(db - da));
		prop_assert_eq!(da < db, a < b);
	}

	#[test]
	fn monotonic_is_non_negative(_ in 0..100u32) {
		let a = MonotonicTime::now();
		let b = MonotonicTime::now();
		prop_assert!(b - a >= Duration::ZERO);
	}
}

#[test]
fn epoch_format() {
	assert_eq!(UtcTime::from_usec(0).to_iso8601(), "1970-01-01T00:00:00.000000Z");
	assert_eq!(iso8601::parse(b"1970-01-01T00:00:00.000000Z"), Ok(UtcTime::from_usec(0)));
}

#[test]
fn leap_year_boundaries() {
	assert!(iso8601::parse(b"2096-02-29T00:00:00.000000Z").is_ok());
	assert_eq!(
		iso8601::parse(b"2100-02-29T00:00:00.000000Z").unwrap_err().reason(),
		Reason::Invalid(Invalid::Day)
	);
}

#[test]
fn calendar_shared_across_threads() {
	let handles: Vec<_> = (0..8)
		.map(|i| {
			std::thread::spawn(move || {
				let t = UtcTime::from_usec(i * 86_400_000_000 * 400);
				iso8601::parse(t.to_iso8601().as_bytes()) == Ok(t)
			})
		})
		.collect();
	for h in handles {
		assert!(h.join().unwrap());
	}
}
