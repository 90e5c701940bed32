//! Clock reads through `clock_gettime`.
//!
//! Both reads are thread safe. A failing read means the host has no usable clock, which nothing
//! in this crate can recover from, so it panics with the OS error instead of returning one.

use core::mem::MaybeUninit;
use std::io;
use libc::{clock_gettime, clockid_t, timespec, CLOCK_MONOTONIC, CLOCK_REALTIME};

/// Microseconds since the Unix epoch, according to the system's wall clock.
pub(crate) fn realtime_usec() -> i64 {
	read_usec(CLOCK_REALTIME, "CLOCK_REALTIME")
}

/// Microseconds since an unspecified origin, according to the system's monotonic clock.
pub(crate) fn monotonic_usec() -> i64 {
	read_usec(CLOCK_MONOTONIC, "CLOCK_MONOTONIC")
}

fn read_usec(clock: clockid_t, name: &str) -> i64 {
	let mut time = MaybeUninit::<timespec>::uninit();
	// Safety:
	// - clock_gettime does not read time, only writes
	// - if clock_gettime returns zero, time is successfully initialized
	let time = unsafe {
		match clock_gettime(clock, time.as_mut_ptr()) {
			0 => Some(time.assume_init()),
			_ => None
		}
	};
	match time {
		Some(t) => t.tv_sec as i64 * 1_000_000 + t.tv_nsec as i64 / 1_000,
		None => panic!("failed to read {}: {}", name, io::Error::last_os_error())
	}
}
