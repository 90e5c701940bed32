//! Timestamps, durations and a strict ISO-8601 codec, with microsecond granularity.
//!
//! This crate provides three value types:
//! - [`Duration`]: a signed span of time.
//! - [`MonotonicTime`]: a sample of the monotonic clock, for measuring elapsed time and sleeping
//!   ([`sleep_for`], [`sleep_until`]).
//! - [`UtcTime`]: a wall-clock timestamp, counted from the Unix epoch and never before it.
//!
//! [`iso8601`] converts a [`UtcTime`] to and from exactly one textual form,
//! `YYYY-MM-DDThh:mm:ss.ffffffZ`. Calendar math is integer only and uses a table of one 400-year
//! Gregorian cycle that is built once, on first use, and shared read-only by all threads. Only UTC
//! is supported; there are no timezone offsets, no dates before 1970, and no locale formatting.
//!
//! If the `now` feature is enabled (the default), [`UtcTime::now`] and [`MonotonicTime::now`]
//! read the system clocks through `clock_gettime`.
//!
//! # Errors and panics
//!
//! Malformed text is an ordinary error: [`iso8601::parse`] returns an [`iso8601::ParseError`]
//! naming the input and what was wrong with it. Broken invariants are bugs and panic instead,
//! e.g. a negative [`UtcTime`] or an unreadable system clock.
//!
//! # Examples
//!
//! ```
//! # use utctime::{Duration, UtcTime};
//! let t: UtcTime = "2024-02-29T23:59:59.5Z".parse().unwrap();
//! assert_eq!(t.to_iso8601(), "2024-02-29T23:59:59.500000Z");
//!
//! let later = t + Duration::from_msec(500);
//! assert_eq!(later.to_iso8601(), "2024-03-01T00:00:00.000000Z");
//! assert_eq!((later - t).to_string(), "0:00:00.500000");
//! ```

// only enables the `doc_cfg` feature when
// the `docsrs` configuration attribute is defined
#![cfg_attr(docsrs, feature(doc_cfg))]

mod calendar;
#[cfg(feature = "now")]
mod clock;
pub mod duration;
pub mod iso8601;
pub mod monotonic;
pub mod utc;

pub use calendar::Invalid;
pub use duration::Duration;
pub use iso8601::ParseError;
pub use monotonic::*;
pub use utc::UtcTime;
