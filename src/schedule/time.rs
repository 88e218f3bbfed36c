//! Wall-clock time-of-day value and its comparator.
//!
//! Comparison is plain lexicographic over (hours, minutes, seconds).  There
//! is no notion of "tomorrow": 23:59:59 compares Greater than 00:00:01.
//! Callers that schedule across midnight must account for that themselves.

use core::cmp::Ordering;
use core::fmt;

/// A time of day as read from the RTC.
///
/// Fields stay in range (h < 24, m < 60, s < 60) after every operation in
/// this crate; construction from out-of-range parts is a caller bug and is
/// only checked in debug builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self::new(0, 0, 0);

    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        debug_assert!(hours < 24 && minutes < 60 && seconds < 60);
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Field-by-field comparison; the first differing field decides.
    pub fn compare(&self, other: &Self) -> Ordering {
        match self.hours.cmp(&other.hours) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match self.minutes.cmp(&other.minutes) {
            Ordering::Equal => {}
            ord => return ord,
        }
        self.seconds.cmp(&other.seconds)
    }

    /// Seconds since midnight.
    pub fn seconds_of_day(&self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
