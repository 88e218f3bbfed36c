//! Schedule advancer: offset arithmetic and the fixed day-partition rule.
//!
//! ```text
//!  00:00 ───── 08:00 ───── 14:00 ───── 21:00 ───── 24:00
//!    │  (no rule) │  → 14:05  │  → 21:00  │  → 08:30  │
//! ```

use super::time::TimeOfDay;

/// Morning watering window (next day when computed after 21:00).
pub const MORNING_WINDOW: TimeOfDay = TimeOfDay::new(8, 30, 0);
/// Afternoon watering window.
pub const AFTERNOON_WINDOW: TimeOfDay = TimeOfDay::new(14, 5, 0);
/// Evening watering window.
pub const EVENING_WINDOW: TimeOfDay = TimeOfDay::new(21, 0, 0);

/// Add an offset to a time of day.
///
/// Seconds carry into minutes, minutes carry into hours, and hours wrap
/// modulo 24.  Whole days are dropped.
pub fn add_offset(time: TimeOfDay, hours_add: u32, minutes_add: u32, seconds_add: u32) -> TimeOfDay {
    let seconds = time.seconds as u32 + seconds_add;
    let minutes = time.minutes as u32 + minutes_add + seconds / 60;
    let hours = time.hours as u32 + hours_add + minutes / 60;

    TimeOfDay::new((hours % 24) as u8, (minutes % 60) as u8, (seconds % 60) as u8)
}

/// Next default trigger after `time`, from the three daily windows.
///
/// Before 08:00 the input is returned unchanged: there is no early-morning
/// window, so a target computed in that range sits at "now" until the next
/// override.
pub fn next_default_trigger(time: TimeOfDay) -> TimeOfDay {
    if time.hours > 20 {
        MORNING_WINDOW
    } else if time.hours > 13 {
        EVENING_WINDOW
    } else if time.hours > 7 {
        AFTERNOON_WINDOW
    } else {
        time
    }
}
