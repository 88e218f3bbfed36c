//! Watering schedule: the next trigger time and when it fires.
//!
//! The schedule is checked once per heartbeat.  It fires when the clock
//! *reaches* the target between two consecutive readings, which tolerates a
//! heartbeat that skips a second.  All comparisons are same-day only (see
//! [`TimeOfDay::compare`]); a target of 08:30 set at 21:00 is simply not
//! reached until the clock wraps past midnight and climbs back up to it.
//! The flip side: a target that is only reached *across* midnight (00:00:00,
//! or 23:59:59 when the heartbeat jumps from 23:59:58 to 00:00:01) never fires.
//!
//! ```text
//!  heartbeat ──▶ is_due(now)? ──yes──▶ consume(now) ──▶ TriggerWatering
//!                     │                      │
//!                  observe(now)      target = next_default_trigger(now)
//! ```

pub mod advance;
pub mod time;

use core::cmp::Ordering;

use log::info;

pub use advance::{add_offset, next_default_trigger};
pub use time::TimeOfDay;

/// Why the schedule target moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleChange {
    /// Initial target set at start-up.
    Boot,
    /// A trigger fired and the target moved to the next window.
    Consumed,
    /// The operator skipped to the next default window from the menu.
    SkippedWindow,
    /// The operator requested an imminent manual cycle.
    Manual,
}

/// Holds the schedule target and the previous heartbeat's clock reading.
#[derive(Debug, Clone)]
pub struct Schedule {
    target: TimeOfDay,
    last_seen: Option<TimeOfDay>,
}

impl Schedule {
    pub fn new(target: TimeOfDay) -> Self {
        Self {
            target,
            last_seen: None,
        }
    }

    /// The time of day at which the next cycle triggers.
    pub fn target(&self) -> TimeOfDay {
        self.target
    }

    /// `true` if the clock reached the target since the previous reading,
    /// i.e. `prev < target <= now` under same-day comparison.  Without a
    /// previous reading only an exact match counts.
    pub fn is_due(&self, now: TimeOfDay) -> bool {
        match self.last_seen {
            Some(prev) => {
                prev.compare(&self.target) == Ordering::Less
                    && now.compare(&self.target) != Ordering::Less
            }
            None => now.compare(&self.target) == Ordering::Equal,
        }
    }

    /// Remember `now` as the previous reading for the next [`is_due`](Self::is_due).
    pub fn observe(&mut self, now: TimeOfDay) {
        self.last_seen = Some(now);
    }

    /// Consume a fired trigger: move on to the next default window.
    pub fn consume(&mut self, now: TimeOfDay) -> TimeOfDay {
        self.set(next_default_trigger(now), ScheduleChange::Consumed)
    }

    /// Skip the pending target and jump to the next default window.
    pub fn skip_to_next_window(&mut self, now: TimeOfDay) -> TimeOfDay {
        self.set(next_default_trigger(now), ScheduleChange::SkippedWindow)
    }

    /// Schedule a manual cycle `offset_secs` from `now`.
    pub fn trigger_soon(&mut self, now: TimeOfDay, offset_secs: u32) -> TimeOfDay {
        self.set(add_offset(now, 0, 0, offset_secs), ScheduleChange::Manual)
    }

    fn set(&mut self, target: TimeOfDay, reason: ScheduleChange) -> TimeOfDay {
        info!("Schedule: target {} -> {} ({:?})", self.target, target, reason);
        self.target = target;
        target
    }
}
