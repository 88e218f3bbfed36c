//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (RTC, LCD, GPIO outputs, event sinks) implement these
//! traits.  The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! Port methods are infallible: adapters absorb bus errors (log and keep the
//! last good value) so a flaky I²C line degrades the display instead of
//! stopping the watering loop.

use crate::control::thermostat::temperature_from_raw;
use crate::schedule::TimeOfDay;

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: RTC → domain)
// ───────────────────────────────────────────────────────────────

/// One heartbeat's worth of RTC data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockReading {
    pub time: TimeOfDay,
    /// Monotonic seconds used for sequencer deadlines.
    pub epoch_secs: u64,
    pub temperature_c: f32,
}

pub trait ClockPort {
    fn current_time(&mut self) -> TimeOfDay;

    fn epoch_seconds(&mut self) -> u64;

    /// DS3231-format temperature register pair.
    fn temperature_raw(&mut self) -> i16;

    fn set_control_register(&mut self, value: u8);

    /// Read everything the heartbeat needs.
    fn read(&mut self) -> ClockReading {
        ClockReading {
            time: self.current_time(),
            epoch_secs: self.epoch_seconds(),
            temperature_c: temperature_from_raw(self.temperature_raw()),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → 16x2 LCD)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Zero-based column and row.
    fn move_cursor(&mut self, column: u8, row: u8);

    fn write_text(&mut self, text: &str);

    fn clear(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → GPIO loads)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the switched loads and the status LED.
pub trait OutputPort {
    fn set_pump_a(&mut self, on: bool);

    fn set_pump_b(&mut self, on: bool);

    fn set_fan(&mut self, on: bool);

    fn set_status_led(&mut self, lit: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
