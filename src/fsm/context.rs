//! Shared mutable context threaded through every sequencer handler.
//!
//! State handlers read the clock and pending event from here and write the
//! output commands the service applies after the tick.

use crate::config::WateringConfig;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Event delivered to the sequencer on a heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerEvent {
    #[default]
    None,
    /// The schedule target was reached or the user confirmed a manual run.
    TriggerWatering,
}

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputCommands {
    pub pump_a: bool,
    pub pump_b: bool,
    /// Fan forced on for the duration of a cycle, regardless of temperature.
    pub fan_override: bool,
}

// ---------------------------------------------------------------------------
// SequencerContext
// ---------------------------------------------------------------------------

pub struct SequencerContext {
    /// RTC epoch seconds at this heartbeat.
    pub now_epoch: u64,
    /// Pending event; cleared when consumed or dropped.
    pub event: SequencerEvent,
    /// Absolute epoch second at which the current timed state ends.
    pub deadline: u64,
    pub watering_in_progress: bool,
    pub commands: OutputCommands,
    pub config: WateringConfig,
}

impl SequencerContext {
    pub fn new(config: WateringConfig) -> Self {
        Self {
            now_epoch: 0,
            event: SequencerEvent::None,
            deadline: 0,
            watering_in_progress: false,
            commands: OutputCommands::default(),
            config,
        }
    }

    /// Set the deadline `secs` from now.
    pub fn arm_deadline(&mut self, secs: u32) {
        self.deadline = self.now_epoch.saturating_add(u64::from(secs));
    }

    pub fn deadline_reached(&self) -> bool {
        self.now_epoch >= self.deadline
    }

    /// Remove and return the pending event.
    pub fn take_event(&mut self) -> SequencerEvent {
        core::mem::take(&mut self.event)
    }
}
