//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::fsm::StateId;
use crate::menu::MenuScreen;
use crate::schedule::{ScheduleChange, TimeOfDay};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries the initial state and target).
    Started { state: StateId, target: TimeOfDay },

    /// The sequencer moved between states.
    StateChanged { from: StateId, to: StateId },

    /// A watering cycle began at the given time of day.
    CycleStarted(TimeOfDay),

    /// The cycle completed and all pumps are off.
    CycleFinished(TimeOfDay),

    /// The schedule target moved.
    ScheduleChanged {
        target: TimeOfDay,
        reason: ScheduleChange,
    },

    /// Physical fan output changed.
    FanChanged { on: bool, temperature_c: f32 },

    /// The menu switched screens.
    ScreenChanged(MenuScreen),
}
