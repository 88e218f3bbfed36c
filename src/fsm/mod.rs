//! Function-pointer finite state machine engine for the watering sequencer.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                       │
//! │  ┌─────────────────────┬──────────┬─────────┬──────────┬────────┐ │
//! │  │ StateId             │ on_enter │ on_exit │ on_update│ fallthr│ │
//! │  ├─────────────────────┼──────────┼─────────┼──────────┼────────┤ │
//! │  │ WaitingForNextCycle │ -        │ -       │ fn(ctx)  │ no     │ │
//! │  │ InitSetup           │ fn(ctx)  │ -       │ fn(ctx)  │ yes    │ │
//! │  │ RunningPumpA        │ fn(ctx)  │ -       │ fn(ctx)  │ no     │ │
//! │  │ PauseA              │ fn(ctx)  │ -       │ fn(ctx)  │ no     │ │
//! │  │ RunningPumpB        │ fn(ctx)  │ -       │ fn(ctx)  │ no     │ │
//! │  │ PauseB              │ fn(ctx)  │ -       │ fn(ctx)  │ no     │ │
//! │  │ Appendix            │ fn(ctx)  │ -       │ fn(ctx)  │ yes    │ │
//! │  └─────────────────────┴──────────┴─────────┴──────────┴────────┘ │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.  If it
//! returns `Some(next_id)`, the engine runs `on_exit` for the current state,
//! then `on_enter` for the next.  When the state just entered is marked
//! `fallthrough`, its `on_update` runs immediately in the same tick, so
//! InitSetup and Appendix never persist across heartbeats.
//!
//! The trigger event is only consumed by WaitingForNextCycle; whatever is
//! still pending at the end of a tick is dropped.

pub mod context;
pub mod states;

use context::{SequencerContext, SequencerEvent};
use log::{debug, info};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    WaitingForNextCycle = 0,
    InitSetup = 1,
    RunningPumpA = 2,
    PauseA = 3,
    RunningPumpB = 4,
    PauseB = 5,
    Appendix = 6,
}

impl StateId {
    pub const COUNT: usize = 7;

    /// Convert an index back to `StateId`.  Panics on out-of-range in debug
    /// builds; returns `WaitingForNextCycle` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::WaitingForNextCycle,
            1 => Self::InitSetup,
            2 => Self::RunningPumpA,
            3 => Self::PauseA,
            4 => Self::RunningPumpB,
            5 => Self::PauseB,
            6 => Self::Appendix,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::WaitingForNextCycle
            }
        }
    }

    /// Short label for the LCD (fits in 16 columns with a prefix).
    pub fn label(self) -> &'static str {
        match self {
            Self::WaitingForNextCycle => "Idle",
            Self::InitSetup => "Setup",
            Self::RunningPumpA => "Pump A",
            Self::PauseA => "Pause A",
            Self::RunningPumpB => "Pump B",
            Self::PauseB => "Pause B",
            Self::Appendix => "Done",
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type StateActionFn = fn(&mut SequencerContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut SequencerContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
    /// Run `on_update` straight after entry instead of waiting a tick.
    pub fallthrough: bool,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    current: usize,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    pub fn start(&mut self, ctx: &mut SequencerContext) {
        info!("Sequencer starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance by one heartbeat.  `ctx.now_epoch` and `ctx.event` must be set
    /// by the caller.
    pub fn tick(&mut self, ctx: &mut SequencerContext) {
        let mut next = (self.table[self.current].on_update)(ctx);

        // Bounded: a cycle through every fallthrough state is a table bug.
        let mut hops = 0;
        while let Some(next_id) = next {
            self.transition(next_id, ctx);
            hops += 1;
            if !self.table[self.current].fallthrough || hops > StateId::COUNT {
                break;
            }
            next = (self.table[self.current].on_update)(ctx);
        }

        if ctx.event != SequencerEvent::None {
            debug!(
                "Sequencer: {:?} dropped in {}",
                ctx.event, self.table[self.current].name
            );
            ctx.event = SequencerEvent::None;
        }
    }

    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    fn transition(&mut self, next_id: StateId, ctx: &mut SequencerContext) {
        let next_idx = next_id as usize;

        info!(
            "Sequencer transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
