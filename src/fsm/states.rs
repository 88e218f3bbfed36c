//! Concrete state handler functions and table builder.
//!
//! ```text
//!  WAITING ──[TriggerWatering]──▶ INIT_SETUP ─(fallthrough)─▶ RUNNING_PUMP_A
//!     ▲                                                            │
//!     │                                                      [deadline]
//!     │                                                            ▼
//!  APPENDIX ◀─[deadline]── PAUSE_B ◀─[deadline]── RUNNING_PUMP_B ◀─[deadline]── PAUSE_A
//!  (fallthrough)
//! ```
//!
//! The cycle only moves forward; there is no abort path.

use super::context::{SequencerContext, SequencerEvent};
use super::{StateDescriptor, StateId};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        StateDescriptor {
            id: StateId::WaitingForNextCycle,
            name: "WaitingForNextCycle",
            on_enter: None,
            on_exit: None,
            on_update: waiting_update,
            fallthrough: false,
        },
        StateDescriptor {
            id: StateId::InitSetup,
            name: "InitSetup",
            on_enter: Some(init_setup_enter),
            on_exit: None,
            on_update: init_setup_update,
            fallthrough: true,
        },
        StateDescriptor {
            id: StateId::RunningPumpA,
            name: "RunningPumpA",
            on_enter: Some(pump_a_enter),
            on_exit: Some(pump_a_exit),
            on_update: pump_a_update,
            fallthrough: false,
        },
        StateDescriptor {
            id: StateId::PauseA,
            name: "PauseA",
            on_enter: Some(pause_a_enter),
            on_exit: None,
            on_update: pause_a_update,
            fallthrough: false,
        },
        StateDescriptor {
            id: StateId::RunningPumpB,
            name: "RunningPumpB",
            on_enter: Some(pump_b_enter),
            on_exit: Some(pump_b_exit),
            on_update: pump_b_update,
            fallthrough: false,
        },
        StateDescriptor {
            id: StateId::PauseB,
            name: "PauseB",
            on_enter: Some(pause_b_enter),
            on_exit: None,
            on_update: pause_b_update,
            fallthrough: false,
        },
        StateDescriptor {
            id: StateId::Appendix,
            name: "Appendix",
            on_enter: Some(appendix_enter),
            on_exit: None,
            on_update: appendix_update,
            fallthrough: true,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  WAITING
// ═══════════════════════════════════════════════════════════════════════════

fn waiting_update(ctx: &mut SequencerContext) -> Option<StateId> {
    match ctx.take_event() {
        SequencerEvent::TriggerWatering => Some(StateId::InitSetup),
        SequencerEvent::None => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  INIT_SETUP / APPENDIX: bracket the cycle
// ═══════════════════════════════════════════════════════════════════════════

fn init_setup_enter(ctx: &mut SequencerContext) {
    ctx.watering_in_progress = true;
    ctx.commands.fan_override = true;
    info!("Sequencer: watering cycle started");
}

fn init_setup_update(_ctx: &mut SequencerContext) -> Option<StateId> {
    Some(StateId::RunningPumpA)
}

fn appendix_enter(ctx: &mut SequencerContext) {
    ctx.watering_in_progress = false;
    ctx.commands.fan_override = false;
    info!("Sequencer: watering cycle finished");
}

fn appendix_update(_ctx: &mut SequencerContext) -> Option<StateId> {
    Some(StateId::WaitingForNextCycle)
}

// ═══════════════════════════════════════════════════════════════════════════
//  Pump A
// ═══════════════════════════════════════════════════════════════════════════

fn pump_a_enter(ctx: &mut SequencerContext) {
    ctx.commands.pump_a = true;
    ctx.arm_deadline(ctx.config.pump_a_run_secs);
    info!("Sequencer: pump A on for {}s", ctx.config.pump_a_run_secs);
}

fn pump_a_update(ctx: &mut SequencerContext) -> Option<StateId> {
    ctx.deadline_reached().then_some(StateId::PauseA)
}

fn pump_a_exit(ctx: &mut SequencerContext) {
    ctx.commands.pump_a = false;
}

fn pause_a_enter(ctx: &mut SequencerContext) {
    ctx.arm_deadline(ctx.config.pause_secs);
}

fn pause_a_update(ctx: &mut SequencerContext) -> Option<StateId> {
    ctx.deadline_reached().then_some(StateId::RunningPumpB)
}

// ═══════════════════════════════════════════════════════════════════════════
//  Pump B
// ═══════════════════════════════════════════════════════════════════════════

fn pump_b_enter(ctx: &mut SequencerContext) {
    ctx.commands.pump_b = true;
    ctx.arm_deadline(ctx.config.pump_b_run_secs);
    info!("Sequencer: pump B on for {}s", ctx.config.pump_b_run_secs);
}

fn pump_b_update(ctx: &mut SequencerContext) -> Option<StateId> {
    ctx.deadline_reached().then_some(StateId::PauseB)
}

fn pump_b_exit(ctx: &mut SequencerContext) {
    ctx.commands.pump_b = false;
}

fn pause_b_enter(ctx: &mut SequencerContext) {
    ctx.arm_deadline(ctx.config.pause_secs);
}

fn pause_b_update(ctx: &mut SequencerContext) -> Option<StateId> {
    ctx.deadline_reached().then_some(StateId::Appendix)
}
