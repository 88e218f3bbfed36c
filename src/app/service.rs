//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the schedule, sequencer, thermostat, menu and button
//! state.  It exposes a hardware-agnostic API; all I/O flows through port
//! traits injected at call sites, making the whole loop testable with mock
//! adapters.
//!
//! ```text
//!  buttons ─┐                               ┌──▶ OutputPort
//!  clock ───┼──▶ ┌─────────────────────────┐├──▶ DisplayPort
//!           │    │       AppService         │└──▶ EventSink
//!           └──▶ │ Schedule · FSM · Menu    │
//!                │ Thermostat · Buttons     │
//!                └─────────────────────────┘
//! ```
//!
//! ## Per-call ordering
//!
//! 1. Sample the buttons; on an edge update the menu (using the last clock
//!    reading for "now") and redraw if the screen changed.
//! 2. Heartbeat only (`reading` present): schedule check → sequencer tick →
//!    pump outputs → thermostat → fan → status LED → display refresh.

use log::{debug, info};

use crate::config::WateringConfig;
use crate::control::thermostat::FanThermostat;
use crate::drivers::button::{ButtonEdge, ButtonPanel};
use crate::fsm::context::{OutputCommands, SequencerContext, SequencerEvent};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::menu::{HomeView, Menu, MenuScreen};
use crate::schedule::{Schedule, ScheduleChange, TimeOfDay, add_offset, next_default_trigger};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{ClockReading, DisplayPort, EventSink, OutputPort};

/// Everything one run-loop iteration hands to the service.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Button levels, `true` = pressed.
    pub raw_select: bool,
    pub raw_enter: bool,
    /// Present on heartbeat iterations only.
    pub reading: Option<ClockReading>,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    fsm: Fsm,
    ctx: SequencerContext,
    schedule: Schedule,
    thermostat: FanThermostat,
    menu: Menu,
    buttons: ButtonPanel,
    last_reading: Option<ClockReading>,
    fan_on: bool,
    status_led: bool,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start anything; call [`start`](Self::start) with the
    /// first clock reading next.
    pub fn new(config: WateringConfig) -> Self {
        let thermostat = FanThermostat::new(config.fan_on_above_c, config.fan_off_below_c);
        let buttons = ButtonPanel::new(config.debounce_samples);
        Self {
            fsm: Fsm::new(build_state_table(), StateId::WaitingForNextCycle),
            ctx: SequencerContext::new(config),
            schedule: Schedule::new(TimeOfDay::MIDNIGHT),
            thermostat,
            menu: Menu::new(),
            buttons,
            last_reading: None,
            fan_on: false,
            status_led: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Seed the schedule from the boot reading, drive every output to a
    /// known state and draw the first screen.
    pub fn start(
        &mut self,
        reading: ClockReading,
        outputs: &mut impl OutputPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        let now = reading.time;
        let target = match self.ctx.config.boot_trigger_offset_secs {
            Some(offset) => add_offset(now, 0, 0, offset),
            None => next_default_trigger(now),
        };
        self.schedule = Schedule::new(target);
        self.schedule.observe(now);
        self.last_reading = Some(reading);

        self.ctx.now_epoch = reading.epoch_secs;
        self.fsm.start(&mut self.ctx);

        outputs.set_pump_a(false);
        outputs.set_pump_b(false);
        outputs.set_fan(false);
        outputs.set_status_led(false);

        let state = self.fsm.current_state();
        info!("AppService started in {:?} at {}, next cycle {}", state, now, target);
        sink.emit(&AppEvent::Started { state, target });
        sink.emit(&AppEvent::ScheduleChanged {
            target,
            reason: ScheduleChange::Boot,
        });

        display.clear();
        self.render(display);
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one loop iteration.  See the module docs for the ordering.
    pub fn tick(
        &mut self,
        input: TickInput,
        outputs: &mut impl OutputPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        let edge = self.buttons.poll(input.raw_select, input.raw_enter);
        if edge != ButtonEdge::None {
            self.handle_edge(edge, display, sink);
        }

        if let Some(reading) = input.reading {
            self.heartbeat(reading, outputs, display, sink);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply a schedule command relative to the last clock reading.
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        let Some(reading) = self.last_reading else {
            debug!("AppService: {:?} before first clock reading, ignored", cmd);
            return;
        };
        let (target, reason) = match cmd {
            AppCommand::SkipToNextWindow => (
                self.schedule.skip_to_next_window(reading.time),
                ScheduleChange::SkippedWindow,
            ),
            AppCommand::WaterSoon => (
                self.schedule
                    .trigger_soon(reading.time, self.ctx.config.manual_trigger_offset_secs),
                ScheduleChange::Manual,
            ),
        };
        sink.emit(&AppEvent::ScheduleChanged { target, reason });
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn schedule_target(&self) -> TimeOfDay {
        self.schedule.target()
    }

    pub fn screen(&self) -> MenuScreen {
        self.menu.screen()
    }

    pub fn commands(&self) -> OutputCommands {
        self.ctx.commands
    }

    pub fn watering_in_progress(&self) -> bool {
        self.ctx.watering_in_progress
    }

    /// Effective fan level (thermostat OR cycle override).
    pub fn fan_on(&self) -> bool {
        self.fan_on
    }

    pub fn last_reading(&self) -> Option<ClockReading> {
        self.last_reading
    }

    // ── Internal ──────────────────────────────────────────────

    fn handle_edge(
        &mut self,
        edge: ButtonEdge,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        let before = self.menu.screen();
        let command = self.menu.handle_edge(edge);
        if let Some(cmd) = command {
            self.handle_command(cmd, sink);
        }

        let after = self.menu.screen();
        if after != before {
            sink.emit(&AppEvent::ScreenChanged(after));
            display.clear();
            self.render(display);
        } else if command.is_some() {
            self.render(display);
        }
    }

    fn heartbeat(
        &mut self,
        reading: ClockReading,
        outputs: &mut impl OutputPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        self.last_reading = Some(reading);
        let now = reading.time;

        // 1. Schedule
        let due = self.schedule.is_due(now);
        self.schedule.observe(now);
        if due {
            info!("Schedule: target {} reached at {}", self.schedule.target(), now);
            let target = self.schedule.consume(now);
            sink.emit(&AppEvent::ScheduleChanged {
                target,
                reason: ScheduleChange::Consumed,
            });
            self.ctx.event = SequencerEvent::TriggerWatering;
        }

        // 2. Sequencer
        let prev_state = self.fsm.current_state();
        let was_watering = self.ctx.watering_in_progress;
        self.ctx.now_epoch = reading.epoch_secs;
        self.fsm.tick(&mut self.ctx);

        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }
        match (was_watering, self.ctx.watering_in_progress) {
            (false, true) => sink.emit(&AppEvent::CycleStarted(now)),
            (true, false) => sink.emit(&AppEvent::CycleFinished(now)),
            _ => {}
        }

        // 3. Pumps
        outputs.set_pump_a(self.ctx.commands.pump_a);
        outputs.set_pump_b(self.ctx.commands.pump_b);

        // 4. Fan: thermostat level OR cycle override, written on change only
        let thermostat_on = self
            .thermostat
            .update(reading.temperature_c, self.ctx.watering_in_progress);
        let fan = thermostat_on || self.ctx.commands.fan_override;
        if fan != self.fan_on {
            self.fan_on = fan;
            outputs.set_fan(fan);
            sink.emit(&AppEvent::FanChanged {
                on: fan,
                temperature_c: reading.temperature_c,
            });
        }

        // 5. Heartbeat LED
        self.status_led = !self.status_led;
        outputs.set_status_led(self.status_led);

        // 6. Display
        self.render(display);
    }

    fn render(&self, display: &mut impl DisplayPort) {
        let Some(reading) = self.last_reading else {
            return;
        };
        let phase = self
            .ctx
            .watering_in_progress
            .then(|| self.fsm.current_state().label());
        let view = HomeView {
            now: reading.time,
            temperature_c: reading.temperature_c,
            target: self.schedule.target(),
            phase,
        };
        self.menu.render(&view, display);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Null;

    impl OutputPort for Null {
        fn set_pump_a(&mut self, _on: bool) {}
        fn set_pump_b(&mut self, _on: bool) {}
        fn set_fan(&mut self, _on: bool) {}
        fn set_status_led(&mut self, _lit: bool) {}
    }

    impl DisplayPort for Null {
        fn move_cursor(&mut self, _column: u8, _row: u8) {}
        fn write_text(&mut self, _text: &str) {}
        fn clear(&mut self) {}
    }

    impl EventSink for Null {
        fn emit(&mut self, _event: &AppEvent) {}
    }

    fn reading(h: u8, m: u8, s: u8, epoch: u64) -> ClockReading {
        ClockReading {
            time: TimeOfDay::new(h, m, s),
            epoch_secs: epoch,
            temperature_c: 25.0,
        }
    }

    #[test]
    fn boot_offset_sets_target() {
        let mut app = AppService::new(WateringConfig::default());
        app.start(reading(12, 0, 0, 0), &mut Null, &mut Null, &mut Null);
        assert_eq!(app.schedule_target(), TimeOfDay::new(12, 0, 10));
    }

    #[test]
    fn no_boot_offset_uses_default_window() {
        let config = WateringConfig {
            boot_trigger_offset_secs: None,
            ..WateringConfig::default()
        };
        let mut app = AppService::new(config);
        app.start(reading(12, 0, 0, 0), &mut Null, &mut Null, &mut Null);
        assert_eq!(app.schedule_target(), TimeOfDay::new(14, 5, 0));
    }

    #[test]
    fn command_before_start_is_ignored() {
        let mut app = AppService::new(WateringConfig::default());
        app.handle_command(AppCommand::WaterSoon, &mut Null);
        assert_eq!(app.schedule_target(), TimeOfDay::MIDNIGHT);
    }

    #[derive(Default)]
    struct Events(Vec<AppEvent>);

    impl EventSink for Events {
        fn emit(&mut self, event: &AppEvent) {
            self.0.push(event.clone());
        }
    }

    #[test]
    fn water_soon_reports_one_manual_change() {
        let mut app = AppService::new(WateringConfig::default());
        app.start(reading(12, 0, 0, 0), &mut Null, &mut Null, &mut Null);

        let mut events = Events::default();
        app.handle_command(AppCommand::WaterSoon, &mut events);
        assert_eq!(
            events.0,
            vec![AppEvent::ScheduleChanged {
                target: TimeOfDay::new(12, 0, 10),
                reason: ScheduleChange::Manual,
            }]
        );
    }
}
