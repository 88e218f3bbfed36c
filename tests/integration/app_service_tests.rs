//! AppService against mock adapters: schedule, sequencer, fan and menu
//! wired together the way the run loop drives them.

use suijin::app::events::AppEvent;
use suijin::app::ports::ClockPort;
use suijin::app::service::{AppService, TickInput};
use suijin::config::WateringConfig;
use suijin::fsm::StateId;
use suijin::menu::MenuScreen;
use suijin::schedule::{ScheduleChange, TimeOfDay};

use super::mock_hw::{MockDisplay, MockOutputs, OutputCall, RecordingSink, ScriptedClock};

struct Rig {
    app: AppService,
    clock: ScriptedClock,
    outputs: MockOutputs,
    display: MockDisplay,
    sink: RecordingSink,
}

impl Rig {
    fn boot(config: WateringConfig, mut clock: ScriptedClock) -> Self {
        let mut app = AppService::new(config);
        let mut outputs = MockOutputs::new();
        let mut display = MockDisplay::new();
        let mut sink = RecordingSink::new();
        let reading = clock.read();
        app.start(reading, &mut outputs, &mut display, &mut sink);
        Self {
            app,
            clock,
            outputs,
            display,
            sink,
        }
    }

    fn boot_default_window(clock: ScriptedClock) -> Self {
        Self::boot(
            WateringConfig {
                boot_trigger_offset_secs: None,
                ..WateringConfig::default()
            },
            clock,
        )
    }

    fn tick(&mut self, raw_select: bool, raw_enter: bool, heartbeat: bool) {
        let reading = if heartbeat {
            self.clock.advance(1);
            Some(self.clock.read())
        } else {
            None
        };
        self.app.tick(
            TickInput {
                raw_select,
                raw_enter,
                reading,
            },
            &mut self.outputs,
            &mut self.display,
            &mut self.sink,
        );
    }

    fn run_secs(&mut self, secs: u32) {
        for _ in 0..secs {
            self.tick(false, false, true);
        }
    }

    /// Hold for the debounce window, then release.
    fn press(&mut self, select: bool, enter: bool) {
        for _ in 0..4 {
            self.tick(select, enter, false);
        }
        self.tick(false, false, false);
    }

    fn press_enter(&mut self) {
        self.press(false, true);
    }

    fn press_select(&mut self) {
        self.press(true, false);
    }

    fn cycles_started(&self) -> usize {
        self.sink
            .count(|e| matches!(e, AppEvent::CycleStarted(_)))
    }
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn start_drives_outputs_off_and_announces() {
    let rig = Rig::boot(WateringConfig::default(), ScriptedClock::at(12, 0, 0));
    assert_eq!(
        &rig.outputs.calls[..4],
        &[
            OutputCall::PumpA(false),
            OutputCall::PumpB(false),
            OutputCall::Fan(false),
            OutputCall::StatusLed(false),
        ]
    );
    assert_eq!(
        rig.sink.events[0],
        AppEvent::Started {
            state: StateId::WaitingForNextCycle,
            target: TimeOfDay::new(12, 0, 10),
        }
    );
    assert_eq!(rig.display.clears, 1);
}

#[test]
fn boot_trigger_starts_cycle_ten_seconds_after_power_on() {
    let mut rig = Rig::boot(WateringConfig::default(), ScriptedClock::at(12, 0, 0));

    rig.run_secs(9);
    assert_eq!(rig.app.state(), StateId::WaitingForNextCycle);
    assert!(!rig.outputs.pump_a());

    rig.run_secs(1);
    assert_eq!(rig.app.state(), StateId::RunningPumpA);
    assert!(rig.outputs.pump_a());
    assert!(rig.outputs.fan());
    assert!(rig.app.watering_in_progress());
    assert_eq!(rig.app.schedule_target(), TimeOfDay::new(14, 5, 0));
    assert!(rig.sink.events.contains(&AppEvent::CycleStarted(TimeOfDay::new(12, 0, 10))));
    assert!(rig.sink.events.contains(&AppEvent::ScheduleChanged {
        target: TimeOfDay::new(14, 5, 0),
        reason: ScheduleChange::Consumed,
    }));
}

// ── Sequencer through the service ─────────────────────────────

#[test]
fn full_cycle_runs_both_pumps_in_order() {
    let mut rig = Rig::boot(WateringConfig::default(), ScriptedClock::at(12, 0, 0));
    rig.run_secs(10);
    assert!(rig.outputs.pump_a());

    rig.run_secs(29);
    assert!(rig.outputs.pump_a(), "pump A runs the full 30 s");

    rig.run_secs(1);
    assert_eq!(rig.app.state(), StateId::PauseA);
    assert!(!rig.outputs.pump_a());
    assert!(!rig.outputs.pump_b());

    rig.run_secs(2);
    assert_eq!(rig.app.state(), StateId::RunningPumpB);
    assert!(rig.outputs.pump_b());

    rig.run_secs(64);
    assert!(rig.outputs.pump_b(), "pump B runs the full 65 s");

    rig.run_secs(1);
    assert_eq!(rig.app.state(), StateId::PauseB);
    assert!(!rig.outputs.pump_b());
    assert!(rig.app.watering_in_progress());

    rig.run_secs(2);
    assert_eq!(rig.app.state(), StateId::WaitingForNextCycle);
    assert!(!rig.app.watering_in_progress());
    assert!(!rig.outputs.fan());
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::CycleFinished(_))),
        1
    );
}

#[test]
fn pumps_never_overlap() {
    let mut rig = Rig::boot(WateringConfig::default(), ScriptedClock::at(12, 0, 0));
    for _ in 0..200 {
        rig.run_secs(1);
        assert!(!(rig.outputs.pump_a() && rig.outputs.pump_b()));
    }
    assert_eq!(rig.cycles_started(), 1);
}

// ── Menu ──────────────────────────────────────────────────────

#[test]
fn manual_trigger_from_menu() {
    let mut rig = Rig::boot_default_window(ScriptedClock::at(9, 0, 0));
    assert_eq!(rig.app.schedule_target(), TimeOfDay::new(14, 5, 0));
    rig.run_secs(3);

    rig.press_enter();
    assert_eq!(rig.app.screen(), MenuScreen::ManualTriggerConfirm);
    assert_eq!(rig.display.row(0), "Water now?      ");
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::ScreenChanged(MenuScreen::ManualTriggerConfirm)));

    rig.press_enter();
    assert_eq!(rig.app.screen(), MenuScreen::Home);
    // Relative to the last heartbeat reading.
    assert_eq!(rig.app.schedule_target(), TimeOfDay::new(9, 0, 13));
    assert_eq!(rig.display.row(1), "Next 09:00:13   ");

    rig.run_secs(9);
    assert_eq!(rig.cycles_started(), 0);
    rig.run_secs(1);
    assert_eq!(rig.cycles_started(), 1);
    assert_eq!(rig.app.state(), StateId::RunningPumpA);
}

#[test]
fn confirm_cancel_leaves_schedule() {
    let mut rig = Rig::boot_default_window(ScriptedClock::at(9, 0, 0));
    rig.run_secs(1);
    rig.press_enter();
    rig.press_select();
    assert_eq!(rig.app.screen(), MenuScreen::Home);
    assert_eq!(rig.app.schedule_target(), TimeOfDay::new(14, 5, 0));
}

#[test]
fn select_on_home_skips_boot_trigger() {
    let mut rig = Rig::boot(WateringConfig::default(), ScriptedClock::at(12, 0, 0));
    rig.run_secs(2);
    rig.press_select();
    assert_eq!(rig.app.schedule_target(), TimeOfDay::new(14, 5, 0));
    assert!(rig.sink.events.contains(&AppEvent::ScheduleChanged {
        target: TimeOfDay::new(14, 5, 0),
        reason: ScheduleChange::SkippedWindow,
    }));

    rig.run_secs(30);
    assert_eq!(rig.cycles_started(), 0);
}

#[test]
fn both_buttons_together_do_nothing() {
    let mut rig = Rig::boot_default_window(ScriptedClock::at(9, 0, 0));
    rig.run_secs(1);
    rig.press(true, true);
    assert_eq!(rig.app.screen(), MenuScreen::Home);
    assert_eq!(rig.app.schedule_target(), TimeOfDay::new(14, 5, 0));
}

#[test]
fn short_glitch_is_not_a_press() {
    let mut rig = Rig::boot_default_window(ScriptedClock::at(9, 0, 0));
    for _ in 0..3 {
        rig.tick(false, true, false);
    }
    rig.tick(false, false, false);
    assert_eq!(rig.app.screen(), MenuScreen::Home);
}

#[test]
fn menu_works_during_a_cycle() {
    let mut rig = Rig::boot(WateringConfig::default(), ScriptedClock::at(12, 0, 0));
    rig.run_secs(10);
    assert!(rig.app.watering_in_progress());

    rig.press_enter();
    rig.press_enter();
    // Target moved, but the running cycle is untouched.
    assert_eq!(rig.app.schedule_target(), TimeOfDay::new(12, 0, 20));
    rig.run_secs(10);
    assert_eq!(rig.app.state(), StateId::RunningPumpA);
    assert_eq!(rig.cycles_started(), 1);
}

// ── Fan ───────────────────────────────────────────────────────

#[test]
fn thermostat_drives_fan_with_hysteresis() {
    let mut rig = Rig::boot_default_window(ScriptedClock::at(9, 0, 0));
    let boot_writes = rig.outputs.fan_writes();

    rig.clock.set_temperature(35);
    rig.run_secs(1);
    assert!(rig.outputs.fan());
    assert!(rig.sink.events.contains(&AppEvent::FanChanged {
        on: true,
        temperature_c: 35.0,
    }));

    rig.clock.set_temperature(30);
    rig.run_secs(5);
    assert!(rig.outputs.fan());
    assert_eq!(rig.outputs.fan_writes(), boot_writes + 1, "fan only written on change");

    rig.clock.set_temperature(27);
    rig.run_secs(1);
    assert!(!rig.outputs.fan());
    assert_eq!(rig.outputs.fan_writes(), boot_writes + 2);
}

#[test]
fn cycle_forces_fan_and_releases_after() {
    let mut rig = Rig::boot(WateringConfig::default(), ScriptedClock::at(12, 0, 0));
    rig.clock.set_temperature(20);
    rig.run_secs(10);
    assert!(rig.outputs.fan());

    rig.run_secs(99);
    assert_eq!(rig.app.state(), StateId::WaitingForNextCycle);
    assert!(!rig.outputs.fan());
}

#[test]
fn hot_enclosure_keeps_fan_on_across_cycle_end() {
    let mut rig = Rig::boot(WateringConfig::default(), ScriptedClock::at(12, 0, 0));
    rig.run_secs(10);
    rig.clock.set_temperature(40);
    let writes_in_cycle = rig.outputs.fan_writes();

    rig.run_secs(99);
    assert_eq!(rig.app.state(), StateId::WaitingForNextCycle);
    assert!(rig.outputs.fan());
    assert_eq!(rig.outputs.fan_writes(), writes_in_cycle);
}

// ── Display & heartbeat LED ───────────────────────────────────

#[test]
fn home_screen_shows_clock_and_next_target() {
    let mut rig = Rig::boot_default_window(ScriptedClock::at(9, 0, 0));
    rig.run_secs(1);
    assert_eq!(rig.display.row(0), "09:00:01   25.0C");
    assert_eq!(rig.display.row(1), "Next 14:05:00   ");
}

#[test]
fn home_screen_shows_phase_while_watering() {
    let mut rig = Rig::boot(WateringConfig::default(), ScriptedClock::at(12, 0, 0));
    rig.run_secs(10);
    assert_eq!(rig.display.row(1), "Water: Pump A   ");
    rig.run_secs(32);
    assert_eq!(rig.display.row(1), "Water: Pump B   ");
}

#[test]
fn status_led_toggles_each_heartbeat() {
    let mut rig = Rig::boot_default_window(ScriptedClock::at(9, 0, 0));
    assert!(!rig.outputs.led());
    rig.run_secs(1);
    assert!(rig.outputs.led());
    rig.run_secs(1);
    assert!(!rig.outputs.led());
}

#[test]
fn non_heartbeat_ticks_leave_outputs_alone() {
    let mut rig = Rig::boot_default_window(ScriptedClock::at(9, 0, 0));
    let before = rig.outputs.calls.len();
    for _ in 0..49 {
        rig.tick(false, false, false);
    }
    assert_eq!(rig.outputs.calls.len(), before);
}
