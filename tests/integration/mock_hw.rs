//! Mock hardware adapters for integration tests.
//!
//! Records every output call and display write so tests can assert on the
//! full history without touching real GPIO or I²C.

use suijin::app::events::AppEvent;
use suijin::app::ports::{ClockPort, DisplayPort, EventSink, OutputPort};
use suijin::schedule::{TimeOfDay, add_offset};

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCall {
    PumpA(bool),
    PumpB(bool),
    Fan(bool),
    StatusLed(bool),
}

#[derive(Default)]
pub struct MockOutputs {
    pub calls: Vec<OutputCall>,
}

#[allow(dead_code)]
impl MockOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    fn last(&self, pick: fn(&OutputCall) -> Option<bool>) -> bool {
        self.calls.iter().rev().find_map(pick).unwrap_or(false)
    }

    pub fn pump_a(&self) -> bool {
        self.last(|c| match c {
            OutputCall::PumpA(on) => Some(*on),
            _ => None,
        })
    }

    pub fn pump_b(&self) -> bool {
        self.last(|c| match c {
            OutputCall::PumpB(on) => Some(*on),
            _ => None,
        })
    }

    pub fn fan(&self) -> bool {
        self.last(|c| match c {
            OutputCall::Fan(on) => Some(*on),
            _ => None,
        })
    }

    pub fn led(&self) -> bool {
        self.last(|c| match c {
            OutputCall::StatusLed(lit) => Some(*lit),
            _ => None,
        })
    }

    pub fn fan_writes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, OutputCall::Fan(_)))
            .count()
    }
}

impl OutputPort for MockOutputs {
    fn set_pump_a(&mut self, on: bool) {
        self.calls.push(OutputCall::PumpA(on));
    }

    fn set_pump_b(&mut self, on: bool) {
        self.calls.push(OutputCall::PumpB(on));
    }

    fn set_fan(&mut self, on: bool) {
        self.calls.push(OutputCall::Fan(on));
    }

    fn set_status_led(&mut self, lit: bool) {
        self.calls.push(OutputCall::StatusLed(lit));
    }
}

// ── Display ───────────────────────────────────────────────────

/// 16x2 character buffer with overwrite semantics.
pub struct MockDisplay {
    cells: [[char; 16]; 2],
    cursor: (usize, usize),
    pub clears: usize,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self {
            cells: [[' '; 16]; 2],
            cursor: (0, 0),
            clears: 0,
        }
    }

    pub fn row(&self, row: usize) -> String {
        self.cells[row].iter().collect()
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for MockDisplay {
    fn move_cursor(&mut self, column: u8, row: u8) {
        self.cursor = (column as usize, row as usize);
    }

    fn write_text(&mut self, text: &str) {
        let (mut col, row) = self.cursor;
        for ch in text.chars() {
            if col < 16 {
                self.cells[row][col] = ch;
            }
            col += 1;
        }
        self.cursor = (col, row);
    }

    fn clear(&mut self) {
        self.cells = [[' '; 16]; 2];
        self.cursor = (0, 0);
        self.clears += 1;
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn take(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Clock ─────────────────────────────────────────────────────

/// RTC stand-in that only moves when told to.
pub struct ScriptedClock {
    pub time: TimeOfDay,
    pub epoch: u64,
    pub temperature_raw: i16,
    pub control_writes: Vec<u8>,
}

#[allow(dead_code)]
impl ScriptedClock {
    /// 25.0 °C in DS3231 register format.
    pub const TEMP_25C: i16 = 25 << 8;

    pub fn at(h: u8, m: u8, s: u8) -> Self {
        Self {
            time: TimeOfDay::new(h, m, s),
            epoch: 1_700_000_000,
            temperature_raw: Self::TEMP_25C,
            control_writes: Vec::new(),
        }
    }

    pub fn advance(&mut self, secs: u32) {
        self.time = add_offset(self.time, 0, 0, secs);
        self.epoch += u64::from(secs);
    }

    pub fn set_temperature(&mut self, celsius: i16) {
        self.temperature_raw = celsius << 8;
    }
}

impl ClockPort for ScriptedClock {
    fn current_time(&mut self) -> TimeOfDay {
        self.time
    }

    fn epoch_seconds(&mut self) -> u64 {
        self.epoch
    }

    fn temperature_raw(&mut self) -> i16 {
        self.temperature_raw
    }

    fn set_control_register(&mut self, value: u8) {
        self.control_writes.push(value);
    }
}
