//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { state, target } => {
                info!("START | state={:?} | next={}", state, target);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::CycleStarted(at) => {
                info!("CYCLE | started at {}", at);
            }
            AppEvent::CycleFinished(at) => {
                info!("CYCLE | finished at {}", at);
            }
            AppEvent::ScheduleChanged { target, reason } => {
                info!("SCHED | next={} ({:?})", target, reason);
            }
            AppEvent::FanChanged { on, temperature_c } => {
                info!(
                    "FAN   | {} at {:.2}\u{00b0}C",
                    if *on { "ON" } else { "OFF" },
                    temperature_c
                );
            }
            AppEvent::ScreenChanged(screen) => {
                info!("MENU  | {:?}", screen);
            }
        }
    }
}
