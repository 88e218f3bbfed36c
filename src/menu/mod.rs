//! Two-screen LCD menu driven by the select/enter buttons.
//!
//! ```text
//!            ┌──────── SEL: skip to next window
//!            ▼ │
//!          HOME ──ENT──▶ CONFIRM ──ENT: water soon──▶ HOME
//!                           │
//!                           └──SEL: cancel──────────▶ HOME
//! ```
//!
//! Lines are always written padded to the full 16 columns so a redraw
//! overwrites the previous contents without a clear.

use core::fmt::Write;

use heapless::String;
use log::debug;

use crate::app::commands::AppCommand;
use crate::app::ports::DisplayPort;
use crate::drivers::button::ButtonEdge;
use crate::drivers::lcd::COLUMNS;
use crate::schedule::TimeOfDay;

type Line = String<{ COLUMNS as usize }>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuScreen {
    #[default]
    Home,
    ManualTriggerConfirm,
}

/// What the home screen shows.
#[derive(Debug, Clone, Copy)]
pub struct HomeView {
    pub now: TimeOfDay,
    pub temperature_c: f32,
    pub target: TimeOfDay,
    /// Sequencer phase while a cycle runs.
    pub phase: Option<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub struct Menu {
    screen: MenuScreen,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> MenuScreen {
        self.screen
    }

    /// Apply a debounced button edge.  Returns the schedule command the edge
    /// asks for, if any.
    pub fn handle_edge(&mut self, edge: ButtonEdge) -> Option<AppCommand> {
        let (next, command) = match (self.screen, edge) {
            (MenuScreen::Home, ButtonEdge::PressedEnter) => (MenuScreen::ManualTriggerConfirm, None),
            (MenuScreen::Home, ButtonEdge::PressedSelect) => {
                (MenuScreen::Home, Some(AppCommand::SkipToNextWindow))
            }
            (MenuScreen::ManualTriggerConfirm, ButtonEdge::PressedEnter) => {
                (MenuScreen::Home, Some(AppCommand::WaterSoon))
            }
            (MenuScreen::ManualTriggerConfirm, ButtonEdge::PressedSelect) => (MenuScreen::Home, None),
            (screen, ButtonEdge::None | ButtonEdge::PressedBoth) => (screen, None),
        };
        if next != self.screen {
            debug!("Menu: {:?} -> {:?}", self.screen, next);
            self.screen = next;
        }
        command
    }

    pub fn render(&self, view: &HomeView, display: &mut impl DisplayPort) {
        let (top, bottom) = match self.screen {
            MenuScreen::Home => home_lines(view),
            MenuScreen::ManualTriggerConfirm => (padded("Water now?"), padded("ENT=yes SEL=no")),
        };
        display.move_cursor(0, 0);
        display.write_text(&top);
        display.move_cursor(0, 1);
        display.write_text(&bottom);
    }
}

fn home_lines(view: &HomeView) -> (Line, Line) {
    let mut top = Line::new();
    // Overflow only truncates the line.
    let _ = write!(top, "{} {:>6.1}C", view.now, view.temperature_c);

    let mut bottom = Line::new();
    let _ = match view.phase {
        Some(phase) => write!(bottom, "Water: {}", phase),
        None => write!(bottom, "Next {}", view.target),
    };
    (pad(top), pad(bottom))
}

fn padded(text: &str) -> Line {
    let mut line = Line::new();
    let _ = line.push_str(text);
    pad(line)
}

fn pad(mut line: Line) -> Line {
    while line.push(' ').is_ok() {}
    line
}
