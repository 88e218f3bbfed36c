//! Shift-register debouncer for the two menu buttons, plus edge detection.
//!
//! ## Hardware
//!
//! Active-low momentary switches with internal pull-ups, polled once per
//! run-loop iteration (~50 Hz).  The caller inverts the pin level so that
//! `true` means "pressed".
//!
//! ## Debounce
//!
//! Every sample shifts the accumulator left and ORs in the raw bit.  The
//! button counts as pressed only while the low N bits are all ones, so a
//! press needs N consecutive high samples and any single low sample in the
//! window releases it.
//!
//! | N | Press latency at 50 Hz |
//! |---|------------------------|
//! | 4 | 80 ms                  |
//! | 8 | 160 ms                 |

use log::debug;

/// Debounced edges reported by [`ButtonPanel::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonEdge {
    #[default]
    None,
    PressedSelect,
    PressedEnter,
    /// Both buttons became stable in the same sample.
    PressedBoth,
}

/// Accumulators for the select/enter button pair.
#[derive(Debug, Clone)]
pub struct Debouncer {
    select: u8,
    enter: u8,
    mask: u8,
}

impl Debouncer {
    /// `samples` is the window width; only 4 and 8 are meaningful
    /// (enforced by config validation).
    pub fn new(samples: u8) -> Self {
        let mask = match samples {
            0 => 0,
            n if n >= 8 => u8::MAX,
            n => (1u8 << n) - 1,
        };
        Self {
            select: 0,
            enter: 0,
            mask,
        }
    }

    /// Feed one raw sample per button; returns the stable levels.
    pub fn sample(&mut self, raw_select: bool, raw_enter: bool) -> (bool, bool) {
        self.select = (self.select << 1) | u8::from(raw_select);
        self.enter = (self.enter << 1) | u8::from(raw_enter);
        (
            self.select & self.mask == self.mask,
            self.enter & self.mask == self.mask,
        )
    }
}

/// Debouncer plus rising-edge detection on the stable levels.
#[derive(Debug, Clone)]
pub struct ButtonPanel {
    debouncer: Debouncer,
    select_held: bool,
    enter_held: bool,
}

impl ButtonPanel {
    pub fn new(samples: u8) -> Self {
        Self {
            debouncer: Debouncer::new(samples),
            select_held: false,
            enter_held: false,
        }
    }

    /// Sample both buttons and report a press edge, if any.
    pub fn poll(&mut self, raw_select: bool, raw_enter: bool) -> ButtonEdge {
        let (select, enter) = self.debouncer.sample(raw_select, raw_enter);
        let select_rose = select && !self.select_held;
        let enter_rose = enter && !self.enter_held;
        self.select_held = select;
        self.enter_held = enter;

        let edge = match (select_rose, enter_rose) {
            (true, true) => ButtonEdge::PressedBoth,
            (true, false) => ButtonEdge::PressedSelect,
            (false, true) => ButtonEdge::PressedEnter,
            (false, false) => ButtonEdge::None,
        };
        if edge != ButtonEdge::None {
            debug!("Buttons: {:?}", edge);
        }
        edge
    }
}
