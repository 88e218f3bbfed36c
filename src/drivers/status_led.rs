//! Single-colour heartbeat LED.
//!
//! The service flips it once per heartbeat so a stalled run loop is visible
//! at a glance.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct StatusLed {
    gpio: i32,
    lit: bool,
}

impl StatusLed {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, lit: false }
    }

    pub fn set(&mut self, lit: bool) {
        hw_init::gpio_write(self.gpio, lit);
        self.lit = lit;
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
