//! On/off load switch driver (pumps, cooling fan).
//!
//! Each load sits behind a logic-level MOSFET on one GPIO, active HIGH.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use log::debug;

use crate::drivers::hw_init;

pub struct LoadSwitch {
    name: &'static str,
    gpio: i32,
    on: bool,
}

impl LoadSwitch {
    /// A switch starts off; `hw_init` drives every output low at boot.
    pub fn new(name: &'static str, gpio: i32) -> Self {
        Self {
            name,
            gpio,
            on: false,
        }
    }

    pub fn set(&mut self, on: bool) {
        if on != self.on {
            debug!("{}: {}", self.name, if on { "ON" } else { "OFF" });
        }
        hw_init::gpio_write(self.gpio, on);
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
