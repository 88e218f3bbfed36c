//! Hardware adapter: bridges the GPIO load switches to the output port.
//!
//! Owns the three load switches and the heartbeat LED.  On non-espidf
//! targets the drivers only track state in memory.

use crate::app::ports::OutputPort;
use crate::drivers::status_led::StatusLed;
use crate::drivers::switch::LoadSwitch;
use crate::pins;

pub struct HardwareOutputs {
    pump_a: LoadSwitch,
    pump_b: LoadSwitch,
    fan: LoadSwitch,
    led: StatusLed,
}

impl HardwareOutputs {
    pub fn new(pump_a: LoadSwitch, pump_b: LoadSwitch, fan: LoadSwitch, led: StatusLed) -> Self {
        Self {
            pump_a,
            pump_b,
            fan,
            led,
        }
    }

    /// Outputs on the fixture's default pin map.
    pub fn from_pin_map() -> Self {
        Self::new(
            LoadSwitch::new("pump A", pins::PUMP_A_GPIO),
            LoadSwitch::new("pump B", pins::PUMP_B_GPIO),
            LoadSwitch::new("fan", pins::FAN_GPIO),
            StatusLed::new(pins::STATUS_LED_GPIO),
        )
    }

    /// `(pump_a, pump_b, fan, led)`
    pub fn levels(&self) -> (bool, bool, bool, bool) {
        (
            self.pump_a.is_on(),
            self.pump_b.is_on(),
            self.fan.is_on(),
            self.led.is_lit(),
        )
    }
}

impl OutputPort for HardwareOutputs {
    fn set_pump_a(&mut self, on: bool) {
        self.pump_a.set(on);
    }

    fn set_pump_b(&mut self, on: bool) {
        self.pump_b.set(on);
    }

    fn set_fan(&mut self, on: bool) {
        self.fan.set(on);
    }

    fn set_status_led(&mut self, lit: bool) {
        self.led.set(lit);
    }
}
