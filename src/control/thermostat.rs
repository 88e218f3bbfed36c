//! Bang-bang fan thermostat with hysteresis.
//!
//! The fan comes on above `on_above_c` and goes off below `off_below_c`;
//! between the two it holds its last level.  While a watering cycle runs the
//! sequencer owns the fan and the thermostat does not update.

use log::info;

/// DS3231 temperature register pair → °C.
///
/// The MSB is a signed integer part; bits 7-6 of the LSB are quarter
/// degrees.  Shifting the combined value right by 6 (arithmetic) leaves a
/// 10-bit two's-complement count of 0.25 °C.
pub fn temperature_from_raw(raw: i16) -> f32 {
    f32::from(raw >> 6) * 0.25
}

#[derive(Debug, Clone)]
pub struct FanThermostat {
    on_above_c: f32,
    off_below_c: f32,
    on: bool,
}

impl FanThermostat {
    pub fn new(on_above_c: f32, off_below_c: f32) -> Self {
        debug_assert!(on_above_c > off_below_c);
        Self {
            on_above_c,
            off_below_c,
            on: false,
        }
    }

    /// Feed one temperature sample.  Returns the thermostat level.
    pub fn update(&mut self, temperature_c: f32, watering_in_progress: bool) -> bool {
        if watering_in_progress {
            return self.on;
        }
        if temperature_c > self.on_above_c && !self.on {
            info!("Thermostat: {:.2}C > {:.1}C, fan on", temperature_c, self.on_above_c);
            self.on = true;
        } else if temperature_c < self.off_below_c && self.on {
            info!("Thermostat: {:.2}C < {:.1}C, fan off", temperature_c, self.off_below_c);
            self.on = false;
        }
        self.on
    }
}
