//! Display adapter: HD44780/PCF8574 LCD behind the [`DisplayPort`].
//!
//! Write failures are logged once and otherwise ignored; the next full
//! redraw repairs whatever was lost.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::app::ports::DisplayPort;
use crate::drivers::lcd::Lcd;
use crate::error::DisplayError;

pub struct LcdDisplay<I2C, D> {
    lcd: Lcd<I2C, D>,
    faulted: bool,
}

impl<I2C: I2c, D: DelayNs> LcdDisplay<I2C, D> {
    /// Wrap an LCD; call [`Lcd::init`] first.
    pub fn new(lcd: Lcd<I2C, D>) -> Self {
        Self { lcd, faulted: false }
    }

    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    #[cfg(test)]
    pub(crate) fn release(self) -> Lcd<I2C, D> {
        self.lcd
    }

    fn track(&mut self, result: Result<(), DisplayError>) {
        match result {
            Ok(()) if self.faulted => {
                info!("LCD: writes recovered");
                self.faulted = false;
            }
            Ok(()) => {}
            Err(DisplayError::OutOfBounds) => {
                warn!("LCD: cursor out of bounds");
            }
            Err(e) => {
                if !self.faulted {
                    warn!("LCD: {}", e);
                    self.faulted = true;
                }
            }
        }
    }
}

impl<I2C: I2c, D: DelayNs> DisplayPort for LcdDisplay<I2C, D> {
    fn move_cursor(&mut self, column: u8, row: u8) {
        let result = self.lcd.set_cursor(column, row);
        self.track(result);
    }

    fn write_text(&mut self, text: &str) {
        let result = self.lcd.write_str(text);
        self.track(result);
    }

    fn clear(&mut self) {
        let result = self.lcd.clear();
        self.track(result);
    }
}
