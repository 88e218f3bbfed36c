//! HD44780 16x2 character LCD behind a PCF8574 I²C backpack.
//!
//! The backpack maps expander bits to the LCD bus as:
//!
//! | Bit | Signal    |
//! |-----|-----------|
//! | P0  | RS        |
//! | P1  | RW (tied low in practice, always written 0) |
//! | P2  | E         |
//! | P3  | Backlight |
//! | P4-P7 | D4-D7   |
//!
//! Every byte goes out as two nibbles, each latched by a high-then-low pulse
//! on E.  The driver is write-only; busy-flag polling is replaced by fixed
//! delays from the datasheet.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, I2c};

use crate::error::DisplayError;

pub const COLUMNS: u8 = 16;
pub const ROWS: u8 = 2;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40];

pub struct Lcd<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    backlight: u8,
}

impl<I2C: I2c, D: DelayNs> Lcd<I2C, D> {
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight: BACKLIGHT,
        }
    }

    /// Power-on reset into 4-bit mode, then display on, cleared, cursor
    /// hidden, left-to-right entry.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(50);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02, false)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE_INC)
    }

    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_us(2_000);
        Ok(())
    }

    pub fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), DisplayError> {
        if column >= COLUMNS || row >= ROWS {
            return Err(DisplayError::OutOfBounds);
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + column))
    }

    /// Write ASCII text at the cursor.  Non-ASCII characters are sent as `?`.
    pub fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        for ch in text.chars() {
            let byte = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.write_byte(byte, true)?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.write_byte(cmd, false)
    }

    fn write_byte(&mut self, byte: u8, data: bool) -> Result<(), DisplayError> {
        self.write_nibble(byte >> 4, data)?;
        self.write_nibble(byte & 0x0F, data)
    }

    fn write_nibble(&mut self, nibble: u8, data: bool) -> Result<(), DisplayError> {
        let mut bits = (nibble << 4) | self.backlight;
        if data {
            bits |= RS;
        }
        self.expander_write(bits | EN)?;
        self.delay.delay_us(1);
        self.expander_write(bits)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, bits: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[bits])
            .map_err(|e| DisplayError::Bus(e.kind()))
    }
}
