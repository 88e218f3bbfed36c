//! DS3231 real-time clock driver.
//!
//! Generic over any `embedded_hal::i2c::I2c` bus so the host tests can drive
//! it with a register-map mock.
//!
//! ## Register map (subset)
//!
//! | Addr | Contents                                   |
//! |------|--------------------------------------------|
//! | 0x00 | seconds (BCD)                              |
//! | 0x01 | minutes (BCD)                              |
//! | 0x02 | hours (BCD, bit 6 = 12 h mode, bit 5 = PM) |
//! | 0x03 | day of week (1-7, unused)                  |
//! | 0x04 | date (BCD)                                 |
//! | 0x05 | month (BCD, bit 7 = century)               |
//! | 0x06 | year (BCD, 00-99)                          |
//! | 0x0E | control                                    |
//! | 0x11 | temperature MSB (signed integer °C)        |
//! | 0x12 | temperature LSB (bits 7-6 = 0.25 °C steps) |

use embedded_hal::i2c::{Error as _, I2c};

use crate::error::RtcError;
use crate::schedule::TimeOfDay;

const REG_SECONDS: u8 = 0x00;
const REG_CONTROL: u8 = 0x0E;
const REG_TEMP_MSB: u8 = 0x11;

const HOUR_12H_MODE: u8 = 0x40;
const HOUR_PM: u8 = 0x20;
const MONTH_CENTURY: u8 = 0x80;

/// Oscillator enabled, square wave off, alarm interrupts disabled.
pub const CONTROL_DEFAULT: u8 = 0x1C;

const SECS_PER_DAY: u64 = 86_400;

/// Decoded calendar registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub time: TimeOfDay,
}

impl DateTime {
    /// Seconds since 1970-01-01T00:00:00 (the RTC runs on local time, which
    /// is fine for deadlines since only differences matter).
    pub fn epoch_seconds(&self) -> u64 {
        let days = days_from_civil(i32::from(self.year), u32::from(self.month), u32::from(self.day));
        days as u64 * SECS_PER_DAY + u64::from(self.time.seconds_of_day())
    }
}

pub struct Ds3231<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Read seconds..year in one burst so the fields are coherent.
    pub fn datetime(&mut self) -> Result<DateTime, RtcError> {
        let mut regs = [0u8; 7];
        self.read_regs(REG_SECONDS, &mut regs)?;
        decode_datetime(&regs)
    }

    pub fn time(&mut self) -> Result<TimeOfDay, RtcError> {
        let mut regs = [0u8; 3];
        self.read_regs(REG_SECONDS, &mut regs)?;
        decode_time(&regs)
    }

    pub fn epoch_seconds(&mut self) -> Result<u64, RtcError> {
        Ok(self.datetime()?.epoch_seconds())
    }

    /// Raw temperature register pair as a left-aligned signed 16-bit value.
    pub fn temperature_raw(&mut self) -> Result<i16, RtcError> {
        let mut regs = [0u8; 2];
        self.read_regs(REG_TEMP_MSB, &mut regs)?;
        Ok(i16::from_be_bytes(regs))
    }

    pub fn set_control(&mut self, value: u8) -> Result<(), RtcError> {
        self.i2c
            .write(self.address, &[REG_CONTROL, value])
            .map_err(|e| RtcError::Bus(e.kind()))
    }

    #[cfg(test)]
    pub(crate) fn release(self) -> I2C {
        self.i2c
    }

    fn read_regs(&mut self, start: u8, buf: &mut [u8]) -> Result<(), RtcError> {
        self.i2c
            .write_read(self.address, &[start], buf)
            .map_err(|e| RtcError::Bus(e.kind()))
    }
}

fn bcd(value: u8, mask: u8, max: u8) -> Result<u8, RtcError> {
    let v = value & mask;
    let (tens, ones) = (v >> 4, v & 0x0F);
    if ones > 9 {
        return Err(RtcError::InvalidData);
    }
    let decoded = tens * 10 + ones;
    if decoded > max {
        return Err(RtcError::InvalidData);
    }
    Ok(decoded)
}

fn decode_hours(reg: u8) -> Result<u8, RtcError> {
    if reg & HOUR_12H_MODE == 0 {
        return bcd(reg, 0x3F, 23);
    }
    let h12 = bcd(reg, 0x1F, 12)?;
    if h12 == 0 {
        return Err(RtcError::InvalidData);
    }
    let pm = reg & HOUR_PM != 0;
    Ok(match (h12, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    })
}

fn decode_time(regs: &[u8]) -> Result<TimeOfDay, RtcError> {
    Ok(TimeOfDay::new(
        decode_hours(regs[2])?,
        bcd(regs[1], 0x7F, 59)?,
        bcd(regs[0], 0x7F, 59)?,
    ))
}

fn decode_datetime(regs: &[u8; 7]) -> Result<DateTime, RtcError> {
    let time = decode_time(&regs[..3])?;
    let day = bcd(regs[4], 0x3F, 31)?;
    let month = bcd(regs[5], 0x1F, 12)?;
    if day == 0 || month == 0 {
        return Err(RtcError::InvalidData);
    }
    let century = if regs[5] & MONTH_CENTURY != 0 { 2100 } else { 2000 };
    let year = century + u16::from(bcd(regs[6], 0xFF, 99)?);
    Ok(DateTime {
        year,
        month,
        day,
        time,
    })
}

/// Days since 1970-01-01 for a proleptic Gregorian date (Howard Hinnant).
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = (y - era * 400) as u32;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    i64::from(era) * 146_097 + i64::from(doe) - 719_468
}
