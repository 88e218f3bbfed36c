//! RTC adapter: DS3231 behind the [`ClockPort`].
//!
//! Bus errors never reach the domain: each read falls back to the last good
//! value, and the first failure after a good read is logged at `warn`.

use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::app::ports::ClockPort;
use crate::drivers::ds3231::Ds3231;
use crate::error::RtcError;
use crate::schedule::TimeOfDay;

pub struct RtcClock<I2C> {
    rtc: Ds3231<I2C>,
    last_time: TimeOfDay,
    last_epoch: u64,
    last_temp_raw: i16,
    faulted: bool,
}

impl<I2C: I2c> RtcClock<I2C> {
    pub fn new(rtc: Ds3231<I2C>) -> Self {
        Self {
            rtc,
            last_time: TimeOfDay::MIDNIGHT,
            last_epoch: 0,
            last_temp_raw: 0,
            faulted: false,
        }
    }

    /// `true` while the most recent bus access failed.
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    fn track<T>(&mut self, what: &str, result: Result<T, RtcError>, last: T) -> T {
        match result {
            Ok(value) => {
                if self.faulted {
                    info!("RTC: {} read recovered", what);
                    self.faulted = false;
                }
                value
            }
            Err(e) => {
                if !self.faulted {
                    warn!("RTC: {} read failed ({}), holding last value", what, e);
                    self.faulted = true;
                }
                last
            }
        }
    }
}

impl<I2C: I2c> ClockPort for RtcClock<I2C> {
    fn current_time(&mut self) -> TimeOfDay {
        let result = self.rtc.time();
        self.last_time = self.track("time", result, self.last_time);
        self.last_time
    }

    fn epoch_seconds(&mut self) -> u64 {
        let result = self.rtc.epoch_seconds();
        self.last_epoch = self.track("date", result, self.last_epoch);
        self.last_epoch
    }

    fn temperature_raw(&mut self) -> i16 {
        let result = self.rtc.temperature_raw();
        self.last_temp_raw = self.track("temperature", result, self.last_temp_raw);
        self.last_temp_raw
    }

    fn set_control_register(&mut self, value: u8) {
        if let Err(e) = self.rtc.set_control(value) {
            warn!("RTC: control write 0x{:02X} failed ({})", value, e);
        }
    }
}
