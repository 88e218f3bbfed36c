//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                 |
//! |------------|-------------|-----------------------------|
//! | `display`  | DisplayPort | HD44780 LCD via PCF8574     |
//! | `hardware` | OutputPort  | Pump/fan MOSFETs, LED GPIO  |
//! | `log_sink` | EventSink   | Serial log output           |
//! | `rtc`      | ClockPort   | DS3231 RTC                  |
//! | `time`     | -           | ESP32 system timer (uptime) |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod rtc;
pub mod time;
