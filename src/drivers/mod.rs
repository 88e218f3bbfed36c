//! Peripheral drivers: GPIO outputs, buttons, RTC and LCD.

pub mod button;
pub mod ds3231;
pub mod hw_init;
pub mod lcd;
pub mod status_led;
pub mod switch;
