//! GPIO / peripheral pin assignments for the Suijin fixture board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Pumps (logic-level MOSFET low-side switches, active HIGH)
// ---------------------------------------------------------------------------

/// Pump A, first zone ("tree").
pub const PUMP_A_GPIO: i32 = 4;
/// Pump B, second zone ("pots").
pub const PUMP_B_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Enclosure cooling fan (active HIGH)
// ---------------------------------------------------------------------------

pub const FAN_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Status LED (heartbeat)
// ---------------------------------------------------------------------------

pub const STATUS_LED_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Menu buttons (active-low with internal pull-up)
// ---------------------------------------------------------------------------

pub const BUTTON_SELECT_GPIO: i32 = 15;
pub const BUTTON_ENTER_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// I²C buses: RTC on I2C0, LCD on I2C1
// ---------------------------------------------------------------------------

pub const RTC_I2C_SDA_GPIO: i32 = 8;
pub const RTC_I2C_SCL_GPIO: i32 = 9;
pub const LCD_I2C_SDA_GPIO: i32 = 10;
pub const LCD_I2C_SCL_GPIO: i32 = 11;

/// DS3231 fixed 7-bit address.
pub const RTC_I2C_ADDR: u8 = 0x68;
/// PCF8574 LCD backpack (A0..A2 high).
pub const LCD_I2C_ADDR: u8 = 0x27;
/// Bus clock for both I²C controllers.
pub const I2C_BAUD_HZ: u32 = 100_000;
