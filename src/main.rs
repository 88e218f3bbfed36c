//! Suijin Firmware: Main Entry Point
//!
//! Single-threaded polling loop around the hexagonal core.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  RtcClock         LcdDisplay      HardwareOutputs  LogEventSink│
//! │  (ClockPort)      (DisplayPort)   (OutputPort)     (EventSink) │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Schedule · Sequencer FSM · Thermostat · Menu          │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `loop_interval_ms` the buttons are sampled; once per
//! `heartbeat_interval_ms` the RTC is read and the heartbeat block runs.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use log::{error, info, warn};

use suijin::adapters::display::LcdDisplay;
use suijin::adapters::hardware::HardwareOutputs;
use suijin::adapters::log_sink::LogEventSink;
use suijin::adapters::rtc::RtcClock;
use suijin::adapters::time::{HeartbeatGate, Uptime};
use suijin::app::ports::ClockPort;
use suijin::app::service::{AppService, TickInput};
use suijin::config::WateringConfig;
use suijin::drivers::ds3231::{CONTROL_DEFAULT, Ds3231};
use suijin::drivers::hw_init;
use suijin::drivers::lcd::Lcd;
use suijin::pins;

const CONFIG_JSON: &str = include_str!("../config/suijin.json");

// The I²C drivers below take typed pins; keep them in step with `pins`.
const _: () = assert!(
    pins::RTC_I2C_SDA_GPIO == 8
        && pins::RTC_I2C_SCL_GPIO == 9
        && pins::LCD_I2C_SDA_GPIO == 10
        && pins::LCD_I2C_SCL_GPIO == 11,
    "I2C pin map out of sync with pins.rs"
);

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Suijin v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = match WateringConfig::from_json(CONFIG_JSON) {
        Ok(cfg) => {
            info!("Config loaded");
            cfg
        }
        Err(e) => {
            warn!("Embedded config rejected ({}), using defaults", e);
            WateringConfig::default()
        }
    };

    // ── 3. GPIO ───────────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Pumps in an unknown state: halt.
        error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. I²C peripherals ────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::I2C_BAUD_HZ));
    let rtc_bus = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio8,
        peripherals.pins.gpio9,
        &i2c_config,
    )?;
    let lcd_bus = I2cDriver::new(
        peripherals.i2c1,
        peripherals.pins.gpio10,
        peripherals.pins.gpio11,
        &i2c_config,
    )?;

    let mut clock = RtcClock::new(Ds3231::new(rtc_bus, pins::RTC_I2C_ADDR));
    clock.set_control_register(CONTROL_DEFAULT);

    let mut lcd = Lcd::new(lcd_bus, Ets, pins::LCD_I2C_ADDR);
    if let Err(e) = lcd.init() {
        warn!("LCD init failed ({}), continuing headless", e);
    }
    let mut display = LcdDisplay::new(lcd);

    let mut outputs = HardwareOutputs::from_pin_map();
    let mut sink = LogEventSink::new();

    // ── 5. App service ────────────────────────────────────────
    let loop_interval_ms = config.loop_interval_ms;
    let mut gate = HeartbeatGate::new(config.heartbeat_interval_ms);
    let uptime = Uptime::new();

    let mut app = AppService::new(config);
    let boot_reading = clock.read();
    if clock.is_faulted() {
        warn!("RTC offline at boot, schedule runs from 00:00:00 until it answers");
    }
    gate.poll(uptime.millis());
    app.start(boot_reading, &mut outputs, &mut display, &mut sink);

    info!("System ready. Entering run loop.");

    // ── 6. Run loop ───────────────────────────────────────────
    loop {
        // Buttons are active-low.
        let raw_select = !hw_init::gpio_read(pins::BUTTON_SELECT_GPIO);
        let raw_enter = !hw_init::gpio_read(pins::BUTTON_ENTER_GPIO);

        let reading = gate.poll(uptime.millis()).then(|| clock.read());

        app.tick(
            TickInput {
                raw_select,
                raw_enter,
                reading,
            },
            &mut outputs,
            &mut display,
            &mut sink,
        );

        FreeRtos::delay_ms(loop_interval_ms);
    }
}
