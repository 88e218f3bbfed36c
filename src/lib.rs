//! Suijin firmware library.
//!
//! Two-pump plant watering fixture: a DS3231 RTC drives a daily schedule,
//! a table-driven sequencer runs pump A then pump B, a thermostat keeps the
//! enclosure fan in check and a two-button menu on a 16x2 LCD allows manual
//! runs.  Exposes the pure-logic modules for integration testing.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]` within
//! each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod fsm;
pub mod menu;
pub mod pins;
pub mod schedule;

pub mod error;

pub mod adapters;
pub mod drivers;
