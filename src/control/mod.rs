//! Closed-loop controllers.

pub mod thermostat;
