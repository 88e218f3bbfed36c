//! System configuration parameters
//!
//! All tunable parameters for the watering fixture.  Defaults are the
//! bench-tuned values for the two-zone rig; the firmware image can carry
//! an override document (`config/suijin.json`) that is validated at boot.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WateringConfig {
    // --- Pumps ---
    /// Pump A run time per cycle (seconds)
    pub pump_a_run_secs: u32,
    /// Pump B run time per cycle (seconds)
    pub pump_b_run_secs: u32,
    /// Pause after each pump before the next step (seconds)
    pub pause_secs: u32,

    // --- Fan thermostat ---
    /// Fan switches on above this temperature (Celsius)
    pub fan_on_above_c: f32,
    /// Fan switches off below this temperature (Celsius)
    pub fan_off_below_c: f32,

    // --- Buttons ---
    /// Consecutive high samples required for a stable press (4 or 8)
    pub debounce_samples: u8,

    // --- Schedule ---
    /// Offset applied by the menu's manual trigger (seconds)
    pub manual_trigger_offset_secs: u32,
    /// First cycle this many seconds after boot; `None` waits for the next window
    pub boot_trigger_offset_secs: Option<u32>,

    // --- Timing ---
    /// Run-loop pacing delay (milliseconds)
    pub loop_interval_ms: u32,
    /// Heartbeat period: clock read, sequencer, fan, display (milliseconds)
    pub heartbeat_interval_ms: u32,
}

impl Default for WateringConfig {
    fn default() -> Self {
        Self {
            // Pumps
            pump_a_run_secs: 30,
            pump_b_run_secs: 65,
            pause_secs: 2,

            // Fan
            fan_on_above_c: 34.0,
            fan_off_below_c: 28.0,

            // Buttons
            debounce_samples: 4,

            // Schedule
            manual_trigger_offset_secs: 10,
            boot_trigger_offset_secs: Some(10),

            // Timing
            loop_interval_ms: 20,        // 50 Hz
            heartbeat_interval_ms: 1000, // 1 Hz
        }
    }
}

impl WateringConfig {
    /// Parse a JSON document and validate it.  Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the fixture misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pump_a_run_secs == 0 || self.pump_b_run_secs == 0 {
            return Err(ConfigError::ValidationFailed("pump run time must be non-zero"));
        }
        if self.fan_on_above_c <= self.fan_off_below_c {
            return Err(ConfigError::ValidationFailed(
                "fan_on_above_c must be above fan_off_below_c",
            ));
        }
        if !matches!(self.debounce_samples, 4 | 8) {
            return Err(ConfigError::ValidationFailed("debounce_samples must be 4 or 8"));
        }
        if self.loop_interval_ms == 0 || self.loop_interval_ms >= self.heartbeat_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "loop interval must be non-zero and shorter than the heartbeat",
            ));
        }
        // An offset of zero (or a whole day) lands on "now", which the
        // schedule has already seen, so the cycle would never fire.
        if !(1..SECS_PER_DAY).contains(&self.manual_trigger_offset_secs) {
            return Err(ConfigError::ValidationFailed(
                "manual_trigger_offset_secs must be between 1 s and one day",
            ));
        }
        if self
            .boot_trigger_offset_secs
            .is_some_and(|secs| !(1..SECS_PER_DAY).contains(&secs))
        {
            return Err(ConfigError::ValidationFailed(
                "boot_trigger_offset_secs must be between 1 s and one day",
            ));
        }
        Ok(())
    }
}

const SECS_PER_DAY: u32 = 86_400;
