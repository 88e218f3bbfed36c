//! Monotonic uptime for the run-loop heartbeat gate.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` (microsecond
//!   precision, monotonic).
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant`.

pub struct Uptime {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Uptime {
    fn default() -> Self {
        Self::new()
    }
}

impl Uptime {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Milliseconds since boot.
    #[cfg(target_os = "espidf")]
    pub fn millis(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    /// Milliseconds since construction.
    #[cfg(not(target_os = "espidf"))]
    pub fn millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Opens once per `interval_ms` of uptime.
#[derive(Debug, Clone)]
pub struct HeartbeatGate {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl HeartbeatGate {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            last_ms: None,
        }
    }

    /// `true` if a heartbeat is due at `now_ms`.  The first call always
    /// opens; later beats stay on a fixed cadence.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.last_ms {
            None => {
                self.last_ms = Some(now_ms);
                true
            }
            Some(last) if now_ms.saturating_sub(last) >= self.interval_ms => {
                let behind = (now_ms - last) / self.interval_ms;
                // Missed beats are skipped, not replayed.
                self.last_ms = Some(last + behind * self.interval_ms);
                true
            }
            Some(_) => false,
        }
    }
}
