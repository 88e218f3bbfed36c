//! Inbound commands to the application service.
//!
//! The menu turns button edges into these; the
//! [`AppService`](super::service::AppService) applies them to the schedule.

/// Requests that change the schedule target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Drop the pending target and move to the next default window.
    SkipToNextWindow,
    /// Start a cycle shortly (after the configured manual offset).
    WaterSoon,
}
