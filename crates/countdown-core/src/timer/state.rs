use serde::{Deserialize, Serialize};

/// Current mode of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    /// Countdown reached zero while running.
    Completed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Completed => "completed",
        }
    }
}

/// Countdown state owned by the controller.
///
/// `remaining_secs` is unsigned, so it can never drop below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_secs: u64,
    pub phase: Phase,
}

impl TimerState {
    pub fn new() -> Self {
        Self {
            remaining_secs: 0,
            phase: Phase::Idle,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
