use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change of the controller produces an Event.
/// Front ends may print them; the terminal view ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerConfigured {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Start was requested with nothing on the clock.
    StartRejected {
        at: DateTime<Utc>,
    },
    TimerCompleted {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        remaining_secs: u64,
        display: String,
        low_time: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Event name as it appears in the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TimerConfigured { .. } => "TimerConfigured",
            Event::TimerStarted { .. } => "TimerStarted",
            Event::TimerResumed { .. } => "TimerResumed",
            Event::TimerPaused { .. } => "TimerPaused",
            Event::TimerReset { .. } => "TimerReset",
            Event::StartRejected { .. } => "StartRejected",
            Event::TimerCompleted { .. } => "TimerCompleted",
            Event::StateSnapshot { .. } => "StateSnapshot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_json_carries_kind() {
        let event = Event::TimerPaused {
            remaining_secs: 25,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.kind());
        assert_eq!(json["remaining_secs"], 25);
    }
}
