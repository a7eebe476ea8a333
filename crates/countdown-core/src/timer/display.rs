//! Rendering helpers derived from [`TimerState`](super::TimerState).
//!
//! Nothing here is stored; the controller recomputes these values whenever
//! it pushes an update to the view.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::Phase;

/// Minutes and seconds fields as shown on the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDisplay {
    pub minutes: String,
    pub seconds: String,
}

impl TimeDisplay {
    /// Split `remaining_secs` into zero-padded fields.
    ///
    /// Both fields are at least two digits wide. Minutes grow past two
    /// digits instead of wrapping (`6000` seconds renders as `100:00`).
    pub fn from_secs(remaining_secs: u64) -> Self {
        Self {
            minutes: format!("{:02}", remaining_secs / 60),
            seconds: format!("{:02}", remaining_secs % 60),
        }
    }
}

impl fmt::Display for TimeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartLabel {
    Start,
    Resume,
}

impl StartLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StartLabel::Start => "Start",
            StartLabel::Resume => "Resume",
        }
    }
}

/// Which controls are usable in a given phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start_enabled: bool,
    pub start_label: StartLabel,
    pub pause_enabled: bool,
    pub reset_enabled: bool,
}

impl Controls {
    pub fn for_phase(phase: Phase) -> Self {
        Self {
            start_enabled: phase != Phase::Running,
            start_label: if phase == Phase::Paused {
                StartLabel::Resume
            } else {
                StartLabel::Start
            },
            pause_enabled: phase == Phase::Running,
            reset_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_single_digits() {
        let d = TimeDisplay::from_secs(65);
        assert_eq!(d.minutes, "01");
        assert_eq!(d.seconds, "05");
        assert_eq!(d.to_string(), "01:05");
    }

    #[test]
    fn zero_renders_as_double_zero() {
        assert_eq!(TimeDisplay::from_secs(0).to_string(), "00:00");
    }

    #[test]
    fn minutes_do_not_wrap_past_99() {
        assert_eq!(TimeDisplay::from_secs(99 * 60 + 59).to_string(), "99:59");
        assert_eq!(TimeDisplay::from_secs(100 * 60).to_string(), "100:00");
    }

    #[test]
    fn controls_while_running() {
        let c = Controls::for_phase(Phase::Running);
        assert!(!c.start_enabled);
        assert!(c.pause_enabled);
        assert!(c.reset_enabled);
        assert_eq!(c.start_label, StartLabel::Start);
    }

    #[test]
    fn controls_while_paused_offer_resume() {
        let c = Controls::for_phase(Phase::Paused);
        assert!(c.start_enabled);
        assert!(!c.pause_enabled);
        assert_eq!(c.start_label.as_str(), "Resume");
    }

    #[test]
    fn controls_when_idle_or_completed() {
        for phase in [Phase::Idle, Phase::Completed] {
            let c = Controls::for_phase(phase);
            assert!(c.start_enabled);
            assert!(!c.pause_enabled);
            assert!(c.reset_enabled);
            assert_eq!(c.start_label, StartLabel::Start);
        }
    }
}
