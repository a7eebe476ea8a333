//! Output side of the controller.
//!
//! The controller never renders anything itself; it pushes updates through
//! these traits. Front ends implement them (the CLI draws to the terminal,
//! tests record calls).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AlertError;
use crate::timer::{Controls, TimeDisplay};

/// Status line values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Running,
    Paused,
    Ready,
    NoTimeSet,
    TimesUp,
}

impl Status {
    /// Short machine-friendly form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Running => "running",
            Status::Paused => "paused",
            Status::Ready => "ready",
            Status::NoTimeSet => "no time set",
            Status::TimesUp => "time's up",
        }
    }

    /// Sentence shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Status::Running => "Timer running...",
            Status::Paused => "Timer paused",
            Status::Ready => "Ready to start",
            Status::NoTimeSet => "Please set a time first",
            Status::TimesUp => "Time's up!",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders timer state.
pub trait TimerView {
    fn show_time(&mut self, display: &TimeDisplay);

    fn show_status(&mut self, status: Status);

    /// Toggle the low-time warning styling. May be called repeatedly with
    /// the same value.
    fn set_warning(&mut self, active: bool);

    fn show_controls(&mut self, _controls: &Controls) {}
}

/// One-shot visual alert. Must return immediately.
pub trait FlashSink {
    fn flash(&mut self);
}

/// One-shot audible alert. Must return immediately.
///
/// Errors are reported but never affect the timer.
pub trait AudioSink {
    fn chime(&mut self) -> Result<(), AlertError>;
}

impl<T: TimerView + ?Sized> TimerView for Box<T> {
    fn show_time(&mut self, display: &TimeDisplay) {
        (**self).show_time(display)
    }
    fn show_status(&mut self, status: Status) {
        (**self).show_status(status)
    }
    fn set_warning(&mut self, active: bool) {
        (**self).set_warning(active)
    }
    fn show_controls(&mut self, controls: &Controls) {
        (**self).show_controls(controls)
    }
}

impl<T: FlashSink + ?Sized> FlashSink for Box<T> {
    fn flash(&mut self) {
        (**self).flash()
    }
}

impl<T: AudioSink + ?Sized> AudioSink for Box<T> {
    fn chime(&mut self) -> Result<(), AlertError> {
        (**self).chime()
    }
}

/// View that drops every update.
#[derive(Debug, Default)]
pub struct NullView;

impl TimerView for NullView {
    fn show_time(&mut self, _display: &TimeDisplay) {}
    fn show_status(&mut self, _status: Status) {}
    fn set_warning(&mut self, _active: bool) {}
}

/// Alert sink for disabled flash or sound.
#[derive(Debug, Default)]
pub struct Silent;

impl FlashSink for Silent {
    fn flash(&mut self) {}
}

impl AudioSink for Silent {
    fn chime(&mut self) -> Result<(), AlertError> {
        Ok(())
    }
}
