use serde::{Deserialize, Serialize};

use crate::tick::TickId;

/// Inputs to the controller. Each maps to exactly one controller operation
/// (see [`TimerController::dispatch`](crate::TimerController::dispatch)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Pause,
    Reset,
    /// Pause when running, start otherwise.
    Toggle,
    /// The minutes or seconds field was edited.
    InputChanged,
    Tick(TickId),
}

impl Command {
    /// Keyboard shortcut bindings, keyed by key code.
    pub fn from_key(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(Command::Toggle),
            "Escape" => Some(Command::Reset),
            _ => None,
        }
    }
}
