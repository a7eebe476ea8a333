mod controller;
mod display;
mod input;
mod state;

pub use controller::{TimerController, LOW_TIME_THRESHOLD_SECS};
pub use display::{Controls, StartLabel, TimeDisplay};
pub use input::{DurationInput, InputSource};
pub use state::{Phase, TimerState};
