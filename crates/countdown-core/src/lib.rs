//! # Countdown Core Library
//!
//! This library provides the business logic for the Countdown timer: set a
//! duration, start/pause/reset it, and get a flash and a tone at zero.
//! Front ends (the `countdown` CLI) own the screen, the keyboard and the
//! audio device and talk to the core through small traits.
//!
//! ## Architecture
//!
//! - **Timer Controller**: a state machine (`Idle`, `Running`, `Paused`,
//!   `Completed`) that counts down one second per tick
//! - **Tick Source**: a cancellable periodic task; at most one is live
//! - **Sinks**: display/status/warning rendering and the two one-shot alerts
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerController`]: Core timer state machine
//! - [`Command`]: Inputs dispatched to the controller
//! - [`IntervalTicker`]: Tokio-backed tick source
//! - [`Config`]: Application configuration management

pub mod alert;
pub mod command;
pub mod error;
pub mod events;
pub mod sinks;
pub mod storage;
pub mod tick;
pub mod timer;

pub use alert::{FlashTimeline, Tone, ToneSpec};
pub use command::Command;
pub use error::{AlertError, ConfigError};
pub use events::Event;
pub use sinks::{AudioSink, FlashSink, Status, TimerView};
pub use storage::Config;
pub use tick::{IntervalTicker, TickId, TickSource, TICK_PERIOD};
pub use timer::{
    Controls, DurationInput, InputSource, Phase, TimeDisplay, TimerController, TimerState,
    LOW_TIME_THRESHOLD_SECS,
};
