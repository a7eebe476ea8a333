//! Completion alert models.
//!
//! Front ends own the actual output device; these types describe what to
//! play so the timing and waveform stay the same everywhere.

mod flash;
mod tone;

pub use flash::FlashTimeline;
pub use tone::{Tone, ToneSpec};
