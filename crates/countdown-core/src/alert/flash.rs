use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::storage::FlashConfig;

/// Opacity curve of the completion flash: shown at `peak_opacity`, held for
/// `hold`, faded linearly to transparent over `fade`, then removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlashTimeline {
    pub peak_opacity: f32,
    pub hold: Duration,
    pub fade: Duration,
}

impl Default for FlashTimeline {
    fn default() -> Self {
        Self {
            peak_opacity: 0.8,
            hold: Duration::from_millis(200),
            fade: Duration::from_millis(500),
        }
    }
}

impl From<&FlashConfig> for FlashTimeline {
    fn from(cfg: &FlashConfig) -> Self {
        Self {
            peak_opacity: cfg.opacity.clamp(0.0, 1.0),
            hold: Duration::from_millis(cfg.hold_ms),
            fade: Duration::from_millis(cfg.fade_ms),
        }
    }
}

impl FlashTimeline {
    /// Time from trigger until the overlay is removed.
    pub fn total(&self) -> Duration {
        self.hold.saturating_add(self.fade)
    }

    /// Overlay opacity `elapsed` after the trigger, or `None` once removed.
    pub fn opacity_at(&self, elapsed: Duration) -> Option<f32> {
        if elapsed < self.hold {
            return Some(self.peak_opacity);
        }
        if elapsed >= self.total() {
            return None;
        }
        let into_fade = (elapsed - self.hold).as_secs_f32();
        let progress = into_fade / self.fade.as_secs_f32();
        Some(self.peak_opacity * (1.0 - progress))
    }

    /// First instant at which the overlay is less than `fraction` of its
    /// peak opacity.
    pub fn below_fraction_at(&self, fraction: f32) -> Duration {
        let left = 1.0 - f64::from(fraction.clamp(0.0, 1.0));
        let fading = Duration::try_from_secs_f64(self.fade.as_secs_f64() * left)
            .unwrap_or(Duration::MAX);
        self.hold.saturating_add(fading)
    }
}
