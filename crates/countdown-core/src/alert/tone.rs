use std::f32::consts::TAU;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AlertError;
use crate::storage::SoundConfig;

/// Completion tone: a sine at `frequency_hz` whose gain ramps exponentially
/// from `start_gain` to `end_gain` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub start_gain: f32,
    pub end_gain: f32,
    pub sample_rate: u32,
}

impl Default for ToneSpec {
    fn default() -> Self {
        Self {
            frequency_hz: 800.0,
            duration: Duration::from_secs(1),
            start_gain: 0.3,
            end_gain: 0.01,
            sample_rate: 44_100,
        }
    }
}

impl TryFrom<&SoundConfig> for ToneSpec {
    type Error = AlertError;

    fn try_from(cfg: &SoundConfig) -> Result<Self, Self::Error> {
        let spec = Self {
            frequency_hz: cfg.frequency_hz,
            duration: Duration::from_millis(cfg.duration_ms),
            start_gain: cfg.start_gain,
            end_gain: cfg.end_gain,
            ..Self::default()
        };
        spec.validate()?;
        Ok(spec)
    }
}

impl ToneSpec {
    /// An exponential ramp needs strictly positive endpoints.
    pub fn validate(&self) -> Result<(), AlertError> {
        if !self.frequency_hz.is_finite() || self.frequency_hz <= 0.0 {
            return Err(AlertError::InvalidTone(format!(
                "frequency must be positive and finite, got {}",
                self.frequency_hz
            )));
        }
        let positive = |g: f32| g.is_finite() && g > 0.0;
        if !positive(self.start_gain) || !positive(self.end_gain) {
            return Err(AlertError::InvalidTone(format!(
                "gains must be positive, got {} -> {}",
                self.start_gain, self.end_gain
            )));
        }
        if self.sample_rate == 0 {
            return Err(AlertError::InvalidTone("sample rate is zero".into()));
        }
        Ok(())
    }

    pub fn total_samples(&self) -> u64 {
        (self.duration.as_secs_f64() * f64::from(self.sample_rate)).round() as u64
    }

    /// Gain `t` seconds into the tone.
    pub fn gain_at(&self, t: f32) -> f32 {
        let length = self.duration.as_secs_f32();
        if length <= 0.0 {
            return self.end_gain;
        }
        let progress = (t / length).clamp(0.0, 1.0);
        self.start_gain * (self.end_gain / self.start_gain).powf(progress)
    }

    /// Mono samples for the whole tone.
    pub fn samples(&self) -> Result<Tone, AlertError> {
        self.validate()?;
        Ok(Tone {
            spec: *self,
            index: 0,
            total: self.total_samples(),
        })
    }
}

/// Iterator over mono `f32` samples in `-1.0..=1.0`.
#[derive(Debug, Clone)]
pub struct Tone {
    spec: ToneSpec,
    index: u64,
    total: u64,
}

impl Tone {
    pub fn spec(&self) -> &ToneSpec {
        &self.spec
    }

    pub fn remaining(&self) -> u64 {
        self.total - self.index
    }
}

impl Iterator for Tone {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.index >= self.total {
            return None;
        }
        let t = self.index as f32 / self.spec.sample_rate as f32;
        self.index += 1;
        Some(self.spec.gain_at(t) * (TAU * self.spec.frequency_hz * t).sin())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.remaining() as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Tone {}
