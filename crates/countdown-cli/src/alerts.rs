//! Terminal renditions of the completion alerts.

use std::io::Write;
use std::time::Duration;

use countdown_core::storage::SoundConfig;
use countdown_core::{AlertError, AudioSink, FlashSink, FlashTimeline, ToneSpec};

const REVERSE_ON: &[u8] = b"\x1b[?5h";
const REVERSE_OFF: &[u8] = b"\x1b[?5l";

/// Flashes the whole terminal by switching it to reverse video.
///
/// A terminal has no opacity, so the overlay counts as shown while it is
/// at least half as opaque as its peak.
pub struct TerminalFlash {
    timeline: FlashTimeline,
}

impl TerminalFlash {
    pub fn new(timeline: FlashTimeline) -> Self {
        Self { timeline }
    }
}

/// Reverse-video switch points for `timeline`: "on" at zero, "off" once the
/// overlay drops below half its peak.
pub fn reverse_video_steps(timeline: &FlashTimeline) -> Vec<(Duration, bool)> {
    if timeline.peak_opacity <= 0.0 {
        return vec![(Duration::ZERO, false)];
    }
    vec![
        (Duration::ZERO, true),
        (timeline.below_fraction_at(0.5), false),
    ]
}

impl FlashSink for TerminalFlash {
    fn flash(&mut self) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no runtime, flash skipped");
            return;
        };
        let steps = reverse_video_steps(&self.timeline);
        handle.spawn(async move {
            let start = tokio::time::Instant::now();
            for (at, on) in steps {
                tokio::time::sleep_until(start + at).await;
                let mut out = std::io::stdout();
                let _ = out.write_all(if on { REVERSE_ON } else { REVERSE_OFF });
                let _ = out.flush();
            }
        });
    }
}

/// Leave the terminal out of reverse video, whatever state a cut-short
/// flash left it in.
pub fn restore_terminal() {
    let mut out = std::io::stdout();
    let _ = out.write_all(REVERSE_OFF);
    let _ = out.flush();
}

/// Plays the completion tone.
///
/// With the `audio` feature the tone goes to the default output device on
/// its own thread; otherwise the terminal bell rings.
pub struct Chime {
    sound: SoundConfig,
}

impl Chime {
    pub fn new(sound: SoundConfig) -> Self {
        Self { sound }
    }

    /// How long playback keeps going after [`AudioSink::chime`] returns.
    pub fn playback_time(&self) -> Duration {
        if cfg!(feature = "audio") {
            Duration::from_millis(self.sound.duration_ms)
        } else {
            Duration::ZERO
        }
    }
}

impl AudioSink for Chime {
    fn chime(&mut self) -> Result<(), AlertError> {
        let spec = ToneSpec::try_from(&self.sound)?;
        play(spec)
    }
}

#[cfg(feature = "audio")]
fn play(spec: ToneSpec) -> Result<(), AlertError> {
    let tone = spec.samples()?;
    std::thread::Builder::new()
        .name("countdown-chime".into())
        .spawn(move || {
            if let Err(e) = output::play_blocking(tone) {
                tracing::debug!(error = %e, "tone playback failed");
            }
        })
        .map_err(|e| AlertError::Unavailable(e.to_string()))?;
    Ok(())
}

#[cfg(not(feature = "audio"))]
fn play(spec: ToneSpec) -> Result<(), AlertError> {
    spec.validate()?;
    // stderr keeps the bell out of JSON output on stdout.
    let mut err = std::io::stderr();
    err.write_all(b"\x07")
        .and_then(|_| err.flush())
        .map_err(|e| AlertError::Unavailable(e.to_string()))
}

#[cfg(feature = "audio")]
mod output {
    use std::time::Duration;

    use countdown_core::{AlertError, Tone};

    struct ToneSource(Tone);

    impl Iterator for ToneSource {
        type Item = f32;

        fn next(&mut self) -> Option<f32> {
            self.0.next()
        }
    }

    impl rodio::Source for ToneSource {
        fn current_frame_len(&self) -> Option<usize> {
            Some(self.0.remaining() as usize)
        }

        fn channels(&self) -> u16 {
            1
        }

        fn sample_rate(&self) -> u32 {
            self.0.spec().sample_rate
        }

        fn total_duration(&self) -> Option<Duration> {
            Some(self.0.spec().duration)
        }
    }

    pub fn play_blocking(tone: Tone) -> Result<(), AlertError> {
        let unavailable = |e: &dyn std::fmt::Display| AlertError::Unavailable(e.to_string());
        let (_stream, handle) = rodio::OutputStream::try_default().map_err(|e| unavailable(&e))?;
        let sink = rodio::Sink::try_new(&handle).map_err(|e| unavailable(&e))?;
        sink.append(ToneSource(tone));
        sink.sleep_until_end();
        Ok(())
    }
}
