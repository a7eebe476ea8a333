//! Countdown controller.
//!
//! Owns the [`TimerState`] and the tick source, and pushes every visible
//! change out through the sinks it was built with. All mutation happens on
//! the caller's thread through `&mut self`; the tick source only delivers
//! [`TickId`]s back to [`TimerController::on_tick`].
//!
//! ## State Transitions
//!
//! ```text
//! Idle ──start──> Running ──pause──> Paused ──start──> Running
//!                    │
//!                    └──tick reaches 0──> Completed ──start──> Running
//!
//! any ──reset──> Idle
//! ```

use chrono::Utc;
use tracing::{debug, info, trace};

use super::display::{Controls, TimeDisplay};
use super::input::InputSource;
use super::state::{Phase, TimerState};
use crate::command::Command;
use crate::events::Event;
use crate::sinks::{AudioSink, FlashSink, Status, TimerView};
use crate::tick::{TickId, TickSource};

/// At or below this many seconds the low-time warning is shown.
pub const LOW_TIME_THRESHOLD_SECS: u64 = 10;

pub struct TimerController {
    state: TimerState,
    low_time: bool,
    input: Box<dyn InputSource>,
    view: Box<dyn TimerView>,
    flash: Box<dyn FlashSink>,
    audio: Box<dyn AudioSink>,
    ticker: Box<dyn TickSource>,
}

impl TimerController {
    /// Build an idle controller with nothing on the clock and render it.
    pub fn new(
        input: impl InputSource + 'static,
        view: impl TimerView + 'static,
        flash: impl FlashSink + 'static,
        audio: impl AudioSink + 'static,
        ticker: impl TickSource + 'static,
    ) -> Self {
        let mut controller = Self {
            state: TimerState::new(),
            low_time: false,
            input: Box::new(input),
            view: Box::new(view),
            flash: Box::new(flash),
            audio: Box::new(audio),
            ticker: Box::new(ticker),
        };
        controller.render_time();
        controller.render_controls();
        controller.view.show_status(Status::Ready);
        controller
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.state.remaining_secs
    }

    /// Whether the low-time warning is currently shown.
    pub fn low_time(&self) -> bool {
        self.low_time
    }

    pub fn display(&self) -> TimeDisplay {
        TimeDisplay::from_secs(self.state.remaining_secs)
    }

    pub fn controls(&self) -> Controls {
        Controls::for_phase(self.state.phase)
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            display: self.display().to_string(),
            low_time: self.low_time,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Run the controller operation bound to `command`.
    pub fn dispatch(&mut self, command: Command) -> Option<Event> {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Reset => self.reset(),
            Command::Toggle => {
                if self.state.phase == Phase::Running {
                    self.pause()
                } else {
                    self.start()
                }
            }
            Command::InputChanged => self.configure_from_input(),
            Command::Tick(id) => self.on_tick(id),
        }
    }

    /// Set the clock to `minutes:seconds`. Ignored while running.
    pub fn configure(&mut self, minutes: u32, seconds: u32) -> Option<Event> {
        if self.state.phase == Phase::Running {
            trace!("configure ignored while running");
            return None;
        }
        self.state.remaining_secs = u64::from(minutes) * 60 + u64::from(seconds);
        self.render_time();
        debug!(remaining_secs = self.state.remaining_secs, "timer configured");
        Some(Event::TimerConfigured {
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// [`configure`](Self::configure) with the input's current values.
    pub fn configure_from_input(&mut self) -> Option<Event> {
        let (minutes, seconds) = (self.input.minutes(), self.input.seconds());
        self.configure(minutes, seconds)
    }

    pub fn start(&mut self) -> Option<Event> {
        let resuming = match self.state.phase {
            Phase::Running => {
                trace!("start ignored, already running");
                return None;
            }
            Phase::Paused => true,
            Phase::Idle | Phase::Completed => {
                self.configure_from_input();
                false
            }
        };

        if self.state.remaining_secs == 0 {
            debug!("start rejected, no time set");
            self.view.show_status(Status::NoTimeSet);
            return Some(Event::StartRejected { at: Utc::now() });
        }

        // Outside Running nothing should be ticking; make sure of it.
        if self.ticker.is_active() {
            self.ticker.deactivate();
        }
        self.state.phase = Phase::Running;
        let tick_id = self.ticker.activate();
        self.render_controls();
        self.view.show_status(Status::Running);

        let remaining_secs = self.state.remaining_secs;
        debug!(remaining_secs, tick_id = tick_id.0, resuming, "timer running");
        let at = Utc::now();
        Some(if resuming {
            Event::TimerResumed { remaining_secs, at }
        } else {
            Event::TimerStarted { remaining_secs, at }
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state.phase != Phase::Running {
            trace!(phase = self.state.phase.as_str(), "pause ignored");
            return None;
        }
        self.ticker.deactivate();
        self.state.phase = Phase::Paused;
        self.render_controls();
        self.view.show_status(Status::Paused);
        self.set_warning(false);

        debug!(remaining_secs = self.state.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.ticker.deactivate();
        self.state.phase = Phase::Idle;
        self.configure_from_input();
        self.render_controls();
        self.view.show_status(Status::Ready);
        self.set_warning(false);

        debug!(remaining_secs = self.state.remaining_secs, "timer reset");
        Some(Event::TimerReset {
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Deliver a tick from the tick source. Ticks from a cancelled
    /// activation are dropped.
    pub fn on_tick(&mut self, id: TickId) -> Option<Event> {
        if self.ticker.current() != Some(id) {
            trace!(tick_id = id.0, "stale tick dropped");
            return None;
        }
        self.tick()
    }

    /// Count down one second. Returns `Some(Event::TimerCompleted)` when the
    /// clock reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state.phase != Phase::Running {
            trace!(phase = self.state.phase.as_str(), "tick ignored");
            return None;
        }
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        self.render_time();
        trace!(remaining_secs = self.state.remaining_secs, "tick");

        if self.state.remaining_secs == 0 {
            return Some(self.complete());
        }
        if self.state.remaining_secs <= LOW_TIME_THRESHOLD_SECS {
            self.set_warning(true);
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self) -> Event {
        self.ticker.deactivate();
        self.state.phase = Phase::Completed;
        self.state.remaining_secs = 0;
        self.render_time();
        self.render_controls();
        self.view.show_status(Status::TimesUp);
        self.set_warning(false);

        self.flash.flash();
        if let Err(e) = self.audio.chime() {
            debug!(error = %e, "audio alert skipped");
        }

        info!("countdown complete");
        Event::TimerCompleted { at: Utc::now() }
    }

    fn set_warning(&mut self, active: bool) {
        self.low_time = active;
        self.view.set_warning(active);
    }

    fn render_time(&mut self) {
        let display = self.display();
        self.view.show_time(&display);
    }

    fn render_controls(&mut self) {
        let controls = self.controls();
        self.view.show_controls(&controls);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlertError;
    use crate::sinks::{NullView, Silent};
    use crate::timer::DurationInput;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Ticker {
        next: u64,
        current: Option<TickId>,
    }

    impl TickSource for Ticker {
        fn activate(&mut self) -> TickId {
            self.next += 1;
            self.current = Some(TickId(self.next));
            TickId(self.next)
        }
        fn deactivate(&mut self) {
            self.current = None;
        }
        fn current(&self) -> Option<TickId> {
            self.current
        }
    }

    struct FailingAudio(Rc<RefCell<u32>>);

    impl AudioSink for FailingAudio {
        fn chime(&mut self) -> Result<(), AlertError> {
            *self.0.borrow_mut() += 1;
            Err(AlertError::Unavailable("no device".into()))
        }
    }

    fn controller(minutes: u32, seconds: u32) -> TimerController {
        TimerController::new(
            DurationInput::from_values(minutes, seconds),
            NullView,
            Silent,
            Silent,
            Ticker::default(),
        )
    }

    #[test]
    fn starts_idle_with_zero() {
        let c = controller(1, 0);
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.remaining_secs(), 0);
        assert!(!c.is_ticking());
    }

    #[test]
    fn start_reads_input() {
        let mut c = controller(1, 30);
        assert!(matches!(
            c.start(),
            Some(Event::TimerStarted { remaining_secs: 90, .. })
        ));
        assert_eq!(c.phase(), Phase::Running);
        assert!(c.is_ticking());
    }

    #[test]
    fn start_with_zero_is_rejected() {
        let mut c = controller(0, 0);
        assert!(matches!(c.start(), Some(Event::StartRejected { .. })));
        assert_eq!(c.phase(), Phase::Idle);
        assert!(!c.is_ticking());
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut c = controller(0, 5);
        c.start();
        assert!(c.start().is_none());
    }

    #[test]
    fn configure_ignored_while_running() {
        let mut c = controller(0, 30);
        c.start();
        assert!(c.configure(5, 0).is_none());
        assert_eq!(c.remaining_secs(), 30);
    }

    #[test]
    fn toggle_pauses_then_resumes() {
        let mut c = controller(0, 30);
        c.dispatch(Command::Toggle);
        assert_eq!(c.phase(), Phase::Running);
        c.dispatch(Command::Toggle);
        assert_eq!(c.phase(), Phase::Paused);
        assert!(matches!(
            c.dispatch(Command::Toggle),
            Some(Event::TimerResumed { remaining_secs: 30, .. })
        ));
    }

    #[test]
    fn stale_tick_is_dropped() {
        let mut c = controller(0, 30);
        c.start();
        let stale = TickId(1);
        c.pause();
        c.start();
        assert!(c.on_tick(stale).is_none());
        assert_eq!(c.remaining_secs(), 30);
        c.on_tick(TickId(2));
        assert_eq!(c.remaining_secs(), 29);
    }

    #[test]
    fn tick_outside_running_does_nothing() {
        let mut c = controller(0, 30);
        c.configure(0, 30);
        assert!(c.tick().is_none());
        assert_eq!(c.remaining_secs(), 30);
    }

    #[test]
    fn audio_failure_does_not_block_completion() {
        let calls = Rc::new(RefCell::new(0));
        let mut c = TimerController::new(
            DurationInput::from_values(0, 1),
            NullView,
            Silent,
            FailingAudio(calls.clone()),
            Ticker::default(),
        );
        c.start();
        assert!(matches!(c.tick(), Some(Event::TimerCompleted { .. })));
        assert_eq!(c.phase(), Phase::Completed);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut c = controller(2, 5);
        c.reset();
        match c.snapshot() {
            Event::StateSnapshot {
                phase,
                remaining_secs,
                display,
                low_time,
                ..
            } => {
                assert_eq!(phase, Phase::Idle);
                assert_eq!(remaining_secs, 125);
                assert_eq!(display, "02:05");
                assert!(!low_time);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
