//! Periodic tick source driving the countdown.
//!
//! A tick source has at most one live activation. Every activation gets a
//! fresh [`TickId`]; ticks carry the id of the activation that produced
//! them so a tick already in flight when the source was deactivated can be
//! recognised as stale and dropped.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// Interval between ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identifies one activation of a tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickId(pub u64);

pub trait TickSource {
    /// Start firing. Any previous activation is cancelled first.
    fn activate(&mut self) -> TickId;

    /// Stop firing. No tick from the cancelled activation is accepted
    /// afterwards.
    fn deactivate(&mut self);

    /// Id of the live activation, if any.
    fn current(&self) -> Option<TickId>;

    fn is_active(&self) -> bool {
        self.current().is_some()
    }
}

/// Tokio interval task that sends its [`TickId`] down a channel once per
/// period. The receiving loop hands the id back to the controller.
///
/// Must be activated from within a tokio runtime.
pub struct IntervalTicker {
    period: Duration,
    tx: UnboundedSender<TickId>,
    next_id: u64,
    active: Option<(TickId, JoinHandle<()>)>,
}

impl IntervalTicker {
    pub fn new(tx: UnboundedSender<TickId>) -> Self {
        Self::with_period(tx, TICK_PERIOD)
    }

    pub fn with_period(tx: UnboundedSender<TickId>, period: Duration) -> Self {
        Self {
            period,
            tx,
            next_id: 0,
            active: None,
        }
    }
}

impl TickSource for IntervalTicker {
    fn activate(&mut self) -> TickId {
        self.deactivate();

        self.next_id += 1;
        let id = TickId(self.next_id);
        let tx = self.tx.clone();
        let period = self.period;
        let handle = tokio::spawn(async move {
            // First tick one full period after activation.
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(id).is_err() {
                    break;
                }
            }
        });

        tracing::trace!(tick_id = id.0, "tick source activated");
        self.active = Some((id, handle));
        id
    }

    fn deactivate(&mut self) {
        if let Some((id, handle)) = self.active.take() {
            handle.abort();
            tracing::trace!(tick_id = id.0, "tick source deactivated");
        }
    }

    fn current(&self) -> Option<TickId> {
        self.active.as_ref().map(|(id, _)| *id)
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.deactivate();
    }
}
