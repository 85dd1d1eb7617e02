//! The countdown ticker.
//!
//! A [`Countdown`] owns a single tokio task that emits [`Event::Tick`] into
//! the session's event channel once per period. Dropping the handle aborts
//! the task, so replacing a countdown never leaves two tickers alive.
//!
//! Periods shorter than [`MIN_TICK_PERIOD`] (including zero) are raised to it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{trace, warn};

use super::machine::Event;
use super::state::AttemptId;

/// Shortest accepted tick period.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

pub struct Countdown {
    attempt: AttemptId,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Start ticking for `attempt`. The first tick fires one `period` from now.
    pub fn start(
        attempt: AttemptId,
        period: Duration,
        events: mpsc::UnboundedSender<Event>,
    ) -> Self {
        if period < MIN_TICK_PERIOD {
            warn!(?period, min = ?MIN_TICK_PERIOD, "tick period too short, clamping");
        }
        let period = period.max(MIN_TICK_PERIOD);

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                trace!(%attempt, "countdown tick");
                if events.send(Event::Tick { attempt }).is_err() {
                    break;
                }
            }
        });

        Self { attempt, handle }
    }

    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    #[cfg(test)]
    pub(crate) fn abort_handle(&self) -> tokio::task::AbortHandle {
        self.handle.abort_handle()
    }

    pub fn stop(self) {
        // Drop aborts the task.
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
