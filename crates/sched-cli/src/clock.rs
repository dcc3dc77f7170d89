//! Recurring "now" ticker for the live view.

use std::time::Duration;

use sched_core::{Clock, TICK_INTERVAL, Timestamp};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Publishes the current time once per tick.
///
/// The ticker runs as a task on the current `tokio` runtime and must be
/// started from inside one. [`LiveClock::stop`] cancels it; dropping a clock
/// that was never stopped cancels it too.
#[derive(Debug)]
pub struct LiveClock {
    now: watch::Receiver<Timestamp>,
    task: Option<JoinHandle<()>>,
}

impl LiveClock {
    /// Starts ticking every [`TICK_INTERVAL`].
    pub fn start<C>(clock: C) -> Self
    where
        C: Clock + Send + 'static,
    {
        Self::start_with_period(clock, TICK_INTERVAL)
    }

    pub fn start_with_period<C>(clock: C, period: Duration) -> Self
    where
        C: Clock + Send + 'static,
    {
        let (tx, now) = watch::channel(clock.now());
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(clock.now()).is_err() {
                    break;
                }
            }
        });
        tracing::debug!(?period, "live clock started");

        Self {
            now,
            task: Some(task),
        }
    }

    /// The most recently published time.
    pub fn now(&self) -> Timestamp {
        *self.now.borrow()
    }

    /// A receiver that is notified on every tick.
    pub fn subscribe(&self) -> watch::Receiver<Timestamp> {
        self.now.clone()
    }

    /// Waits for the next tick. `None` once the ticker has gone away.
    pub async fn changed(&mut self) -> Option<Timestamp> {
        self.now.changed().await.ok()?;
        Some(*self.now.borrow_and_update())
    }

    /// Cancels the ticker.
    pub fn stop(mut self) {
        self.cancel();
        tracing::debug!("live clock stopped");
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for LiveClock {
    fn drop(&mut self) {
        self.cancel();
    }
}
