//! Live-status math against the current time.

use std::time::Duration;

use chrono::Local;
use serde::Serialize;

use crate::event::Event;
use crate::grid::Timestamp;

/// How often the live view refreshes "now".
pub const TICK_INTERVAL: Duration = Duration::from_millis(60_000);

const MINUTE_MS: i64 = 60_000;

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// The machine clock, in the local offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Whether `now` falls inside the event window, both ends inclusive.
pub fn is_live(event: &Event, now: Timestamp) -> bool {
    event.starts_at <= now && now <= event.ends_at
}

/// Whole minutes left in a live event, rounded up. Zero when not live.
pub fn remaining_minutes(event: &Event, now: Timestamp) -> i64 {
    if !is_live(event, now) {
        return 0;
    }
    let ms = (event.ends_at - now).num_milliseconds().max(0);
    (ms + MINUTE_MS - 1) / MINUTE_MS
}

/// Live badge for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LiveStatus {
    pub live: bool,
    pub remaining_minutes: i64,
}

impl LiveStatus {
    pub fn of(event: &Event, now: Timestamp) -> Self {
        Self {
            live: is_live(event, now),
            remaining_minutes: remaining_minutes(event, now),
        }
    }
}
