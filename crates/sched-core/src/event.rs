//! Normalized, display-ready events.

use serde::Serialize;

use crate::event_type::{Classifier, EventType};
use crate::grid::{RawDay, RawRoom, RawSession, SpeakerRef, Timestamp};
use crate::types::EventId;

/// Which sessions make it into the event list besides published ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InclusionPolicy {
    /// Show service sessions (breaks, lunch, registration) alongside talks.
    pub include_service_sessions: bool,
}

impl Default for InclusionPolicy {
    fn default() -> Self {
        Self {
            include_service_sessions: true,
        }
    }
}

impl InclusionPolicy {
    /// Whether `session` belongs in the event list under this policy.
    pub fn admits(self, session: &RawSession) -> bool {
        (self.include_service_sessions && session.is_service_session)
            || session.passes_publication_gate()
    }
}

/// A normalized session, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub duration_minutes: i64,
    pub room: String,
    #[serde(rename = "type")]
    pub kind: EventType,
    pub speakers: Vec<SpeakerRef>,
    pub is_service_session: bool,
}

impl Event {
    /// Builds the event for `session` held in `room`.
    pub fn from_session(room: &RawRoom, session: &RawSession, classifier: &Classifier) -> Self {
        Self {
            id: session.id.clone(),
            title: session.title.clone(),
            description: session.description.clone(),
            starts_at: session.starts_at,
            ends_at: session.ends_at,
            duration_minutes: duration_minutes(session.starts_at, session.ends_at),
            room: room.name.clone(),
            kind: classifier.classify(&room.name, session),
            speakers: session.speakers.clone(),
            is_service_session: session.is_service_session,
        }
    }
}

/// Whole minutes between two instants, rounded half up, never negative.
pub fn duration_minutes(start: Timestamp, end: Timestamp) -> i64 {
    let ms = (end - start).num_milliseconds().max(0);
    (ms + 30_000) / 60_000
}

/// Flattens the grid into the events admitted by `policy`.
///
/// Pure: the same grid and policy always yield the same list, so callers
/// replace their previous list wholesale whenever the policy changes.
pub fn normalize(grid: &[RawDay], policy: InclusionPolicy, classifier: &Classifier) -> Vec<Event> {
    let mut events = Vec::new();
    let mut dropped = 0usize;

    for day in grid {
        for room in &day.rooms {
            for session in &room.sessions {
                if policy.admits(session) {
                    events.push(Event::from_session(room, session, classifier));
                } else {
                    dropped += 1;
                }
            }
        }
    }

    tracing::debug!(
        kept = events.len(),
        dropped,
        include_service_sessions = policy.include_service_sessions,
        "normalized grid"
    );
    events
}
