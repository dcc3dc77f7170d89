//! Raw schedule feed model and its schema-validating decode.
//!
//! The grid feed is organized as days → rooms → sessions. Decoding is strict
//! at the top level (a feed that is not an array of days is rejected) and
//! lenient per record: a session or speaker that does not match the schema is
//! quarantined with a warning instead of failing the whole feed.
//!
//! # Timestamps
//!
//! Feed timestamps are decoded to [`Timestamp`], a point in time that keeps
//! the offset it was written in. Strings carrying an offset (`Z`, `+02:00`)
//! keep it; offset-free strings are read in the machine's local zone. Ordering,
//! durations and live status compare instants, while clock times and calendar
//! dates are read in the offset the feed wrote.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::{EventId, SpeakerId};

/// A feed instant together with the offset it was written in.
pub type Timestamp = DateTime<FixedOffset>;

/// Errors that reject a feed as a whole.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The feed body does not have the expected top-level shape.
    #[error("malformed {feed} feed: {source}")]
    Malformed {
        feed: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Decoded feed contents plus the number of records that were quarantined.
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    pub items: T,
    pub quarantined: usize,
}

/// Review status of a session as reported by the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Accepted,
    Other(String),
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl<'de> Deserialize<'de> for SessionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let status = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if status == "Accepted" {
            Ok(Self::Accepted)
        } else {
            Ok(Self::Other(status))
        }
    }
}

/// A speaker reference embedded in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerRef {
    pub id: SpeakerId,
    pub name: String,
}

/// One scheduled session, before normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSession {
    #[serde(deserialize_with = "de_session_id")]
    pub id: EventId,
    pub title: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub description: String,
    #[serde(deserialize_with = "de_timestamp")]
    pub starts_at: Timestamp,
    #[serde(deserialize_with = "de_timestamp")]
    pub ends_at: Timestamp,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default, deserialize_with = "de_null_default")]
    pub is_informed: bool,
    #[serde(default, deserialize_with = "de_null_default")]
    pub is_confirmed: bool,
    #[serde(default, deserialize_with = "de_null_default")]
    pub is_service_session: bool,
    #[serde(default, deserialize_with = "de_null_default")]
    pub is_plenum_session: bool,
    #[serde(default, deserialize_with = "de_null_default")]
    pub speakers: Vec<SpeakerRef>,
}

impl RawSession {
    /// Whether a regular session may be shown: accepted, informed,
    /// confirmed, and not a service session.
    pub fn passes_publication_gate(&self) -> bool {
        self.status == SessionStatus::Accepted
            && self.is_informed
            && self.is_confirmed
            && !self.is_service_session
    }
}

/// A room and the sessions scheduled in it on one day.
#[derive(Debug, Clone)]
pub struct RawRoom {
    pub name: String,
    pub sessions: Vec<RawSession>,
}

/// One conference day of the grid.
#[derive(Debug, Clone)]
pub struct RawDay {
    pub date: Timestamp,
    pub rooms: Vec<RawRoom>,
}

/// A speaker from the speaker feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub id: SpeakerId,
    #[serde(alias = "fullName")]
    pub name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Deserialize)]
struct WireDay {
    #[serde(deserialize_with = "de_timestamp")]
    date: Timestamp,
    #[serde(default)]
    rooms: Vec<WireRoom>,
}

#[derive(Deserialize)]
struct WireRoom {
    name: String,
    #[serde(default)]
    sessions: Vec<Value>,
}

/// Decodes the grid feed.
pub fn decode_grid(body: &str) -> Result<Decoded<Vec<RawDay>>, DecodeError> {
    let wire: Vec<WireDay> = serde_json::from_str(body)
        .map_err(|source| DecodeError::Malformed { feed: "grid", source })?;

    let mut quarantined = 0;
    let mut days = Vec::with_capacity(wire.len());
    for day in wire {
        let mut rooms = Vec::with_capacity(day.rooms.len());
        for room in day.rooms {
            let mut sessions = Vec::with_capacity(room.sessions.len());
            for value in room.sessions {
                match decode_session(value) {
                    Ok(session) => sessions.push(session),
                    Err(reason) => {
                        tracing::warn!(room = %room.name, %reason, "quarantined malformed session");
                        quarantined += 1;
                    }
                }
            }
            rooms.push(RawRoom {
                name: room.name,
                sessions,
            });
        }
        days.push(RawDay {
            date: day.date,
            rooms,
        });
    }

    Ok(Decoded {
        items: days,
        quarantined,
    })
}

/// Decodes the speaker feed.
pub fn decode_speakers(body: &str) -> Result<Decoded<Vec<Speaker>>, DecodeError> {
    let wire: Vec<Value> = serde_json::from_str(body).map_err(|source| DecodeError::Malformed {
        feed: "speakers",
        source,
    })?;

    let mut quarantined = 0;
    let mut speakers = Vec::with_capacity(wire.len());
    for value in wire {
        match serde_json::from_value::<Speaker>(value) {
            Ok(speaker) => speakers.push(speaker),
            Err(err) => {
                tracing::warn!(reason = %err, "quarantined malformed speaker");
                quarantined += 1;
            }
        }
    }

    Ok(Decoded {
        items: speakers,
        quarantined,
    })
}

fn decode_session(value: Value) -> Result<RawSession, String> {
    let session: RawSession = serde_json::from_value(value).map_err(|err| err.to_string())?;
    if session.ends_at < session.starts_at {
        return Err(format!("session {} ends before it starts", session.id));
    }
    Ok(session)
}

/// Parses a feed timestamp.
///
/// Accepts RFC 3339 (offset kept as written), offset-free ISO 8601 date-times
/// and bare dates (local midnight).
pub fn parse_timestamp(s: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    let naive = s.parse::<NaiveDateTime>().ok().or_else(|| {
        s.parse::<NaiveDate>()
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN))
    })?;
    Some(in_local_zone(naive))
}

/// Places an offset-free wall-clock time in the local zone. Times skipped by
/// a DST gap are taken as UTC digits shifted into the local offset.
fn in_local_zone(naive: NaiveDateTime) -> Timestamp {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
        .fixed_offset()
}

fn de_timestamp<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {s}")))
}

fn de_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn de_session_id<'de, D>(deserializer: D) -> Result<EventId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    let id = match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    };
    EventId::new(id).map_err(de::Error::custom)
}
