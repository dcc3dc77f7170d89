//! Event type enum and the room/session classifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::grid::RawSession;

/// Room names that host workshops even though they do not say so.
pub const DEFAULT_WORKSHOP_ROOMS: &[&str] = &["Quest"];

/// Category of a normalized event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Talk,
    Workshop,
    Sponsor,
    Service,
    Keynote,
}

impl EventType {
    /// All variants, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Talk,
        Self::Workshop,
        Self::Sponsor,
        Self::Service,
        Self::Keynote,
    ];

    /// String representation used in filters and JSON output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Talk => "talk",
            Self::Workshop => "workshop",
            Self::Sponsor => "sponsor",
            Self::Service => "service",
            Self::Keynote => "keynote",
        }
    }

    /// Plural label for the type filter control.
    pub fn filter_label(self) -> String {
        filter_label(self.as_str())
    }

    /// Singular label for the detail view.
    pub fn detail_label(self) -> String {
        detail_label(self.as_str())
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "talk" => Ok(Self::Talk),
            "workshop" => Ok(Self::Workshop),
            "sponsor" => Ok(Self::Sponsor),
            "service" => Ok(Self::Service),
            "keynote" => Ok(Self::Keynote),
            _ => Err(UnknownEventType(s.to_string())),
        }
    }
}

impl Serialize for EventType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown event type strings.
#[derive(Debug, Clone)]
pub struct UnknownEventType(String);

impl fmt::Display for UnknownEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event type: {}", self.0)
    }
}

impl std::error::Error for UnknownEventType {}

/// Plural filter label for a type string. Unknown types become `<Type>s`.
pub fn filter_label(kind: &str) -> String {
    match kind {
        "talk" => "Talks".to_string(),
        "workshop" => "Workshops".to_string(),
        "sponsor" => "Sponsor Talks".to_string(),
        "service" => "Service Sessions".to_string(),
        "keynote" => "Keynotes".to_string(),
        other => format!("{}s", capitalize(other)),
    }
}

/// Detail view label for a type string. Unknown types become `<Type> Session`.
pub fn detail_label(kind: &str) -> String {
    match kind {
        "keynote" => "Keynote".to_string(),
        "workshop" => "Workshop".to_string(),
        "service" => "Service Session".to_string(),
        "talk" => "Talk".to_string(),
        other => format!("{} Session", capitalize(other)),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Assigns event types from room names and session flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    /// Lower-cased, trimmed names of designated workshop rooms.
    workshop_rooms: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_WORKSHOP_ROOMS.iter().copied())
    }
}

impl Classifier {
    /// Creates a classifier with the given designated workshop rooms.
    pub fn new<I, S>(workshop_rooms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            workshop_rooms: workshop_rooms
                .into_iter()
                .map(|room| room.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// Classifies a session scheduled in `room_name`.
    ///
    /// Precedence is fixed: plenum, service, workshop room, sponsor room, talk.
    pub fn classify(&self, room_name: &str, session: &RawSession) -> EventType {
        if session.is_plenum_session {
            return EventType::Keynote;
        }
        if session.is_service_session {
            return EventType::Service;
        }

        let room = room_name.trim().to_lowercase();
        if self.workshop_rooms.iter().any(|name| *name == room) || room.contains("workshop") {
            return EventType::Workshop;
        }
        if room.contains("sponsor") {
            return EventType::Sponsor;
        }
        EventType::Talk
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SessionStatus;
    use crate::grid::parse_timestamp;
    use crate::types::EventId;

    fn session(plenum: bool, service: bool) -> RawSession {
        let at = parse_timestamp("2025-07-03T09:00:00Z").unwrap();
        RawSession {
            id: EventId::new("s1").unwrap(),
            title: "Session".to_string(),
            description: String::new(),
            starts_at: at,
            ends_at: at,
            status: SessionStatus::Accepted,
            is_informed: true,
            is_confirmed: true,
            is_service_session: service,
            is_plenum_session: plenum,
            speakers: Vec::new(),
        }
    }

    #[test]
    fn roundtrip_all_variants() {
        for variant in EventType::ALL {
            let s = variant.to_string();
            let parsed: EventType = s.parse().expect("should parse");
            assert_eq!(parsed, variant, "roundtrip failed for {variant:?}");
        }
    }

    #[test]
    fn unknown_type_errors() {
        let err = "panel".parse::<EventType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown event type: panel");
    }

    #[test]
    fn plenum_beats_workshop_room() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("Workshop Hall", &session(true, false)),
            EventType::Keynote
        );
    }

    #[test]
    fn plenum_beats_service() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("Main Hall", &session(true, true)),
            EventType::Keynote
        );
    }

    #[test]
    fn service_beats_room_heuristics() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("Sponsor Workshop", &session(false, true)),
            EventType::Service
        );
    }

    #[test]
    fn sponsor_room_classifies_as_sponsor() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("Sponsor Stage", &session(false, false)),
            EventType::Sponsor
        );
    }

    #[test]
    fn designated_room_matches_any_case_and_whitespace() {
        let classifier = Classifier::default();
        for room in ["Quest", "quest", "  QUEST  "] {
            assert_eq!(
                classifier.classify(room, &session(false, false)),
                EventType::Workshop,
                "room {room:?}"
            );
        }
        assert_eq!(
            classifier.classify("Quest Lounge", &session(false, false)),
            EventType::Talk
        );
    }

    #[test]
    fn workshop_substring_beats_sponsor_substring() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("Sponsor Workshop Room", &session(false, false)),
            EventType::Workshop
        );
    }

    #[test]
    fn custom_workshop_rooms_replace_default() {
        let classifier = Classifier::new(["Lab 1"]);
        assert_eq!(
            classifier.classify("lab 1", &session(false, false)),
            EventType::Workshop
        );
        assert_eq!(
            classifier.classify("Quest", &session(false, false)),
            EventType::Talk
        );
    }

    #[test]
    fn labels_fall_back_for_unknown_types() {
        assert_eq!(EventType::Sponsor.filter_label(), "Sponsor Talks");
        assert_eq!(EventType::Sponsor.detail_label(), "Sponsor Session");
        assert_eq!(EventType::Service.detail_label(), "Service Session");
        assert_eq!(filter_label("panel"), "Panels");
        assert_eq!(detail_label("panel"), "Panel Session");
        assert_eq!(detail_label(""), " Session");
    }
}
