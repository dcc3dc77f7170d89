//! Schedule view model: the loaded feed, the derived events and what to show.

use std::fmt;

use serde::Serialize;

use crate::detail::DetailView;
use crate::event::{Event, InclusionPolicy, normalize};
use crate::event_type::{Classifier, EventType};
use crate::favorites::FavoriteSet;
use crate::filter::{TypeFilter, filter, filter_options};
use crate::grid::{RawDay, Timestamp};
use crate::index::{DaySelection, RoomEvents, events_by_room, filter_by_day, rooms_for_day};
use crate::live::LiveStatus;
use crate::speaker::SpeakerResolver;
use crate::types::EventId;

/// Transient UI selection, reset when the view is left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub day: DaySelection,
    pub kind: TypeFilter,
    pub detail: DetailView,
}

impl SelectionState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Outcome of loading the feeds.
#[derive(Debug)]
pub enum LoadState {
    Ready(Schedule),
    Failed(String),
}

impl LoadState {
    /// Maps a load result, logging the failure reason.
    pub fn from_result<E: fmt::Display>(result: Result<Schedule, E>) -> Self {
        match result {
            Ok(schedule) => Self::Ready(schedule),
            Err(err) => {
                tracing::error!(error = %err, "schedule feeds unavailable");
                Self::Failed(err.to_string())
            }
        }
    }
}

/// The loaded grid and the events derived from it.
#[derive(Debug, Clone)]
pub struct Schedule {
    grid: Vec<RawDay>,
    speakers: SpeakerResolver,
    classifier: Classifier,
    policy: InclusionPolicy,
    events: Vec<Event>,
}

impl Schedule {
    pub fn new(
        grid: Vec<RawDay>,
        speakers: SpeakerResolver,
        classifier: Classifier,
        policy: InclusionPolicy,
    ) -> Self {
        let events = normalize(&grid, policy, &classifier);
        Self {
            grid,
            speakers,
            classifier,
            policy,
            events,
        }
    }

    /// Switches the inclusion policy, rebuilding the event list from the grid.
    pub fn set_policy(&mut self, policy: InclusionPolicy) {
        if policy != self.policy {
            self.policy = policy;
            self.events = normalize(&self.grid, policy, &self.classifier);
        }
    }

    pub const fn policy(&self) -> InclusionPolicy {
        self.policy
    }

    pub fn grid(&self) -> &[RawDay] {
        &self.grid
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub const fn speakers(&self) -> &SpeakerResolver {
        &self.speakers
    }

    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| &event.id == id)
    }

    pub fn rooms(&self, day: DaySelection) -> Vec<&str> {
        rooms_for_day(&self.grid, day)
    }

    /// Type filter options for the current event list.
    pub fn filter_options(&self) -> Vec<TypeFilter> {
        filter_options(&self.events)
    }

    /// Every room of the selected day with the events that pass the filters.
    pub fn groups(&self, selection: &SelectionState, favorites: &FavoriteSet) -> Vec<RoomEvents<'_>> {
        let on_day = filter_by_day(&self.events, selection.day, &self.grid);
        let visible = filter(on_day, selection.kind, favorites);
        let by_room = events_by_room(visible);

        self.rooms(selection.day)
            .into_iter()
            .map(|room| RoomEvents {
                room,
                events: by_room.get(room).to_vec(),
            })
            .collect()
    }

    /// Card summaries for [`Schedule::groups`], annotated for `now`.
    pub fn cards(
        &self,
        selection: &SelectionState,
        favorites: &FavoriteSet,
        now: Timestamp,
    ) -> Vec<RoomCards> {
        self.groups(selection, favorites)
            .into_iter()
            .map(|group| RoomCards {
                room: group.room.to_string(),
                cards: group
                    .events
                    .into_iter()
                    .map(|event| EventCard::build(event, now, favorites, &self.speakers))
                    .collect(),
            })
            .collect()
    }
}

/// Formats a time as `HH:MM` in the offset it carries.
pub fn format_clock(at: Timestamp) -> String {
    at.format("%H:%M").to_string()
}

/// A speaker as shown on cards and in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerCard {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl SpeakerCard {
    /// Speakers of `event`, with avatars where the speaker feed has one.
    pub fn for_event(event: &Event, speakers: &SpeakerResolver) -> Vec<Self> {
        event
            .speakers
            .iter()
            .map(|speaker| Self {
                name: speaker.name.clone(),
                avatar: speakers.resolve(&speaker.id).map(String::from),
            })
            .collect()
    }
}

/// Summary of one event in the room-grouped list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCard {
    pub id: EventId,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
    pub room: String,
    #[serde(rename = "type")]
    pub kind: EventType,
    pub is_favorite: bool,
    #[serde(flatten)]
    pub live: LiveStatus,
    pub speakers: Vec<SpeakerCard>,
}

impl EventCard {
    pub fn build(
        event: &Event,
        now: Timestamp,
        favorites: &FavoriteSet,
        speakers: &SpeakerResolver,
    ) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            start_time: format_clock(event.starts_at),
            end_time: format_clock(event.ends_at),
            duration: format!("{} min", event.duration_minutes),
            room: event.room.clone(),
            kind: event.kind,
            is_favorite: favorites.contains(&event.id),
            live: LiveStatus::of(event, now),
            speakers: SpeakerCard::for_event(event, speakers),
        }
    }
}

/// One room's cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomCards {
    pub room: String,
    pub cards: Vec<EventCard>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::event::fixtures::*;
    use crate::grid::{Speaker, SessionStatus};
    use crate::types::SpeakerId;

    /// Two-day conference used by view and detail tests.
    pub fn conference() -> Schedule {
        let keynote = {
            let mut s = with_speaker(
                published("kn", "2025-07-03T09:00:00", "2025-07-03T09:45:00"),
                "spk-ada",
                "Ada Lovelace",
            );
            s.is_plenum_session = true;
            s
        };
        let talk = with_speaker(
            with_speaker(
                published("t1", "2025-07-03T10:00:00", "2025-07-03T10:40:00"),
                "spk-grace",
                "Grace Hopper",
            ),
            "spk-ghost",
            "Unlisted Speaker",
        );
        let lunch = {
            let mut s = published("lunch", "2025-07-03T12:00:00", "2025-07-03T13:00:00");
            s.is_service_session = true;
            s.status = SessionStatus::Other(String::new());
            s
        };
        let workshop = published("w1", "2025-07-03T10:00:00", "2025-07-03T12:00:00");
        let sponsor = published("sp1", "2025-07-03T14:00:00", "2025-07-03T14:20:00");
        let day_two = published("d2", "2025-07-04T09:00:00", "2025-07-04T09:30:00");

        let grid = vec![
            day(
                "2025-07-03T00:00:00",
                vec![
                    room("Main Hall", vec![keynote, talk, lunch]),
                    room("Quest", vec![workshop]),
                    room("Sponsor Stage", vec![sponsor]),
                    room("Library", Vec::new()),
                ],
            ),
            day("2025-07-04T00:00:00", vec![room("Main Hall", vec![day_two])]),
        ];

        let speakers = SpeakerResolver::new([
            Speaker {
                id: SpeakerId::new("spk-ada").unwrap(),
                name: "Ada Lovelace".to_string(),
                profile_picture: Some("https://img/ada.jpg".to_string()),
            },
            Speaker {
                id: SpeakerId::new("spk-grace").unwrap(),
                name: "Grace Hopper".to_string(),
                profile_picture: None,
            },
        ]);

        Schedule::new(
            grid,
            speakers,
            Classifier::default(),
            InclusionPolicy::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::conference;
    use super::*;
    use crate::event::fixtures::at;

    fn group_ids(groups: &[RoomEvents<'_>]) -> Vec<(String, Vec<String>)> {
        groups
            .iter()
            .map(|g| {
                (
                    g.room.to_string(),
                    g.events.iter().map(|e| e.id.to_string()).collect(),
                )
            })
            .collect()
    }

    fn id(s: &str) -> EventId {
        EventId::new(s).unwrap()
    }

    #[test]
    fn groups_list_every_room_of_the_day() {
        let schedule = conference();
        let groups = schedule.groups(&SelectionState::default(), &FavoriteSet::default());
        assert_eq!(
            group_ids(&groups),
            vec![
                ("Main Hall".to_string(), vec!["kn".to_string(), "t1".to_string(), "lunch".to_string()]),
                ("Quest".to_string(), vec!["w1".to_string()]),
                ("Sponsor Stage".to_string(), vec!["sp1".to_string()]),
                ("Library".to_string(), Vec::new()),
            ]
        );
    }

    #[test]
    fn groups_apply_type_filter() {
        let schedule = conference();
        let selection = SelectionState {
            kind: TypeFilter::Kind(EventType::Workshop),
            ..SelectionState::default()
        };
        let groups = schedule.groups(&selection, &FavoriteSet::default());
        let non_empty: Vec<&str> = groups
            .iter()
            .filter(|g| !g.events.is_empty())
            .map(|g| g.room)
            .collect();
        assert_eq!(non_empty, vec!["Quest"]);
    }

    #[test]
    fn groups_follow_day_selection() {
        let schedule = conference();
        let selection = SelectionState {
            day: DaySelection::new(1),
            ..SelectionState::default()
        };
        let groups = schedule.groups(&selection, &FavoriteSet::default());
        assert_eq!(
            group_ids(&groups),
            vec![("Main Hall".to_string(), vec!["d2".to_string()])]
        );
    }

    #[test]
    fn set_policy_rebuilds_events() {
        let mut schedule = conference();
        assert!(schedule.event(&id("lunch")).is_some());

        schedule.set_policy(InclusionPolicy {
            include_service_sessions: false,
        });
        assert!(schedule.event(&id("lunch")).is_none());
        assert_eq!(schedule.events().len(), 5);

        schedule.set_policy(InclusionPolicy::default());
        assert!(schedule.event(&id("lunch")).is_some());
    }

    #[test]
    fn filter_options_reflect_events() {
        let schedule = conference();
        let labels: Vec<String> = schedule
            .filter_options()
            .into_iter()
            .map(TypeFilter::label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "All Sessions",
                "Keynotes",
                "Talks",
                "Service Sessions",
                "Workshops",
                "Sponsor Talks",
                "Favorites"
            ]
        );
    }

    #[test]
    fn cards_annotate_live_state_and_favorites() {
        let schedule = conference();
        let favorites: FavoriteSet = [id("t1")].into_iter().collect();
        let rooms = schedule.cards(
            &SelectionState::default(),
            &favorites,
            at("2025-07-03T10:25:30"),
        );

        let talk = &rooms[0].cards[1];
        assert_eq!(talk.title, "Session t1");
        assert_eq!(talk.start_time, "10:00");
        assert_eq!(talk.end_time, "10:40");
        assert_eq!(talk.duration, "40 min");
        assert!(talk.is_favorite);
        assert!(talk.live.live);
        assert_eq!(talk.live.remaining_minutes, 15);
        assert_eq!(
            talk.speakers,
            vec![
                SpeakerCard {
                    name: "Grace Hopper".to_string(),
                    avatar: None
                },
                SpeakerCard {
                    name: "Unlisted Speaker".to_string(),
                    avatar: None
                },
            ]
        );

        let keynote = &rooms[0].cards[0];
        assert!(!keynote.is_favorite);
        assert!(!keynote.live.live);
        assert_eq!(keynote.live.remaining_minutes, 0);
        assert_eq!(
            keynote.speakers[0].avatar.as_deref(),
            Some("https://img/ada.jpg")
        );
    }

    #[test]
    fn card_json_flattens_live_status() {
        let schedule = conference();
        let rooms = schedule.cards(
            &SelectionState::default(),
            &FavoriteSet::default(),
            at("2025-07-03T09:00:00"),
        );
        let json = serde_json::to_value(&rooms[0].cards[0]).unwrap();
        assert_eq!(json["type"], "keynote");
        assert_eq!(json["live"], true);
        assert_eq!(json["remaining_minutes"], 45);
        assert_eq!(json["speakers"][0]["avatar"], "https://img/ada.jpg");
    }

    #[test]
    fn load_state_keeps_failure_reason() {
        let state = LoadState::from_result::<&str>(Err("grid feed returned 503"));
        assert!(matches!(state, LoadState::Failed(reason) if reason == "grid feed returned 503"));
    }

    #[test]
    fn reset_clears_selection() {
        let schedule = conference();
        let mut selection = SelectionState {
            day: DaySelection::new(1),
            kind: TypeFilter::Favorites,
            detail: DetailView::default(),
        };
        selection
            .detail
            .select(schedule.event(&id("t1")).unwrap());
        selection.reset();
        assert_eq!(selection, SelectionState::default());
    }
}
