//! Detail view for a single selected event.

use serde::Serialize;

use crate::event::Event;
use crate::favorites::{FavoriteSet, FavoritesStore, KeyValueStore};
use crate::types::EventId;
use crate::view::{Schedule, SpeakerCard, format_clock};

/// Whether the detail view is showing an event.
///
/// Holds the selected event by id only; the event itself stays owned by the
/// [`Schedule`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailView {
    #[default]
    Closed,
    Open(EventId),
}

impl DetailView {
    /// Opens the view on `event`, replacing any current selection.
    pub fn select(&mut self, event: &Event) {
        *self = Self::Open(event.id.clone());
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub const fn selected(&self) -> Option<&EventId> {
        match self {
            Self::Open(id) => Some(id),
            Self::Closed => None,
        }
    }

    /// Toggles the open event's favorite state. Returns the new membership.
    pub fn toggle_favorite<S: KeyValueStore>(
        &self,
        favorites: &mut FavoritesStore<S>,
    ) -> Option<bool> {
        self.selected().map(|id| favorites.toggle(id))
    }

    /// Renders the open event, or `None` when closed or the event is gone.
    pub fn render(&self, schedule: &Schedule, favorites: &FavoriteSet) -> Option<EventDetail> {
        let event = schedule.event(self.selected()?)?;
        Some(EventDetail::build(event, schedule, favorites))
    }
}

/// Everything the detail view shows for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDetail {
    pub id: EventId,
    pub title: String,
    pub session_label: &'static str,
    pub description: String,
    pub time_range: String,
    pub room: String,
    pub type_label: String,
    pub speakers: Vec<SpeakerCard>,
    pub is_favorite: bool,
    pub favorite_action: &'static str,
}

impl EventDetail {
    fn build(event: &Event, schedule: &Schedule, favorites: &FavoriteSet) -> Self {
        let is_favorite = favorites.contains(&event.id);
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            session_label: if event.is_service_session {
                "Service Session"
            } else {
                "Confirmed Session"
            },
            description: event.description.clone(),
            time_range: format!(
                "{} - {}",
                format_clock(event.starts_at),
                format_clock(event.ends_at)
            ),
            room: event.room.clone(),
            type_label: event.kind.detail_label(),
            speakers: SpeakerCard::for_event(event, schedule.speakers()),
            is_favorite,
            favorite_action: if is_favorite {
                "Remove from favorites"
            } else {
                "Add to favorites"
            },
        }
    }
}
