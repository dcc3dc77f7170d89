//! Type and favorites filtering.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::event::Event;
use crate::event_type::{EventType, UnknownEventType};
use crate::favorites::FavoriteSet;

/// The selected entry of the type filter control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TypeFilter {
    #[default]
    All,
    Favorites,
    Kind(EventType),
}

impl TypeFilter {
    /// Label shown on the filter control.
    pub fn label(self) -> String {
        match self {
            Self::All => "All Sessions".to_string(),
            Self::Favorites => "Favorites".to_string(),
            Self::Kind(kind) => kind.filter_label(),
        }
    }

    /// Whether `event` passes this filter.
    pub fn matches(self, event: &Event, favorites: &FavoriteSet) -> bool {
        match self {
            Self::All => true,
            Self::Favorites => favorites.contains(&event.id),
            Self::Kind(kind) => event.kind == kind,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Favorites => write!(f, "favorites"),
            Self::Kind(kind) => write!(f, "{kind}"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "favorites" => Ok(Self::Favorites),
            other => other.parse().map(Self::Kind),
        }
    }
}

impl Serialize for TypeFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Keeps the events passing `selected`, preserving their relative order.
pub fn filter<'a, I>(events: I, selected: TypeFilter, favorites: &FavoriteSet) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| selected.matches(event, favorites))
        .collect()
}

/// Options offered by the filter control for the current event list.
///
/// `All` first, then each event type in first-seen order, then `Keynote` if
/// no keynote is currently scheduled, then `Favorites`.
pub fn filter_options<'a, I>(events: I) -> Vec<TypeFilter>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut kinds: Vec<EventType> = Vec::new();
    for event in events {
        if !kinds.contains(&event.kind) {
            kinds.push(event.kind);
        }
    }
    if !kinds.contains(&EventType::Keynote) {
        kinds.push(EventType::Keynote);
    }

    let mut options = Vec::with_capacity(kinds.len() + 2);
    options.push(TypeFilter::All);
    options.extend(kinds.into_iter().map(TypeFilter::Kind));
    options.push(TypeFilter::Favorites);
    options
}
