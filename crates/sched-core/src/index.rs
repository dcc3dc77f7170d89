//! Day selection and room grouping.

use crate::event::Event;
use crate::grid::RawDay;

/// The single grid day currently shown, by zero-based position in the grid.
///
/// The default is the first conference day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySelection(usize);

impl DaySelection {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    /// Resolves the selection against the grid.
    pub fn resolve(self, grid: &[RawDay]) -> Option<&RawDay> {
        grid.get(self.0)
    }
}

/// Room names of the selected day, in feed order.
pub fn rooms_for_day(grid: &[RawDay], day: DaySelection) -> Vec<&str> {
    day.resolve(grid)
        .map(|d| d.rooms.iter().map(|room| room.name.as_str()).collect())
        .unwrap_or_default()
}

/// Events starting on the selected grid day's calendar date.
///
/// Both dates are read in the offset the feed wrote them in.
pub fn filter_by_day<'a, I>(events: I, day: DaySelection, grid: &[RawDay]) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let Some(grid_day) = day.resolve(grid) else {
        return Vec::new();
    };
    let date = grid_day.date.date_naive();
    events
        .into_iter()
        .filter(|event| event.starts_at.date_naive() == date)
        .collect()
}

/// Events of one room, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEvents<'a> {
    pub room: &'a str,
    pub events: Vec<&'a Event>,
}

/// Events grouped by room, rooms in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsByRoom<'a> {
    groups: Vec<RoomEvents<'a>>,
}

impl<'a> EventsByRoom<'a> {
    /// Events for `room`, empty if none were grouped there.
    pub fn get(&self, room: &str) -> &[&'a Event] {
        self.groups
            .iter()
            .find(|group| group.room == room)
            .map(|group| group.events.as_slice())
            .unwrap_or_default()
    }

    pub fn groups(&self) -> &[RoomEvents<'a>] {
        &self.groups
    }

}

/// Groups events by their room.
pub fn events_by_room<'a, I>(events: I) -> EventsByRoom<'a>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut groups: Vec<RoomEvents<'a>> = Vec::new();
    for event in events {
        if let Some(group) = groups.iter_mut().find(|g| g.room == event.room) {
            group.events.push(event);
        } else {
            groups.push(RoomEvents {
                room: &event.room,
                events: vec![event],
            });
        }
    }
    EventsByRoom { groups }
}
