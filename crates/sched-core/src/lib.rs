//! Core domain logic for the conference schedule.
//!
//! This crate contains the fundamental types and logic for:
//! - Decoding: turning the grid and speaker feeds into a typed raw model
//! - Normalization: flattening the grid into classified events
//! - Selection: day/room grouping, type and favorites filtering
//! - Live status: which events are running and how long they have left
//! - Favorites: the persisted set of favorited events

pub mod detail;
pub mod event;
pub mod event_type;
pub mod favorites;
pub mod filter;
pub mod grid;
pub mod index;
pub mod live;
pub mod speaker;
pub mod types;
pub mod view;

pub use detail::{DetailView, EventDetail};
pub use event::{Event, InclusionPolicy, normalize};
pub use event_type::{Classifier, EventType, UnknownEventType};
pub use favorites::{FavoriteSet, FavoritesStore, KeyValueStore, MemoryStore};
pub use filter::TypeFilter;
pub use grid::{
    DecodeError, RawDay, RawRoom, RawSession, Speaker, Timestamp, decode_grid, decode_speakers,
};
pub use index::DaySelection;
pub use live::{Clock, FixedClock, LiveStatus, SystemClock, TICK_INTERVAL};
pub use speaker::SpeakerResolver;
pub use types::{EventId, SpeakerId, ValidationError};
pub use view::{EventCard, LoadState, RoomCards, Schedule, SelectionState};
