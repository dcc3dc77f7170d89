//! Favorite command: toggles one event in the favorites list.

use std::io::Write;

use anyhow::{Context, Result};

use sched_core::{DetailView, EventId, FavoritesStore, KeyValueStore, LoadState};

use super::util::ready;

pub fn run<W: Write, S: KeyValueStore>(
    writer: &mut W,
    state: &LoadState,
    favorites: &mut FavoritesStore<S>,
    id: &EventId,
) -> Result<()> {
    let Some(schedule) = ready(writer, state)? else {
        return Ok(());
    };

    let event = schedule
        .event(id)
        .with_context(|| format!("no event with ID {id}"))?;
    let mut view = DetailView::default();
    view.select(event);

    if view.toggle_favorite(favorites) == Some(true) {
        writeln!(writer, "Added \"{}\" to favorites.", event.title)?;
    } else {
        writeln!(writer, "Removed \"{}\" from favorites.", event.title)?;
    }
    Ok(())
}
