//! Watch command: the live view, re-rendered on every clock tick.

use std::future::Future;
use std::io::Write;

use anyhow::Result;

use sched_core::{Event, FavoriteSet, LoadState, Schedule, SelectionState, Timestamp};

use super::util::{ready, write_day_header, write_rooms};
use crate::clock::LiveClock;

/// Renders until `shutdown` resolves or every selected session has ended.
/// Stops after one frame when the selection holds no sessions at all.
///
/// Owns `clock` and stops it on every exit path.
pub async fn run<W, F>(
    writer: &mut W,
    state: &LoadState,
    favorites: &FavoriteSet,
    selection: &SelectionState,
    mut clock: LiveClock,
    zone: &str,
    shutdown: F,
) -> Result<()>
where
    W: Write,
    F: Future<Output = ()>,
{
    let Some(schedule) = ready(writer, state)? else {
        clock.stop();
        return Ok(());
    };

    tokio::pin!(shutdown);
    let mut now = clock.now();
    loop {
        if !write_frame(writer, schedule, favorites, selection, now, zone)? {
            break;
        }
        let selected = selected_events(schedule, favorites, selection);
        if selected.is_empty() {
            writeln!(writer, "No sessions selected.")?;
            break;
        }
        if !selected.iter().any(|event| now <= event.ends_at) {
            writeln!(writer, "All selected sessions have ended.")?;
            break;
        }
        writer.flush()?;

        tokio::select! {
            () = &mut shutdown => break,
            next = clock.changed() => match next {
                Some(tick) => now = tick,
                None => break,
            },
        }
    }

    clock.stop();
    Ok(())
}

fn write_frame<W: Write>(
    writer: &mut W,
    schedule: &Schedule,
    favorites: &FavoriteSet,
    selection: &SelectionState,
    now: Timestamp,
    zone: &str,
) -> Result<bool> {
    writeln!(writer, "Live at {} ({zone})", now.format("%H:%M"))?;
    if !write_day_header(writer, schedule, selection)? {
        return Ok(false);
    }
    write_rooms(writer, &schedule.cards(selection, favorites, now))?;
    writeln!(writer)?;
    Ok(true)
}

/// Every session shown for the selection, across rooms.
fn selected_events<'a>(
    schedule: &'a Schedule,
    favorites: &FavoriteSet,
    selection: &SelectionState,
) -> Vec<&'a Event> {
    schedule
        .groups(selection, favorites)
        .into_iter()
        .flat_map(|group| group.events)
        .collect()
}
