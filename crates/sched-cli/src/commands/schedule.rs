//! Schedule command: the room-grouped sessions of one day.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use sched_core::{
    FavoriteSet, InclusionPolicy, LoadState, RoomCards, SelectionState, Timestamp, TypeFilter,
};

use super::util::{ready, write_day_header, write_rooms};

#[derive(Debug, Serialize)]
struct ScheduleOutput<'a> {
    day: usize,
    date: String,
    filter: TypeFilter,
    filter_label: String,
    rooms: &'a [RoomCards],
}

pub fn run<W: Write>(
    writer: &mut W,
    state: &mut LoadState,
    favorites: &FavoriteSet,
    selection: &SelectionState,
    policy: InclusionPolicy,
    now: Timestamp,
    json: bool,
) -> Result<()> {
    if let LoadState::Ready(schedule) = state {
        schedule.set_policy(policy);
    }
    let Some(schedule) = ready(writer, state)? else {
        return Ok(());
    };

    let rooms = schedule.cards(selection, favorites, now);

    if json {
        let Some(day) = selection.day.resolve(schedule.grid()) else {
            writeln!(writer, "null")?;
            return Ok(());
        };
        let output = ScheduleOutput {
            day: selection.day.index() + 1,
            date: day.date.date_naive().to_string(),
            filter: selection.kind,
            filter_label: selection.kind.label(),
            rooms: &rooms,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    if write_day_header(writer, schedule, selection)? {
        write_rooms(writer, &rooms)?;
    }
    Ok(())
}
