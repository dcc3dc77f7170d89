//! Shared utilities for CLI commands.

use std::io::Write;

use anyhow::Result;
use sched_core::{LoadState, RoomCards, Schedule, SelectionState, SpeakerResolver};
use sched_feed::{FeedClient, FeedError, FeedSource};

use crate::Config;

/// Fetches both feeds and builds the schedule. Never fails; a failed load is
/// reported through [`LoadState::Failed`].
pub async fn load_schedule(config: &Config) -> LoadState {
    let result = async {
        let client = FeedClient::new()?;
        let feeds = client
            .load(
                &FeedSource::parse(&config.grid_url),
                &FeedSource::parse(&config.speakers_url),
            )
            .await?;
        Ok::<_, FeedError>(Schedule::new(
            feeds.grid,
            SpeakerResolver::new(feeds.speakers),
            config.classifier(),
            config.policy(),
        ))
    }
    .await;
    LoadState::from_result(result)
}

/// The loaded schedule, or `None` after telling the user why there is none.
pub fn ready<'a, W: Write>(writer: &mut W, state: &'a LoadState) -> Result<Option<&'a Schedule>> {
    match state {
        LoadState::Ready(schedule) => Ok(Some(schedule)),
        LoadState::Failed(reason) => {
            writeln!(writer, "Schedule unavailable: {reason}")?;
            Ok(None)
        }
    }
}

/// Writes the `Day N of M` header. Returns `false` if the selected day does
/// not exist.
pub fn write_day_header<W: Write>(
    writer: &mut W,
    schedule: &Schedule,
    selection: &SelectionState,
) -> Result<bool> {
    let days = schedule.grid().len();
    let number = selection.day.index() + 1;
    let Some(day) = selection.day.resolve(schedule.grid()) else {
        writeln!(writer, "No day {number} in the schedule ({days} days).")?;
        return Ok(false);
    };

    writeln!(
        writer,
        "Day {number} of {days} | {} | {}",
        day.date.format("%A, %-d %B %Y"),
        selection.kind.label()
    )?;
    writeln!(writer)?;
    Ok(true)
}

/// Writes room-grouped cards.
pub fn write_rooms<W: Write>(writer: &mut W, rooms: &[RoomCards]) -> Result<()> {
    for (i, room) in rooms.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "{}", room.room)?;

        if room.cards.is_empty() {
            writeln!(writer, "  (no sessions)")?;
            continue;
        }

        for card in &room.cards {
            write!(
                writer,
                "  {}-{}  {} [{}, {}]",
                card.start_time, card.end_time, card.title, card.kind, card.duration
            )?;
            if card.is_favorite {
                write!(writer, " *")?;
            }
            if card.live.live {
                write!(writer, " LIVE {} min left", card.live.remaining_minutes)?;
            }
            writeln!(writer)?;

            if !card.speakers.is_empty() {
                let names: Vec<&str> = card.speakers.iter().map(|s| s.name.as_str()).collect();
                writeln!(writer, "               {}", names.join(", "))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;

    #[test]
    fn ready_reports_failure_reason() {
        let state = LoadState::Failed("grid feed returned 503".to_string());
        let mut output = Vec::new();
        assert!(ready(&mut output, &state).unwrap().is_none());
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Schedule unavailable: grid feed returned 503\n"
        );
    }

    #[test]
    fn header_rejects_missing_day() {
        let schedule = fixtures::schedule();
        let selection = SelectionState {
            day: sched_core::DaySelection::new(4),
            ..SelectionState::default()
        };
        let mut output = Vec::new();
        assert!(!write_day_header(&mut output, &schedule, &selection).unwrap());
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No day 5 in the schedule (2 days).\n"
        );
    }

    #[tokio::test]
    async fn load_schedule_reads_local_feeds() {
        let config = fixtures::config(std::path::Path::new("/nonexistent/sched.db"));
        let state = load_schedule(&config).await;
        let LoadState::Ready(schedule) = state else {
            panic!("expected a loaded schedule");
        };
        assert_eq!(schedule.grid().len(), 2);
    }

    #[tokio::test]
    async fn load_schedule_failure_is_not_an_error() {
        let config = Config {
            grid_url: "/nonexistent/grid.json".to_string(),
            ..fixtures::config(std::path::Path::new("/nonexistent/sched.db"))
        };
        let state = load_schedule(&config).await;
        assert!(
            matches!(state, LoadState::Failed(reason) if reason.contains("/nonexistent/grid.json"))
        );
    }
}
