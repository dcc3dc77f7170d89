//! Show command: the detail view of one event.

use std::io::Write;

use anyhow::{Context, Result};

use sched_core::{DetailView, EventDetail, EventId, FavoriteSet, LoadState};

use super::util::ready;

pub fn run<W: Write>(
    writer: &mut W,
    state: &LoadState,
    favorites: &FavoriteSet,
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

    let detail = view
        .render(schedule, favorites)
        .with_context(|| format!("event {id} cannot be displayed"))?;
    write_detail(writer, &detail)
}

fn write_detail<W: Write>(writer: &mut W, detail: &EventDetail) -> Result<()> {
    writeln!(writer, "{}", detail.title)?;
    writeln!(writer, "{} | {}", detail.session_label, detail.type_label)?;
    writeln!(writer, "{} | {}", detail.time_range, detail.room)?;

    if !detail.description.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "{}", detail.description)?;
    }

    if !detail.speakers.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Speakers:")?;
        for speaker in &detail.speakers {
            match &speaker.avatar {
                Some(avatar) => writeln!(writer, "  {} ({avatar})", speaker.name)?,
                None => writeln!(writer, "  {}", speaker.name)?,
            }
        }
    }

    writeln!(writer)?;
    writeln!(writer, "[{}]", detail.favorite_action)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::ready as loaded;

    use insta::assert_snapshot;

    fn show(id: &str, favorites: &FavoriteSet) -> Result<String> {
        let mut output = Vec::new();
        run(
            &mut output,
            &loaded(),
            favorites,
            &EventId::new(id).unwrap(),
        )?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn show_command_renders_keynote() {
        let output = show("812001", &FavoriteSet::default()).unwrap();
        assert_snapshot!(output, @r"
        Opening Keynote
        Confirmed Session | Keynote
        09:00 - 09:45 | Main Hall

        Welcome to the conference.

        Speakers:
          Ada Lovelace (https://img.example/ada.jpg)

        [Add to favorites]
        ");
    }

    #[test]
    fn show_command_marks_favorite_and_unknown_speaker() {
        let favorites: FavoriteSet = [EventId::new("812010").unwrap()].into_iter().collect();
        let output = show("812010", &favorites).unwrap();
        assert_snapshot!(output, @r"
        Hands-on Async
        Confirmed Session | Workshop
        10:00 - 12:00 | Quest

        Bring a laptop.

        Speakers:
          Linus Torvalds

        [Remove from favorites]
        ");
    }

    #[test]
    fn show_command_service_session_without_description() {
        let output = show("812003", &FavoriteSet::default()).unwrap();
        assert_snapshot!(output, @r"
        Lunch
        Service Session | Service Session
        12:00 - 13:00 | Main Hall

        [Add to favorites]
        ");
    }

    #[test]
    fn show_command_rejects_unpublished_event() {
        let err = show("812004", &FavoriteSet::default()).unwrap_err();
        assert_eq!(err.to_string(), "no event with ID 812004");
    }
}
