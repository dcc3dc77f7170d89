//! Favorites command: lists favorited event IDs.

use std::io::Write;

use anyhow::Result;

use sched_core::FavoritesStore;
use sched_core::favorites::FAVORITES_KEY;

use crate::FavoritesBackend;

pub fn run<W: Write>(
    writer: &mut W,
    favorites: &FavoritesStore<FavoritesBackend>,
    json: bool,
) -> Result<()> {
    let set = favorites.set();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(set)?)?;
        return Ok(());
    }

    if set.is_empty() {
        writeln!(writer, "No favorites yet.")?;
        return Ok(());
    }

    let noun = if set.len() == 1 { "favorite" } else { "favorites" };
    match favorites.store().updated_at(FAVORITES_KEY)? {
        Some(updated) => writeln!(
            writer,
            "{} {noun} (last changed {})",
            set.len(),
            updated.format("%Y-%m-%d %H:%M UTC")
        )?,
        None => writeln!(writer, "{} {noun}", set.len())?,
    }
    for id in set.iter() {
        writeln!(writer, "  {id}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use sched_core::{EventId, MemoryStore};
    use sched_db::Database;

    fn in_database() -> FavoritesStore<FavoritesBackend> {
        FavoritesStore::load(FavoritesBackend::Database(Database::open_in_memory().unwrap()))
    }

    fn render(favorites: &FavoritesStore<FavoritesBackend>, json: bool) -> String {
        let mut output = Vec::new();
        run(&mut output, favorites, json).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn favorites_command_empty() {
        let favorites = in_database();
        assert_eq!(render(&favorites, false), "No favorites yet.\n");
        assert_eq!(render(&favorites, true), "[]\n");
    }

    #[test]
    fn favorites_command_lists_sorted_ids() {
        let mut favorites = in_database();
        favorites.toggle(&EventId::new("812010").unwrap());
        favorites.toggle(&EventId::new("812002").unwrap());

        let output = render(&favorites, false);
        let mut lines = output.lines();
        assert!(
            lines
                .next()
                .unwrap()
                .starts_with("2 favorites (last changed ")
        );
        assert_eq!(lines.collect::<Vec<_>>(), vec!["  812002", "  812010"]);

        let ids: Vec<String> = serde_json::from_str(&render(&favorites, true)).unwrap();
        assert_eq!(ids, vec!["812002", "812010"]);
    }

    #[test]
    fn favorites_command_in_memory_has_no_timestamp() {
        let mut favorites = FavoritesStore::load(FavoritesBackend::Memory(MemoryStore::default()));
        favorites.toggle(&EventId::new("812002").unwrap());
        assert_eq!(render(&favorites, false), "1 favorite\n  812002\n");
    }
}
