//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sched_core::{DaySelection, EventId, SelectionState, TypeFilter};

/// Conference schedule.
///
/// Browses the conference grid by day, room and session type, shows which
/// sessions are live, and keeps a personal list of favorites.
#[derive(Debug, Parser)]
#[command(name = "sched", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the room-grouped schedule for one day.
    Schedule {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Hide service sessions (breaks, lunch, registration).
        #[arg(long)]
        no_service_sessions: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the full details of one event.
    Show {
        /// The event ID from the grid feed.
        #[arg(value_parser = parse_event_id)]
        event: EventId,
    },

    /// Add an event to favorites, or remove it if already there.
    Favorite {
        /// The event ID from the grid feed.
        #[arg(value_parser = parse_event_id)]
        event: EventId,
    },

    /// List favorited event IDs.
    Favorites {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the session type filters available in the current schedule.
    Types,

    /// Keep the schedule on screen, refreshing live badges every minute.
    Watch {
        #[command(flatten)]
        selection: SelectionArgs,
    },
}

/// Day and type selection shared by the list views.
#[derive(Debug, Clone, Copy, Args)]
pub struct SelectionArgs {
    /// Session type filter (all, favorites, talk, workshop, sponsor, service, keynote).
    #[arg(long = "type", default_value = "all")]
    pub kind: TypeFilter,

    /// Conference day, starting at 1.
    #[arg(long, default_value = "1", value_parser = parse_day)]
    pub day: DaySelection,
}

impl From<SelectionArgs> for SelectionState {
    fn from(args: SelectionArgs) -> Self {
        Self {
            day: args.day,
            kind: args.kind,
            ..Self::default()
        }
    }
}

fn parse_event_id(s: &str) -> Result<EventId, String> {
    EventId::new(s).map_err(|err| err.to_string())
}

fn parse_day(s: &str) -> Result<DaySelection, String> {
    match s.parse::<usize>() {
        Ok(day) if day >= 1 => Ok(DaySelection::new(day - 1)),
        _ => Err(format!("invalid day: {s} (days start at 1)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sched_core::EventType;

    #[test]
    fn schedule_defaults_to_first_day_and_all_sessions() {
        let cli = Cli::try_parse_from(["sched", "schedule"]).unwrap();
        let Some(Commands::Schedule {
            selection,
            no_service_sessions,
            json,
        }) = cli.command
        else {
            panic!("expected schedule command");
        };
        assert_eq!(selection.day, DaySelection::new(0));
        assert_eq!(selection.kind, TypeFilter::All);
        assert!(!no_service_sessions);
        assert!(!json);
    }

    #[test]
    fn schedule_parses_type_and_day() {
        let cli =
            Cli::try_parse_from(["sched", "schedule", "--type", "workshop", "--day", "2"]).unwrap();
        let Some(Commands::Schedule { selection, .. }) = cli.command else {
            panic!("expected schedule command");
        };
        assert_eq!(selection.day, DaySelection::new(1));
        assert_eq!(selection.kind, TypeFilter::Kind(EventType::Workshop));
    }

    #[test]
    fn day_zero_is_rejected() {
        assert!(Cli::try_parse_from(["sched", "schedule", "--day", "0"]).is_err());
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(Cli::try_parse_from(["sched", "watch", "--type", "panel"]).is_err());
    }

    #[test]
    fn empty_event_id_is_rejected() {
        assert!(Cli::try_parse_from(["sched", "show", ""]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sched", "types", "-v", "-c", "/tmp/sched.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/sched.toml")));
    }
}
