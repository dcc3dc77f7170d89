//! CLI subcommand implementations.

pub mod favorite;
pub mod favorites;
pub mod schedule;
pub mod show;
pub mod types;
pub mod util;
pub mod watch;
