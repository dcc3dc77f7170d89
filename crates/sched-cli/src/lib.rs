//! Conference schedule CLI library.
//!
//! This crate provides the CLI interface for the conference schedule.

mod cli;
pub mod clock;
pub mod commands;
mod config;
pub mod store;

pub use cli::{Cli, Commands, SelectionArgs};
pub use config::Config;
pub use store::FavoritesBackend;
