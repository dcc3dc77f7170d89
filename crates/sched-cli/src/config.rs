//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use sched_core::event_type::DEFAULT_WORKSHOP_ROOMS;
use sched_core::{Classifier, InclusionPolicy};
use serde::{Deserialize, Serialize};

const DEFAULT_GRID_URL: &str = "https://sessionize.com/api/v2/ndd4283z/view/GridSmart";
const DEFAULT_SPEAKERS_URL: &str = "https://sessionize.com/api/v2/ndd4283z/view/Speakers";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Grid feed location: an `http(s)://` URL or a local path.
    pub grid_url: String,

    /// Speaker feed location: an `http(s)://` URL or a local path.
    pub speakers_url: String,

    /// Path to the database file.
    pub database_path: PathBuf,

    /// Whether service sessions (breaks, lunch) appear in the schedule.
    pub include_service_sessions: bool,

    /// Rooms whose sessions are workshops.
    pub workshop_rooms: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            grid_url: DEFAULT_GRID_URL.to_string(),
            speakers_url: DEFAULT_SPEAKERS_URL.to_string(),
            database_path: data_dir.join("sched.db"),
            include_service_sessions: true,
            workshop_rooms: DEFAULT_WORKSHOP_ROOMS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SCHED_*)
        figment = figment.merge(Env::prefixed("SCHED_"));

        figment.extract()
    }

    pub const fn policy(&self) -> InclusionPolicy {
        InclusionPolicy {
            include_service_sessions: self.include_service_sessions,
        }
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(&self.workshop_rooms)
    }
}

/// Returns the platform-specific config directory for sched.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sched"))
}

/// Returns the platform-specific data directory for sched.
///
/// On Linux: `~/.local/share/sched`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("sched"))
}
