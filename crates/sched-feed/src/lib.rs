//! Feed client for the conference schedule.
//!
//! Fetches the grid and speaker feeds, either over HTTP(S) or from local
//! files, and decodes them into the raw schedule model. Both feeds are
//! requested concurrently; the load fails as a whole if either one does.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sched_core::grid::Decoded;
use sched_core::{DecodeError, RawDay, Speaker, decode_grid, decode_speakers};
use thiserror::Error;

/// Default request timeout for feed fetches.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Feed loading errors.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The feed server answered with a non-success status.
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    /// A local feed file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The feed body was rejected by the decoder.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Where a feed is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Http(String),
    File(PathBuf),
}

impl FeedSource {
    /// Classifies a configured location. `http://` and `https://` are
    /// fetched; anything else is a path, with an optional `file://` prefix.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Http(location.to_string())
        } else {
            let path = location.strip_prefix("file://").unwrap_or(location);
            Self::File(PathBuf::from(path))
        }
    }
}

impl From<&Path> for FeedSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Both feeds, decoded.
#[derive(Debug, Clone)]
pub struct Feeds {
    pub grid: Vec<RawDay>,
    pub speakers: Vec<Speaker>,
    /// Sessions and speakers dropped at the decode boundary.
    pub quarantined: usize,
}

/// Feed client.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    /// Creates a client with the default request timeout.
    pub fn new() -> Result<Self, FeedError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FeedError::ClientBuild)?;
        Ok(Self { http })
    }

    /// Reads the raw body of one feed.
    pub async fn fetch_text(&self, source: &FeedSource) -> Result<String, FeedError> {
        tracing::debug!(%source, "fetching feed");
        match source {
            FeedSource::Http(url) => {
                let response = self.http.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FeedError::Status {
                        url: url.clone(),
                        status,
                    });
                }
                Ok(response.text().await?)
            }
            FeedSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FeedError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }

    /// Fetches and decodes the grid and speaker feeds concurrently.
    pub async fn load(&self, grid: &FeedSource, speakers: &FeedSource) -> Result<Feeds, FeedError> {
        let (grid_body, speakers_body) =
            tokio::try_join!(self.fetch_text(grid), self.fetch_text(speakers))?;

        let Decoded {
            items: grid,
            quarantined: bad_sessions,
        } = decode_grid(&grid_body)?;
        let Decoded {
            items: speakers,
            quarantined: bad_speakers,
        } = decode_speakers(&speakers_body)?;

        let quarantined = bad_sessions + bad_speakers;
        if quarantined > 0 {
            tracing::warn!(bad_sessions, bad_speakers, "feed records quarantined");
        }
        tracing::info!(
            days = grid.len(),
            speakers = speakers.len(),
            "loaded schedule feeds"
        );

        Ok(Feeds {
            grid,
            speakers,
            quarantined,
        })
    }
}
