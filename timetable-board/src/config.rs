//! Application configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::domain::{InvalidStationId, StationId};
use crate::reconcile::{BoardConfig, DEFAULT_WINDOW_MINUTES, MAX_WINDOW_MINUTES};
use crate::timetables::FeedConfig;

pub const ENV_STATION: &str = "DB_STATION";
pub const ENV_CLIENT_ID: &str = "DB_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "DB_CLIENT_SECRET";
pub const ENV_WINDOW_MINUTES: &str = "BOARD_WINDOW_MINUTES";
pub const ENV_FIXTURE_DIR: &str = "BOARD_FIXTURE_DIR";
pub const ENV_LISTEN: &str = "BOARD_LISTEN";

/// Default listen address for `serve`.
const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

/// Errors reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name}: {source}")]
    Station {
        name: &'static str,
        #[source]
        source: InvalidStationId,
    },

    #[error("{name}={value:?} is invalid: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the binary needs to run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub station: StationId,
    pub client_id: String,
    pub client_secret: String,
    pub window_minutes: i64,
    /// Serve feeds from this directory instead of the network.
    pub fixture_dir: Option<PathBuf>,
    pub listen: SocketAddr,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let station = get(ENV_STATION).ok_or(ConfigError::Missing(ENV_STATION))?;
        let station = StationId::parse_trimmed(&station).map_err(|source| ConfigError::Station {
            name: ENV_STATION,
            source,
        })?;

        let client_id = get(ENV_CLIENT_ID).unwrap_or_else(|| {
            warn!("{ENV_CLIENT_ID} not set, API calls will fail");
            String::new()
        });
        let client_secret = get(ENV_CLIENT_SECRET).unwrap_or_else(|| {
            warn!("{ENV_CLIENT_SECRET} not set, API calls will fail");
            String::new()
        });

        let window_minutes = match get(ENV_WINDOW_MINUTES) {
            None => DEFAULT_WINDOW_MINUTES,
            Some(value) => match value.trim().parse::<i64>() {
                Ok(minutes) if (1..=MAX_WINDOW_MINUTES).contains(&minutes) => minutes,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        name: ENV_WINDOW_MINUTES,
                        value,
                        reason: format!("must be between 1 and {MAX_WINDOW_MINUTES}"),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        name: ENV_WINDOW_MINUTES,
                        value,
                        reason: e.to_string(),
                    });
                }
            },
        };

        let fixture_dir = get(ENV_FIXTURE_DIR).map(PathBuf::from);

        let listen = get(ENV_LISTEN).unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen = listen
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: ENV_LISTEN,
                value: listen.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            station,
            client_id,
            client_secret,
            window_minutes,
            fixture_dir,
            listen,
        })
    }

    /// The pipeline configuration.
    pub fn board_config(&self) -> BoardConfig {
        BoardConfig::new(self.station.clone()).with_window_minutes(self.window_minutes)
    }

    /// The HTTP client configuration.
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig::new(&self.client_id, &self.client_secret)
    }
}
