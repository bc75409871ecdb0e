//! Pipeline configuration and the injected clock.

use chrono::{Local, NaiveDateTime};
use tracing::warn;

use crate::domain::StationId;

/// Default board window length (minutes).
pub const DEFAULT_WINDOW_MINUTES: i64 = 60;

/// Longest window the two fetched plan hours can fill (minutes).
pub const MAX_WINDOW_MINUTES: i64 = 60;

/// Configuration for one board run.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Station to build the board for.
    pub station: StationId,

    window_minutes: i64,
}

impl BoardConfig {
    /// Create a configuration with the default window.
    pub fn new(station: StationId) -> Self {
        Self {
            station,
            window_minutes: DEFAULT_WINDOW_MINUTES,
        }
    }

    /// Set the window length, clamped to `1..=MAX_WINDOW_MINUTES`.
    ///
    /// Only the current and the next plan hour are fetched, so a longer
    /// window would report an end it has no departures for.
    pub fn with_window_minutes(mut self, minutes: i64) -> Self {
        let clamped = minutes.clamp(1, MAX_WINDOW_MINUTES);
        if clamped != minutes {
            warn!(requested = minutes, used = clamped, "Board window out of range, clamping");
        }
        self.window_minutes = clamped;
        self
    }

    /// How far ahead of now departures are admitted (minutes).
    pub fn window_minutes(&self) -> i64 {
        self.window_minutes
    }
}

/// Source of the reference "now".
///
/// Times are naive local times, matching the feeds' own encoding.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
