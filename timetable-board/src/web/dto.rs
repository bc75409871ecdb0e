//! Data transfer objects for web and CLI output.

use serde::Serialize;

use crate::domain::{ChangeTrace, DepartureRecord, Stamp};
use crate::reconcile::Board;

/// A whole departure board.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    /// Station EVA number
    pub station: String,

    /// Reference time the board was built for
    pub generated_at: String,

    /// Start of the admission window
    pub window_start: String,

    /// End of the admission window
    pub window_end: String,

    /// Departures in board order
    pub departures: Vec<BoardEntry>,
}

impl From<&Board> for BoardResponse {
    fn from(board: &Board) -> Self {
        Self {
            station: board.station.to_string(),
            generated_at: Stamp::from_instant(board.generated_at).display_text(),
            window_start: Stamp::from_instant(board.window.start()).display_text(),
            window_end: Stamp::from_instant(board.window.end()).display_text(),
            departures: board.departures.iter().map(BoardEntry::from).collect(),
        }
    }
}

/// One departure on the board.
#[derive(Debug, Serialize)]
pub struct BoardEntry {
    /// Line, e.g. "S3" or "RE60"
    pub line: Option<String>,

    /// Planned departure, `YYYY-MM-DD HH:MM` (raw code if unparsable)
    pub departure_time: Option<String>,

    /// Train category, e.g. "ICE"
    pub train_type: Option<String>,

    /// Delay in minutes; negative when early
    pub delay: Option<i64>,

    /// Final station of the route
    pub destination: Option<String>,

    pub train_number: Option<String>,

    /// Planned platform
    pub platform: Option<String>,

    /// Real-time platform, departure side first
    pub actual_platform: Option<String>,

    pub planned_arrival: Option<String>,
    pub actual_departure: Option<String>,
    pub actual_arrival: Option<String>,

    /// Departure to expect: actual if known, else planned
    pub expected_departure: Option<String>,

    /// Effective event status code ("p" planned, "a" added, "c" cancelled)
    pub status: Option<String>,

    pub cancelled: bool,

    /// Source of the delay information
    pub delay_source: Option<String>,

    /// Raw change codes seen while merging
    pub trail: Vec<TraceEntry>,
}

impl From<&DepartureRecord> for BoardEntry {
    fn from(r: &DepartureRecord) -> Self {
        Self {
            line: r.line.clone(),
            departure_time: r.planned_departure.as_ref().map(Stamp::display_text),
            train_type: r.train_type.clone(),
            delay: r.delay_minutes,
            destination: r.destination.clone(),
            train_number: r.train_number.clone(),
            platform: r.planned_platform.clone(),
            actual_platform: r.actual_platform().map(str::to_string),
            planned_arrival: r.planned_arrival.as_ref().map(Stamp::display_text),
            actual_departure: r.actual_departure.as_ref().map(Stamp::display_text),
            actual_arrival: r.actual_arrival.as_ref().map(Stamp::display_text),
            expected_departure: r.effective_departure().map(Stamp::display_text),
            status: r.effective_status().map(str::to_string),
            cancelled: r.is_cancelled(),
            delay_source: r.delay_source.clone(),
            trail: r.trail.iter().map(TraceEntry::from).collect(),
        }
    }
}

/// One observed change.
#[derive(Debug, Serialize)]
pub struct TraceEntry {
    pub arrival: Option<String>,
    pub departure: Option<String>,
}

impl From<&ChangeTrace> for TraceEntry {
    fn from(t: &ChangeTrace) -> Self {
        Self {
            arrival: t.arrival.clone(),
            departure: t.departure.clone(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
