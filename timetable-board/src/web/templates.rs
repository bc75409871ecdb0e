//! Askama templates for the HTML board.

use askama::Template;

use crate::domain::{DepartureRecord, Stamp};
use crate::reconcile::Board;

/// The departure board page.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub station: String,
    pub generated_at: String,
    pub window_end: String,
    pub rows: Vec<DepartureRow>,
}

impl BoardTemplate {
    pub fn from_board(board: &Board) -> Self {
        Self {
            station: board.station.to_string(),
            generated_at: clock_time(&Stamp::from_instant(board.generated_at)),
            window_end: clock_time(&Stamp::from_instant(board.window.end())),
            rows: board.departures.iter().map(DepartureRow::from_record).collect(),
        }
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

/// One row of the board view.
#[derive(Debug, Clone)]
pub struct DepartureRow {
    /// Planned departure, `HH:MM`
    pub scheduled: String,
    /// Actual departure if it differs from planned
    pub expected: Option<String>,
    pub line: String,
    pub train: String,
    pub destination: String,
    pub platform: String,
    pub platform_changed: bool,
    pub delay: Option<i64>,
    pub cancelled: bool,
}

impl DepartureRow {
    pub fn from_record(r: &DepartureRecord) -> Self {
        let scheduled = r
            .planned_departure
            .as_ref()
            .map(clock_time)
            .unwrap_or_default();
        let expected = r
            .actual_departure
            .as_ref()
            .map(clock_time)
            .filter(|t| t != &scheduled);

        let train = [r.train_type.as_deref(), r.train_number.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            scheduled,
            expected,
            line: r.line.clone().unwrap_or_default(),
            train,
            destination: r.destination.clone().unwrap_or_default(),
            platform: r.effective_platform().unwrap_or_default().to_string(),
            platform_changed: r.platform_changed(),
            delay: r.delay_minutes.filter(|d| *d != 0),
            cancelled: r.is_cancelled(),
        }
    }

    /// Delay badge text, e.g. "+6" or "-2".
    pub fn delay_text(&self) -> String {
        match self.delay {
            Some(d) if d > 0 => format!("+{d}"),
            Some(d) => d.to_string(),
            None => String::new(),
        }
    }
}

/// `HH:MM` of a stamp, or its raw code when unparsable.
fn clock_time(stamp: &Stamp) -> String {
    stamp
        .instant()
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| stamp.raw().to_string())
}
