//! Reconciliation of planned and real-time timetable feeds.
//!
//! This module turns the two upstream documents into a departure board:
//!
//! 1. every planned hour is ingested into candidate records, admitting only
//!    departures inside the rolling window
//! 2. the change feed is folded over the candidates, matching by trip
//!    identity and overlaying actual times, platforms and status
//! 3. the merged records are ordered by planned departure
//!
//! Everything except [`build_board`] is synchronous and pure.

mod assemble;
mod changes;
mod config;
mod pipeline;
mod plan;
mod window;

pub use assemble::assemble;
pub use changes::{apply_changes, patch_from_stop};
pub use config::{
    BoardConfig, Clock, DEFAULT_WINDOW_MINUTES, FixedClock, MAX_WINDOW_MINUTES, SystemClock,
};
pub use pipeline::{Board, BoardError, FeedKind, build_board, reconcile};
pub use plan::ingest_plan;
pub use window::TimeWindow;
