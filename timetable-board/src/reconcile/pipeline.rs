//! The board pipeline: fetch, ingest, merge, assemble.

use std::fmt;

use chrono::NaiveDateTime;
use futures::future::try_join_all;
use tracing::{debug, info};

use crate::document::{TreeNode, normalize};
use crate::domain::{DepartureRecord, HourBucket, StationId};
use crate::timetables::{FeedError, FeedFetcher};

use super::assemble::assemble;
use super::changes::apply_changes;
use super::config::{BoardConfig, Clock};
use super::plan::ingest_plan;
use super::window::TimeWindow;

/// Which upstream feed a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Plan,
    Changes,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plan => write!(f, "plan"),
            Self::Changes => write!(f, "change"),
        }
    }
}

/// Errors that abort a board run.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// A feed could not be fetched; no partial board is produced.
    #[error(
        "failed to fetch {feed} feed{}: {source}",
        .bucket.map(|b| format!(" for {b}")).unwrap_or_default()
    )]
    Fetch {
        feed: FeedKind,
        bucket: Option<HourBucket>,
        #[source]
        source: FeedError,
    },
}

/// An assembled departure board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub station: StationId,
    /// The reference time the board was built for.
    pub generated_at: NaiveDateTime,
    pub window: TimeWindow,
    /// Departures in board order.
    pub departures: Vec<DepartureRecord>,
}

/// Run the pure reconciliation over already-fetched documents.
///
/// Plan documents are ingested in order and concatenated, then every change
/// is merged and the result is assembled into board order.
pub fn reconcile(
    plan_docs: &[TreeNode],
    change_doc: &TreeNode,
    window: &TimeWindow,
) -> Vec<DepartureRecord> {
    let planned: Vec<DepartureRecord> = plan_docs
        .iter()
        .flat_map(|doc| ingest_plan(&normalize(doc), window))
        .collect();

    let merged = apply_changes(planned, &normalize(change_doc));

    assemble(merged)
}

/// Build the board for the configured station.
///
/// Fetches the plan for the current and the next clock hour together with
/// the change feed, all concurrently. Any fetch failure aborts the run.
pub async fn build_board<F, C>(
    fetcher: &F,
    config: &BoardConfig,
    clock: &C,
) -> Result<Board, BoardError>
where
    F: FeedFetcher,
    C: Clock + ?Sized,
{
    let now = clock.now();
    let window = TimeWindow::starting_at(now, config.window_minutes());
    let station = &config.station;

    let plans = try_join_all(HourBucket::current_and_next(now).map(|bucket| async move {
        fetcher
            .fetch_plan(station, bucket)
            .await
            .map_err(|source| BoardError::Fetch {
                feed: FeedKind::Plan,
                bucket: Some(bucket),
                source,
            })
    }));

    let changes = async {
        fetcher
            .fetch_changes(station)
            .await
            .map_err(|source| BoardError::Fetch {
                feed: FeedKind::Changes,
                bucket: None,
                source,
            })
    };

    let (plan_docs, change_doc) = futures::try_join!(plans, changes)?;

    debug!(
        %station,
        plan_documents = plan_docs.len(),
        "Fetched timetable feeds"
    );

    let departures = reconcile(&plan_docs, &change_doc, &window);

    info!(
        %station,
        departures = departures.len(),
        window_start = %window.start(),
        window_end = %window.end(),
        "Built departure board"
    );

    Ok(Board {
        station: station.clone(),
        generated_at: window.start(),
        window,
        departures,
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
