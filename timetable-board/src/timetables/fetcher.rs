//! The feed fetcher seam.

use std::future::Future;

use crate::document::TreeNode;
use crate::domain::{HourBucket, StationId};

use super::error::FeedError;

/// Source of raw timetable documents.
///
/// This abstraction allows the board pipeline to be tested with mock data
/// and to run against fixture files instead of the live API. Transport,
/// authentication and caching are the implementor's concern; callers only
/// see a document or a failure.
pub trait FeedFetcher: Sync {
    /// Fetch the planned schedule for one hour at a station.
    fn fetch_plan(
        &self,
        station: &StationId,
        bucket: HourBucket,
    ) -> impl Future<Output = Result<TreeNode, FeedError>> + Send;

    /// Fetch all known real-time changes for a station.
    fn fetch_changes(
        &self,
        station: &StationId,
    ) -> impl Future<Output = Result<TreeNode, FeedError>> + Send;
}
