//! Timetable feed access.
//!
//! The upstream service publishes two documents per station:
//! - a planned schedule, one document per station and clock hour
//! - a change feed carrying every known real-time deviation
//!
//! Both are XML. Fetchers hand back the raw [`TreeNode`] and leave all
//! interpretation to the reconciliation pipeline.

mod client;
mod error;
mod fetcher;
mod fixture;

pub use client::{FeedConfig, TimetablesClient};
pub use error::FeedError;
pub use fetcher::FeedFetcher;
pub use fixture::FixtureFeedClient;

use crate::cache::CachedFeedClient;
use crate::document::TreeNode;
use crate::domain::{HourBucket, StationId};

/// The feed backing a running application.
pub enum FeedSource {
    /// Live API behind a cache.
    Live(CachedFeedClient<TimetablesClient>),
    /// XML files on disk.
    Fixture(FixtureFeedClient),
}

impl FeedFetcher for FeedSource {
    async fn fetch_plan(
        &self,
        station: &StationId,
        bucket: HourBucket,
    ) -> Result<TreeNode, FeedError> {
        match self {
            Self::Live(client) => client.fetch_plan(station, bucket).await,
            Self::Fixture(client) => client.fetch_plan(station, bucket).await,
        }
    }

    async fn fetch_changes(&self, station: &StationId) -> Result<TreeNode, FeedError> {
        match self {
            Self::Live(client) => client.fetch_changes(station).await,
            Self::Fixture(client) => client.fetch_changes(station).await,
        }
    }
}
