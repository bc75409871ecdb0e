//! Caching layer for timetable feed documents.
//!
//! Planned hours are static once published, so they are cached for a long
//! time keyed by (station, hour bucket). The change feed moves constantly
//! and is cached only briefly, keyed by station.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::document::TreeNode;
use crate::domain::{HourBucket, StationId};
use crate::timetables::{FeedError, FeedFetcher};

/// Cache key for planned hours.
type PlanKey = (StationId, HourBucket);

/// Cached document.
type DocEntry = Arc<TreeNode>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for planned-hour documents.
    pub plan_ttl: Duration,

    /// TTL for change documents.
    pub changes_ttl: Duration,

    /// Maximum number of cached entries per feed.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            plan_ttl: Duration::from_secs(60 * 60),
            changes_ttl: Duration::from_secs(30),
            max_capacity: 1000,
        }
    }
}

/// Feed fetcher with caching.
///
/// Wraps any [`FeedFetcher`]. Failures are never cached.
pub struct CachedFeedClient<F> {
    inner: F,
    plans: MokaCache<PlanKey, DocEntry>,
    changes: MokaCache<StationId, DocEntry>,
}

impl<F: FeedFetcher> CachedFeedClient<F> {
    /// Create a new cached client.
    pub fn new(inner: F, config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(config.plan_ttl)
            .max_capacity(config.max_capacity)
            .build();
        let changes = MokaCache::builder()
            .time_to_live(config.changes_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            plans,
            changes,
        }
    }

    /// Access the wrapped fetcher.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.plans.invalidate_all();
        self.changes.invalidate_all();
    }
}

impl<F: FeedFetcher> FeedFetcher for CachedFeedClient<F> {
    async fn fetch_plan(
        &self,
        station: &StationId,
        bucket: HourBucket,
    ) -> Result<TreeNode, FeedError> {
        let key = (station.clone(), bucket);

        if let Some(cached) = self.plans.get(&key).await {
            debug!(%station, %bucket, "Plan cache hit");
            return Ok(TreeNode::clone(&cached));
        }

        let doc = self.inner.fetch_plan(station, bucket).await?;
        self.plans.insert(key, Arc::new(doc.clone())).await;

        Ok(doc)
    }

    async fn fetch_changes(&self, station: &StationId) -> Result<TreeNode, FeedError> {
        if let Some(cached) = self.changes.get(station).await {
            debug!(%station, "Change cache hit");
            return Ok(TreeNode::clone(&cached));
        }

        let doc = self.inner.fetch_changes(station).await?;
        self.changes
            .insert(station.clone(), Arc::new(doc.clone()))
            .await;

        Ok(doc)
    }
}
