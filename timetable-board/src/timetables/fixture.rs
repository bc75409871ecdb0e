//! Fixture feed client for running without API access.
//!
//! Reads timetable documents from XML files on disk and serves them as if
//! they were live API responses.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::TreeNode;
use crate::domain::{HourBucket, StationId};

use super::error::FeedError;
use super::fetcher::FeedFetcher;

/// Root tag of an empty plan document.
const EMPTY_PLAN_TAG: &str = "timetable";

/// Feed client that serves documents from a directory.
///
/// Expects files named `plan_{station}_{yyMMdd}_{HH}.xml` for planned hours
/// and `fchg_{station}.xml` for the change feed. A missing plan hour is an
/// hour without departures; a missing change file is an error.
#[derive(Debug, Clone)]
pub struct FixtureFeedClient {
    dir: PathBuf,
}

impl FixtureFeedClient {
    /// Create a fixture client over the given directory.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of a planned-hour fixture.
    pub fn plan_path(&self, station: &StationId, bucket: HourBucket) -> PathBuf {
        self.dir.join(format!(
            "plan_{}_{}_{}.xml",
            station.as_str(),
            bucket.date_code(),
            bucket.hour_code()
        ))
    }

    /// Path of the change-feed fixture.
    pub fn changes_path(&self, station: &StationId) -> PathBuf {
        self.dir.join(format!("fchg_{}.xml", station.as_str()))
    }

    async fn read_document(path: &Path) -> Result<Option<TreeNode>, FeedError> {
        let xml = match tokio::fs::read_to_string(path).await {
            Ok(xml) => xml,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(FeedError::Fixture {
                    message: format!("failed to read {}: {}", path.display(), e),
                });
            }
        };

        debug!(path = %path.display(), bytes = xml.len(), "Loaded fixture document");

        TreeNode::parse_xml(&xml)
            .map(Some)
            .map_err(|e| FeedError::Xml {
                message: format!("{}: {}", path.display(), e),
                body: None,
            })
    }
}

impl FeedFetcher for FixtureFeedClient {
    async fn fetch_plan(
        &self,
        station: &StationId,
        bucket: HourBucket,
    ) -> Result<TreeNode, FeedError> {
        let path = self.plan_path(station, bucket);
        match Self::read_document(&path).await? {
            Some(doc) => Ok(doc),
            None => {
                debug!(path = %path.display(), "No fixture for hour, serving empty plan");
                Ok(TreeNode::new(EMPTY_PLAN_TAG))
            }
        }
    }

    async fn fetch_changes(&self, station: &StationId) -> Result<TreeNode, FeedError> {
        let path = self.changes_path(station);
        Self::read_document(&path)
            .await?
            .ok_or_else(|| FeedError::Fixture {
                message: format!("missing change fixture {}", path.display()),
            })
    }
}
