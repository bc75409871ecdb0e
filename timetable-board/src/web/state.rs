//! Application state for the web layer.

use std::sync::Arc;

use crate::reconcile::BoardConfig;
use crate::timetables::FeedSource;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Feed documents, live or from fixtures
    pub feeds: Arc<FeedSource>,

    /// Board configuration
    pub config: Arc<BoardConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(feeds: FeedSource, config: BoardConfig) -> Self {
        Self {
            feeds: Arc::new(feeds),
            config: Arc::new(config),
        }
    }
}
