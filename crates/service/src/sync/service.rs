use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::store::image_store::ImageStore;
use crate::sync::feed::ImageFeed;
use crate::sync::merge::merge_batch;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SyncReport {
    /// Entries returned by the feed.
    pub fetched: usize,
    /// Startdates newly stored.
    pub added: Vec<String>,
    /// Store size after the run.
    pub total: usize,
}

/// Fetch-merge-sort-write job. One run per call; scheduling is up to the caller.
pub struct SyncService {
    feed: Arc<dyn ImageFeed>,
    store: Arc<dyn ImageStore>,
}

impl SyncService {
    pub fn new(feed: Arc<dyn ImageFeed>, store: Arc<dyn ImageStore>) -> Self {
        Self { feed, store }
    }

    /// Fetch first so a feed failure leaves the store untouched; a store that
    /// cannot be read aborts before anything is written.
    #[instrument(skip(self))]
    pub async fn sync(&self) -> Result<SyncReport, ServiceError> {
        let batch = self.feed.fetch_latest().await?;
        let fetched = batch.len();
        let existing = self.store.load().await?;
        let before = existing.len();

        let outcome = merge_batch(existing, batch);
        self.store.save(&outcome.images).await?;

        let report = SyncReport { fetched, added: outcome.added, total: outcome.images.len() };
        info!(fetched, before, added = report.added.len(), total = report.total, "store synced");
        Ok(report)
    }
}
