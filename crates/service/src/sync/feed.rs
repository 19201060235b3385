use std::time::Duration;

use async_trait::async_trait;
use configs::UpstreamConfig;
use models::feed::{FeedImage, FeedResponse};
use tracing::{debug, instrument};

use crate::errors::ServiceError;

/// Source of the most recent image-of-the-day entries.
#[async_trait]
pub trait ImageFeed: Send + Sync {
    /// Newest first, bounded by the feed's configured count.
    async fn fetch_latest(&self) -> Result<Vec<FeedImage>, ServiceError>;
}

/// HTTP archive feed: `GET {feed_url}?format=js&idx=0&n={count}&mkt={market}`.
pub struct HttpImageFeed {
    client: reqwest::Client,
    feed_url: String,
    market: String,
    count: u32,
}

impl HttpImageFeed {
    pub fn new(
        feed_url: impl Into<String>,
        market: impl Into<String>,
        count: u32,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::UpstreamFetch(format!("http client: {e}")))?;
        Ok(Self { client, feed_url: feed_url.into(), market: market.into(), count })
    }

    pub fn from_config(cfg: &UpstreamConfig) -> Result<Self, ServiceError> {
        Self::new(cfg.feed_url.clone(), cfg.market.clone(), cfg.count, Duration::from_secs(cfg.timeout_secs))
    }
}

#[async_trait]
impl ImageFeed for HttpImageFeed {
    #[instrument(skip(self), fields(feed_url = %self.feed_url, count = self.count))]
    async fn fetch_latest(&self) -> Result<Vec<FeedImage>, ServiceError> {
        let count = self.count.to_string();
        let resp = self
            .client
            .get(&self.feed_url)
            .query(&[("format", "js"), ("idx", "0"), ("n", count.as_str()), ("mkt", self.market.as_str())])
            .send()
            .await
            .map_err(|e| ServiceError::UpstreamFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| ServiceError::UpstreamFetch(e.to_string()))?;
        let feed = resp
            .json::<FeedResponse>()
            .await
            .map_err(|e| ServiceError::UpstreamFetch(format!("invalid feed payload: {e}")))?;
        debug!(received = feed.images.len(), "feed fetched");
        Ok(feed.images)
    }
}
