use std::sync::Arc;

use configs::ImageConfig;
use models::image::ImageView;
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::lookup::query::LookupQuery;
use crate::lookup::resolution::ResolutionPolicy;
use crate::lookup::selector;
use crate::store::image_store::ImageStore;

/// Application service behind `GET /v1`.
/// Stateless between requests: the list is re-read from the store every time.
pub struct LookupService {
    store: Arc<dyn ImageStore>,
    policy: ResolutionPolicy,
    base_url: String,
    allow_unknown_params: bool,
}

impl LookupService {
    pub fn new(store: Arc<dyn ImageStore>, policy: ResolutionPolicy, base_url: impl Into<String>) -> Self {
        Self { store, policy, base_url: base_url.into(), allow_unknown_params: false }
    }

    pub fn with_unknown_params(mut self, allow: bool) -> Self {
        self.allow_unknown_params = allow;
        self
    }

    pub fn from_config(store: Arc<dyn ImageStore>, cfg: &ImageConfig) -> Result<Self, ServiceError> {
        let policy = ResolutionPolicy::from_config(cfg.policy, cfg.default_resolution.as_deref())?;
        Ok(Self::new(store, policy, cfg.base_url.clone()).with_unknown_params(cfg.allow_unknown_params))
    }

    pub fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    /// Validate raw query pairs; never touches the store.
    pub fn parse_query(&self, pairs: &[(String, String)]) -> Result<LookupQuery, ServiceError> {
        LookupQuery::from_pairs(pairs, &self.policy, self.allow_unknown_params)
    }

    /// Select one record and build its image URL.
    #[instrument(skip(self, query), fields(selector = query.selector.label()))]
    pub async fn resolve(&self, query: &LookupQuery) -> Result<ImageView, ServiceError> {
        let images = self.store.load().await?;
        let image = selector::select(&images, &query.selector, &mut rand::thread_rng())?.clone();
        let url = self.policy.build_url(&self.base_url, &image.urlbase, &query.size);
        debug!(startdate = %image.startdate, %url, total = images.len(), "image resolved");
        Ok(ImageView { image, url })
    }
}
