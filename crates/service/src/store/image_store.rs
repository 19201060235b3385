use crate::errors::ServiceError;
use async_trait::async_trait;
use models::image::ImageRecord;

/// Trait abstraction for the image list.
/// Readers call `load` per request; only the sync job calls `save`.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Full list in stored order (newest first when written by the sync job).
    async fn load(&self) -> Result<Vec<ImageRecord>, ServiceError>;
    /// Replace the full list.
    async fn save(&self, images: &[ImageRecord]) -> Result<(), ServiceError>;
}
