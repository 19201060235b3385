use std::path::Path;
use std::sync::Arc;

use models::image::ImageRecord;

use crate::errors::ServiceError;
use crate::storage::json_list_store::JsonListStore;
use crate::store::image_store::ImageStore;

/// File-backed image list (`json/data.json` by default).
/// Holds no records in memory; each `load` re-reads the file.
pub struct FileImageStore {
    store: JsonListStore<ImageRecord>,
}

impl FileImageStore {
    pub fn new<P: Into<std::path::PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { store: JsonListStore::new(path) })
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

#[async_trait::async_trait]
impl ImageStore for FileImageStore {
    async fn load(&self) -> Result<Vec<ImageRecord>, ServiceError> { self.store.load().await }
    async fn save(&self, images: &[ImageRecord]) -> Result<(), ServiceError> { self.store.save(images).await }
}
