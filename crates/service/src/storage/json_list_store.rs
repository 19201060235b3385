use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;

use crate::errors::ServiceError;

/// Generic JSON file-backed list.
///
/// Persists a `Vec<T>` as one compact JSON array. Nothing is cached: every
/// `load` reads the whole file, so the file stays the single source of truth
/// for any number of reader processes.
pub struct JsonListStore<T> {
    file_path: PathBuf,
    _item: PhantomData<fn() -> T>,
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), _item: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read and parse the whole file. Missing or malformed files are errors.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::StoreRead(format!("{}: {e}", self.file_path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::StoreRead(format!("{}: invalid JSON: {e}", self.file_path.display())))
    }

    /// Replace the file contents with `items`.
    ///
    /// Written to a sibling temp file first and renamed over the target, so a
    /// concurrent reader sees either the old list or the new one.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(items).map_err(|e| ServiceError::StoreWrite(e.to_string()))?;
        let tmp = self.temp_path();
        fs::write(&tmp, data)
            .await
            .map_err(|e| ServiceError::StoreWrite(format!("{}: {e}", tmp.display())))?;
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::StoreWrite(format!("{}: {e}", self.file_path.display())));
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store".to_string());
        self.file_path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
    }
}
