//! Environment/runtime helpers
//!
//! Sanity checks on the store file location at startup.

use tracing::{info, warn};

/// Check the store file before serving. A missing file is only warned about
/// (lookups will answer 500 until it is seeded); a directory at that path is an error.
pub async fn ensure_env(store_path: &str) -> anyhow::Result<()> {
    match tokio::fs::metadata(store_path).await {
        Ok(meta) if meta.is_dir() => {
            Err(anyhow::anyhow!("store path {store_path} is a directory, expected a JSON file"))
        }
        Ok(meta) => {
            info!(%store_path, bytes = meta.len(), "store file found");
            Ok(())
        }
        Err(_) => {
            warn!(%store_path, "store file not found; lookups will fail until it is seeded");
            Ok(())
        }
    }
}
