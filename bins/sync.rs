//! One-shot store sync. Run it from cron or a systemd timer; it does not schedule itself.

use std::sync::Arc;

use dotenvy::dotenv;
use service::{
    file::image_store::FileImageStore,
    sync::{HttpImageFeed, SyncService},
};
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    dotenv().ok();
    common::utils::logging::init_logging_json();
    info!(service = "wallpaper-sync", event = "logger_init", "tracing subscriber initialized");
}

async fn run(cfg: configs::AppConfig) -> anyhow::Result<()> {
    let store = FileImageStore::new(&cfg.store.path);
    let feed = HttpImageFeed::from_config(&cfg.upstream)?;
    info!(
        service = "wallpaper-sync",
        event = "sync_start",
        store = %store.path().display(),
        feed_url = %cfg.upstream.feed_url,
        market = %cfg.upstream.market,
        count = cfg.upstream.count,
        "syncing store from upstream feed"
    );

    let report = SyncService::new(Arc::new(feed), store).sync().await?;
    info!(
        service = "wallpaper-sync",
        event = "sync_done",
        fetched = report.fetched,
        added = ?report.added,
        total = report.total,
        "sync finished"
    );
    Ok(())
}

fn main() -> std::process::ExitCode {
    init_logging();

    let run_id = Uuid::new_v4();
    let version = env!("CARGO_PKG_VERSION");

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "wallpaper-sync", event = "config_invalid", %run_id, error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "wallpaper-sync", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "wallpaper-sync", event = "start", %run_id, version, "sync job starting");
    match rt.block_on(run(cfg)) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            // the store is left as it was
            error!(service = "wallpaper-sync", event = "sync_failed", %run_id, error = %e, "sync aborted");
            std::process::ExitCode::FAILURE
        }
    }
}
