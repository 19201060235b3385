use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes;
use service::{file::image_store::FileImageStore, lookup::LookupService};

/// Wire the file store, lookup service and router from configuration.
pub fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let store = FileImageStore::new(&cfg.store.path);
    let lookup = LookupService::from_config(store, &cfg.image)?;
    info!(
        store = %cfg.store.path,
        policy = ?lookup.policy(),
        base_url = %cfg.image.base_url,
        allow_unknown_params = cfg.image.allow_unknown_params,
        "lookup service configured"
    );
    Ok(routes::build_router(Arc::new(lookup), routes::build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_env(&cfg.store.path).await?;

    let app = build_app(&cfg)?;

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, host = %cfg.server.host, "starting wallpaper server");
    axum::serve(listener, app).await?;
    Ok(())
}
