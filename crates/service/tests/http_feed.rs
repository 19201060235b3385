use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

use service::errors::ServiceError;
use service::file::image_store::FileImageStore;
use service::store::image_store::ImageStore;
use service::sync::{HttpImageFeed, ImageFeed, SyncService};

/// Fake archive endpoint: echoes the requested market into the titles so the
/// test can see the query string arrived.
async fn archive(Query(q): Query<HashMap<String, String>>) -> Result<Json<serde_json::Value>, StatusCode> {
    if q.get("format").map(String::as_str) != Some("js") || q.get("idx").map(String::as_str) != Some("0") {
        return Err(StatusCode::BAD_REQUEST);
    }
    let n: usize = q.get("n").and_then(|n| n.parse().ok()).ok_or(StatusCode::BAD_REQUEST)?;
    let mkt = q.get("mkt").cloned().unwrap_or_default();
    let images: Vec<_> = ["20240105", "20240104", "20240103"]
        .iter()
        .take(n)
        .map(|d| {
            json!({
                "startdate": d,
                "fullstartdate": format!("{d}0800"),
                "enddate": "x",
                "url": format!("/th?id=OHR.{d}_1920x1080.jpg"),
                "urlbase": format!("/th?id=OHR.{d}"),
                "copyright": "someone",
                "title": format!("{mkt} {d}"),
                "hsh": "abc"
            })
        })
        .collect();
    Ok(Json(json!({ "images": images, "tooltips": {} })))
}

async fn start_feed() -> anyhow::Result<String> {
    let app = Router::new()
        .route("/HPImageArchive.aspx", get(archive))
        .route("/broken", get(|| async { (StatusCode::OK, "<html>maintenance</html>") }))
        .route("/down", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("feed server error: {}", e); }
    });
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

#[tokio::test]
async fn fetches_bounded_batch_with_market() -> anyhow::Result<()> {
    let base = start_feed().await?;
    let feed = HttpImageFeed::new(format!("{base}/HPImageArchive.aspx"), "de-DE", 2, Duration::from_secs(5))?;

    let images = feed.fetch_latest().await?;
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].startdate, "20240105");
    assert_eq!(images[0].title, "de-DE 20240105");
    assert_eq!(images[1].urlbase, "/th?id=OHR.20240104");
    Ok(())
}

#[tokio::test]
async fn http_errors_and_bad_payloads_are_fetch_faults() -> anyhow::Result<()> {
    let base = start_feed().await?;
    for path in ["/down", "/broken"] {
        let feed = HttpImageFeed::new(format!("{base}{path}"), "en-US", 8, Duration::from_secs(5))?;
        assert!(matches!(feed.fetch_latest().await, Err(ServiceError::UpstreamFetch(_))), "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn sync_against_http_feed_merges_into_file() -> anyhow::Result<()> {
    let base = start_feed().await?;
    let path = std::env::temp_dir().join(format!("sync_http_{}.json", Uuid::new_v4()));
    tokio::fs::write(
        &path,
        r#"[{"startdate":"20240104","copyright":"kept","urlbase":"/th?id=OHR.20240104","title":"old"}]"#,
    )
    .await?;

    let store = FileImageStore::new(&path);
    let feed = HttpImageFeed::new(format!("{base}/HPImageArchive.aspx"), "en-US", 10, Duration::from_secs(5))?;
    let job = SyncService::new(Arc::new(feed), store.clone());

    let report = job.sync().await?;
    assert_eq!(report.fetched, 3);
    assert_eq!(report.added, vec!["20240105".to_string(), "20240103".to_string()]);

    let images = store.load().await?;
    let dates: Vec<&str> = images.iter().map(|i| i.startdate.as_str()).collect();
    assert_eq!(dates, ["20240105", "20240104", "20240103"]);
    assert_eq!(images[1].title, "old");

    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}
