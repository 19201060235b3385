use std::net::SocketAddr;
use std::path::PathBuf;

use configs::{AppConfig, ResolutionPolicyKind};
use reqwest::StatusCode as HttpStatusCode;
use tokio::net::TcpListener;
use uuid::Uuid;

const SEED: &str = r#"[
  {"startdate":"20240102","copyright":"Owl (© A)","urlbase":"/th?id=OHR.Owl_EN-US2","title":"Owl"},
  {"startdate":"20240101","copyright":"Lake (© B)","urlbase":"/th?id=OHR.Lake_EN-US1","title":"Lake"}
]"#;

struct TestApp {
    base_url: String,
    store_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.store_path);
    }
}

async fn start_server_with(seed: Option<&str>, tweak: impl FnOnce(&mut AppConfig)) -> anyhow::Result<TestApp> {
    // Use an isolated store file per test
    let store_path = std::env::temp_dir().join(format!("e2e_images_{}.json", Uuid::new_v4()));
    if let Some(seed) = seed {
        tokio::fs::write(&store_path, seed).await?;
    }

    let mut cfg = AppConfig::default();
    cfg.store.path = store_path.to_string_lossy().into_owned();
    tweak(&mut cfg);
    cfg.normalize_and_validate()?;

    let app = server::startup::build_app(&cfg)?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, store_path })
}

async fn start_server() -> anyhow::Result<TestApp> {
    start_server_with(Some(SEED), |_| {}).await
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("reqwest client")
}

async fn get_json(app: &TestApp, query: &str) -> anyhow::Result<(HttpStatusCode, serde_json::Value)> {
    let res = client().get(format!("{}/v1?{}", app.base_url, query)).send().await?;
    let status = res.status();
    Ok((status, res.json::<serde_json::Value>().await?))
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_default_redirects_to_latest() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/v1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::TEMPORARY_REDIRECT);
    let location = res.headers().get("location").expect("location header").to_str()?;
    assert_eq!(location, "https://www.bing.com/th?id=OHR.Owl_EN-US2_UHD.jpg&w=1920&h=1080");

    // trailing slash is the same endpoint
    let res = client().get(format!("{}/v1/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::TEMPORARY_REDIRECT);
    Ok(())
}

#[tokio::test]
async fn e2e_json_format_matches_redirect_target() -> anyhow::Result<()> {
    let app = start_server().await?;
    let (status, body) = get_json(&app, "index=-1&format=json&resolution=720p&qlt=80").await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["startdate"], "20240101");
    assert_eq!(body["title"], "Lake");
    assert_eq!(body["copyright"], "Lake (© B)");
    assert_eq!(body["urlbase"], "/th?id=OHR.Lake_EN-US1");
    assert_eq!(body["url"], "https://www.bing.com/th?id=OHR.Lake_EN-US1_UHD.jpg&qlt=80&w=1280&h=720");

    let res = client().get(format!("{}/v1?index=-1&resolution=720p&qlt=80", app.base_url)).send().await?;
    assert_eq!(res.headers()["location"].to_str()?, body["url"].as_str().unwrap());
    Ok(())
}

#[tokio::test]
async fn e2e_selection_by_date_and_random() -> anyhow::Result<()> {
    let app = start_server().await?;
    let (status, body) = get_json(&app, "date=20240101&format=json").await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["startdate"], "20240101");

    for _ in 0..10 {
        let (status, body) = get_json(&app, "rand=true&format=json").await?;
        assert_eq!(status, HttpStatusCode::OK);
        assert!(["20240102", "20240101"].contains(&body["startdate"].as_str().unwrap()));
        let (_, body) = get_json(&app, "index=random&format=json").await?;
        assert!(["20240102", "20240101"].contains(&body["startdate"].as_str().unwrap()));
    }
    Ok(())
}

#[tokio::test]
async fn e2e_selection_misses_are_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    for q in ["index=2", "index=5", "index=-3", "date=19991231"] {
        let (status, body) = get_json(&app, q).await?;
        assert_eq!(status, HttpStatusCode::NOT_FOUND, "{q}");
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["error"], "Not Found");
    }
    Ok(())
}

#[tokio::test]
async fn e2e_validation_errors_are_400() -> anyhow::Result<()> {
    let app = start_server().await?;
    for q in ["qlt=101", "rand=maybe", "date=2024-01-01", "foo=bar", "resolution=8k", "format=xml", "w=-1", "index=1&index=2"] {
        let (status, body) = get_json(&app, q).await?;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST, "{q}");
        assert_eq!(body["statusCode"], 400);
        assert!(body["message"].as_str().unwrap().starts_with("validation error"));
    }
    Ok(())
}

#[tokio::test]
async fn e2e_missing_or_corrupt_store_is_500() -> anyhow::Result<()> {
    let missing = start_server_with(None, |_| {}).await?;
    let (status, body) = get_json(&missing, "").await?;
    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["statusCode"], 500);

    // validation still wins over the store fault: nothing is read
    let (status, _) = get_json(&missing, "qlt=500").await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);

    let corrupt = start_server_with(Some("[{\"startdate\":"), |_| {}).await?;
    let (status, _) = get_json(&corrupt, "format=json").await?;
    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn e2e_store_is_reread_per_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let (_, body) = get_json(&app, "format=json").await?;
    assert_eq!(body["startdate"], "20240102");

    tokio::fs::write(
        &app.store_path,
        r#"[{"startdate":"20240103","copyright":"c","urlbase":"/th?id=OHR.New","title":"New"}]"#,
    )
    .await?;
    let (_, body) = get_json(&app, "format=json").await?;
    assert_eq!(body["startdate"], "20240103");
    Ok(())
}

#[tokio::test]
async fn e2e_path_policy_with_forwarded_params() -> anyhow::Result<()> {
    let app = start_server_with(Some(SEED), |cfg| {
        cfg.image.policy = ResolutionPolicyKind::Path;
        cfg.image.allow_unknown_params = true;
    })
    .await?;
    let (status, body) = get_json(&app, "format=json&resolution=1366x768&qlt=70&rs=1").await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["url"], "https://www.bing.com/th?id=OHR.Owl_EN-US2_1366x768.jpg&qlt=70&rs=1");

    let (status, _) = get_json(&app, "resolution=1080p").await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_cors_metrics_and_openapi() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .get(format!("{}/v1?format=json", app.base_url))
        .header("Origin", "https://wallpaper.example.test")
        .send()
        .await?;
    assert_eq!(res.headers()["access-control-allow-origin"].to_str()?, "https://wallpaper.example.test");

    let metrics = c.get(format!("{}/metrics", app.base_url)).send().await?.text().await?;
    assert!(metrics.contains("wallpaper_lookups_total"));

    let doc = c.get(format!("{}/openapi.json", app.base_url)).send().await?.json::<serde_json::Value>().await?;
    assert!(doc["paths"]["/v1"]["get"].is_object());
    Ok(())
}
