use std::path::Path;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "localhost".into(), port: 3000, worker_threads: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON array of image records, newest first.
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: "json/data.json".into() }
    }
}

/// How a requested display size ends up in the image URL.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionPolicyKind {
    /// `resolution=1080p` style names, sent upstream as `w`/`h` hints on the UHD image.
    #[default]
    Named,
    /// `resolution=1920x1080` style tokens, embedded in the image path.
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub base_url: String,
    pub policy: ResolutionPolicyKind,
    /// Applied when the request has no `resolution`; `None` picks the policy's own default.
    pub default_resolution: Option<String>,
    /// Forward unrecognised query parameters upstream instead of rejecting the request.
    pub allow_unknown_params: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.bing.com".into(),
            policy: ResolutionPolicyKind::Named,
            default_resolution: None,
            allow_unknown_params: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub feed_url: String,
    pub market: String,
    /// Number of most recent days requested per sync.
    pub count: u32,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            feed_url: "https://www.bing.com/HPImageArchive.aspx".into(),
            market: "en-US".into(),
            count: 10,
            timeout_secs: 30,
        }
    }
}

const MAX_FEED_COUNT: u32 = 16;

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`) if present, apply env overrides, then validate.
    /// A missing file is not an error: defaults plus env are enough to run.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if Path::new(&path).exists() {
            load_from_file(&path).map_err(|e| anyhow!("failed to load {path}: {e}"))?
        } else {
            AppConfig::default()
        };
        cfg.apply_overrides(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Env overrides: `HOST`, `PORT`, `STORE_PATH`, `FEED_URL`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(path) = lookup("STORE_PATH") {
            self.store.path = path;
        }
        if let Some(url) = lookup("FEED_URL") {
            self.upstream.feed_url = url;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        if self.store.path.trim().is_empty() {
            return Err(anyhow!("store.path must not be empty"));
        }
        self.image.normalize()?;
        self.upstream.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "localhost".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl ImageConfig {
    fn normalize(&mut self) -> Result<()> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(anyhow!("image.base_url must start with http(s)"));
        }
        self.base_url = trimmed.to_string();
        if matches!(self.default_resolution.as_deref(), Some(r) if r.trim().is_empty()) {
            self.default_resolution = None;
        }
        Ok(())
    }
}

impl UpstreamConfig {
    fn validate(&self) -> Result<()> {
        if !(self.feed_url.starts_with("http://") || self.feed_url.starts_with("https://")) {
            return Err(anyhow!("upstream.feed_url must start with http(s)"));
        }
        if self.count == 0 || self.count > MAX_FEED_COUNT {
            return Err(anyhow!("upstream.count must be in 1..={MAX_FEED_COUNT}"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("upstream.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}
