//! Registry sources.
//!
//! A [`RegistrySource`] produces the raw registry text. [`HttpRegistry`]
//! performs a single `GET` against the configured URL; [`FileRegistry`] reads a
//! local copy for offline documentation builds. Neither retries.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use tracing::{debug, info};

use crate::error::{DocsError, Result};

/// Raw-content URL of the community registry.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/papercast-dev/papercast-community/main/plugins.jsonc";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("papercast-docs/", env!("CARGO_PKG_VERSION"));

/// Something that yields the registry document as text.
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Read the full registry text.
    async fn read_text(&self) -> Result<String>;

    /// Human-readable location, used in logs.
    fn location(&self) -> String;
}

/// Registry fetched over HTTP.
pub struct HttpRegistry {
    client: Client,
    url: String,
    no_cache: bool,
}

impl HttpRegistry {
    /// Create a fetcher with the default timeout and caching allowed.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_options(url, Duration::from_secs(DEFAULT_TIMEOUT_SECS), false)
    }

    /// Create a fetcher with an explicit timeout and cache policy.
    ///
    /// With `no_cache` set, the request carries `Cache-Control: no-cache` and
    /// `Pragma: no-cache` so intermediaries revalidate.
    pub fn with_options(url: impl Into<String>, timeout: Duration, no_cache: bool) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            no_cache,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RegistrySource for HttpRegistry {
    async fn read_text(&self) -> Result<String> {
        let mut request = self.client.get(&self.url);
        if self.no_cache {
            request = request
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache");
        }

        info!(url = %self.url, no_cache = self.no_cache, "Fetching plugin registry");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocsError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        debug!(url = %self.url, bytes = text.len(), "Fetched plugin registry");
        Ok(text)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Registry read from a local file.
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RegistrySource for FileRegistry {
    async fn read_text(&self) -> Result<String> {
        info!(path = %self.path.display(), "Reading plugin registry");
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(text)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
