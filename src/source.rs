use std::{fs, path::PathBuf};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::error::SourceError;

/// Copy of the policy compiled into the binary, used when the primary source
/// cannot be reached.
pub const EMBEDDED_POLICY: &str = include_str!("../assets/PRIVACY_POLICY.md");

/// Somewhere markdown text can be loaded from.
#[async_trait(?Send)]
pub trait MarkdownSource {
    fn describe(&self) -> String;

    async fn load(&self) -> Result<String, SourceError>;
}

/// Client shared by every remote source, identified by the crate user agent.
pub fn http_client() -> Result<Client, SourceError> {
    Ok(Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

#[derive(Debug, Clone)]
pub struct RemoteSource {
    url: String,
    client: Client,
}

impl RemoteSource {
    pub fn new<S: Into<String>>(url: S, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait(?Send)]
impl MarkdownSource for RemoteSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn load(&self) -> Result<String, SourceError> {
        info!("Fetching markdown from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        debug!(
            "Received HTTP status {}{}",
            status.as_u16(),
            status.canonical_reason().map(|s| format!(": {}", s)).unwrap_or_default()
        );

        if !status.is_success() {
            return Err(SourceError::Status {
                location: self.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait(?Send)]
impl MarkdownSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<String, SourceError> {
        let bytes = fs::read(&self.path).map_err(|source| SourceError::Io {
            location: self.describe(),
            source,
        })?;

        Ok(String::from_utf8(bytes)?)
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddedSource {
    text: String,
}

impl EmbeddedSource {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

impl Default for EmbeddedSource {
    fn default() -> Self {
        Self::new(EMBEDDED_POLICY)
    }
}

#[async_trait(?Send)]
impl MarkdownSource for EmbeddedSource {
    fn describe(&self) -> String {
        format!("embedded copy")
    }

    async fn load(&self) -> Result<String, SourceError> {
        Ok(self.text.clone())
    }
}

/// Picks a source for a location: `http://` and `https://` are fetched,
/// anything else is read from disk.
pub fn locate(location: &str, client: &Client) -> Box<dyn MarkdownSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(RemoteSource::new(location, client.clone()))
    } else {
        Box::new(FileSource::new(location))
    }
}
