use reqwest::Client;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::converter::Converter;
use crate::source::{self, MarkdownSource, EMBEDDED_POLICY};

/// What ends up in the content container.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rendered(String),
    /// No copy could be loaded, send the reader to a static page instead.
    Redirect(String),
    /// Show the generic error panel.
    Failed,
}

/// Loads the policy from its primary source, falling back to the embedded copy.
pub struct PolicyLoader {
    primary: Option<Box<dyn MarkdownSource>>,
    embedded: Option<String>,
    fallback_page: Option<String>,
    converter: Converter,
}

impl PolicyLoader {
    pub fn new() -> Self {
        Self {
            primary: None,
            embedded: None,
            fallback_page: None,
            converter: Converter::new(),
        }
    }

    pub fn from_config(config: &Config, client: &Client) -> Self {
        let mut loader = Self::new();

        if let Some(location) = &config.markdown_file {
            loader.primary = Some(source::locate(location, client));
        }

        if config.embedded {
            loader.embedded = Some(EMBEDDED_POLICY.to_owned());
        }

        loader.fallback_page = config.fallback_page.clone();
        loader
    }

    pub fn primary<S: MarkdownSource + 'static>(self, source: S) -> Self {
        let source: Box<dyn MarkdownSource> = Box::new(source);

        Self {
            primary: Some(source),
            ..self
        }
    }

    pub fn converter(self, converter: Converter) -> Self {
        Self {
            converter,
            ..self
        }
    }

    pub fn embedded<S: Into<String>>(self, text: S) -> Self {
        Self {
            embedded: Some(text.into()),
            ..self
        }
    }

    pub fn fallback_page<S: Into<String>>(self, url: S) -> Self {
        Self {
            fallback_page: Some(url.into()),
            ..self
        }
    }

    pub async fn load(&self) -> Outcome {
        if let Some(primary) = &self.primary {
            match primary.load().await {
                Ok(markdown) => return self.convert(&markdown, &primary.describe()),
                Err(e) => warn!("Could not load {}, using fallback content: {:#}", primary.describe(), anyhow::Error::new(e)),
            }
        }

        if let Some(markdown) = &self.embedded {
            return self.convert(markdown, "embedded copy");
        }

        if let Some(url) = &self.fallback_page {
            warn!("No embedded copy available, redirecting to {}", url);
            return Outcome::Redirect(url.clone());
        }

        error!("No source available for the privacy policy");
        Outcome::Failed
    }

    fn convert(&self, markdown: &str, origin: &str) -> Outcome {
        match self.converter.convert(markdown) {
            Ok(html) => {
                info!("Privacy policy loaded from {}", origin);
                Outcome::Rendered(html)
            },
            Err(e) => {
                error!("Error converting privacy policy from {}: {:#}", origin, anyhow::Error::new(e));
                Outcome::Failed
            },
        }
    }
}

impl Default for PolicyLoader {
    fn default() -> Self {
        Self::new()
    }
}
