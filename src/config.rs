use std::{fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Everything the loader and page need, passed in explicitly.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Primary markdown location, a URL or a local path.
    pub markdown_file: Option<String>,
    /// Whether the compiled-in copy may be used when the primary source fails.
    pub embedded: bool,
    /// Static page to send readers to when no copy can be loaded at all.
    pub fallback_page: Option<String>,
    pub content_container: String,
    pub contact: String,
    pub title: String,
    pub preferences: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markdown_file: Some(format!("PRIVACY_POLICY.md")),
            embedded: true,
            fallback_page: None,
            content_container: format!("privacy-content"),
            contact: format!("contact@optophoto.com"),
            title: format!("Privacy Policy"),
            preferences: PathBuf::from(".policyr/preferences.json"),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at '{}'", path.display()))?;

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config at '{}'", path.display()))
    }

    /// Reads `path` when given, otherwise falls back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn markdown_file<S: Into<String>>(self, location: S) -> Self {
        Self {
            markdown_file: Some(location.into()),
            ..self
        }
    }

    pub fn without_embedded(self) -> Self {
        Self {
            embedded: false,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::Config;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policyr.json");
        fs::write(&path, r#"{ "markdownFile": "https://example.com/PRIVACY_POLICY.md", "fallbackPage": "/test.html" }"#).unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(Some(format!("https://example.com/PRIVACY_POLICY.md")), config.markdown_file);
        assert_eq!(Some(format!("/test.html")), config.fallback_page);
        assert_eq!("privacy-content", config.content_container);
        assert!(config.embedded);
    }

    #[test]
    fn no_path_is_default() {
        assert_eq!(Config::default(), Config::load(None).unwrap());
    }

    #[test]
    fn bad_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ nope").unwrap();

        let err = Config::from_file(&path).unwrap_err();

        assert!(format!("{}", err).contains("broken.json"));
    }

    #[test]
    fn builders() {
        let config = Config::default().markdown_file("policy.md").without_embedded();

        assert_eq!(Some(format!("policy.md")), config.markdown_file);
        assert!(!config.embedded);
    }
}
