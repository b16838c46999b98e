use std::{collections::HashMap, fmt, fs, path::PathBuf, str::FromStr};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Key the theme choice is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Class applied to the page body.
    pub fn class(self) -> &'static str {
        match self {
            Theme::Light => "light-theme",
            Theme::Dark => "dark-theme",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(anyhow!("Unknown theme '{}'", other)),
        }
    }
}

/// A small persistent key-value file. Every write goes straight to disk.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl PreferenceStore {
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences at '{}'", path.display()))?;

            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse preferences at '{}'", path.display()))?
        } else {
            HashMap::new()
        };

        Ok(Self { path, values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Result<()> {
        let mut values = self.values.clone();
        values.insert(key.into(), value.into());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create preferences directory '{}'", parent.display()))?;
        }

        fs::write(&self.path, serde_json::to_string_pretty(&values)?)
            .with_context(|| format!("Failed to write preferences at '{}'", self.path.display()))?;

        self.values = values;
        Ok(())
    }

    pub fn theme(&self) -> Option<Theme> {
        let stored = self.get(THEME_KEY)?;

        match stored.parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                warn!("Ignoring stored theme: {}", e);
                None
            },
        }
    }

    /// Stored choice first, then the system hint, then light.
    pub fn resolve_theme(&self, system: Option<Theme>) -> Theme {
        self.theme().or(system).unwrap_or(Theme::Light)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.set(THEME_KEY, theme.as_str())
    }

    pub fn toggle_theme(&mut self, system: Option<Theme>) -> Result<Theme> {
        let theme = self.resolve_theme(system).toggle();

        self.set_theme(theme)?;
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{PreferenceStore, Theme, THEME_KEY};

    #[test]
    fn parse() {
        assert_eq!(Theme::Dark, "dark".parse::<Theme>().unwrap());
        assert_eq!(Theme::Light, "\"Light\"".parse::<Theme>().unwrap());
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn classes_are_exclusive() {
        assert_eq!("light-theme", Theme::Light.class());
        assert_eq!("dark-theme", Theme::Light.toggle().class());
        assert_eq!(Theme::Light, Theme::Light.toggle().toggle());
    }

    #[test]
    fn resolve_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = PreferenceStore::open(dir.path().join("preferences.json")).unwrap();

        assert_eq!(Theme::Light, store.resolve_theme(None));
        assert_eq!(Theme::Dark, store.resolve_theme(Some(Theme::Dark)));

        store.set_theme(Theme::Light).unwrap();

        assert_eq!(Theme::Light, store.resolve_theme(Some(Theme::Dark)));
    }

    #[test]
    fn toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");
        let mut store = PreferenceStore::open(&path).unwrap();

        assert_eq!(Theme::Light, store.toggle_theme(Some(Theme::Dark)).unwrap());

        let reopened = PreferenceStore::open(&path).unwrap();

        assert_eq!(Some("light"), reopened.get(THEME_KEY));
        assert_eq!(Theme::Dark, reopened.clone().toggle_theme(None).unwrap());
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let mut store = PreferenceStore::open(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.set_theme(Theme::Dark).is_err());
        assert_eq!(None, store.get(THEME_KEY));
        assert_eq!(Theme::Light, store.resolve_theme(None));
        assert!(store.toggle_theme(None).is_err());
        assert_eq!(Theme::Light, store.resolve_theme(None));
    }

    #[test]
    fn unknown_stored_value_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{ "theme": "sepia", "other": "kept" }"#).unwrap();

        let store = PreferenceStore::open(&path).unwrap();

        assert_eq!(None, store.theme());
        assert_eq!(Theme::Dark, store.resolve_theme(Some(Theme::Dark)));
        assert_eq!(Some("kept"), store.get("other"));
    }
}
