use crate::types::Theme;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "restless-tui";
const CONFIG_FILE: &str = "config.toml";
const HISTORY_FILE: &str = "history.json";
const LOG_FILE: &str = "restless.log";

/// Minimum time the busy indicator stays visible after a submit
pub const DEFAULT_MIN_BUSY_MS: u64 = 400;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub request: RequestSettings,
    pub history: HistoryConfig,

    /// Where this config was loaded from; `None` keeps it in memory only
    #[serde(skip)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    #[serde(deserialize_with = "lenient_theme")]
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    pub min_busy_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            min_busy_ms: DEFAULT_MIN_BUSY_MS,
            timeout_secs: None,
        }
    }
}

impl RequestSettings {
    pub fn min_busy(&self) -> Duration {
        Duration::from_millis(self.min_busy_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Keep at most this many entries; unbounded when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,
}

/// Anything other than "light" means dark
fn lenient_theme<'de, D>(deserializer: D) -> Result<Theme, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(if raw.eq_ignore_ascii_case("light") {
        Theme::Light
    } else {
        Theme::Dark
    })
}

impl Config {
    /// ~/.config/restless-tui, created on demand
    pub fn app_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find home directory"))?;

        let app_dir = home_dir.join(".config").join(APP_DIR);
        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }

        Ok(app_dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join(CONFIG_FILE))
    }

    pub fn history_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join(HISTORY_FILE))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join(LOG_FILE))
    }

    /// Load config from the default location, or defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Write back to the file this config came from
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    /// Set and persist the theme
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.ui.theme = theme;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.ui.theme, Theme::Dark);
        assert_eq!(config.request.min_busy_ms, DEFAULT_MIN_BUSY_MS);
        assert_eq!(config.request.timeout(), None);
        assert_eq!(config.history.max_entries, None);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[request]\ntimeout_secs = 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.request.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.request.min_busy(), Duration::from_millis(400));
        assert_eq!(config.ui.theme, Theme::Dark);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_dark() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\ntheme = \"solarized\"\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().ui.theme, Theme::Dark);

        fs::write(&path, "[ui]\ntheme = \"light\"\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().ui.theme, Theme::Light);
    }

    #[test]
    fn test_set_theme_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        config.set_theme(Theme::Light).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.ui.theme, Theme::Light);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui\ntheme =").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
