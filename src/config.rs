//! Application-level configuration: default team colors and the storage location.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the app looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "RINK_TALLY_CONFIG_PATH";
/// Color assigned to the home side of a fresh sheet.
const DEFAULT_HOME_COLOR: &str = "#ff0000";
/// Color assigned to the away side of a fresh sheet.
const DEFAULT_AWAY_COLOR: &str = "#0066ff";

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    home_color: String,
    away_color: String,
    data_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to baked-in defaults.
    pub fn load() -> Self {
        Self::load_from(&resolve_config_path())
    }

    fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration");
                    raw.into()
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Self::default(),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Color token used for the home side of a fresh sheet.
    pub fn default_home_color(&self) -> &str {
        &self.home_color
    }

    /// Color token used for the away side of a fresh sheet.
    pub fn default_away_color(&self) -> &str {
        &self.away_color
    }

    /// Where the file-backed store keeps its document.
    pub fn data_path(&self) -> PathBuf {
        self.data_path.clone().unwrap_or_else(default_data_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            home_color: DEFAULT_HOME_COLOR.into(),
            away_color: DEFAULT_AWAY_COLOR.into(),
            data_path: None,
        }
    }
}

/// JSON representation of the configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawConfig {
    home_color: Option<String>,
    away_color: Option<String>,
    data_path: Option<PathBuf>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            home_color: value.home_color.unwrap_or(defaults.home_color),
            away_color: value.away_color.unwrap_or(defaults.away_color),
            data_path: value.data_path,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Per-user data file, preferring the platform data directory.
fn default_data_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("rink-tally").join("scores.json")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".rink-tally").join("scores.json")
    } else {
        PathBuf::from("rink-tally-scores.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_baked_in_colors() {
        let config = AppConfig::default();
        assert_eq!(config.default_home_color(), "#ff0000");
        assert_eq!(config.default_away_color(), "#0066ff");
        assert!(!config.data_path().as_os_str().is_empty());
    }

    #[test]
    fn raw_config_overrides_only_what_it_names() {
        let raw: RawConfig = serde_json::from_str(r##"{"awayColor":"#00ff00"}"##).unwrap();
        let config = AppConfig::from(raw);
        assert_eq!(config.default_home_color(), "#ff0000");
        assert_eq!(config.default_away_color(), "#00ff00");
    }

    #[test]
    fn invalid_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.json");
        fs::write(&path, "{ not json").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.default_home_color(), "#ff0000");
        assert_eq!(config.default_away_color(), "#0066ff");
        assert_eq!(config.data_path(), AppConfig::default().data_path());
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = AppConfig::load_from(&dir.path().join("app.json"));
        assert_eq!(config.default_home_color(), "#ff0000");
        assert_eq!(config.default_away_color(), "#0066ff");
    }
}
