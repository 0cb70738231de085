//! Persistent application settings stored as `config.toml` in the app root.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;
use crate::quiz::{CategorySelection, DifficultyDistribution, MAX_PROBLEMS, MIN_PROBLEMS};

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Backend origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not resolve config directory: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    SerializeToml(#[from] toml::ser::Error),
    #[error("Invalid backend URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
}

/// All persisted settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub generation: GenerationDefaults,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub logging: LogSettings,
}

/// Where the quiz service lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Interval between `/api/status` polls while generating; 0 disables polling.
    #[serde(default = "default_status_poll_interval_ms")]
    pub status_poll_interval_ms: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            status_poll_interval_ms: default_status_poll_interval_ms(),
        }
    }
}

impl BackendSettings {
    /// Parse the configured origin.
    pub fn parsed_base_url(&self) -> Result<url::Url, ConfigError> {
        url::Url::parse(self.base_url.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }

    pub fn status_poll_interval(&self) -> Option<Duration> {
        (self.status_poll_interval_ms > 0)
            .then(|| Duration::from_millis(self.status_poll_interval_ms))
    }
}

/// Transport limits for backend requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Generation can run for minutes, so reads are unbounded unless set.
    #[serde(default)]
    pub read_timeout_secs: Option<u64>,
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: None,
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

/// Form values restored on launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationDefaults {
    #[serde(default = "default_num_problems")]
    pub default_num_problems: u32,
    #[serde(default)]
    pub default_category: CategorySelection,
    #[serde(default)]
    pub use_difficulty_mix: bool,
    #[serde(default)]
    pub difficulty: DifficultyDistribution,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            default_num_problems: default_num_problems(),
            default_category: CategorySelection::default(),
            use_difficulty_mix: false,
            difficulty: DifficultyDistribution::default(),
        }
    }
}

/// Where and how exported quizzes are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
    #[serde(default)]
    pub default_dir: Option<PathBuf>,
    #[serde(default)]
    pub open_after_export: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: default_export_file_name(),
            default_dir: None,
            open_after_export: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Also raise the blocking notice when generation fails.
    #[serde(default)]
    pub alert_on_generate_error: bool,
}

/// Log filter and retention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

impl AppConfig {
    /// Clamp values the UI cannot represent.
    pub fn normalized(mut self) -> Self {
        self.generation.default_num_problems = self
            .generation
            .default_num_problems
            .clamp(MIN_PROBLEMS, MAX_PROBLEMS);
        let mix = &mut self.generation.difficulty;
        for count in [&mut mix.easy, &mut mix.medium, &mut mix.hard] {
            *count = (*count).min(MAX_PROBLEMS);
        }
        if self.export.file_name.trim().is_empty() {
            self.export.file_name = default_export_file_name();
        }
        self.logging.max_files = self.logging.max_files.max(1);
        self
    }
}

/// Resolve the configuration file path inside the app root.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load configuration from a specific path.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    config.backend.parsed_base_url()?;
    Ok(config.normalized())
}

/// Persist configuration to the default location.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(config)?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_status_poll_interval_ms() -> u64 {
    1_000
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_response_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_num_problems() -> u32 {
    12
}

fn default_export_file_name() -> String {
    "quant-quiz.html".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Category;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.generation.default_num_problems, 12);
        assert_eq!(config.export.file_name, "quant-quiz.html");
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let mut config = AppConfig::default();
        config.backend.base_url = "http://10.0.0.5:9000".into();
        config.generation.default_category = CategorySelection::Single(Category::BoatsStreams);
        config.http.read_timeout_secs = Some(300);
        save_to_path(&config, &path).unwrap();
        assert_eq!(load_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[generation]\ndefault_num_problems = 50\n").unwrap();
        let config = load_from(&path).unwrap();
        assert_eq!(config.generation.default_num_problems, MAX_PROBLEMS);
        assert_eq!(config.backend.status_poll_interval_ms, 1_000);
    }

    #[test]
    fn oversized_difficulty_mix_is_clamped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[generation.difficulty]\nEASY = 4000000000\nMEDIUM = 4000000000\nHARD = 2\n",
        )
        .unwrap();
        let config = load_from(&path).unwrap();
        let mix = config.generation.difficulty;
        assert_eq!((mix.easy, mix.medium, mix.hard), (MAX_PROBLEMS, MAX_PROBLEMS, 2));
        assert_eq!(mix.total(), 2 * MAX_PROBLEMS + 2);
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[backend]\nbase_url = \"not a url\"\n").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn zero_poll_interval_disables_polling() {
        let settings = BackendSettings {
            status_poll_interval_ms: 0,
            ..BackendSettings::default()
        };
        assert!(settings.status_poll_interval().is_none());
    }
}
