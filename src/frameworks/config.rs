use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, time::Duration};
use url::Url;

// Runtime configuration. Precedence: environment variable, then the optional
// TOML settings file, then built-in defaults.

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/";
const DEFAULT_SETTINGS_FILE: &str = "recipe-wheel.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid API base URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no local data directory available; set RECIPE_WHEEL_STORAGE")]
    NoDataDir,
}

// Contents of the optional settings file.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Settings {
    pub api_base_url: Option<String>,
    pub storage_path: Option<PathBuf>,
    pub request_timeout_ms: Option<u64>,
}

impl Settings {
    /// Reads the file named by `RECIPE_WHEEL_CONFIG` (default
    /// `recipe-wheel.toml`). A missing file yields empty settings.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&settings_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let raw = env::var("RECIPE_WHEEL_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        normalize_base_url(&raw)
    }

    pub fn storage_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = env::var_os("RECIPE_WHEEL_STORAGE").filter(|value| !value.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = &self.storage_path {
            return Ok(path.clone());
        }
        dirs::data_local_dir()
            .map(|dir| dir.join("recipe-wheel").join("storage.json"))
            .ok_or(ConfigError::NoDataDir)
    }

    /// No timeout unless one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        env::var("RECIPE_WHEEL_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .or(self.request_timeout_ms)
            .filter(|millis| *millis > 0)
            .map(Duration::from_millis)
    }
}

fn settings_path() -> PathBuf {
    env::var_os("RECIPE_WHEEL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
}

/// Parses the base URL, appending `/` so relative endpoint paths resolve
/// beneath it rather than replacing its last segment.
pub fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}
