//! Application configuration loaded from TOML.
//!
//! A missing file means defaults. Environment variables override the file
//! for the API key and forced refresh.

use crate::data::bls::DEFAULT_API_URL;
use crate::terms::extract::ExtractOptions;
use crate::terms::source::DEFAULT_TERMS_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Directory name used under the platform config and cache dirs.
pub const APP_DIR: &str = "econgadget";

/// Accepted span for `window_years` and `recent_years`. Monthly data is
/// never requested for more than ten years.
pub const YEARS_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("no cache directory available on this platform; set cache_dir")]
    NoCacheDir,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    /// Registration key for the statistics API. Unset means the keyless tier.
    pub api_key: Option<String>,
    pub terms_url: String,
    /// Overrides the platform cache directory.
    pub cache_dir: Option<PathBuf>,
    /// Trailing years shown and requested.
    pub window_years: u32,
    pub request_timeout_secs: u64,
    /// Ignore cached payloads and re-fetch (still writes on success).
    pub force_refresh: bool,
    /// Terms ending within this many years count as recent.
    pub recent_years: u32,
    pub extract: ExtractOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            terms_url: DEFAULT_TERMS_URL.to_string(),
            cache_dir: None,
            window_years: 10,
            request_timeout_secs: 10,
            force_refresh: false,
            recent_years: 10,
            extract: ExtractOptions::default(),
        }
    }
}

impl AppConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. A missing file yields defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load from the platform config path, then apply environment overrides.
    pub fn load_default() -> Result<Self, ConfigError> {
        let mut config = match config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `ECONGADGET_API_KEY` / `BLS_API_KEY` and `ECONGADGET_FORCE_REFRESH`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var("ECONGADGET_API_KEY").or_else(|| var("BLS_API_KEY")) {
            if !key.trim().is_empty() {
                self.api_key = Some(key.trim().to_string());
            }
        }
        if let Some(flag) = var("ECONGADGET_FORCE_REFRESH") {
            self.force_refresh = matches!(flag.trim(), "1" | "true" | "yes");
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, years) in [
            ("window_years", self.window_years),
            ("recent_years", self.recent_years),
        ] {
            if !YEARS_RANGE.contains(&years) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between {} and {} (got {years})",
                    YEARS_RANGE.start(),
                    YEARS_RANGE.end()
                )));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        if self.extract.min_cells <= self.extract.term_cell {
            return Err(ConfigError::Invalid(format!(
                "extract.min_cells ({}) must exceed extract.term_cell ({})",
                self.extract.min_cells, self.extract.term_cell
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured cache dir, else `<platform cache dir>/econgadget`.
    pub fn resolved_cache_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.cache_dir {
            return Ok(dir.clone());
        }
        dirs::cache_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or(ConfigError::NoCacheDir)
    }
}

/// `<platform config dir>/econgadget/config.toml`, if the platform has one.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}
