use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://api.weatherstack.com/current";
pub const DEFAULT_API_CALL_LIMIT: u32 = 30;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Service configuration, built once at startup and passed by reference into
/// the upstream client and service constructors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Weatherstack `current` endpoint.
    pub base_url: String,

    /// Weatherstack access key; absent until `weather configure` is run.
    pub access_key: Option<String>,

    /// Declared provider rate limit (calls per period). Recorded for
    /// operators; not enforced by this service.
    pub api_call_limit: u32,

    /// Bound on the single-shot upstream call so a hung provider cannot
    /// block a lookup indefinitely.
    pub upstream_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_key: None,
            api_call_limit: DEFAULT_API_CALL_LIMIT,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Access key, or an actionable error when none is configured.
    pub fn access_key(&self) -> Result<&str> {
        self.access_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No weatherstack access key configured.\n\
                 Hint: run `weather configure` and enter your access key."
            )
        })
    }

    pub fn set_access_key(&mut self, access_key: String) {
        self.access_key = Some(access_key);
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Path to the JSON cache file used by the file-backed store.
    pub fn cache_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("weather_cache.json"))
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "weather-service", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }
}
