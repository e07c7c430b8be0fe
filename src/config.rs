use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub(crate) const API_URL_ENV: &str = "FINORA_API_URL";
pub(crate) const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const CONFIG_FILE: &str = "config.json";

/// Optional `config.json` in the user config directory.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FileConfig {
    pub(crate) api_url: Option<String>,
    pub(crate) timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    /// Server root; the client appends `/api`.
    pub(crate) api_url: String,
    pub(crate) timeout: Duration,
    pub(crate) data_dir: PathBuf,
    pub(crate) config_path: PathBuf,
}

impl Config {
    pub(crate) fn load() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "finora", "Finora")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let config_path = proj_dirs.config_dir().join(CONFIG_FILE);
        let file = read_file_config(&config_path)?;
        let env_url = std::env::var(API_URL_ENV).ok();

        Ok(Self::resolve(file, env_url, data_dir, config_path))
    }

    /// Environment beats file beats default. Blank values count as unset.
    pub(crate) fn resolve(
        file: FileConfig,
        env_url: Option<String>,
        data_dir: PathBuf,
        config_path: PathBuf,
    ) -> Self {
        let non_blank = |s: String| {
            let t = s.trim().to_string();
            (!t.is_empty()).then_some(t)
        };
        let api_url = env_url
            .and_then(non_blank)
            .or_else(|| file.api_url.and_then(non_blank))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout_secs = file
            .timeout_secs
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            data_dir,
            config_path,
        }
    }
}

pub(crate) fn read_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid config: {}", path.display()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
