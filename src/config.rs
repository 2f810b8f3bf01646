use crate::persistence::ensure_dir;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

const ENV_DATA_DIR: &str = "BUDDY_DATA_DIR";
const ENV_MODEL: &str = "BUDDY_MODEL";
const ENV_API_KEYS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const LOG_FILE_NAME: &str = "buddy.log";

/// Settings for the breakdown collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownConfig {
    /// Without a key every breakdown request fails
    pub api_key: Option<String>,
    pub model: String,
}

impl BreakdownConfig {
    pub fn from_env() -> Self {
        let api_key = ENV_API_KEYS
            .iter()
            .filter_map(|name| env::var(name).ok())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty());

        let model = env::var(ENV_MODEL)
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self { api_key, model }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
    pub breakdown: BreakdownConfig,
}

impl AppConfig {
    /// Resolve the data directory from the CLI override, the environment, or
    /// platform defaults, creating it if needed
    pub fn discover(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir_override)?;
        ensure_dir(&data_dir)?;
        Ok(Self {
            data_dir,
            breakdown: BreakdownConfig::from_env(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> Result<PathBuf> {
    resolve_data_dir_from(data_dir_override, env::var(ENV_DATA_DIR).ok())
}

fn resolve_data_dir_from(
    data_dir_override: Option<PathBuf>,
    env_dir: Option<String>,
) -> Result<PathBuf> {
    if let Some(dir) = data_dir_override {
        return Ok(dir);
    }

    if let Some(env_dir) = env_dir.filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(env_dir));
    }

    if let Some(data) = dirs::data_dir() {
        return Ok(data.join("buddy"));
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".buddy"))
}
