// Configuration management

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::AppConfig;

/// Overrides `api_base_url` from the config file when set.
pub const BASE_URL_ENV: &str = "BOOKSMITH_API_BASE_URL";

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("booksmith");

    fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

    Ok(config_dir)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

pub fn get_log_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("booksmith.log"))
}

/// Load the user config, then apply the environment override.
pub fn load_config() -> Result<AppConfig> {
    let config = load_config_from(&get_config_path()?)?;
    Ok(apply_env_override(config, std::env::var(BASE_URL_ENV).ok()))
}

/// Read `path`, writing a default config there first if it does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let default_config = AppConfig::default();
        save_config_to(path, &default_config)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(path).context("Failed to read config file")?;

    let config: AppConfig = toml::from_str(&contents).context("Failed to parse config file")?;

    Ok(config)
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, contents).context("Failed to write config file")?;

    Ok(())
}

pub fn apply_env_override(mut config: AppConfig, base_url: Option<String>) -> AppConfig {
    if let Some(url) = base_url.filter(|url| !url.trim().is_empty()) {
        config.api_base_url = url.trim().to_string();
    }
    config
}
