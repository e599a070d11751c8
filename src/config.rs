use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub home: HomeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7331".to_string()
}

/// Preferred home area for the evidence tie-break.
#[derive(Debug, Deserialize, Clone)]
pub struct HomeConfig {
    #[serde(default = "default_district_code")]
    pub district_code: String,
    #[serde(default = "default_town")]
    pub town: String,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            district_code: default_district_code(),
            town: default_town(),
        }
    }
}

fn default_district_code() -> String {
    "AN".to_string()
}

fn default_town() -> String {
    "Ansbach".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;

    Ok(config)
}

/// Loads the config when the file exists, otherwise falls back to defaults.
/// An unreadable or invalid file is still an error.
pub fn load_config_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    if config.home.district_code.trim().is_empty() {
        anyhow::bail!("home.district_code must not be empty");
    }

    if config.home.town.trim().is_empty() {
        anyhow::bail!("home.town must not be empty");
    }

    Ok(())
}
