//! Configuration management for BookLedger

use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_ledger_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = fs::read_to_string("config.toml").unwrap_or_default();
    let config: Config = if config_str.is_empty() {
        // Sane defaults when config.toml is absent
        Config {
            storage: StorageConfig::default(),
        }
    } else {
        toml::from_str(&config_str)?
    };

    if config.storage.path.is_empty() {
        return Err("storage.path must be set in config.toml".into());
    }

    Ok(config)
}

fn default_ledger_path() -> String {
    "./data/ledger.json".to_string()
}
