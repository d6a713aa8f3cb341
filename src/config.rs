use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Locations of the two catalog tables.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_cpu_table")]
    pub cpus: PathBuf,
    #[serde(default = "default_gpu_table")]
    pub gpus: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cpus: default_cpu_table(),
            gpus: default_gpu_table(),
        }
    }
}

fn default_cpu_table() -> PathBuf {
    PathBuf::from("data/components/cpus.csv")
}

fn default_gpu_table() -> PathBuf {
    PathBuf::from("data/components/gpus.csv")
}

impl Config {
    /// Fallback used when no config file exists: catalog tables under `./data`.
    pub fn minimal() -> Self {
        Self {
            catalog: CatalogConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.catalog.cpus.as_os_str().is_empty() {
        anyhow::bail!("catalog.cpus must not be empty");
    }
    if config.catalog.gpus.as_os_str().is_empty() {
        anyhow::bail!("catalog.gpus must not be empty");
    }

    Ok(config)
}
