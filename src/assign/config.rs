use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use ecowater::ResolverOptions;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub points: PointsConfig,
    pub regions: RegionsConfig,
    pub resolver: ResolverOptions,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PointsConfig {
    pub path: Option<PathBuf>,
    pub longitude: String,
    pub latitude: String,
    pub delimiter: char,
    pub text_fields: Vec<String>,
    /// Keep payload fields as read; only coordinates are parsed as numbers
    pub raw_payload: bool,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            path: None,
            longitude: "longitude".to_string(),
            latitude: "latitude".to_string(),
            delimiter: ',',
            text_fields: Vec::new(),
            raw_payload: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RegionsConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }
}
