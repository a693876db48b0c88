//! Configuration loading and parsing

use anyhow::{Context, Result};
use ipl_stats::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from a TOML file)
///
/// Every section has defaults, so running without a file reads
/// `data/matches.csv` and `data/deliveries.csv` and writes to `outputs/`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub charts: ChartsConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_matches")]
    pub matches: PathBuf,
    #[serde(default = "default_deliveries")]
    pub deliveries: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_matches() -> PathBuf {
    PathBuf::from("matches.csv")
}

fn default_deliveries() -> PathBuf {
    PathBuf::from("deliveries.csv")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            matches: default_matches(),
            deliveries: default_deliveries(),
        }
    }
}

impl InputConfig {
    /// Full path of the matches table
    pub fn matches_path(&self) -> PathBuf {
        self.data_dir.join(&self.matches)
    }

    /// Full path of the deliveries table
    pub fn deliveries_path(&self) -> PathBuf {
        self.data_dir.join(&self.deliveries)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartsConfig {
    #[serde(default)]
    pub mode: ChartMode,
    #[serde(default = "default_plots_dir")]
    pub plots_dir: PathBuf,
    /// Block after each displayed chart until it is dismissed
    #[serde(default = "default_true")]
    pub wait_for_dismiss: bool,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_plots_dir() -> PathBuf {
    PathBuf::from("outputs/plots")
}

fn default_true() -> bool {
    true
}

fn default_width() -> u32 {
    1200
}

fn default_height() -> u32 {
    800
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            mode: ChartMode::default(),
            plots_dir: default_plots_dir(),
            wait_for_dismiss: default_true(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Where charts go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// Draw in the terminal, one at a time
    #[default]
    Display,
    /// Write PNG files into the plots directory
    Png,
    /// Skip charts entirely
    #[serde(rename = "none")]
    #[value(name = "none")]
    Off,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
