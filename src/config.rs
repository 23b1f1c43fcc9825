use eyre::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::monitor::MonitorConfig;
use crate::probe::ProbeConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub output: OutputConfig,
    pub probe: ProbeConfig,
    pub interval_secs: u64,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Outage log path; `-` for stdout
    pub path: PathBuf,
    /// Keep existing rows instead of truncating
    pub append: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("connection_data.csv"),
            append: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            output: OutputConfig::default(),
            probe: ProbeConfig::default(),
            interval_secs: 1,
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Search order: ~/.config/<project>/<project>.yml, then ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let mut candidates = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(project_name).join(format!("{}.yml", project_name)));
        }
        candidates.push(PathBuf::from(format!("{}.yml", project_name)));

        Self::load_first_existing(&candidates)
    }

    /// Load the first candidate that exists.
    ///
    /// A file that exists but cannot be loaded is an error, never a silent
    /// fallback to defaults.
    fn load_first_existing(candidates: &[PathBuf]) -> Result<Self> {
        for path in candidates {
            if path.exists() {
                return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject settings the monitor cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            bail!("interval must be at least 1 second");
        }
        if self.probe.target.trim().is_empty() {
            bail!("probe target must not be empty");
        }
        if self.probe.timeout_ms == 0 {
            bail!("probe timeout must be greater than 0");
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Settings for the driver loop
    pub fn monitor_config(&self, max_ticks: Option<u64>) -> MonitorConfig {
        MonitorConfig {
            interval: self.interval(),
            verbose: self.verbose,
            max_ticks,
        }
    }
}
