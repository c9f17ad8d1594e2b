//! Configuration loading and validation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::usage::tier::Thresholds;

/// Application settings (from config file)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Tier thresholds in tokens/minute
    #[serde(default)]
    pub thresholds: Thresholds,

    /// How often the host should trigger a refresh cycle, in seconds.
    /// Consumed by the host's timer; carried here so the whole surface
    /// lives in one file. Recommended 10-15.
    #[serde(default = "default_sampling_interval")]
    pub sampling_interval_secs: u64,

    /// Sliding window bound in seconds
    #[serde(default = "default_window_duration")]
    pub window_duration_secs: u64,

    /// Hide the status icon entirely while every source is idle
    #[serde(default)]
    pub hide_icon_when_idle: bool,
}

fn default_sampling_interval() -> u64 {
    12
}

fn default_window_duration() -> u64 {
    60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            sampling_interval_secs: default_sampling_interval(),
            window_duration_secs: default_window_duration(),
            hide_icon_when_idle: false,
        }
    }
}

impl Settings {
    /// Load settings from a config file.
    ///
    /// Tries the explicit path first, then conventional locations, then
    /// falls back to defaults if no config file exists.
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(p) = path {
            if p.exists() {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config file: {:?}", p))?;
                return toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {:?}", p));
            }
        }

        let default_paths = [
            dirs::config_dir().map(|p| p.join("burnbar/config.toml")),
            dirs::home_dir().map(|p| p.join(".config/burnbar/config.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                return toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {:?}", path));
            }
        }

        Ok(Self::default())
    }

    /// Validate and normalize settings values.
    ///
    /// Floors the timers at 1 second and repairs the threshold ladder
    /// instead of erroring.
    pub fn validate(&mut self) {
        const MIN_INTERVAL_SECS: u64 = 1;

        if self.sampling_interval_secs < MIN_INTERVAL_SECS {
            self.sampling_interval_secs = MIN_INTERVAL_SECS;
        }
        if self.window_duration_secs < MIN_INTERVAL_SECS {
            self.window_duration_secs = MIN_INTERVAL_SECS;
        }
        self.thresholds.normalize();
    }

    /// The sliding window bound as a chrono duration
    pub fn window_duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.window_duration_secs as i64)
    }
}
