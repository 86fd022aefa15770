//! JSON configuration parsing for headless mode
//!
//! Parses JSON match configurations and converts them to the simulation's
//! `MatchSettings` (both teams auto-select).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::states::match_config::MatchSettings;
use crate::states::play_match::unit_config::{UnitStatTable, UNIT_CONFIG_PATH};

/// Headless match configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessMatchConfig {
    /// Random seed for deterministic match reproduction
    /// If provided, the match will use a seeded RNG for reproducible results
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Maximum match duration in seconds (default: 300)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Simulated seconds per frame (default: 1/60)
    #[serde(default = "default_time_step")]
    pub time_step_secs: f32,
    /// Custom output path for match log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    /// Override the starting tower health
    #[serde(default)]
    pub tower_health: Option<f32>,
    /// Override the per-class respawn delay
    #[serde(default)]
    pub respawn_delay_secs: Option<f32>,
    /// RON unit stat table to load instead of the built-in one
    #[serde(default)]
    pub unit_stats_path: Option<String>,
}

fn default_max_duration() -> f32 {
    300.0
}

fn default_time_step() -> f32 {
    1.0 / 60.0
}

impl Default for HeadlessMatchConfig {
    fn default() -> Self {
        Self {
            random_seed: None,
            max_duration_secs: default_max_duration(),
            time_step_secs: default_time_step(),
            output_path: None,
            tower_health: None,
            respawn_delay_secs: None,
            unit_stats_path: None,
        }
    }
}

impl HeadlessMatchConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(contents: &str) -> Result<Self, String> {
        let config: HeadlessMatchConfig =
            serde_json::from_str(contents).map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.max_duration_secs > 0.0) {
            return Err("max_duration_secs must be positive".to_string());
        }
        if !(self.time_step_secs > 0.0) || self.time_step_secs > 1.0 {
            return Err("time_step_secs must be within (0, 1]".to_string());
        }
        if let Some(health) = self.tower_health {
            if !(health > 0.0) {
                return Err(format!("tower_health {} must be positive", health));
            }
        }
        if let Some(delay) = self.respawn_delay_secs {
            if !(delay >= 0.0) {
                return Err(format!("respawn_delay_secs {} cannot be negative", delay));
            }
        }
        Ok(())
    }

    /// Convert to CPU-vs-CPU match settings
    pub fn to_match_settings(&self) -> Result<MatchSettings, String> {
        let mut settings = MatchSettings::cpu_vs_cpu(self.random_seed);
        if let Some(health) = self.tower_health {
            settings.tower_health = health;
        }
        if let Some(delay) = self.respawn_delay_secs {
            settings.respawn_delay = delay;
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Unit stats from `unit_stats_path`, else the shipped RON file when
    /// present, else the built-in table.
    pub fn load_unit_stats(&self) -> Result<UnitStatTable, String> {
        match &self.unit_stats_path {
            Some(path) => UnitStatTable::load_from_file(Path::new(path)),
            None => {
                let shipped = PathBuf::from(UNIT_CONFIG_PATH);
                if shipped.exists() {
                    UnitStatTable::load_from_file(&shipped)
                } else {
                    Ok(UnitStatTable::default())
                }
            }
        }
    }
}
