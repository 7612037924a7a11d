use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::timeline::YearViewport;

pub const DEFAULT_AVAILABILITY: &str = "All teams are available with standard capacity. \
Marketing team has reduced capacity in June due to annual conference.";

/// User settings, read from `config.toml` in the platform config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Year shown on the timeline; the current year when unset.
    pub display_year: Option<i32>,
    pub timeline_width_px: f64,
    /// Default availability note sent with sequencing requests.
    pub team_availability: String,
    pub log_level: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            display_year: None,
            timeline_width_px: 1200.0,
            team_availability: DEFAULT_AVAILABILITY.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn config_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "RoadmapBoard") {
            proj_dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("config.toml")
        }
    }

    /// Load from the default location; a missing file means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.viewport(config.year())?;
        Ok(config)
    }

    pub fn year(&self) -> i32 {
        self.display_year
            .unwrap_or_else(|| chrono::Local::now().date_naive().year())
    }

    pub fn viewport(&self, year: i32) -> Result<YearViewport, ConfigError> {
        YearViewport::new(year, self.timeline_width_px)
    }
}
