//! Parking configuration stored in `parking.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default config file name, resolved against the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "parking.toml";

/// Parking configuration (TOML).
///
/// Missing fields fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ParkingConfig {
    /// Number of vehicles the lot can hold at once.
    pub capacity: usize,

    /// Print `list` and `report` results as JSON.
    pub json: bool,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            capacity: 20,
            json: false,
        }
    }
}

impl ParkingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(anyhow!("capacity must be > 0"));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(mut self, capacity: Option<usize>, json: bool) -> Result<Self> {
        if let Some(capacity) = capacity {
            self.capacity = capacity;
        }
        self.json |= json;
        self.validate()?;
        Ok(self)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ParkingConfig::default()`.
pub fn load_config(path: &Path) -> Result<ParkingConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        return Ok(ParkingConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ParkingConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), capacity = cfg.capacity, json = cfg.json, "config loaded");
    Ok(cfg)
}
