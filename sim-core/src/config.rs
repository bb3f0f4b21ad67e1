//! Simulation configuration.
//!
//! Every field has a default, so a TOML file only needs the values it
//! changes:
//!
//! ```toml
//! target_count = 500
//! collisions_enabled = true
//! seed = 7
//!
//! [spawn]
//! min_radius = 0.1
//! max_radius = 0.5
//!
//! [camera]
//! distance = 40.0
//! ```
//!
//! Out-of-range values are normalized silently rather than rejected.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters that shape newly born bodies and their motion.
///
/// Radius and speed bounds only affect bodies created after they change.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnParams {
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub velocity_multiplier: f32,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            min_radius: 0.25,
            max_radius: 2.0,
            min_speed: 0.0,
            max_speed: 10.0,
            velocity_multiplier: 2.0,
        }
    }
}

impl SpawnParams {
    /// Clamps negative bounds to zero and swaps inverted ranges.
    pub fn normalized(self) -> Self {
        let (min_radius, max_radius) = ordered(self.min_radius.max(0.0), self.max_radius.max(0.0));
        let (min_speed, max_speed) = ordered(self.min_speed.max(0.0), self.max_speed.max(0.0));
        Self {
            min_radius,
            max_radius,
            min_speed,
            max_speed,
            velocity_multiplier: self.velocity_multiplier,
        }
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Settings for the perspective camera that frames the arena.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance from the camera to the simulation plane.
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Vertical field of view.
    pub fov_y_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 20.0,
            min_distance: 5.0,
            max_distance: 100.0,
            fov_y_degrees: 60.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target_count: usize,
    pub collisions_enabled: bool,
    /// Seed for the body generator; a random seed is drawn when absent.
    pub seed: Option<u64>,
    pub spawn: SpawnParams,
    pub camera: CameraConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_count: 10,
            collisions_enabled: false,
            seed: None,
            spawn: SpawnParams::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl Config {
    /// Parses a configuration from TOML text and normalizes it.
    pub fn from_toml(content: &str) -> Result<Self> {
        let cfg = toml::from_str::<Self>(content)?;
        Ok(cfg.normalized())
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), target_count = cfg.target_count, "loaded config");
        Ok(cfg)
    }

    pub fn normalized(mut self) -> Self {
        self.spawn = self.spawn.normalized();
        self
    }
}
