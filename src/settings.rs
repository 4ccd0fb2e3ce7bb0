//! Engine settings
//!
//! Stored as JSON. Every field has a default, so a settings file only needs
//! the values it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MOVE_SPEED, PLANE, RAY_COUNT, TURN_STEP};
use crate::error::ConfigError;
use crate::sim::{FanSpacing, Grid, ViewConfig};

/// Starting pose overriding the default spawn point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartPose {
    pub x: f64,
    pub y: f64,
    /// Facing angle (radians)
    pub angle: f64,
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === View ===
    /// Field of view in degrees
    pub fov_degrees: f64,
    /// Rays cast per tick
    pub ray_count: usize,
    /// Angular spacing of the ray fan
    pub fan_spacing: FanSpacing,
    /// Projection plane distance used for the view frustum overlay
    pub plane_distance: f64,

    // === Controls ===
    /// Walk speed (cells per tick)
    pub move_speed: f64,
    /// Turn per key press (radians)
    pub turn_step: f64,

    // === Overlay ===
    /// Draw coordinate labels, walk markers and the view frustum
    pub debug_overlay: bool,
    /// Whether the map view starts open
    pub map_view_open: bool,

    // === World ===
    /// Inline map rows (0 = open, >0 = wall)
    pub map: Option<Vec<Vec<u8>>>,
    /// Text map file, used when `map` is not set
    pub map_file: Option<PathBuf>,
    /// Start pose; defaults to the map's spawn point
    pub start: Option<StartPose>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            ray_count: RAY_COUNT,
            fan_spacing: FanSpacing::HalfOpen,
            plane_distance: PLANE,

            move_speed: MOVE_SPEED,
            turn_step: TURN_STEP,

            debug_overlay: true,
            map_view_open: true,

            map: None,
            map_file: None,
            start: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ray_count == 0 {
            return Err(ConfigError::Invalid("ray_count must be at least 1".into()));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 360.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_degrees must be in (0, 360), got {}",
                self.fov_degrees
            )));
        }
        let finite = [
            ("plane_distance", self.plane_distance),
            ("move_speed", self.move_speed),
            ("turn_step", self.turn_step),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        if let Some(start) = self.start {
            if ![start.x, start.y, start.angle].iter().all(|v| v.is_finite()) {
                return Err(ConfigError::Invalid("start pose must be finite".into()));
            }
        }
        Ok(())
    }

    /// Field of view in radians
    pub fn fov(&self) -> f64 {
        self.fov_degrees.to_radians()
    }

    /// Ray fan parameters; crossings are traced only for the debug overlay
    pub fn view(&self) -> ViewConfig {
        ViewConfig {
            fov: self.fov(),
            ray_count: self.ray_count,
            spacing: self.fan_spacing,
            trace: self.debug_overlay,
        }
    }

    /// Build the configured grid: inline rows, then the map file, then the
    /// built-in reference map
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        if let Some(rows) = &self.map {
            return Ok(Grid::from_rows(rows)?);
        }
        if let Some(path) = &self.map_file {
            let text = fs::read_to_string(path)?;
            log::info!("Loading map from {}", path.display());
            return Ok(Grid::parse(&text)?);
        }
        Ok(Grid::reference())
    }
}
