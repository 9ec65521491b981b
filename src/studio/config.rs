//! Studio Configuration
//!
//! Centralized tuning for the studio editor. `Default` reproduces the
//! behavior of the shipped studio; a JSON file can override any subset.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::RaycastConfig;
use crate::placement::DEFAULT_SURFACE_THRESHOLD;
use crate::world::{Room, RoomDimensions, RoomError};

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid room: {0}")]
    Room(#[from] RoomError),
    #[error("invalid {field}: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

/// Keyboard edit tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Rotation applied by one rotate key press (radians)
    pub rotation_step: f32,
    /// Multiplier applied by the scale-up key
    pub scale_up_factor: f32,
    /// Multiplier applied by the scale-down key
    pub scale_down_factor: f32,
    /// Scale-down never goes below this
    pub min_scale: f32,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            rotation_step: std::f32::consts::FRAC_PI_4,
            scale_up_factor: 1.1,
            scale_down_factor: 0.9,
            min_scale: 0.5,
        }
    }
}

/// Top-level studio configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Room dimensions (validated when the editor is built)
    pub room: RoomDimensions,
    /// World-space offset of the room node
    pub room_origin: Vec3,
    /// Proximity tolerance for surface classification
    pub surface_threshold: f32,
    pub edit: EditConfig,
    pub raycast: RaycastConfig,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            room: Room::default().into(),
            room_origin: Vec3::new(0.0, 0.01, 0.0),
            surface_threshold: DEFAULT_SURFACE_THRESHOLD,
            edit: EditConfig::default(),
            raycast: RaycastConfig::default(),
        }
    }
}

impl StudioConfig {
    /// Parse a configuration from JSON text. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: StudioConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "loaded studio config");
        Ok(config)
    }

    /// Validated room.
    pub fn room(&self) -> Result<Room, RoomError> {
        Room::try_from(self.room)
    }

    /// Check every field that has a meaningful range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.room()?;
        positive("surface_threshold", self.surface_threshold)?;
        positive("edit.scale_up_factor", self.edit.scale_up_factor)?;
        positive("edit.scale_down_factor", self.edit.scale_down_factor)?;
        positive("edit.min_scale", self.edit.min_scale)?;
        positive("raycast.aspect_ratio", self.raycast.aspect_ratio)?;
        positive("raycast.fov", self.raycast.fov)?;
        if !self.edit.rotation_step.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "edit.rotation_step",
                value: self.edit.rotation_step,
            });
        }
        if !self.room_origin.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "room_origin",
                value: f32::NAN,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_studio() {
        let config = StudioConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.room().unwrap(), Room::default());
        assert!((config.surface_threshold - 0.3).abs() < 1e-6);
        assert!((config.edit.rotation_step - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert!((config.edit.min_scale - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = StudioConfig::from_json_str(
            r#"{ "room": { "width": 6, "height": 3, "depth": 4 }, "edit": { "min_scale": 0.25 } }"#,
        )
        .unwrap();
        assert_eq!(config.room().unwrap(), Room::new(6.0, 3.0, 4.0).unwrap());
        assert!((config.edit.min_scale - 0.25).abs() < 1e-6);
        assert!((config.edit.scale_up_factor - 1.1).abs() < 1e-6);
        assert!((config.surface_threshold - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_invalid_room() {
        let err = StudioConfig::from_json_str(r#"{ "room": { "width": 0, "height": 3, "depth": 4 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Room(_)));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let err = StudioConfig::from_json_str(r#"{ "surface_threshold": -1 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "surface_threshold",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            StudioConfig::from_json_str("{ nope"),
            Err(ConfigError::Json(_))
        ));
    }
}
