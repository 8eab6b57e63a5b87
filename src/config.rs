use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::roster::AssetDescriptor;

/// Models available in the bundled asset scene, in cycling order.
pub const DEFAULT_ASSETS: [(&str, &str); 4] = [
    ("Box", "box"),
    ("Ship", "shipMesh"),
    ("Orange", "orange"),
    ("2D Plane", "plane"),
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub assets: Vec<AssetDescriptor>,
    /// Offset along the camera's local Z axis for space placement and snapshots.
    pub placement_offset: f32,
    /// World units per screen point when turning a snapshot into an image plane.
    pub snapshot_scale: f32,
    pub plane_opacity: f32,
    pub vertical_fov_degrees: f32,
    pub viewport: Vec2,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            assets: DEFAULT_ASSETS
                .iter()
                .map(|(name, node)| AssetDescriptor::new(*name, *node))
                .collect(),
            placement_offset: -0.1,
            snapshot_scale: 1.0 / 6000.0,
            plane_opacity: 0.25,
            vertical_fov_degrees: 60.0,
            viewport: Vec2::new(375.0, 812.0),
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
