//! Game configuration loaded from external RON file.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use crate::world::Direction;

/// Path of the config file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/data/config.ron";

/// Configuration loaded from `assets/data/config.ron`.
///
/// Every field has a default, so a partial file is fine.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// JSON map document to load
    pub map_path: String,
    // Start position
    pub start_x: i32,
    pub start_y: i32,
    pub start_direction: Direction,
    /// Character walking speed in view pixels per second
    pub walk_speed: f32,
    // Nominal view size used before the window reports its own
    pub view_width: f32,
    pub view_height: f32,
    // Wall object editing
    pub object_default_scale: f32,
    pub object_min_scale: f32,
    pub object_scale_step: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_path: "assets/data/map.json".to_string(),
            start_x: 0,
            start_y: 0,
            start_direction: Direction::S,
            // 10 px every 100 ms
            walk_speed: 100.0,
            view_width: 1200.0,
            view_height: 900.0,
            object_default_scale: 0.2,
            object_min_scale: 0.05,
            object_scale_step: 0.01,
        }
    }
}

impl GameConfig {
    /// Load config from the default RON file.
    pub fn load() -> Self {
        Self::load_from(CONFIG_PATH)
    }

    /// Load config from a RON file, falling back to defaults on any error.
    pub fn load_from(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_ron(&contents).unwrap_or_else(|e| {
                error!("Failed to parse {}: {}. Using defaults.", path, e);
                Self::default()
            }),
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }

    /// Parse a RON document. Out-of-range values are reset to their defaults.
    pub fn from_ron(contents: &str) -> Result<Self, ron::error::SpannedError> {
        let config: Self = ron::from_str(contents)?;
        info!("Loaded game config");
        Ok(config.validated())
    }

    /// Replace every speed, size and scale that is not a positive number.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        let fields = [
            ("walk_speed", &mut self.walk_speed, defaults.walk_speed),
            ("view_width", &mut self.view_width, defaults.view_width),
            ("view_height", &mut self.view_height, defaults.view_height),
            ("object_default_scale", &mut self.object_default_scale, defaults.object_default_scale),
            ("object_min_scale", &mut self.object_min_scale, defaults.object_min_scale),
            ("object_scale_step", &mut self.object_scale_step, defaults.object_scale_step),
        ];
        for (name, value, default) in fields {
            if !(value.is_finite() && *value > 0.0) {
                warn!("Config {} must be positive, got {}. Using {}.", name, value, default);
                *value = default;
            }
        }
        self
    }
}

/// System to load the game config at startup.
pub fn load_game_config(mut commands: Commands) {
    commands.insert_resource(GameConfig::load());
}
