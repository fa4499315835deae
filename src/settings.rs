//! Simulation settings and tuning
//!
//! Persisted as JSON next to the executable (or wherever the caller points).
//! Every field has a default, so partial files are fine.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// World size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WorldSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl WorldSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorldSize::Small => "Small",
            WorldSize::Medium => "Medium",
            WorldSize::Large => "Large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small" | "s" => Some(WorldSize::Small),
            "medium" | "med" | "m" => Some(WorldSize::Medium),
            "large" | "l" => Some(WorldSize::Large),
            _ => None,
        }
    }

    /// Grid dimensions in cells (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            WorldSize::Small => (WORLD_WIDTH, WORLD_HEIGHT),
            WorldSize::Medium => (200, 80),
            WorldSize::Large => (300, 100),
        }
    }
}

/// Per-tick movement constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub gravity: f32,
    pub move_accel: f32,
    pub max_speed: f32,
    pub friction: f32,
    pub jump_force: f32,
    pub enemy_speed: f32,
    pub enemy_jump_force: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_accel: MOVE_SPEED,
            max_speed: MAX_SPEED,
            friction: FRICTION,
            jump_force: JUMP_FORCE,
            enemy_speed: ENEMY_SPEED,
            enemy_jump_force: ENEMY_JUMP_FORCE,
        }
    }
}

/// Terrain shaping parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenParams {
    /// Mean surface row
    pub base_height: f64,
    pub height_frequency: f64,
    pub height_amplitude: f64,
    pub cave_frequency: f64,
    /// Cave noise above this carves air
    pub cave_threshold: f64,
    /// Rows deeper than `height * stone_depth_ratio` turn to stone
    pub stone_depth_ratio: f64,
    /// Chance a deep cell is stone rather than dirt
    pub stone_chance: f64,
    /// Biomass above this grows a tree
    pub tree_threshold: f64,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            base_height: 25.0,
            height_frequency: 0.08,
            height_amplitude: 12.0,
            cave_frequency: 0.1,
            cave_threshold: 0.45,
            stone_depth_ratio: 0.75,
            stone_chance: 0.7,
            tree_threshold: 0.6,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid size preset
    pub world_size: WorldSize,
    /// Enemies spawned per world
    pub enemy_count: usize,
    pub physics: PhysicsTuning,
    pub generation: GenParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_size: WorldSize::Small,
            enemy_count: ENEMY_COUNT,
            physics: PhysicsTuning::default(),
            generation: GenParams::default(),
        }
    }
}

impl Settings {
    /// Create settings for a world size preset
    pub fn from_preset(world_size: WorldSize) -> Self {
        Self {
            world_size,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Bad settings file {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_size_parse() {
        assert_eq!(WorldSize::from_str("MED"), Some(WorldSize::Medium));
        assert_eq!(WorldSize::from_str("large"), Some(WorldSize::Large));
        assert_eq!(WorldSize::from_str("huge"), None);
        assert_eq!(WorldSize::Small.dimensions(), (100, 60));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "enemy_count": 2, "physics": { "gravity": 1.0 } }"#)
            .expect("valid json");
        assert_eq!(settings.enemy_count, 2);
        assert_eq!(settings.physics.gravity, 1.0);
        assert_eq!(settings.physics.friction, FRICTION);
        assert_eq!(settings.generation, GenParams::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_from(Path::new("/definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("tile_sandbox_settings_{}.json", std::process::id()));
        let settings = Settings::from_preset(WorldSize::Large);
        settings.save_to(&path).expect("write settings");
        assert_eq!(Settings::load_from(&path), settings);
        let _ = fs::remove_file(&path);
    }
}
