use anyhow::Result;
use blockadventure_world::{TerrainSettings, WorldSettings};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/game.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    /// Action name -> key names, replacing the default keys for that action.
    pub bindings: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: u64,
    /// Terrain columns span `-terrain_radius..terrain_radius`.
    pub terrain_radius: i32,
    pub column_spacing: i32,
    pub mob_count: usize,
    pub mob_extent: f32,
    pub tree_count: usize,
    pub tree_extent: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let defaults = WorldSettings::default();
        Self {
            seed: 12345,
            terrain_radius: defaults.terrain.radius,
            column_spacing: defaults.terrain.spacing,
            mob_count: defaults.mob_count,
            mob_extent: defaults.mob_extent,
            tree_count: defaults.tree_count,
            tree_extent: defaults.tree_extent,
        }
    }
}

impl WorldConfig {
    pub fn settings(&self) -> WorldSettings {
        WorldSettings {
            seed: self.seed,
            terrain: TerrainSettings {
                radius: self.terrain_radius,
                spacing: self.column_spacing,
            },
            mob_count: self.mob_count,
            mob_extent: self.mob_extent,
            tree_count: self.tree_count,
            tree_extent: self.tree_extent,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Distance moved per key press.
    pub move_step: f32,
    /// Height reached by a jump.
    pub jump_height: f32,
    /// Time spent in the air before landing.
    pub jump_duration_ms: u64,
    /// Interval of the display-position sync.
    pub position_sync_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_step: 0.5,
            jump_height: 2.0,
            jump_duration_ms: 500,
            position_sync_ms: 100,
        }
    }
}

impl GameConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    GameConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                GameConfig::default()
            }
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str::<GameConfig>(contents)?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}
