//! Terrain generation.
//!
//! The world is a grid of block columns. Column height follows a gentle
//! `sin(x/10) * cos(z/10)` swell plus a small random bump; the top block of
//! each column is grass and everything beneath it is dirt.

use blockadventure_core::{scoped_rng, Material};
use rand::Rng;
use tracing::debug;

use crate::block::{BlockPos, BlockWorld, PlacedBlock};

const TERRAIN_DOMAIN: u64 = 0x7465_7272_6169_6e00;

/// Amplitude of the trigonometric swell.
pub const SWELL_AMPLITUDE: f64 = 3.0;

/// Horizontal wavelength divisor of the swell.
pub const SWELL_SCALE: f64 = 10.0;

/// Random bump added to each column, drawn from `0..RANDOM_BUMP`.
pub const RANDOM_BUMP: i32 = 3;

/// Terrain generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainSettings {
    /// Columns span `-radius..radius` on both horizontal axes.
    pub radius: i32,
    /// Distance between neighbouring columns.
    pub spacing: i32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            radius: 30,
            spacing: 2,
        }
    }
}

/// Deterministic terrain generator.
pub struct TerrainGenerator {
    world_seed: u64,
    settings: TerrainSettings,
}

impl TerrainGenerator {
    /// Create a generator for the given seed.
    pub fn new(world_seed: u64, settings: TerrainSettings) -> Self {
        Self {
            world_seed,
            settings,
        }
    }

    /// Smooth part of the column height at `(x, z)`.
    pub fn swell(x: i32, z: i32) -> i32 {
        let value = (x as f64 / SWELL_SCALE).sin() * (z as f64 / SWELL_SCALE).cos();
        (value * SWELL_AMPLITUDE).floor() as i32
    }

    /// Column coordinates along one axis.
    pub fn axis(&self) -> impl Iterator<Item = i32> {
        let radius = self.settings.radius.max(0);
        let spacing = self.settings.spacing.max(1) as usize;
        (-radius..radius).step_by(spacing)
    }

    /// Generate every column.
    pub fn generate(&self) -> BlockWorld {
        let mut rng = scoped_rng(self.world_seed, TERRAIN_DOMAIN);
        let mut world = BlockWorld::new();

        for x in self.axis() {
            for z in self.axis() {
                let height = Self::swell(x, z) + rng.gen_range(0..RANDOM_BUMP);
                for y in 0..height {
                    let material = if y == height - 1 {
                        Material::Grass
                    } else {
                        Material::Dirt
                    };
                    world.insert(BlockPos::new(x, y, z), PlacedBlock::new(material));
                }
            }
        }

        debug!(
            seed = self.world_seed,
            blocks = world.len(),
            "Generated terrain"
        );
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swell_is_zero_at_origin() {
        assert_eq!(TerrainGenerator::swell(0, 0), 0);
        // sin(1.5) * cos(0) * 3 = 2.99
        assert_eq!(TerrainGenerator::swell(15, 0), 2);
        // Negative swell floors downwards.
        assert_eq!(TerrainGenerator::swell(-15, 0), -3);
    }

    #[test]
    fn axis_steps_by_spacing() {
        let generator = TerrainGenerator::new(1, TerrainSettings::default());
        let axis: Vec<i32> = generator.axis().collect();
        assert_eq!(axis.len(), 30);
        assert_eq!(axis.first(), Some(&-30));
        assert_eq!(axis.last(), Some(&28));
    }

    #[test]
    fn columns_have_grass_on_top_and_dirt_below() {
        let world = TerrainGenerator::new(42, TerrainSettings::default()).generate();
        assert!(!world.is_empty());

        for (pos, block) in world.iter() {
            let above = world.get(BlockPos::new(pos.x, pos.y + 1, pos.z));
            match block.material {
                Material::Grass => assert!(above.is_none(), "grass at {pos} is buried"),
                Material::Dirt => assert!(above.is_some(), "dirt at {pos} is exposed"),
                other => panic!("unexpected material {other:?}"),
            }
            assert!(pos.y >= 0);
            assert_eq!(pos.x % 2, 0);
        }
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let settings = TerrainSettings::default();
        let a = TerrainGenerator::new(9, settings).generate();
        let b = TerrainGenerator::new(9, settings).generate();
        let a: Vec<_> = a.iter().map(|(pos, block)| (pos, block.clone())).collect();
        let b: Vec<_> = b.iter().map(|(pos, block)| (pos, block.clone())).collect();
        assert_eq!(a, b);
    }
}
