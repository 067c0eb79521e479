//! Everything that exists in the game view besides the player.

use blockadventure_core::Material;
use serde::Serialize;
use tracing::info;

use crate::block::{BlockFace, BlockPos, BlockWorld, MineOutcome, PlaceError, PlacedBlock};
use crate::mob::{MobManager, MobType};
use crate::terrain::{TerrainGenerator, TerrainSettings};
use crate::trees::{scatter_trees, Tree, CANOPY_SIZE, LEAF_COLOR, TRUNK_HEIGHT};

/// World generation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSettings {
    /// Seed for every random draw.
    pub seed: u64,
    /// Terrain layout.
    pub terrain: TerrainSettings,
    /// Mobs spawned at start.
    pub mob_count: usize,
    /// Mobs spawn within `[-mob_extent, mob_extent)`.
    pub mob_extent: f32,
    /// Trees scattered at start.
    pub tree_count: usize,
    /// Trees stand within `[-tree_extent, tree_extent)`.
    pub tree_extent: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            terrain: TerrainSettings::default(),
            mob_count: 15,
            mob_extent: 20.0,
            tree_count: 20,
            tree_extent: 40.0,
        }
    }
}

/// Readout of a block that has been hit but not broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockDamage {
    pub pos: BlockPos,
    pub material: Material,
    pub health_percent: i32,
}

/// Mobs of one type and the colour they are drawn in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MobTally {
    pub mob_type: MobType,
    pub color: &'static str,
    pub count: usize,
}

/// Tree count and the shape every tree is drawn with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeTally {
    pub count: usize,
    pub trunk_height: f32,
    pub canopy_size: f32,
    pub leaf_color: &'static str,
}

/// Compact description of the world for snapshots and logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSummary {
    pub seed: u64,
    pub blocks: usize,
    pub grass_blocks: usize,
    pub dirt_blocks: usize,
    /// Damaged blocks in position order.
    pub damaged_blocks: Vec<BlockDamage>,
    /// Only types with at least one mob appear.
    pub mobs: Vec<MobTally>,
    pub trees: TreeTally,
}

/// Terrain, mobs and trees.
pub struct World {
    seed: u64,
    blocks: BlockWorld,
    mobs: MobManager,
    trees: Vec<Tree>,
}

impl World {
    /// Generate a fresh world.
    pub fn generate(settings: &WorldSettings) -> Self {
        let blocks = TerrainGenerator::new(settings.seed, settings.terrain).generate();
        let mobs = MobManager::spawn(settings.seed, settings.mob_count, settings.mob_extent);
        let trees = scatter_trees(settings.seed, settings.tree_count, settings.tree_extent);

        info!(
            seed = settings.seed,
            blocks = blocks.len(),
            mobs = mobs.count(),
            trees = trees.len(),
            "World generated"
        );

        Self {
            seed: settings.seed,
            blocks,
            mobs,
            trees,
        }
    }

    /// Seed the world was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Block storage.
    pub fn blocks(&self) -> &BlockWorld {
        &self.blocks
    }

    /// Mob storage.
    pub fn mobs(&self) -> &MobManager {
        &self.mobs
    }

    /// Decorative trees.
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Summarise blocks, mobs and trees.
    pub fn summary(&self) -> WorldSummary {
        let damaged_blocks = self
            .blocks
            .iter()
            .filter(|(_, block)| block.is_damaged())
            .map(|(pos, block)| BlockDamage {
                pos,
                material: block.material,
                health_percent: block.health_percent(),
            })
            .collect();
        let mobs = [MobType::Zombie, MobType::Skeleton, MobType::Creeper]
            .into_iter()
            .map(|mob_type| MobTally {
                mob_type,
                color: mob_type.color(),
                count: self.mobs.count_of(mob_type),
            })
            .filter(|tally| tally.count > 0)
            .collect();

        WorldSummary {
            seed: self.seed,
            blocks: self.blocks.len(),
            grass_blocks: self.blocks.count_material(Material::Grass),
            dirt_blocks: self.blocks.count_material(Material::Dirt),
            damaged_blocks,
            mobs,
            trees: TreeTally {
                count: self.trees.len(),
                trunk_height: TRUNK_HEIGHT,
                canopy_size: CANOPY_SIZE,
                leaf_color: LEAF_COLOR,
            },
        }
    }

    /// Advance simulation by one tick.
    pub fn tick(&mut self) {
        self.mobs.tick();
    }

    /// Hit the block at `pos` once.
    pub fn mine(&mut self, pos: BlockPos) -> MineOutcome {
        self.blocks.mine(pos)
    }

    /// Place a block of `material` against `target`.
    pub fn place(
        &mut self,
        target: BlockPos,
        face: BlockFace,
        material: Option<Material>,
        color: Option<&str>,
    ) -> Result<BlockPos, PlaceError> {
        let fallback = self
            .blocks
            .get(target)
            .map(|block| block.material)
            .ok_or(PlaceError::NoTarget(target))?;
        let mut block = PlacedBlock::new(material.unwrap_or(fallback));
        if let Some(color) = color {
            block = block.with_color(color);
        }
        self.blocks.place_against(target, face, block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_world() -> World {
        World::generate(&WorldSettings {
            seed: 5,
            mob_count: 6,
            tree_count: 3,
            ..WorldSettings::default()
        })
    }

    #[test]
    fn summary_counts_blocks_mobs_and_trees() {
        let world = small_world();
        let summary = world.summary();

        assert_eq!(summary.seed, 5);
        assert_eq!(summary.blocks, world.blocks().len());
        assert_eq!(summary.grass_blocks + summary.dirt_blocks, summary.blocks);
        assert!(summary.damaged_blocks.is_empty());
        assert_eq!(summary.mobs.iter().map(|tally| tally.count).sum::<usize>(), 6);
        for tally in &summary.mobs {
            assert_eq!(tally.color, tally.mob_type.color());
        }
        assert_eq!(summary.trees.count, 3);
        assert_eq!(summary.trees.leaf_color, LEAF_COLOR);
        assert_eq!(summary.trees.canopy_size, CANOPY_SIZE);
    }

    #[test]
    fn summary_reports_block_damage_as_percent() {
        let mut world = small_world();
        let (pos, material) = world
            .blocks()
            .iter()
            .next()
            .map(|(pos, block)| (pos, block.material))
            .expect("terrain has blocks");

        assert_eq!(world.mine(pos), MineOutcome::Damaged { remaining: 75 });
        world.mine(pos);

        let summary = world.summary();
        assert_eq!(
            summary.damaged_blocks,
            vec![BlockDamage {
                pos,
                material,
                health_percent: 50,
            }]
        );
    }
}
