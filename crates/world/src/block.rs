//! Minable and placeable world blocks.

use blockadventure_core::{Material, ParseKindError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Durability of a freshly generated or placed block.
pub const BLOCK_DURABILITY: i32 = 100;

/// Durability removed by one mining hit.
pub const MINING_DAMAGE: i32 = 25;

/// Integer block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate (0 is ground level).
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Create a new position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Neighbouring position across `face`.
    pub fn offset(self, face: BlockFace) -> Self {
        let (dx, dy, dz) = face.normal();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Face of a block targeted by a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockFace {
    /// +X (east).
    East,
    /// -X (west).
    West,
    /// +Y (top).
    Up,
    /// -Y (bottom).
    Down,
    /// +Z (south).
    South,
    /// -Z (north).
    North,
}

impl BlockFace {
    /// Unit normal of the face.
    pub const fn normal(self) -> (i32, i32, i32) {
        match self {
            BlockFace::East => (1, 0, 0),
            BlockFace::West => (-1, 0, 0),
            BlockFace::Up => (0, 1, 0),
            BlockFace::Down => (0, -1, 0),
            BlockFace::South => (0, 0, 1),
            BlockFace::North => (0, 0, -1),
        }
    }

    /// Parse a face name (case-insensitive).
    pub fn parse(input: &str) -> Result<Self, ParseKindError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "east" | "+x" => Ok(BlockFace::East),
            "west" | "-x" => Ok(BlockFace::West),
            "up" | "top" | "+y" => Ok(BlockFace::Up),
            "down" | "bottom" | "-y" => Ok(BlockFace::Down),
            "south" | "+z" => Ok(BlockFace::South),
            "north" | "-z" => Ok(BlockFace::North),
            _ => Err(ParseKindError {
                what: "block face",
                value: input.to_string(),
            }),
        }
    }
}

/// A block present in the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBlock {
    /// Block material.
    pub material: Material,
    /// Display colour.
    pub color: String,
    /// Remaining durability; the block breaks at zero.
    pub durability: i32,
}

impl PlacedBlock {
    /// A fresh block with full durability and its material's colour.
    pub fn new(material: Material) -> Self {
        Self {
            material,
            color: material.color().to_string(),
            durability: BLOCK_DURABILITY,
        }
    }

    /// Override the display colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Whether the block has taken any damage.
    pub fn is_damaged(&self) -> bool {
        self.durability < BLOCK_DURABILITY
    }

    /// Remaining durability as a percentage of a fresh block, as shown on hover.
    pub fn health_percent(&self) -> i32 {
        (self.durability.max(0) * 100) / BLOCK_DURABILITY
    }
}

/// Result of one mining hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MineOutcome {
    /// The block survived the hit.
    Damaged {
        /// Durability left.
        remaining: i32,
    },
    /// The block broke and was removed from the world.
    Broken(Material),
    /// No block at the position.
    Missing,
}

/// Reasons a placement is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    /// The targeted block does not exist.
    #[error("no block to place against at {0}")]
    NoTarget(BlockPos),
    /// The destination cell already holds a block.
    #[error("position {0} is already occupied")]
    Occupied(BlockPos),
}

/// All blocks in the world, keyed by position.
#[derive(Debug, Clone, Default)]
pub struct BlockWorld {
    blocks: BTreeMap<BlockPos, PlacedBlock>,
}

impl BlockWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the world holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block at `pos`, if any.
    pub fn get(&self, pos: BlockPos) -> Option<&PlacedBlock> {
        self.blocks.get(&pos)
    }

    /// Insert or replace a block.
    pub fn insert(&mut self, pos: BlockPos, block: PlacedBlock) {
        self.blocks.insert(pos, block);
    }

    /// Iterate blocks in position order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, &PlacedBlock)> {
        self.blocks.iter().map(|(pos, block)| (*pos, block))
    }

    /// Count blocks of a material.
    pub fn count_material(&self, material: Material) -> usize {
        self.blocks
            .values()
            .filter(|block| block.material == material)
            .count()
    }

    /// Apply one mining hit to the block at `pos`.
    pub fn mine(&mut self, pos: BlockPos) -> MineOutcome {
        let Some(block) = self.blocks.get_mut(&pos) else {
            return MineOutcome::Missing;
        };

        block.durability -= MINING_DAMAGE;
        if block.durability <= 0 {
            let material = block.material;
            self.blocks.remove(&pos);
            MineOutcome::Broken(material)
        } else {
            MineOutcome::Damaged {
                remaining: block.durability,
            }
        }
    }

    /// Place `block` against `target` on the given face.
    ///
    /// Returns the position the new block landed on.
    pub fn place_against(
        &mut self,
        target: BlockPos,
        face: BlockFace,
        block: PlacedBlock,
    ) -> Result<BlockPos, PlaceError> {
        if !self.blocks.contains_key(&target) {
            return Err(PlaceError::NoTarget(target));
        }
        let destination = target.offset(face);
        if self.blocks.contains_key(&destination) {
            return Err(PlaceError::Occupied(destination));
        }
        self.blocks.insert(destination, block);
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_hits_break_a_block() {
        let mut world = BlockWorld::new();
        let pos = BlockPos::new(0, 0, 0);
        world.insert(pos, PlacedBlock::new(Material::Grass));

        assert_eq!(world.mine(pos), MineOutcome::Damaged { remaining: 75 });
        assert_eq!(world.mine(pos), MineOutcome::Damaged { remaining: 50 });
        assert_eq!(world.mine(pos), MineOutcome::Damaged { remaining: 25 });
        assert_eq!(world.mine(pos), MineOutcome::Broken(Material::Grass));
        assert!(world.get(pos).is_none());
        assert_eq!(world.mine(pos), MineOutcome::Missing);
    }

    #[test]
    fn placement_lands_on_adjacent_cell() {
        let mut world = BlockWorld::new();
        let target = BlockPos::new(2, 0, -4);
        world.insert(target, PlacedBlock::new(Material::Dirt));

        let placed = world
            .place_against(target, BlockFace::Up, PlacedBlock::new(Material::Stone))
            .expect("top face is free");
        assert_eq!(placed, BlockPos::new(2, 1, -4));
        assert_eq!(world.get(placed).map(|b| b.material), Some(Material::Stone));

        let placed = world
            .place_against(target, BlockFace::North, PlacedBlock::new(Material::Stone))
            .expect("north face is free");
        assert_eq!(placed, BlockPos::new(2, 0, -5));
    }

    #[test]
    fn placement_is_refused_on_occupied_or_missing_target() {
        let mut world = BlockWorld::new();
        let target = BlockPos::new(0, 0, 0);
        world.insert(target, PlacedBlock::new(Material::Dirt));
        world.insert(BlockPos::new(0, 1, 0), PlacedBlock::new(Material::Grass));

        assert_eq!(
            world.place_against(target, BlockFace::Up, PlacedBlock::new(Material::Dirt)),
            Err(PlaceError::Occupied(BlockPos::new(0, 1, 0)))
        );
        assert_eq!(
            world.place_against(
                BlockPos::new(9, 9, 9),
                BlockFace::Up,
                PlacedBlock::new(Material::Dirt)
            ),
            Err(PlaceError::NoTarget(BlockPos::new(9, 9, 9)))
        );
    }

    #[test]
    fn faces_parse_from_names_and_axes() {
        assert_eq!(BlockFace::parse("TOP"), Ok(BlockFace::Up));
        assert_eq!(BlockFace::parse("-x"), Ok(BlockFace::West));
        assert!(BlockFace::parse("sideways").is_err());
    }
}
