//! Property-based tests for mining and placement.

use blockadventure_core::Material;
use blockadventure_world::{
    BlockFace, BlockPos, BlockWorld, MineOutcome, PlaceError, PlacedBlock, BLOCK_DURABILITY,
    MINING_DAMAGE,
};
use proptest::prelude::*;

fn face() -> impl Strategy<Value = BlockFace> {
    prop_oneof![
        Just(BlockFace::East),
        Just(BlockFace::West),
        Just(BlockFace::Up),
        Just(BlockFace::Down),
        Just(BlockFace::South),
        Just(BlockFace::North),
    ]
}

fn material() -> impl Strategy<Value = Material> {
    prop_oneof![Just(Material::Dirt), Just(Material::Grass)]
}

proptest! {
    /// A block survives every hit until its durability is used up.
    #[test]
    fn block_breaks_exactly_on_last_hit(
        x in -30i32..30, y in 0i32..5, z in -30i32..30, mat in material(),
    ) {
        let pos = BlockPos::new(x, y, z);
        let mut world = BlockWorld::new();
        world.insert(pos, PlacedBlock::new(mat));

        let hits = BLOCK_DURABILITY / MINING_DAMAGE;
        for hit in 1..hits {
            prop_assert_eq!(
                world.mine(pos),
                MineOutcome::Damaged { remaining: BLOCK_DURABILITY - hit * MINING_DAMAGE }
            );
        }
        prop_assert_eq!(world.mine(pos), MineOutcome::Broken(mat));
        prop_assert!(world.is_empty());
        prop_assert_eq!(world.mine(pos), MineOutcome::Missing);
    }

    /// Placement lands one unit along the face and never overwrites a block.
    #[test]
    fn placement_is_adjacent_and_never_overwrites(
        x in -10i32..10, y in 0i32..5, z in -10i32..10, f in face(),
    ) {
        let target = BlockPos::new(x, y, z);
        let mut world = BlockWorld::new();
        world.insert(target, PlacedBlock::new(Material::Grass));

        let placed = world
            .place_against(target, f, PlacedBlock::new(Material::Dirt))
            .expect("empty neighbour");
        let (dx, dy, dz) = f.normal();
        prop_assert_eq!(placed, BlockPos::new(x + dx, y + dy, z + dz));
        prop_assert_eq!(world.len(), 2);

        prop_assert_eq!(
            world.place_against(target, f, PlacedBlock::new(Material::Dirt)),
            Err(PlaceError::Occupied(placed))
        );
        prop_assert_eq!(world.get(placed).map(|b| b.material), Some(Material::Dirt));
    }
}
