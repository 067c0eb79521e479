//! Decorative trees scattered around the spawn area.

use blockadventure_core::{scoped_rng, Material};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

const TREE_DOMAIN: u64 = 0x7472_6565;

/// Trunk height in blocks.
pub const TRUNK_HEIGHT: f32 = 4.0;

/// Edge length of the leaf cube.
pub const CANOPY_SIZE: f32 = 2.0;

/// Colour of the leaf cube.
pub const LEAF_COLOR: &str = "#2E7D32";

/// A tree standing on the ground plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Base of the trunk.
    pub position: Vec3,
}

impl Tree {
    /// Trunk material.
    pub const fn trunk_material(&self) -> Material {
        Material::Wood
    }

    /// Centre of the leaf cube.
    pub fn canopy_center(&self) -> Vec3 {
        self.position + Vec3::new(0.0, TRUNK_HEIGHT, 0.0)
    }
}

/// Scatter `count` trees uniformly within `[-extent, extent)` on x and z.
pub fn scatter_trees(world_seed: u64, count: usize, extent: f32) -> Vec<Tree> {
    let mut rng = scoped_rng(world_seed, TREE_DOMAIN);
    let extent = extent.abs().max(f32::EPSILON);
    (0..count)
        .map(|_| Tree {
            position: Vec3::new(
                rng.gen_range(-extent..extent),
                0.0,
                rng.gen_range(-extent..extent),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trees_are_scattered_deterministically() {
        let a = scatter_trees(8, 20, 40.0);
        let b = scatter_trees(8, 20, 40.0);
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
        for tree in &a {
            assert!((-40.0..40.0).contains(&tree.position.x));
            assert_eq!(tree.canopy_center().y, TRUNK_HEIGHT);
            assert_eq!(tree.trunk_material(), Material::Wood);
        }
    }
}
