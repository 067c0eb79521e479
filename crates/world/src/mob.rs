//! Wandering mobs.
//!
//! Mobs are decorative: they spawn around the origin and drift by a small
//! random offset every tick. They never attack or despawn.

use blockadventure_core::{scoped_rng, ParseKindError};
use glam::Vec3;
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};

const MOB_DOMAIN: u64 = 0x6d6f_6273;

/// Largest per-tick drift along each horizontal axis.
pub const WANDER_STEP: f32 = 0.01;

/// Types of mobs that can spawn in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobType {
    /// Zombie.
    Zombie,
    /// Skeleton.
    Skeleton,
    /// Creeper.
    Creeper,
}

impl MobType {
    /// Canonical lowercase string key for configs/logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            MobType::Zombie => "zombie",
            MobType::Skeleton => "skeleton",
            MobType::Creeper => "creeper",
        }
    }

    /// Parse a mob type from a string key (case-insensitive).
    pub fn parse(input: &str) -> Result<Self, ParseKindError> {
        match input.trim().to_lowercase().as_str() {
            "zombie" => Ok(MobType::Zombie),
            "skeleton" => Ok(MobType::Skeleton),
            "creeper" => Ok(MobType::Creeper),
            _ => Err(ParseKindError {
                what: "mob type",
                value: input.to_string(),
            }),
        }
    }

    /// Body colour.
    pub const fn color(self) -> &'static str {
        match self {
            MobType::Zombie => "#4CAF50",
            MobType::Skeleton => "#BDBDBD",
            MobType::Creeper => "#50C878",
        }
    }

    /// Roll a mob type.
    ///
    /// Two independent draws: the first picks zombies a third of the time,
    /// the second splits the rest into skeletons and creepers. Skeletons
    /// end up roughly twice as common as creepers.
    pub fn roll(rng: &mut impl Rng) -> Self {
        if rng.gen::<f32>() < 0.33 {
            MobType::Zombie
        } else if rng.gen::<f32>() < 0.66 {
            MobType::Skeleton
        } else {
            MobType::Creeper
        }
    }
}

/// A mob instance in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mob {
    /// Mob type.
    pub mob_type: MobType,
    /// Feet position.
    pub position: Vec3,
}

impl Mob {
    /// Create a mob at a position.
    pub fn new(mob_type: MobType, position: Vec3) -> Self {
        Self { mob_type, position }
    }

    /// Drift by one random step. The same offset is applied to x and z.
    pub fn wander(&mut self, rng: &mut impl Rng) {
        let step = rng.gen::<f32>() * 2.0 * WANDER_STEP - WANDER_STEP;
        self.position.x += step;
        self.position.z += step;
    }
}

/// Owns every mob and the RNG that drives their movement.
pub struct MobManager {
    mobs: Vec<Mob>,
    rng: StdRng,
}

impl MobManager {
    /// Spawn `count` mobs uniformly within `[-extent, extent)` on x and z.
    pub fn spawn(world_seed: u64, count: usize, extent: f32) -> Self {
        let mut rng = scoped_rng(world_seed, MOB_DOMAIN);
        let extent = extent.abs().max(f32::EPSILON);
        let mobs = (0..count)
            .map(|_| {
                let x = rng.gen_range(-extent..extent);
                let z = rng.gen_range(-extent..extent);
                Mob::new(MobType::roll(&mut rng), Vec3::new(x, 0.0, z))
            })
            .collect();
        Self { mobs, rng }
    }

    /// Advance every mob by one tick.
    pub fn tick(&mut self) {
        for mob in &mut self.mobs {
            mob.wander(&mut self.rng);
        }
    }

    /// All mobs.
    pub fn mobs(&self) -> &[Mob] {
        &self.mobs
    }

    /// Number of mobs.
    pub fn count(&self) -> usize {
        self.mobs.len()
    }

    /// Number of mobs of a given type.
    pub fn count_of(&self, mob_type: MobType) -> usize {
        self.mobs.iter().filter(|m| m.mob_type == mob_type).count()
    }
}
