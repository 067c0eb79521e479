#![warn(missing_docs)]
//! Core primitives shared across the workspace: simulation ticks, inventory
//! items, the player profile and the game state store.

pub mod item;
pub mod profile;
pub mod store;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use item::{InventoryItem, ItemId, ItemKind, Material, NewItem, StackKey};
pub use profile::{GameMode, HotbarSlot, PlayerCharacter, HOTBAR_SIZE};
pub use store::{
    GameState, GameStore, StoreAction, StoreHandle, BASE_EXPERIENCE_THRESHOLD, MAX_ENERGY,
    MAX_HEALTH,
};

/// Simulation ticks per second (50 ms per tick).
pub const TICKS_PER_SECOND: u64 = 20;

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }

    /// Convert a wall-clock duration in milliseconds into a tick count.
    ///
    /// Rounds up so that a non-zero duration never collapses to zero ticks.
    pub fn ticks_for_millis(millis: u64) -> u64 {
        let per_tick = 1000 / TICKS_PER_SECOND;
        millis.div_ceil(per_tick).max(1)
    }
}

/// Helper to derive a reproducible RNG seeded by world + domain salt.
pub fn scoped_rng(world_seed: u64, domain: u64) -> StdRng {
    StdRng::seed_from_u64(world_seed ^ domain.rotate_left(17))
}

/// Error returned when a textual name does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what}: {value:?}")]
pub struct ParseKindError {
    /// Category that was being parsed (e.g. "game mode").
    pub what: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseKindError {
    pub(crate) fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }
}
