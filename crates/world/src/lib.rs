//! World model: terrain, blocks, mobs, trees and the tick scheduler.

mod block;
mod mob;
mod scheduler;
mod terrain;
mod trees;
mod world;

pub use block::*;
pub use mob::*;
pub use scheduler::*;
pub use terrain::*;
pub use trees::*;
pub use world::*;
