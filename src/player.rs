//! Player avatar position.
//!
//! The live position changes immediately on input; the display position is
//! what the renderer reads and only catches up on the periodic sync.

use glam::Vec3;

use crate::config::PlayerConfig;

/// Horizontal movement direction, in the avatar's fixed frame (-Z is forward).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    fn unit(self) -> Vec3 {
        match self {
            Direction::Forward => Vec3::NEG_Z,
            Direction::Backward => Vec3::Z,
            Direction::Left => Vec3::NEG_X,
            Direction::Right => Vec3::X,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    position: Vec3,
    display_position: Vec3,
    move_step: f32,
    jump_height: f32,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            position: Vec3::ZERO,
            display_position: Vec3::ZERO,
            move_step: config.move_step,
            jump_height: config.jump_height,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn display_position(&self) -> Vec3 {
        self.display_position
    }

    pub fn on_ground(&self) -> bool {
        self.position.y == 0.0
    }

    pub fn step(&mut self, direction: Direction) {
        self.position += direction.unit() * self.move_step;
    }

    /// Leave the ground. Returns `false` while already airborne.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground() {
            return false;
        }
        self.position.y = self.jump_height;
        true
    }

    pub fn land(&mut self) {
        self.position.y = 0.0;
    }

    pub fn sync_display(&mut self) {
        self.display_position = self.position;
    }
}
