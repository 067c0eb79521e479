//! Player profile: game mode, cosmetic character and hotbar selection.

use serde::{Deserialize, Serialize};

use crate::ParseKindError;

/// Number of hotbar slots.
pub const HOTBAR_SIZE: usize = 9;

/// Game mode picked from the main menu.
///
/// `Multi` is a label only; both modes run the same local game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Single player.
    Single,
    /// Multiplayer (label only).
    Multi,
}

impl GameMode {
    /// Canonical lowercase string key.
    pub const fn as_str(self) -> &'static str {
        match self {
            GameMode::Single => "single",
            GameMode::Multi => "multi",
        }
    }

    /// Parse a game mode (case-insensitive).
    pub fn parse(input: &str) -> Result<Self, ParseKindError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "single" | "singleplayer" | "sp" => Ok(GameMode::Single),
            "multi" | "multiplayer" | "mp" => Ok(GameMode::Multi),
            _ => Err(ParseKindError::new("game mode", input)),
        }
    }

    /// Label shown in the controls panel.
    pub const fn label(self) -> &'static str {
        match self {
            GameMode::Single => "Single Player",
            GameMode::Multi => "Multiplayer",
        }
    }
}

/// Cosmetic character choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerCharacter {
    /// Blue avatar (default).
    #[default]
    Steve,
    /// Coral avatar.
    Alex,
    /// Purple avatar.
    Robot,
}

impl PlayerCharacter {
    /// All selectable characters, in menu order.
    pub const ALL: [PlayerCharacter; 3] = [
        PlayerCharacter::Steve,
        PlayerCharacter::Alex,
        PlayerCharacter::Robot,
    ];

    /// Canonical lowercase string key.
    pub const fn as_str(self) -> &'static str {
        match self {
            PlayerCharacter::Steve => "steve",
            PlayerCharacter::Alex => "alex",
            PlayerCharacter::Robot => "robot",
        }
    }

    /// Parse a character (case-insensitive).
    pub fn parse(input: &str) -> Result<Self, ParseKindError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "steve" => Ok(PlayerCharacter::Steve),
            "alex" => Ok(PlayerCharacter::Alex),
            "robot" => Ok(PlayerCharacter::Robot),
            _ => Err(ParseKindError::new("player character", input)),
        }
    }

    /// Body colour of the avatar.
    pub const fn body_color(self) -> &'static str {
        match self {
            PlayerCharacter::Steve => "#4a9eff",
            PlayerCharacter::Alex => "#ff7f50",
            PlayerCharacter::Robot => "#9c27b0",
        }
    }
}

/// A hotbar slot index, always in `0..HOTBAR_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct HotbarSlot(u8);

impl HotbarSlot {
    /// First slot.
    pub const FIRST: Self = Self(0);

    /// Create a slot from a zero-based index, rejecting out-of-range values.
    pub fn new(index: usize) -> Option<Self> {
        (index < HOTBAR_SIZE).then_some(Self(index as u8))
    }

    /// Zero-based index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every slot in order.
    pub fn all() -> impl Iterator<Item = HotbarSlot> {
        (0..HOTBAR_SIZE as u8).map(HotbarSlot)
    }
}

impl TryFrom<usize> for HotbarSlot {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        HotbarSlot::new(value).ok_or_else(|| format!("hotbar slot {value} out of range"))
    }
}

impl From<HotbarSlot> for usize {
    fn from(slot: HotbarSlot) -> Self {
        slot.index()
    }
}
