//! Main menu system

use blockadventure_core::{GameMode, PlayerCharacter, StoreHandle};
use tracing::info;

pub const TITLE: &str = "Block Adventure";

/// Menu action to communicate with main state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Continue displaying menu
    Continue,
    /// Start the game
    StartGame,
}

/// One entry of the character picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterOption {
    pub character: PlayerCharacter,
    pub selected: bool,
}

/// Main menu state
pub struct MenuState {
    store: StoreHandle,
}

impl MenuState {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Character picker entries in display order.
    pub fn character_options(&self) -> Vec<CharacterOption> {
        let current = self.store.read().state().player_character;
        PlayerCharacter::ALL
            .iter()
            .map(|&character| CharacterOption {
                character,
                selected: character == current,
            })
            .collect()
    }

    pub fn select_character(&mut self, character: PlayerCharacter) -> MenuAction {
        self.store
            .update(|store| store.set_player_character(character));
        info!(character = character.as_str(), "Character selected");
        MenuAction::Continue
    }

    /// Pick a mode; this leaves the menu.
    pub fn choose_mode(&mut self, mode: GameMode) -> MenuAction {
        self.store.update(|store| store.set_game_mode(Some(mode)));
        info!(mode = mode.as_str(), "Mode selected");
        MenuAction::StartGame
    }

    /// Whether the app should show the game view instead of the menu.
    pub fn in_game(&self) -> bool {
        self.store.read().state().game_mode.is_some()
    }
}
