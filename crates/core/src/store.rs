//! Game state store.
//!
//! The store is the single authoritative holder of session state. Every
//! mutation is a [`StoreAction`] reduced against the current [`GameState`];
//! the resulting state replaces the old one in a single assignment, so a
//! reader never observes a half-applied update.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use tracing::debug;

use crate::item::{InventoryItem, ItemId, NewItem, StackKey};
use crate::profile::{GameMode, HotbarSlot, PlayerCharacter};

/// Maximum player health.
pub const MAX_HEALTH: i32 = 100;

/// Maximum player energy.
pub const MAX_ENERGY: i32 = 100;

/// Experience needed to reach level 2.
pub const BASE_EXPERIENCE_THRESHOLD: u32 = 250;

/// Snapshot of everything the store owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Mode picked in the main menu; `None` until the player starts a game.
    pub game_mode: Option<GameMode>,
    /// Cosmetic character choice.
    pub player_character: PlayerCharacter,
    /// Current health in `[0, max_health]`.
    pub health: i32,
    /// Health ceiling.
    pub max_health: i32,
    /// Current energy in `[0, max_energy]`.
    pub energy: i32,
    /// Energy ceiling.
    pub max_energy: i32,
    /// Player level, starting at 1.
    pub level: u32,
    /// Experience accumulated towards the next level.
    pub experience: u32,
    /// Experience threshold for the next level-up.
    pub max_experience: u32,
    /// Coins held. Spending past zero leaves a debt.
    pub currency: i64,
    /// Inventory stacks in acquisition order.
    pub inventory: Vec<InventoryItem>,
    /// Active hotbar slot.
    pub selected_slot: HotbarSlot,
    #[serde(default)]
    next_item_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            game_mode: None,
            player_character: PlayerCharacter::default(),
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            energy: MAX_ENERGY,
            max_energy: MAX_ENERGY,
            level: 1,
            experience: 0,
            max_experience: BASE_EXPERIENCE_THRESHOLD,
            currency: 0,
            inventory: Vec::new(),
            selected_slot: HotbarSlot::FIRST,
            next_item_id: 0,
        }
    }
}

impl GameState {
    /// Stack shown in the selected hotbar slot, if any.
    pub fn selected_item(&self) -> Option<&InventoryItem> {
        self.inventory.get(self.selected_slot.index())
    }

    /// Look up a stack by identifier.
    pub fn item(&self, id: ItemId) -> Option<&InventoryItem> {
        self.inventory.iter().find(|item| item.id == id)
    }

    /// Look up a stack by its stacking key.
    pub fn stack(&self, key: &StackKey) -> Option<&InventoryItem> {
        self.inventory
            .iter()
            .find(|item| item.kind == key.kind && item.name == key.name)
    }

    /// Total units across every stack.
    pub fn total_items(&self) -> u64 {
        self.inventory.iter().map(|item| item.quantity as u64).sum()
    }

    /// Compute the state that results from applying `action`.
    ///
    /// Pure: `self` is left untouched.
    pub fn reduce(&self, action: &StoreAction) -> GameState {
        let mut next = self.clone();
        match action {
            StoreAction::SetGameMode(mode) => next.game_mode = *mode,
            StoreAction::SetPlayerCharacter(character) => next.player_character = *character,
            StoreAction::UpdateHealth(delta) => {
                next.health = clamp_vital(self.health, *delta, self.max_health);
            }
            StoreAction::UpdateEnergy(delta) => {
                next.energy = clamp_vital(self.energy, *delta, self.max_energy);
            }
            StoreAction::AddExperience(amount) => {
                let total = self.experience.saturating_add(*amount);
                // Single check: an amount spanning several thresholds still
                // levels up once.
                if total >= self.max_experience {
                    next.level = self.level.saturating_add(1);
                    next.experience = total - self.max_experience;
                    next.max_experience = grow_threshold(self.max_experience);
                } else {
                    next.experience = total;
                }
            }
            StoreAction::UpdateCurrency(delta) => {
                next.currency = self.currency.saturating_add(*delta);
            }
            StoreAction::AddToInventory(item) => {
                match next.inventory.iter_mut().find(|stack| stack.matches(item)) {
                    Some(stack) => {
                        stack.quantity = stack.quantity.saturating_add(item.quantity);
                    }
                    None => {
                        let id = ItemId(next.next_item_id);
                        next.next_item_id = next.next_item_id.wrapping_add(1);
                        next.inventory
                            .push(InventoryItem::from_new(id, item.clone()));
                    }
                }
            }
            StoreAction::RemoveFromInventory { id, amount } => {
                if let Some(index) = next.inventory.iter().position(|stack| stack.id == *id) {
                    if next.inventory[index].quantity <= *amount {
                        next.inventory.remove(index);
                    } else {
                        next.inventory[index].quantity -= *amount;
                    }
                }
            }
            StoreAction::SetSelectedSlot(slot) => next.selected_slot = *slot,
        }
        next
    }
}

fn clamp_vital(current: i32, delta: i32, max: i32) -> i32 {
    current.saturating_add(delta).clamp(0, max)
}

/// Next threshold: `floor(threshold * 1.5)`.
fn grow_threshold(threshold: u32) -> u32 {
    let grown = threshold as u64 * 3 / 2;
    grown.min(u32::MAX as u64) as u32
}

/// Every mutation the store accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum StoreAction {
    /// Set or clear the game mode.
    SetGameMode(Option<GameMode>),
    /// Pick the cosmetic character.
    SetPlayerCharacter(PlayerCharacter),
    /// Add a (possibly negative) delta to health, clamped.
    UpdateHealth(i32),
    /// Add a (possibly negative) delta to energy, clamped.
    UpdateEnergy(i32),
    /// Add experience, levelling up at most once.
    AddExperience(u32),
    /// Add a (possibly negative) delta to currency. No floor or ceiling.
    UpdateCurrency(i64),
    /// Merge a stack into the inventory.
    AddToInventory(NewItem),
    /// Take units out of a stack, deleting it when it runs out.
    RemoveFromInventory {
        /// Stack identifier.
        id: ItemId,
        /// Units to remove.
        amount: u32,
    },
    /// Change the active hotbar slot.
    SetSelectedSlot(HotbarSlot),
}

/// Owner of the authoritative [`GameState`].
#[derive(Debug, Clone, Default)]
pub struct GameStore {
    state: GameState,
    revision: u64,
}

impl GameStore {
    /// Create a store holding the initial session state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest committed state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Number of commits since creation; bumps on every dispatched action.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Reduce `action` against the current state and commit the result.
    pub fn dispatch(&mut self, action: StoreAction) {
        let next = self.state.reduce(&action);
        self.revision += 1;
        debug!(revision = self.revision, ?action, "store commit");
        self.state = next;
    }

    /// Set the game mode.
    pub fn set_game_mode(&mut self, mode: Option<GameMode>) {
        self.dispatch(StoreAction::SetGameMode(mode));
    }

    /// Set the cosmetic character.
    pub fn set_player_character(&mut self, character: PlayerCharacter) {
        self.dispatch(StoreAction::SetPlayerCharacter(character));
    }

    /// Adjust health by `delta`, clamped to `[0, max_health]`.
    pub fn update_health(&mut self, delta: i32) {
        self.dispatch(StoreAction::UpdateHealth(delta));
    }

    /// Adjust energy by `delta`, clamped to `[0, max_energy]`.
    pub fn update_energy(&mut self, delta: i32) {
        self.dispatch(StoreAction::UpdateEnergy(delta));
    }

    /// Gain experience.
    pub fn add_experience(&mut self, amount: u32) {
        self.dispatch(StoreAction::AddExperience(amount));
    }

    /// Adjust currency by `delta`.
    pub fn update_currency(&mut self, delta: i64) {
        self.dispatch(StoreAction::UpdateCurrency(delta));
    }

    /// Merge `item` into the inventory and return the id of the stack holding it.
    pub fn add_to_inventory(&mut self, item: NewItem) -> ItemId {
        let key = item.stack_key();
        self.dispatch(StoreAction::AddToInventory(item));
        self.state
            .stack(&key)
            .map(|stack| stack.id)
            .unwrap_or(ItemId(self.state.next_item_id.wrapping_sub(1)))
    }

    /// Remove `amount` units from the stack `id`. Unknown ids are ignored.
    pub fn remove_from_inventory(&mut self, id: ItemId, amount: u32) {
        self.dispatch(StoreAction::RemoveFromInventory { id, amount });
    }

    /// Remove a single unit from the stack `id`.
    pub fn remove_one(&mut self, id: ItemId) {
        self.remove_from_inventory(id, 1);
    }

    /// Change the active hotbar slot.
    pub fn set_selected_slot(&mut self, slot: HotbarSlot) {
        self.dispatch(StoreAction::SetSelectedSlot(slot));
    }
}

/// Shared single-threaded handle to the store.
///
/// The application context creates one and hands clones to the components
/// that need it; the store itself stays the only writer of its state.
#[derive(Debug, Clone, Default)]
pub struct StoreHandle(Rc<RefCell<GameStore>>);

impl StoreHandle {
    /// Wrap a store.
    pub fn new(store: GameStore) -> Self {
        Self(Rc::new(RefCell::new(store)))
    }

    /// Borrow the store for reading.
    pub fn read(&self) -> Ref<'_, GameStore> {
        self.0.borrow()
    }

    /// Clone the current state.
    pub fn snapshot(&self) -> GameState {
        self.0.borrow().state().clone()
    }

    /// Current revision of the store.
    pub fn revision(&self) -> u64 {
        self.0.borrow().revision()
    }

    /// Run a group of store operations.
    pub fn update<R>(&self, f: impl FnOnce(&mut GameStore) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Dispatch a single action.
    pub fn dispatch(&self, action: StoreAction) {
        self.0.borrow_mut().dispatch(action);
    }
}
