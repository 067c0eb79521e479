//! HUD view model: what the overlay draws, computed from a store snapshot.

use blockadventure_core::{GameMode, GameState, HotbarSlot, HOTBAR_SIZE};
use serde::Serialize;

/// Fallback slot colour when a stack carries none.
pub const DEFAULT_SLOT_COLOR: &str = "#8B4513";

pub const CONTROL_HINTS: [&str; 5] = [
    "WASD or Arrow Keys to move",
    "Space to jump",
    "Left-click to mine blocks",
    "Right-click to place blocks",
    "Watch out for mobs!",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub value: i64,
    pub max: i64,
    /// `value / max`, clamped to `[0, 1]`.
    pub ratio: f32,
}

impl Bar {
    fn new(value: i64, max: i64) -> Self {
        let ratio = if max > 0 {
            (value as f32 / max as f32).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { value, max, ratio }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub name: String,
    pub quantity: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotbarEntry {
    pub slot: usize,
    pub selected: bool,
    pub item: Option<SlotView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudView {
    pub currency_label: String,
    pub level_label: String,
    pub mode_label: String,
    pub controls_visible: bool,
    pub experience: Bar,
    pub health: Bar,
    pub health_label: String,
    pub energy: Bar,
    pub energy_label: String,
    pub hotbar: Vec<HotbarEntry>,
}

impl HudView {
    pub fn from_state(state: &GameState, controls_visible: bool) -> Self {
        // The overlay only runs in-game, where a mode is always set; an unset
        // mode renders like the multiplayer label.
        let mode = state.game_mode.unwrap_or(GameMode::Multi);

        let hotbar = HotbarSlot::all()
            .map(|slot| HotbarEntry {
                slot: slot.index(),
                selected: slot == state.selected_slot,
                item: state.inventory.get(slot.index()).map(|item| SlotView {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    color: item
                        .color
                        .clone()
                        .unwrap_or_else(|| DEFAULT_SLOT_COLOR.to_string()),
                }),
            })
            .collect::<Vec<_>>();
        debug_assert_eq!(hotbar.len(), HOTBAR_SIZE);

        Self {
            currency_label: format!("${}", state.currency),
            level_label: format!("Lv. {}", state.level),
            mode_label: format!("{} Mode", mode.label()),
            controls_visible,
            experience: Bar::new(state.experience.into(), state.max_experience.into()),
            health: Bar::new(state.health.into(), state.max_health.into()),
            health_label: format!("Health {}/{}", state.health, state.max_health),
            energy: Bar::new(state.energy.into(), state.max_energy.into()),
            energy_label: format!("Energy {}/{}", state.energy, state.max_energy),
            hotbar,
        }
    }

    pub fn selected_entry(&self) -> Option<&HotbarEntry> {
        self.hotbar.iter().find(|entry| entry.selected)
    }
}
