use std::collections::HashMap;

use crate::config::GameConfig;
use blockadventure_core::HOTBAR_SIZE;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Jump,
    ToggleControls,
    /// Zero-based hotbar slot.
    HotbarSlot(u8),
}

impl Action {
    fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "forward" | "move_forward" => Some(Action::MoveForward),
            "backward" | "back" | "move_backward" => Some(Action::MoveBackward),
            "left" | "move_left" => Some(Action::MoveLeft),
            "right" | "move_right" => Some(Action::MoveRight),
            "jump" => Some(Action::Jump),
            "toggle_controls" | "controls" => Some(Action::ToggleControls),
            _ => {
                let slot = name.strip_prefix("hotbar_")?.parse::<u8>().ok()?;
                (1..=HOTBAR_SIZE as u8)
                    .contains(&slot)
                    .then_some(Action::HotbarSlot(slot - 1))
            }
        }
    }
}

/// Normalise a key name: lowercase, and a literal space becomes `space`.
pub fn normalize_key(key: &str) -> String {
    if key == " " {
        return "space".to_string();
    }
    key.trim().to_ascii_lowercase()
}

fn default_bindings() -> Vec<(Action, Vec<&'static str>)> {
    let mut bindings = vec![
        (Action::MoveForward, vec!["w", "arrowup"]),
        (Action::MoveBackward, vec!["s", "arrowdown"]),
        (Action::MoveLeft, vec!["a", "arrowleft"]),
        (Action::MoveRight, vec!["d", "arrowright"]),
        (Action::Jump, vec!["space"]),
        (Action::ToggleControls, vec!["h"]),
    ];
    const DIGITS: [&str; HOTBAR_SIZE] = ["1", "2", "3", "4", "5", "6", "7", "8", "9"];
    for (slot, key) in DIGITS.iter().enumerate() {
        bindings.push((Action::HotbarSlot(slot as u8), vec![*key]));
    }
    bindings
}

#[derive(Debug, Clone)]
pub struct Bindings {
    by_key: HashMap<String, Action>,
}

impl Bindings {
    pub fn from_config(config: &GameConfig) -> Self {
        let mut by_action: HashMap<Action, Vec<String>> = default_bindings()
            .into_iter()
            .map(|(action, keys)| (action, keys.into_iter().map(String::from).collect()))
            .collect();

        for (name, keys) in &config.bindings {
            match Action::parse(name) {
                Some(action) => {
                    by_action.insert(action, keys.iter().map(|k| normalize_key(k)).collect());
                }
                None => warn!(action = %name, "Ignoring binding for unknown action"),
            }
        }

        let mut by_key = HashMap::new();
        for (action, keys) in by_action {
            for key in keys {
                if let Some(previous) = by_key.insert(key.clone(), action) {
                    warn!(%key, ?previous, ?action, "Key bound to several actions");
                }
            }
        }
        Self { by_key }
    }

    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.by_key.get(&normalize_key(key)).copied()
    }
}
