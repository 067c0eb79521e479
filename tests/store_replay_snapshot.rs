//! Golden replay of a representative store session.

use blockadventure_core::{
    GameMode, HotbarSlot, ItemId, ItemKind, Material, NewItem, PlayerCharacter, StoreAction,
};
use blockadventure_testkit::replay_store_actions;
use std::path::PathBuf;

fn snapshot_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/snapshots")
        .join(name)
}

#[test]
fn store_progression_matches_golden() {
    let actions = vec![
        StoreAction::SetGameMode(Some(GameMode::Single)),
        StoreAction::SetPlayerCharacter(PlayerCharacter::Alex),
        StoreAction::UpdateHealth(-30),
        StoreAction::UpdateEnergy(-15),
        StoreAction::AddExperience(240),
        StoreAction::AddExperience(20),
        StoreAction::UpdateCurrency(15),
        StoreAction::UpdateCurrency(-40),
        StoreAction::AddToInventory(NewItem::block(Material::Dirt)),
        StoreAction::AddToInventory(NewItem::block(Material::Dirt)),
        StoreAction::AddToInventory(NewItem::new(ItemKind::Tool, "Pickaxe", 1)),
        StoreAction::RemoveFromInventory {
            id: ItemId(0),
            amount: 1,
        },
        StoreAction::SetSelectedSlot(HotbarSlot::new(1).expect("slot 2 exists")),
    ];

    let store = replay_store_actions(
        "store_progression",
        &actions,
        snapshot_path("store_progression.json"),
    )
    .expect("store state matches golden");

    assert_eq!(store.revision(), actions.len() as u64);
    assert_eq!(store.state().currency, -25);
}
