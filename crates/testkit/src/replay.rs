//! Golden replays of store action sequences.
//!
//! A replay feeds a fixed list of [`StoreAction`]s through a fresh
//! [`GameStore`] and compares the final state with a golden JSON file, so a
//! change to any reducer rule shows up as a one-line golden diff.

use crate::snapshot::assert_json_snapshot;
use anyhow::Result;
use blockadventure_core::{GameState, GameStore, StoreAction};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct StoreReplayReport<'a> {
    name: &'a str,
    actions: usize,
    revision: u64,
    state: &'a GameState,
}

/// Apply `actions` to a new store and check the result against `snapshot_path`.
///
/// Returns the store so callers can make further assertions on it.
pub fn replay_store_actions<P: AsRef<Path>>(
    name: &str,
    actions: &[StoreAction],
    snapshot_path: P,
) -> Result<GameStore> {
    let mut store = GameStore::new();
    for action in actions {
        store.dispatch(action.clone());
    }

    let report = StoreReplayReport {
        name,
        actions: actions.len(),
        revision: store.revision(),
        state: store.state(),
    };
    assert_json_snapshot(snapshot_path, &report)?;
    Ok(store)
}
