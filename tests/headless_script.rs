use blockadventure_testkit::read_jsonl;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "blockadventure_headless_{:016x}",
        rand::random::<u64>()
    ));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn demo_script() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("scripts/demo.json")
}

fn run_demo(dir: &Path, extra: &[&str]) -> (Value, Vec<Value>) {
    let snapshot = dir.join("state.json");
    let events = dir.join("events.jsonl");
    let status = Command::new(env!("CARGO_BIN_EXE_blockadventure"))
        .arg("--config")
        .arg(dir.join("missing.toml"))
        .arg("--command-script")
        .arg(demo_script())
        .arg("--max-ticks")
        .arg("30")
        .arg("--snapshot-out")
        .arg(&snapshot)
        .arg("--event-log")
        .arg(&events)
        .args(extra)
        .status()
        .expect("spawn blockadventure");
    assert!(status.success(), "headless run failed: {status}");

    let contents = std::fs::read_to_string(&snapshot).expect("snapshot written");
    let snapshot: Value = serde_json::from_str(&contents).expect("snapshot is json");
    let events = read_jsonl(&events).expect("event log readable");
    (snapshot, events)
}

#[test]
fn demo_script_drives_the_store() {
    let dir = scratch_dir();
    let (snapshot, events) = run_demo(&dir, &["--mode", "multi", "--character", "robot"]);

    let state = &snapshot["state"];
    assert_eq!(state["game_mode"], "multi");
    assert_eq!(state["player_character"], "robot");
    assert_eq!(snapshot["avatar_color"], "#9c27b0");
    assert_eq!(state["level"], 2);
    assert_eq!(state["experience"], 10);
    assert_eq!(state["max_experience"], 375);
    assert_eq!(state["currency"], -30);
    assert_eq!(state["health"], 0);
    assert_eq!(state["selected_slot"], 1);

    // The mined dirt block was placed again, leaving only the pickaxe.
    let inventory = state["inventory"].as_array().expect("inventory array");
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0]["name"], "Pickaxe");
    assert_eq!(snapshot["inventory_units"], 1);
    // Slot 2 is selected but only slot 1 holds a stack.
    assert_eq!(snapshot["selected_item"], Value::Null);

    // Four hits broke the mined block, so nothing is left half-damaged.
    let world = &snapshot["world"];
    assert_eq!(world["damaged_blocks"].as_array().map(Vec::len), Some(0));
    let mobs: u64 = world["mobs"]
        .as_array()
        .expect("mob tallies")
        .iter()
        .filter_map(|tally| tally["count"].as_u64())
        .sum();
    assert_eq!(mobs, 15);
    assert_eq!(world["trees"]["count"], 20);

    // Jumped at tick 1 and landed before the run ended.
    assert_eq!(snapshot["player_position"], serde_json::json!([0.0, 0.0, -0.5]));
    assert_eq!(snapshot["display_position"], serde_json::json!([0.0, 0.0, -0.5]));

    let hud = &snapshot["hud"];
    assert_eq!(hud["mode_label"], "Multiplayer Mode");
    assert_eq!(hud["level_label"], "Lv. 2");
    assert_eq!(hud["currency_label"], "$-30");
    assert_eq!(hud["health_label"], "Health 0/100");
    assert_eq!(hud["controls_visible"], false);
    assert_eq!(hud["hotbar"].as_array().map(Vec::len), Some(9));

    let kinds: Vec<&str> = events.iter().filter_map(|e| e["kind"].as_str()).collect();
    for expected in ["Moved", "Jumped", "Landed", "BlockMined", "BlockPlaced", "StoreCommit"] {
        assert!(kinds.contains(&expected), "missing {expected} in {kinds:?}");
    }
    let rejected = events
        .iter()
        .find(|e| e["kind"] == "Command" && e["payload"]["command"] == "/fly")
        .expect("rejected command is logged");
    assert!(rejected["payload"]["lines"][0]
        .as_str()
        .is_some_and(|line| line.starts_with("Error: Unknown command")));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn same_seed_produces_identical_snapshots() {
    let first = scratch_dir();
    let second = scratch_dir();
    let (a, events_a) = run_demo(&first, &["--world-seed", "99"]);
    let (b, events_b) = run_demo(&second, &["--world-seed", "99"]);
    assert_eq!(a, b);
    assert_eq!(events_a, events_b);
    assert_eq!(a["state"]["game_mode"], "single");

    let _ = std::fs::remove_dir_all(&first);
    let _ = std::fs::remove_dir_all(&second);
}
