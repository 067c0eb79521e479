use blockadventure_core::{SimTick, StoreAction};
use blockadventure_testkit::{read_jsonl, EventRecord, JsonlSink};

#[test]
fn deterministic_event_stream_can_be_written() {
    let path = std::env::temp_dir().join(format!(
        "blockadventure_smoke_{:016x}.jsonl",
        rand::random::<u64>()
    ));
    let mut sink = JsonlSink::create(&path).expect("can create temp log");
    let record = EventRecord {
        tick: SimTick::ZERO.advance(1),
        kind: "StoreCommit",
        payload: StoreAction::UpdateHealth(-5),
    };
    sink.write(&record).expect("can write event");
    sink.flush().expect("can flush");

    let lines = read_jsonl(&path).expect("can read log back");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["tick"], 1);
    assert_eq!(lines[0]["payload"]["op"], "update_health");
    let _ = std::fs::remove_file(&path);
}
