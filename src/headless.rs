use crate::command_script::CommandScriptPlayer;
use crate::commands::{execute_command, parse_command};
use crate::game::GameSession;
use crate::hud::{HudView, SlotView};
use anyhow::Result;
use blockadventure_core::{GameState, SimTick, TICKS_PER_SECOND};
use blockadventure_testkit::{write_json_snapshot, EventRecord, JsonlSink};
use blockadventure_world::WorldSummary;
use glam::Vec3;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Ticks simulated when neither a script nor a tick limit is given.
pub const DEFAULT_RUN_TICKS: u64 = 10 * TICKS_PER_SECOND;

pub struct HeadlessConfig {
    pub command_script: Option<PathBuf>,
    pub max_ticks: Option<u64>,
    pub snapshot_out: Option<PathBuf>,
    pub event_log: Option<PathBuf>,
}

/// Final state written by `--snapshot-out`.
#[derive(Debug, Serialize)]
pub struct RunSnapshot {
    pub tick: SimTick,
    pub player_position: Vec3,
    pub display_position: Vec3,
    pub avatar_color: &'static str,
    pub world: WorldSummary,
    /// Units across every inventory stack.
    pub inventory_units: u64,
    /// Stack in the highlighted hotbar slot.
    pub selected_item: Option<SlotView>,
    pub state: GameState,
    pub hud: HudView,
}

#[derive(Debug, Serialize)]
struct CommandRecord<'a> {
    command: &'a str,
    lines: Vec<String>,
}

pub fn run(session: &mut GameSession, cfg: HeadlessConfig) -> Result<RunSnapshot> {
    let mut script = cfg
        .command_script
        .as_deref()
        .map(CommandScriptPlayer::from_path)
        .transpose()?;
    let mut log = cfg.event_log.as_ref().map(JsonlSink::create).transpose()?;

    let max_ticks = match (cfg.max_ticks, &script) {
        (Some(limit), _) => limit,
        // One extra tick so the final step's timers get a chance to fire.
        (None, Some(script)) => script.last_tick().0.saturating_add(1),
        (None, None) => DEFAULT_RUN_TICKS,
    };
    info!(max_ticks, "Headless run starting");

    while session.now().0 < max_ticks {
        let tick = session.now();
        if let Some(script) = script.as_mut() {
            for command in script.drain_ready_commands(tick) {
                let lines = match parse_command(&command) {
                    Ok(cmd) => execute_command(&mut *session, cmd).lines,
                    Err(err) => {
                        warn!(%err, %command, "Command rejected");
                        vec![format!("Error: {err}")]
                    }
                };
                for line in &lines {
                    info!(tick = tick.0, "{line}");
                }
                if let Some(log) = log.as_mut() {
                    log.write(&EventRecord {
                        tick,
                        kind: "Command",
                        payload: CommandRecord {
                            command: &command,
                            lines,
                        },
                    })?;
                }
            }
        }

        session.tick();
        let events = session.drain_events();
        if let Some(log) = log.as_mut() {
            for event in &events {
                log.write(&EventRecord {
                    tick,
                    kind: event.kind(),
                    payload: event,
                })?;
            }
        }
    }

    if let Some(script) = script.as_ref() {
        if !script.is_finished() {
            warn!("Tick limit reached before the command script finished");
        }
    }

    debug!(pending = session.pending_timers(), "Timers still pending at exit");
    if let Some(log) = log.as_mut() {
        log.flush()?;
        info!(events = log.written(), "Event log written");
    }

    let state = session.store().snapshot();
    let hud = session.hud();
    let snapshot = RunSnapshot {
        tick: session.now(),
        player_position: session.player().position(),
        display_position: session.player().display_position(),
        avatar_color: state.player_character.body_color(),
        world: session.world().summary(),
        inventory_units: state.total_items(),
        selected_item: hud.selected_entry().and_then(|entry| entry.item.clone()),
        state,
        hud,
    };
    if let Some(path) = cfg.snapshot_out.as_ref() {
        write_json_snapshot(path, &snapshot)?;
        info!(path = %path.display(), "Snapshot written");
    }

    Ok(snapshot)
}
