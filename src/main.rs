//! Block Adventure - a small voxel sandbox game
//!
//! Headless driver: menu choices come from flags, gameplay from a command script.

mod command_script;
mod commands;
mod config;
mod game;
mod headless;
mod hud;
mod input;
mod menu;
mod player;

use anyhow::Result;
use blockadventure_core::{GameMode, GameStore, PlayerCharacter, StoreHandle};
use config::GameConfig;
use game::GameSession;
use menu::{MenuAction, MenuState};
use std::{env, path::PathBuf};
use tracing::{debug, info};

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting {} v{}", menu::TITLE, env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let mut config = match cli.config.as_deref() {
        Some(path) => GameConfig::load_from_path(path),
        None => GameConfig::load(),
    };
    if let Some(seed) = cli.world_seed {
        config.world.seed = seed;
    }

    let store = StoreHandle::new(GameStore::new());
    let mut menu = MenuState::new(store.clone());
    if let Some(character) = cli.character {
        menu.select_character(character);
    }
    debug!(options = ?menu.character_options(), "Character picker");
    let mode = cli.mode.unwrap_or(GameMode::Single);
    if menu.choose_mode(mode) != MenuAction::StartGame || !menu.in_game() {
        anyhow::bail!("menu did not start the game");
    }

    let mut session = GameSession::new(store, &config);
    let snapshot = headless::run(
        &mut session,
        headless::HeadlessConfig {
            command_script: cli.command_script,
            max_ticks: cli.max_ticks,
            snapshot_out: cli.snapshot_out,
            event_log: cli.event_log,
        },
    )?;

    info!(
        tick = snapshot.tick.0,
        level = snapshot.state.level,
        currency = snapshot.state.currency,
        stacks = snapshot.state.inventory.len(),
        items = snapshot.inventory_units,
        "Run finished"
    );
    Ok(())
}

#[derive(Clone, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    world_seed: Option<u64>,
    max_ticks: Option<u64>,
    command_script: Option<PathBuf>,
    mode: Option<GameMode>,
    character: Option<PlayerCharacter>,
    snapshot_out: Option<PathBuf>,
    event_log: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--world-seed" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.world_seed = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--world-seed must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--world-seed requires an integer");
                    }
                }
                "--max-ticks" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_ticks = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--max-ticks must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--max-ticks requires an integer");
                    }
                }
                "--command-script" => {
                    if let Some(path) = args.next() {
                        opts.command_script = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--command-script requires a file path");
                    }
                }
                "--mode" => {
                    if let Some(raw) = args.next() {
                        match GameMode::parse(&raw) {
                            Ok(mode) => opts.mode = Some(mode),
                            Err(err) => tracing::error!(%err, "--mode must be single or multi"),
                        }
                    } else {
                        tracing::error!("--mode requires single or multi");
                    }
                }
                "--character" => {
                    if let Some(raw) = args.next() {
                        match PlayerCharacter::parse(&raw) {
                            Ok(character) => opts.character = Some(character),
                            Err(err) => {
                                tracing::error!(%err, "--character must be steve, alex or robot");
                            }
                        }
                    } else {
                        tracing::error!("--character requires a name");
                    }
                }
                "--snapshot-out" => {
                    if let Some(path) = args.next() {
                        opts.snapshot_out = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--snapshot-out requires a file path");
                    }
                }
                "--event-log" => {
                    if let Some(path) = args.next() {
                        opts.event_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--event-log requires a file path");
                    }
                }
                other => tracing::warn!(arg = other, "Ignoring unknown argument"),
            }
        }

        opts
    }
}
