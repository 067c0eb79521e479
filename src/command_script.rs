use anyhow::{Context, Result};
use blockadventure_core::{SimTick, TICKS_PER_SECOND};
use serde::Deserialize;
use std::{collections::VecDeque, fs, path::Path};

/// Latest tick a step may name: 24 hours of simulation.
pub const MAX_SCRIPT_TICK: u64 = 24 * 60 * 60 * TICKS_PER_SECOND;

#[derive(Debug, Deserialize)]
struct ScriptFile {
    steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScriptStep {
    tick: u64,
    command: String,
}

/// Replays `{tick, command}` steps against the session clock.
///
/// Steps must be sorted by tick; steps sharing a tick run in file order.
#[derive(Debug)]
pub struct CommandScriptPlayer {
    pending: VecDeque<(SimTick, String)>,
    last_tick: SimTick,
}

impl CommandScriptPlayer {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read command script {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid command script {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let file: ScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("command script contains no steps");
        }

        let mut pending = VecDeque::with_capacity(file.steps.len());
        let mut last_tick = SimTick::ZERO;
        for step in file.steps {
            let command = step.command.trim();
            if command.is_empty() {
                anyhow::bail!("command script contains an empty command");
            }
            if step.tick > MAX_SCRIPT_TICK {
                anyhow::bail!(
                    "command script step at tick {} is past the limit of {MAX_SCRIPT_TICK}",
                    step.tick
                );
            }
            let tick = SimTick(step.tick);
            if tick < last_tick {
                anyhow::bail!("command script steps must be sorted by tick");
            }
            last_tick = tick;
            pending.push_back((tick, command.to_string()));
        }

        Ok(Self { pending, last_tick })
    }

    /// Pop every command due at or before `tick`.
    pub fn drain_ready_commands(&mut self, tick: SimTick) -> Vec<String> {
        let mut ready = Vec::new();
        while self.pending.front().is_some_and(|(due, _)| *due <= tick) {
            if let Some((_, command)) = self.pending.pop_front() {
                ready.push(command);
            }
        }
        ready
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    /// Tick of the final step.
    pub fn last_tick(&self) -> SimTick {
        self.last_tick
    }
}
