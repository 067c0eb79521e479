#![warn(missing_docs)]
//! Deterministic testing surfaces (event stream + golden snapshots).

mod replay;
mod snapshot;

use anyhow::Result;
use blockadventure_core::SimTick;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

pub use replay::*;
pub use snapshot::*;

/// Primary event record captured by headless runs and tests.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a, P: Serialize> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Event payload.
    pub payload: P,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
    written: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file, written: 0 })
    }

    /// Append an event to the log.
    pub fn write<P: Serialize>(&mut self, event: &EventRecord<'_, P>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of events written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered data to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }
}

/// Read back every line of a JSONL log as generic JSON values.
pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<serde_json::Value>> {
    let reader = BufReader::new(File::open(path)?);
    let mut values = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        values.push(serde_json::from_str(&line)?);
    }
    Ok(values)
}
