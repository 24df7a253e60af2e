//! JSONL event log.
//!
//! When `BLOCKFALL_LOG_PATH` names a file, every drained [`RoundEvent`] is
//! appended to it as one JSON object per line, tagged with the frame it was
//! drained on:
//!
//! ```text
//! {"frame":0,"event":"spawned","kind":"t"}
//! {"frame":41,"event":"locked","kind":"t","rotation":"R0","x":17,"y":3,...}
//! ```

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::RoundEvent;

/// Environment variable naming the log file
pub const LOG_PATH_ENV: &str = "BLOCKFALL_LOG_PATH";

#[derive(Serialize)]
struct Record<'a> {
    frame: u64,
    #[serde(flatten)]
    event: &'a RoundEvent,
}

pub struct EventLog<W: Write> {
    out: W,
    /// Reused line buffer
    line: Vec<u8>,
}

impl EventLog<BufWriter<std::fs::File>> {
    /// Open the file named by `BLOCKFALL_LOG_PATH` for appending.
    /// Returns `None` when the variable is unset or blank.
    pub fn from_env() -> Result<Option<Self>> {
        let path = match std::env::var(LOG_PATH_ENV) {
            Ok(p) if !p.trim().is_empty() => p.trim().to_string(),
            _ => return Ok(None),
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening event log {path}"))?;
        Ok(Some(Self::new(BufWriter::new(file))))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            line: Vec::with_capacity(256),
        }
    }

    /// Append one event as a JSON line.
    pub fn append(&mut self, frame: u64, event: &RoundEvent) -> Result<()> {
        self.line.clear();
        serde_json::to_writer(&mut self.line, &Record { frame, event })?;
        self.line.push(b'\n');
        self.out.write_all(&self.line)?;
        Ok(())
    }

    pub fn append_all(&mut self, frame: u64, events: &[RoundEvent]) -> Result<()> {
        for event in events {
            self.append(frame, event)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn writes_one_line_per_event() {
        let mut log = EventLog::new(Vec::new());
        log.append_all(
            7,
            &[
                RoundEvent::Spawned { kind: PieceKind::O },
                RoundEvent::PauseToggled { paused: true },
            ],
        )
        .unwrap();

        let text = String::from_utf8(log.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["frame"], 7);
        assert_eq!(first["event"], "spawned");
        assert_eq!(first["kind"], "o");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["paused"], true);
    }
}
