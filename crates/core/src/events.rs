//! Round events - what happened during a tick, for observers
//!
//! The round pushes one [`RoundEvent`] per notable state change and the
//! caller drains them with [`crate::Round::drain_events`]. Events serialize
//! as internally tagged JSON objects, one per line in the binary's log.

use serde::{Deserialize, Serialize};

use crate::types::{PieceKind, Rotation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum RoundEvent {
    /// A fresh piece entered the board at the spawn anchor
    Spawned { kind: PieceKind },
    /// The active kind went to the hold slot and `active` replaced it
    Held { stashed: PieceKind, active: PieceKind },
    /// A piece was written into the board
    Locked {
        kind: PieceKind,
        rotation: Rotation,
        x: i8,
        y: i8,
        lines_cleared: u8,
        t_spin: bool,
        points: u32,
    },
    /// A transient message became visible
    Message { text: String },
    PauseToggled { paused: bool },
    GameOver { score: u32, lines: u32 },
}

impl RoundEvent {
    /// Short lowercase tag, matching the `event` field of the JSON form
    pub fn name(&self) -> &'static str {
        match self {
            RoundEvent::Spawned { .. } => "spawned",
            RoundEvent::Held { .. } => "held",
            RoundEvent::Locked { .. } => "locked",
            RoundEvent::Message { .. } => "message",
            RoundEvent::PauseToggled { .. } => "pauseToggled",
            RoundEvent::GameOver { .. } => "gameOver",
        }
    }
}
