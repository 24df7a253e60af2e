//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental vocabulary shared by the logic core, the
//! input mapping and the terminal renderer. Everything here is plain data.
//!
//! # Coordinates
//!
//! The board is addressed as `(x, y)` where **x is the row axis** (growing
//! downward) and **y is the column axis** (growing rightward):
//!
//! ```text
//! --> y
//! |
//! v
//! x
//! ```
//!
//! # Default Timing
//!
//! All timing is counted in logic ticks, not milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_RATE` | 30 | Logic ticks per second |
//! | `DEFAULT_DROP_INTERVAL` | 30 | Ticks between gravity steps |
//! | `DEFAULT_LOCK_DELAY` | 30 | Ticks a resting piece may wait before it locks |
//! | `DEFAULT_MESSAGE_LIFE` | 45 | Ticks a transient message stays visible |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, Rotation};
//!
//! assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
//! assert_eq!(Rotation::R3.cw(), Rotation::R0);
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! ```

use serde::{Deserialize, Serialize};

/// Default board height in rows
pub const DEFAULT_ROWS: u8 = 20;

/// Default board width in columns
pub const DEFAULT_COLS: u8 = 10;

/// Logic ticks per second
pub const DEFAULT_TICK_RATE: u32 = 30;

/// Ticks between two gravity steps
pub const DEFAULT_DROP_INTERVAL: u32 = 30;

/// Ticks a piece may rest on the stack before it is forced to lock
pub const DEFAULT_LOCK_DELAY: u32 = 30;

/// Ticks a transient message ("Tetris!", "Ren 3!") stays visible
pub const DEFAULT_MESSAGE_LIFE: u32 = 45;

/// Number of upcoming pieces guaranteed to be previewable
pub const DEFAULT_LOOKAHEAD: usize = 2;

/// Spawn anchor `(row, column)` of the 4x4 mask
pub const DEFAULT_SPAWN: (i8, i8) = (0, 3);

/// Side length of a shape mask
pub const MASK_SIZE: usize = 4;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in canonical order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("o"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }
}

/// Rotation states, numbered 0-3 clockwise from the spawn orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    R0,
    R1,
    R2,
    R3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R1, Rotation::R2, Rotation::R3];

    /// Rotate clockwise
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::R0.cw(), Rotation::R1);
    /// assert_eq!(Rotation::R3.cw(), Rotation::R0);
    /// ```
    pub fn cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::R0.ccw(), Rotation::R3);
    /// assert_eq!(Rotation::R2.ccw(), Rotation::R1);
    /// ```
    pub fn ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    pub fn turn(&self, dir: RotateDir) -> Self {
        match dir {
            RotateDir::Left => self.ccw(),
            RotateDir::Right => self.cw(),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Rotation::R0 => 0,
            Rotation::R1 => 1,
            Rotation::R2 => 2,
            Rotation::R3 => 3,
        }
    }

    /// Build from any index, wrapping modulo 4.
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % 4]
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateDir {
    Left,
    Right,
}

/// Abstract game commands queued by input collaborators
///
/// Pause is not a command: it toggles immediately and never waits in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down
    SoftDrop,
    /// Drop to the shadow position and lock immediately
    HardDrop,
    /// Rotate counter-clockwise
    RotateLeft,
    /// Rotate clockwise
    RotateRight,
    /// Swap the active piece with the hold slot (once per piece)
    Hold,
}

impl Command {
    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATERIGHT"), Some(Command::RotateRight));
    /// assert_eq!(Command::from_str("pause"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotateleft" => Some(Command::RotateLeft),
            "rotateright" => Some(Command::RotateRight),
            "hold" => Some(Command::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateLeft => "rotateLeft",
            Command::RotateRight => "rotateRight",
            Command::Hold => "hold",
        }
    }
}

/// Lifecycle state of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundPhase {
    #[default]
    Running,
    Paused,
    /// Terminal: only a new round leaves this state.
    GameOver,
}

/// A cell on the board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_both_ways() {
        for r in Rotation::ALL {
            assert_eq!(r.cw().ccw(), r);
            assert_eq!(r.cw().cw().cw().cw(), r);
        }
        assert_eq!(Rotation::R0.turn(RotateDir::Left), Rotation::R3);
        assert_eq!(Rotation::R3.turn(RotateDir::Right), Rotation::R0);
    }

    #[test]
    fn piece_kind_index_matches_all_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn command_names_round_trip() {
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::HardDrop,
            Command::RotateLeft,
            Command::RotateRight,
            Command::Hold,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn defaults_match_reference_timing() {
        assert_eq!(DEFAULT_TICK_RATE, 30);
        assert_eq!(DEFAULT_DROP_INTERVAL, 30);
        assert_eq!(DEFAULT_LOCK_DELAY, 30);
        assert_eq!(DEFAULT_MESSAGE_LIFE, 45);
        assert_eq!(DEFAULT_SPAWN, (0, 3));
    }
}
