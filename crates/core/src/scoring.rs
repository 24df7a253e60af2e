//! Scoring module - line clears, ren chains and T-spins
//!
//! Rules applied to a lock that clears at least one row, in this order:
//!
//! 1. Base points from [`LINE_SCORES`].
//! 2. The ren counter is incremented by the caller before scoring; a chain
//!    longer than one adds `ren * REN_BONUS` and shows "Ren N!".
//! 3. A four-row clear shows "Tetris!" instead (the ren bonus still counts).
//! 4. A T-spin overrides the message. Double and Triple also replace the
//!    points with a flat value; any other T-spin keeps the points from above.
//!
//! A lock that clears nothing scores nothing and breaks the chain.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::types::{PieceKind, Rotation};

/// Base points by rows cleared; clears larger than four use the last entry.
pub const LINE_SCORES: [u32; 5] = [0, 100, 200, 500, 1000];

/// Points per chain step once the chain is longer than one
pub const REN_BONUS: u32 = 100;

/// Flat points for a T-spin clearing two rows
pub const T_SPIN_DOUBLE_SCORE: u32 = 1000;

/// Flat points for a T-spin clearing three rows
pub const T_SPIN_TRIPLE_SCORE: u32 = 1500;

/// Transient message shown after a clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClearMessage {
    Ren(u32),
    Tetris,
    TSpin,
    TSpinDouble,
    TSpinTriple,
}

impl fmt::Display for ClearMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClearMessage::Ren(n) => write!(f, "Ren {n}!"),
            ClearMessage::Tetris => f.write_str("Tetris!"),
            ClearMessage::TSpin => f.write_str("T-spin!"),
            ClearMessage::TSpinDouble => f.write_str("T-spin Double!"),
            ClearMessage::TSpinTriple => f.write_str("T-spin Triple!"),
        }
    }
}

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearScore {
    pub points: u32,
    pub message: Option<ClearMessage>,
}

/// Base points for a clear of `lines` rows
pub fn base_line_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

/// Score a clear of `lines > 0` rows.
///
/// `ren` is the chain length including this clear.
pub fn score_clear(lines: usize, ren: u32, t_spin: bool) -> ClearScore {
    if lines == 0 {
        return ClearScore::default();
    }

    let mut points = base_line_score(lines);
    let mut message = None;

    if ren > 1 {
        points = points.saturating_add(ren.saturating_mul(REN_BONUS));
        message = Some(ClearMessage::Ren(ren));
    }
    if lines == 4 {
        message = Some(ClearMessage::Tetris);
    }
    if t_spin {
        match lines {
            2 => {
                points = T_SPIN_DOUBLE_SCORE;
                message = Some(ClearMessage::TSpinDouble);
            }
            3 => {
                points = T_SPIN_TRIPLE_SCORE;
                message = Some(ClearMessage::TSpinTriple);
            }
            _ => message = Some(ClearMessage::TSpin),
        }
    }

    ClearScore { points, message }
}

/// Corner heuristic for a locked T piece.
///
/// Must run after the piece is written into the board and before rows are
/// cleared. Offsets are relative to the mask anchor and test the cells beside
/// the T's flat side: `(x+1, y)` and `(x+1, y+2)`.
///
/// - rotation 2: either corner occupied
/// - rotation 1: `(x+1, y+2)` occupied
/// - rotation 3: `(x+1, y)` occupied
/// - rotation 0: never
pub fn is_t_spin(piece: &ActivePiece, board: &Board) -> bool {
    if piece.kind != PieceKind::T {
        return false;
    }

    let row = piece.x.saturating_add(1);
    let left = board.is_occupied(row, piece.y);
    let right = board.is_occupied(row, piece.y.saturating_add(2));

    match piece.rotation {
        Rotation::R0 => false,
        Rotation::R1 => right,
        Rotation::R2 => left || right,
        Rotation::R3 => left,
    }
}
