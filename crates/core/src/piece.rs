//! Active piece - the falling tetromino and its movement rules
//!
//! The piece only knows its kind, rotation and anchor. The catalog and the
//! board are passed in by the owner on every call, so all movement funnels
//! through a single collision predicate, [`ActivePiece::can_be_at`].
//!
//! Rotation tries a fixed ordered list of anchor offsets ("kicks") against the
//! target rotation and takes the first one that fits.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::shapes::{MinoOffset, ShapeCatalog};
use crate::types::{PieceKind, RotateDir, Rotation};

/// Kick offsets tried in order when rotating; `(row, column)`.
///
/// Prefers staying put, then dropping one or two rows, then sliding sideways,
/// and finally lifting one row.
pub const EXTENDED_KICKS: [MinoOffset; 12] = [
    (0, 0),
    (1, 0),
    (1, 1),
    (1, -1),
    (2, 0),
    (2, 1),
    (2, -1),
    (0, 1),
    (0, -1),
    (-1, 0),
    (-1, 1),
    (-1, -1),
];

/// Smaller kick list: the eight neighbours of the anchor after `(0, 0)`.
pub const COMPACT_KICKS: [MinoOffset; 9] = [
    (0, 0),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Which ordered kick list rotation uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KickSet {
    /// [`EXTENDED_KICKS`] (12 offsets)
    #[default]
    Extended,
    /// [`COMPACT_KICKS`] (9 offsets)
    Compact,
}

impl KickSet {
    pub fn offsets(&self) -> &'static [MinoOffset] {
        match self {
            KickSet::Extended => &EXTENDED_KICKS,
            KickSet::Compact => &COMPACT_KICKS,
        }
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Anchor row of the 4x4 mask
    pub x: i8,
    /// Anchor column of the 4x4 mask
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at a spawn anchor in rotation 0
    pub fn spawn(kind: PieceKind, (x, y): (i8, i8)) -> Self {
        Self {
            kind,
            rotation: Rotation::R0,
            x,
            y,
        }
    }

    /// Whether every filled mask cell of `rotation` anchored at `(x, y)` is
    /// in bounds and unoccupied.
    pub fn can_be_at(
        &self,
        shapes: &ShapeCatalog,
        board: &Board,
        rotation: Rotation,
        x: i8,
        y: i8,
    ) -> bool {
        shapes
            .shape_of(self.kind, rotation)
            .minos()
            .iter()
            .all(|&(dx, dy)| match (x.checked_add(dx), y.checked_add(dy)) {
                (Some(cx), Some(cy)) => board.is_free(cx, cy),
                _ => false,
            })
    }

    /// Shift by `(dx, dy)` if the target fits. No change on failure.
    pub fn try_move(&mut self, shapes: &ShapeCatalog, board: &Board, dx: i8, dy: i8) -> bool {
        let (Some(x), Some(y)) = (self.x.checked_add(dx), self.y.checked_add(dy)) else {
            return false;
        };
        if self.can_be_at(shapes, board, self.rotation, x, y) {
            self.x = x;
            self.y = y;
            return true;
        }
        false
    }

    /// Rotate one step, trying each kick in order. Commits rotation and offset
    /// of the first kick that fits; no change if none does.
    pub fn rotate(
        &mut self,
        shapes: &ShapeCatalog,
        board: &Board,
        dir: RotateDir,
        kicks: &[MinoOffset],
    ) -> bool {
        let target = self.rotation.turn(dir);
        for &(dx, dy) in kicks {
            let (Some(x), Some(y)) = (self.x.checked_add(dx), self.y.checked_add(dy)) else {
                continue;
            };
            if self.can_be_at(shapes, board, target, x, y) {
                self.rotation = target;
                self.x = x;
                self.y = y;
                return true;
            }
        }
        false
    }

    /// Where the piece would rest if dropped straight down now.
    ///
    /// If the piece does not fit at its own position the result is its own
    /// position.
    pub fn shadow_position(&self, shapes: &ShapeCatalog, board: &Board) -> (i8, i8) {
        let mut rest = (self.x, self.y);
        for dx in 0..board.rows() as i8 {
            let Some(x) = self.x.checked_add(dx) else {
                break;
            };
            if !self.can_be_at(shapes, board, self.rotation, x, self.y) {
                break;
            }
            rest = (x, self.y);
        }
        rest
    }

    /// Whether the piece sits on its shadow (touching the stack or floor)
    pub fn is_resting(&self, shapes: &ShapeCatalog, board: &Board) -> bool {
        self.shadow_position(shapes, board) == (self.x, self.y)
    }

    /// Move to the shadow position and write the piece into the board.
    ///
    /// The piece is spent afterwards; the owner replaces it with a new spawn.
    pub fn hard_drop_resolve(&mut self, shapes: &ShapeCatalog, board: &mut Board) {
        let (x, y) = self.shadow_position(shapes, board);
        self.x = x;
        self.y = y;
        for (cx, cy) in self.cells(shapes) {
            board.set(cx, cy, Some(self.kind));
        }
    }

    /// Whether the piece can legally occupy the board where it is.
    /// False right after a spawn means the round is over.
    pub fn is_alive(&self, shapes: &ShapeCatalog, board: &Board) -> bool {
        self.can_be_at(shapes, board, self.rotation, self.x, self.y)
    }

    /// Absolute board cells covered by the piece
    pub fn cells(&self, shapes: &ShapeCatalog) -> [(i8, i8); 4] {
        self.cells_at(shapes, self.x, self.y)
    }

    /// Absolute cells the piece would cover anchored at `(x, y)`
    pub fn cells_at(&self, shapes: &ShapeCatalog, x: i8, y: i8) -> [(i8, i8); 4] {
        let minos = shapes.shape_of(self.kind, self.rotation).minos();
        let mut out = [(0, 0); 4];
        for (slot, &(dx, dy)) in out.iter_mut().zip(minos.iter()) {
            *slot = (x.saturating_add(dx), y.saturating_add(dy));
        }
        out
    }
}
