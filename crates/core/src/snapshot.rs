//! Snapshot module - plain round state handed to renderers

use crate::piece::ActivePiece;
use crate::types::{Cell, PieceKind, RoundPhase, Rotation, DEFAULT_COLS, DEFAULT_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub rows: u8,
    pub cols: u8,
    /// Row-major locked cells
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    /// Absolute cells of the active piece
    pub active_cells: [(i8, i8); 4],
    /// Resting anchor if hard-dropped now
    pub shadow: (i8, i8),
    pub shadow_cells: [(i8, i8); 4],
    pub held: Option<PieceKind>,
    pub hold_used: bool,
    pub upcoming: Vec<PieceKind>,
    pub score: u32,
    pub lines: u32,
    pub ren: u32,
    pub message: Option<String>,
    pub phase: RoundPhase,
    pub frames: u64,
}

impl RoundSnapshot {
    pub fn clear(&mut self) {
        self.rows = DEFAULT_ROWS;
        self.cols = DEFAULT_COLS;
        self.board.clear();
        self.board
            .resize(DEFAULT_ROWS as usize * DEFAULT_COLS as usize, None);
        self.active = None;
        self.active_cells = [(0, 0); 4];
        self.shadow = (0, 0);
        self.shadow_cells = [(0, 0); 4];
        self.held = None;
        self.hold_used = false;
        self.upcoming.clear();
        self.score = 0;
        self.lines = 0;
        self.ren = 0;
        self.message = None;
        self.phase = RoundPhase::Running;
        self.frames = 0;
    }

    /// Locked cell at `(x, y)`; out of bounds reads as empty.
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        if x < 0 || y < 0 || x as u8 >= self.rows || y as u8 >= self.cols {
            return None;
        }
        self.board[x as usize * self.cols as usize + y as usize]
    }
}

impl Default for RoundSnapshot {
    fn default() -> Self {
        let mut s = Self {
            rows: 0,
            cols: 0,
            board: Vec::new(),
            active: None,
            active_cells: [(0, 0); 4],
            shadow: (0, 0),
            shadow_cells: [(0, 0); 4],
            held: None,
            hold_used: false,
            upcoming: Vec::new(),
            score: 0,
            lines: 0,
            ren: 0,
            message: None,
            phase: RoundPhase::Running,
            frames: 0,
        };
        s.clear();
        s
    }
}
