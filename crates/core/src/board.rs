//! Board module - manages the game grid
//!
//! The board is a `rows x cols` grid where each cell is empty or holds the kind
//! of the piece that locked there. Storage is a flat row-major array.
//!
//! Coordinates: `(x, y)` where `x` is the row (0 at the top, growing down) and
//! `y` is the column (0 at the left). Dimensions never change after construction.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, DEFAULT_COLS, DEFAULT_ROWS};

/// Largest supported board dimension on either axis
pub const MAX_DIM: u8 = 64;

/// Row indices removed by one [`Board::clear_full_rows`] call, in scan order
pub type ClearedRows = ArrayVec<u8, { MAX_DIM as usize }>;

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: u8,
    cols: u8,
    /// Flat array of cells, row-major order (x * cols + y)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// Dimensions are clamped to `1..=MAX_DIM`.
    pub fn new(rows: u8, cols: u8) -> Self {
        let rows = rows.clamp(1, MAX_DIM);
        let cols = cols.clamp(1, MAX_DIM);
        Self {
            rows,
            cols,
            cells: vec![None; rows as usize * cols as usize],
        }
    }

    /// Calculate flat index from `(x, y)` coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some((x as usize) * (self.cols as usize) + (y as usize))
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// `0 <= x < rows` and `0 <= y < cols`
    #[inline]
    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        x >= 0 && y >= 0 && (x as u8) < self.rows && (y as u8) < self.cols
    }

    /// Get cell at `(x, y)`, `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// In bounds and filled
    #[inline]
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// In bounds and empty; the per-cell collision test
    #[inline]
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Set cell at `(x, y)`. Returns false (and writes nothing) if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, x: usize) -> bool {
        self.row(x)
            .map(|row| row.iter().all(|c| c.is_some()))
            .unwrap_or(false)
    }

    /// Borrow one row.
    pub fn row(&self, x: usize) -> Option<&[Cell]> {
        if x >= self.rows as usize {
            return None;
        }
        let width = self.cols as usize;
        Some(&self.cells[x * width..(x + 1) * width])
    }

    /// Remove every full row, letting the rows above fall into place.
    ///
    /// Rows are scanned once from top to bottom. A full row found at `x` is
    /// spliced out and an empty row is pushed in at the top, so rows `0..x`
    /// shift down by one; the scan then continues at `x + 1`. The number of
    /// rows cleared is `.len()` of the result.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let width = self.cols as usize;

        for x in 0..self.rows as usize {
            if !self.is_row_full(x) {
                continue;
            }
            // Shift rows 0..x down by one (copy_within handles the overlap)
            self.cells.copy_within(0..x * width, width);
            self.cells[..width].fill(None);
            cleared.push(x as u8);
        }

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols as usize)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Copy into a row-major matrix.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows_iter().map(|row| row.to_vec()).collect()
    }

    /// Build a board from a row-major matrix. Returns `None` if the rows are
    /// empty, ragged, or larger than [`MAX_DIM`].
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height == 0
            || width == 0
            || height > MAX_DIM as usize
            || width > MAX_DIM as usize
            || rows.iter().any(|r| r.len() != width)
        {
            return None;
        }
        let cells = rows.iter().flatten().copied().collect();
        Some(Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        })
    }

    /// Build a board from text rows: `.` is empty, a piece letter is filled.
    /// Returns `None` on any other glyph, or for shapes `from_rows` rejects.
    pub fn from_ascii(lines: &[&str]) -> Option<Self> {
        let rows = lines
            .iter()
            .map(|line| {
                line.chars()
                    .map(|ch| match ch {
                        '.' => Some(None),
                        other => PieceKind::from_str(&other.to_string()).map(Some),
                    })
                    .collect::<Option<Vec<Cell>>>()
            })
            .collect::<Option<Vec<_>>>()?;
        Self::from_rows(&rows)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::default();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(0, 9), Some(9));
        assert_eq!(board.index(1, 0), Some(10));
        assert_eq!(board.index(19, 9), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(0, 10), None);
        assert_eq!(board.index(20, 0), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::default();

        board.set(0, 0, Some(PieceKind::I));
        board.set(10, 5, Some(PieceKind::T));

        assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(10, 5), Some(Some(PieceKind::T)));

        assert_eq!(board.cells[0], Some(PieceKind::I));
        assert_eq!(board.cells[10 * 10 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_clear_reports_scan_order() {
        let mut board = Board::from_ascii(&[
            "....", //
            "IIII", //
            "..T.", //
            "OOOO", //
        ])
        .unwrap();

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[1, 3]);
        assert_eq!(
            board,
            Board::from_ascii(&["....", "....", "....", "..T."]).unwrap()
        );
    }

    #[test]
    fn test_clear_adjacent_full_rows() {
        let mut board = Board::from_ascii(&["J...", "LLLL", "SSSS", ".Z.."]).unwrap();

        assert_eq!(board.clear_full_rows().len(), 2);
        assert_eq!(
            board,
            Board::from_ascii(&["....", "....", "J...", ".Z.."]).unwrap()
        );
    }

    #[test]
    fn test_from_ascii_rejects_unknown_glyphs() {
        assert!(Board::from_ascii(&["..#.", "...."]).is_none());
        assert!(Board::from_ascii(&["..x.", "...."]).is_none());
        assert!(Board::from_ascii(&["..t.", "...."]).is_some());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Board::from_rows(&[vec![None; 3], vec![None; 2]]).is_none());
        assert!(Board::from_rows(&[]).is_none());
    }

    #[test]
    fn test_rows_roundtrip() {
        let mut rows = vec![vec![None; 10]; 20];
        rows[5][3] = Some(PieceKind::O);
        rows[19][7] = Some(PieceKind::L);

        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.to_rows(), rows);
    }
}
