//! Shape catalog - tetromino masks per kind and rotation
//!
//! Every kind has four 4x4 masks, one per rotation state. A mask row is read
//! along the column axis, so `mask[dx][dy]` is the cell at row offset `dx`
//! and column offset `dy` from the piece anchor.
//!
//! The catalog is an explicit value. The built-in table is parsed and
//! validated once when [`ShapeCatalog::standard`] runs.

use std::fmt;

use crate::types::{PieceKind, Rotation, MASK_SIZE};

/// Offset of a single mino relative to the piece anchor `(row, column)`
pub type MinoOffset = (i8, i8);

/// Text form of one mask: four rows, `*` filled and `-` empty.
pub type MaskArt = [&'static str; MASK_SIZE];

/// A 4x4 cell mask holding exactly four filled cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    mask: [[bool; MASK_SIZE]; MASK_SIZE],
    minos: [MinoOffset; 4],
}

impl Shape {
    /// Build a shape from a boolean mask.
    pub fn from_mask(mask: [[bool; MASK_SIZE]; MASK_SIZE]) -> Result<Self, CatalogError> {
        let mut minos = [(0, 0); 4];
        let mut count = 0usize;
        for (dx, row) in mask.iter().enumerate() {
            for (dy, &filled) in row.iter().enumerate() {
                if filled {
                    if count < 4 {
                        minos[count] = (dx as i8, dy as i8);
                    }
                    count += 1;
                }
            }
        }
        if count != 4 {
            return Err(CatalogError::CellCount { count });
        }
        Ok(Self { mask, minos })
    }

    /// Parse a shape from its text form.
    pub fn from_art(art: &MaskArt) -> Result<Self, CatalogError> {
        let mut mask = [[false; MASK_SIZE]; MASK_SIZE];
        for (dx, line) in art.iter().enumerate() {
            if line.chars().count() != MASK_SIZE {
                return Err(CatalogError::RowWidth {
                    row: dx,
                    width: line.chars().count(),
                });
            }
            for (dy, ch) in line.chars().enumerate() {
                mask[dx][dy] = match ch {
                    '*' => true,
                    '-' => false,
                    other => return Err(CatalogError::BadGlyph { glyph: other }),
                };
            }
        }
        Self::from_mask(mask)
    }

    /// The raw 4x4 mask.
    pub fn mask(&self) -> &[[bool; MASK_SIZE]; MASK_SIZE] {
        &self.mask
    }

    pub fn is_filled(&self, dx: usize, dy: usize) -> bool {
        dx < MASK_SIZE && dy < MASK_SIZE && self.mask[dx][dy]
    }

    /// Offsets of the four filled cells, in row-major order.
    pub fn minos(&self) -> &[MinoOffset; 4] {
        &self.minos
    }

    pub fn cell_count(&self) -> usize {
        self.mask.iter().flatten().filter(|&&c| c).count()
    }
}

/// Malformed shape data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A mask does not hold exactly four cells.
    CellCount { count: usize },
    /// A text row is not four glyphs wide.
    RowWidth { row: usize, width: usize },
    /// A text row holds something other than `*` or `-`.
    BadGlyph { glyph: char },
    /// Wraps another error with the kind/rotation it was found in.
    At {
        kind: PieceKind,
        rotation: Rotation,
        source: Box<CatalogError>,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::CellCount { count } => {
                write!(f, "mask has {count} filled cells, expected 4")
            }
            CatalogError::RowWidth { row, width } => {
                write!(f, "mask row {row} is {width} wide, expected {MASK_SIZE}")
            }
            CatalogError::BadGlyph { glyph } => write!(f, "unexpected mask glyph {glyph:?}"),
            CatalogError::At {
                kind,
                rotation,
                source,
            } => write!(
                f,
                "shape {} rotation {}: {source}",
                kind.as_str(),
                rotation.index()
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Lookup of every mask, indexed by kind then rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeCatalog {
    shapes: [[Shape; 4]; 7],
}

impl ShapeCatalog {
    /// The built-in catalog.
    ///
    /// # Panics
    ///
    /// Panics if the built-in table is malformed. The table is static, so this
    /// can only fire on the first construction after a bad edit.
    pub fn standard() -> Self {
        match Self::from_art(&STANDARD_ART) {
            Ok(catalog) => catalog,
            Err(e) => panic!("built-in shape catalog is malformed: {e}"),
        }
    }

    /// Build a catalog from text masks laid out in [`PieceKind::ALL`] order.
    pub fn from_art(art: &[[MaskArt; 4]; 7]) -> Result<Self, CatalogError> {
        let mut shapes = [[Shape {
            mask: [[false; MASK_SIZE]; MASK_SIZE],
            minos: [(0, 0); 4],
        }; 4]; 7];

        for kind in PieceKind::ALL {
            for rotation in Rotation::ALL {
                let shape = Shape::from_art(&art[kind.index()][rotation.index()]).map_err(
                    |source| CatalogError::At {
                        kind,
                        rotation,
                        source: Box::new(source),
                    },
                )?;
                shapes[kind.index()][rotation.index()] = shape;
            }
        }

        Ok(Self { shapes })
    }

    /// Mask for a kind in a rotation state.
    #[inline]
    pub fn shape_of(&self, kind: PieceKind, rotation: Rotation) -> &Shape {
        &self.shapes[kind.index()][rotation.index()]
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Built-in masks. Rows run down the board, columns run right.
/// The four O masks are identical: it has one true rotational state.
const STANDARD_ART: [[MaskArt; 4]; 7] = [
    // I
    [
        ["----", "****", "----", "----"],
        ["--*-", "--*-", "--*-", "--*-"],
        ["----", "----", "****", "----"],
        ["-*--", "-*--", "-*--", "-*--"],
    ],
    // J
    [
        ["----", "*---", "***-", "----"],
        ["----", "-**-", "-*--", "-*--"],
        ["----", "----", "***-", "--*-"],
        ["----", "-*--", "-*--", "**--"],
    ],
    // L
    [
        ["----", "--*-", "***-", "----"],
        ["----", "-*--", "-*--", "-**-"],
        ["----", "----", "***-", "*---"],
        ["----", "**--", "-*--", "-*--"],
    ],
    // O
    [
        ["----", "-**-", "-**-", "----"],
        ["----", "-**-", "-**-", "----"],
        ["----", "-**-", "-**-", "----"],
        ["----", "-**-", "-**-", "----"],
    ],
    // S
    [
        ["----", "-**-", "**--", "----"],
        ["----", "-*--", "-**-", "--*-"],
        ["----", "----", "-**-", "**--"],
        ["----", "*---", "**--", "-*--"],
    ],
    // T
    [
        ["----", "-*--", "***-", "----"],
        ["----", "-*--", "-**-", "-*--"],
        ["----", "----", "***-", "-*--"],
        ["----", "-*--", "**--", "-*--"],
    ],
    // Z
    [
        ["----", "**--", "-**-", "----"],
        ["----", "--*-", "-**-", "-*--"],
        ["----", "----", "**--", "-**-"],
        ["----", "-*--", "**--", "*---"],
    ],
];
