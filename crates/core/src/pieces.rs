//! Pieces module - Tetromino catalog and matrix rotation
//!
//! Every tetromino is a small square matrix whose entries are either empty or the
//! piece's own kind. Rotation is a transpose followed by a row reversal (clockwise)
//! or a reversal of row order (counter-clockwise), so orientation is carried by the
//! matrix itself rather than by a rotation state.

use crate::types::PieceKind;

/// Largest matrix side (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

type Mask = [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];

const I_MASK: Mask = [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]];
const J_MASK: Mask = [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]];
const L_MASK: Mask = [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]];
const O_MASK: Mask = [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
const S_MASK: Mask = [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
const T_MASK: Mask = [[1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
const Z_MASK: Mask = [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]];

/// A tetromino matrix
///
/// Only the top-left `size x size` block is meaningful. Entries outside it are
/// always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[Option<PieceKind>; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Pre-game placeholder: a single empty cell
    pub const EMPTY: Shape = Shape {
        size: 1,
        cells: [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    };

    /// Catalog lookup for a piece kind (spawn orientation)
    pub fn of(kind: PieceKind) -> Self {
        let (size, mask) = match kind {
            PieceKind::I => (4, &I_MASK),
            PieceKind::J => (3, &J_MASK),
            PieceKind::L => (3, &L_MASK),
            PieceKind::O => (2, &O_MASK),
            PieceKind::S => (3, &S_MASK),
            PieceKind::T => (3, &T_MASK),
            PieceKind::Z => (3, &Z_MASK),
        };

        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in mask.iter().enumerate() {
            for (x, &bit) in row.iter().enumerate() {
                if bit != 0 {
                    cells[y][x] = Some(kind);
                }
            }
        }

        Self { size, cells }
    }

    /// Side length of the matrix (also its column count)
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Entry at matrix column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<PieceKind> {
        if x >= self.size() || y >= self.size() {
            return None;
        }
        self.cells[y][x]
    }

    /// Kind of the piece this matrix draws, `None` for the placeholder
    pub fn kind(&self) -> Option<PieceKind> {
        self.occupied().next().map(|(_, _, kind)| kind)
    }

    /// Occupied entries as `(x, y, kind)` in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8, PieceKind)> + '_ {
        let size = self.size();
        self.cells[..size].iter().enumerate().flat_map(move |(y, row)| {
            row[..size]
                .iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.map(|kind| (x as i8, y as i8, kind)))
        })
    }

    /// Rotated copy of the matrix
    ///
    /// Transpose, then reverse each row (clockwise) or reverse row order
    /// (counter-clockwise).
    pub fn rotated(&self, clockwise: bool) -> Self {
        let n = self.size();
        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];

        for (y, row) in cells[..n].iter_mut().enumerate() {
            for (x, cell) in row[..n].iter_mut().enumerate() {
                // transposed[r][c] = self[c][r]
                let (r, c) = if clockwise { (y, n - 1 - x) } else { (n - 1 - y, x) };
                *cell = self.cells[c][r];
            }
        }

        Self {
            size: self.size,
            cells,
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::EMPTY
    }
}
