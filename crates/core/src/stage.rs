//! Stage module - manages the game grid
//!
//! The stage is a 12x20 grid of `(kind, status)` cells stored as a flat array.
//! Coordinates: (x, y) where x ranges 0..11 (left to right), y ranges 0..19 (top to bottom).
//!
//! Merged cells are permanent until swept. Clear cells belong to the falling piece and
//! are rebuilt from scratch on every [`Stage::redraw`].

use arrayvec::ArrayVec;

use crate::player::Player;
use crate::types::{Cell, STAGE_HEIGHT, STAGE_WIDTH};

/// Total number of cells on the stage
const STAGE_SIZE: usize = (STAGE_WIDTH as usize) * (STAGE_HEIGHT as usize);

/// Row indices removed by one sweep (top to bottom)
pub type ClearedRows = ArrayVec<usize, { STAGE_HEIGHT as usize }>;

/// The game stage - 12 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; STAGE_SIZE],
}

impl Stage {
    /// Create a new all-`(EMPTY, CLEAR)` stage
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; STAGE_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= STAGE_WIDTH as i8 || y < 0 || y >= STAGE_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (STAGE_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        STAGE_WIDTH
    }

    pub fn height(&self) -> u8 {
        STAGE_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is inside the stage and holds a merged cell
    pub fn is_merged(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if cell.is_merged())
    }

    /// A row is full when none of its cells is EMPTY
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| !cell.is_empty()))
    }

    /// One row of cells, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= STAGE_HEIGHT as usize {
            return None;
        }
        let width = STAGE_WIDTH as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(STAGE_WIDTH as usize)
    }

    /// Rebuild the transient overlay for `player`
    ///
    /// 1. Every CLEAR cell is wiped back to `(EMPTY, CLEAR)`; MERGED cells stay.
    /// 2. Each occupied cell of the player's matrix is written as `(kind, CLEAR)`,
    ///    or `(kind, MERGED)` when the player has collided.
    ///
    /// Writes outside the grid are dropped. Merged cells are never overwritten.
    pub fn redraw(&mut self, player: &Player) {
        for cell in &mut self.cells {
            if !cell.is_merged() {
                *cell = Cell::EMPTY;
            }
        }

        for (px, py, kind) in player.shape.occupied() {
            let x = player.x + px;
            let y = player.y + py;

            let Some(idx) = Self::index(x, y) else {
                eprintln!("[Stage] dropped out-of-bounds piece cell at ({}, {})", x, y);
                continue;
            };

            if self.cells[idx].is_merged() {
                // Only reachable for a freshly spawned piece on a topped-out stage.
                continue;
            }

            self.cells[idx] = if player.collided {
                Cell::merged(kind)
            } else {
                Cell::clear(kind)
            };
        }
    }

    /// Pure form of [`Stage::redraw`]
    pub fn redrawn(&self, player: &Player) -> Stage {
        let mut next = self.clone();
        next.redraw(player);
        next
    }

    /// Remove all full rows, inserting one empty row at the top for each.
    ///
    /// Remaining rows keep their relative order. Returns the removed row indices
    /// (top to bottom, in pre-sweep coordinates).
    /// Uses a two-pointer compaction with zero allocation.
    pub fn sweep(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = STAGE_WIDTH as usize;
        let mut write_y = STAGE_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..STAGE_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Fresh empty rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = Cell::EMPTY;
        }

        cleared_rows.reverse();
        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a 2D array (for snapshots)
    pub fn write_grid(&self, out: &mut [[Cell; STAGE_WIDTH as usize]; STAGE_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Reset to all-empty
    pub fn clear(&mut self) {
        self.cells = [Cell::EMPTY; STAGE_SIZE];
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}
