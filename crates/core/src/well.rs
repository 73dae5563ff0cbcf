//! Well module - the grid of locked cells
//!
//! The well is a 10x22 grid of color-ids (0 = empty), stored as a flat
//! row-major array. Coordinates: (x, y) where x ranges 0..9 (left to right) and
//! y ranges 0..21 (top to bottom).
//!
//! Inside a running game the well is owned by [`crate::GameState`], which only
//! writes to it by locking pieces and clearing lines.

use arrayvec::ArrayVec;

use crate::types::{Cell, EMPTY, WELL_HEIGHT, WELL_WIDTH};

/// Total number of cells in the well
const WELL_SIZE: usize = WELL_WIDTH as usize * WELL_HEIGHT as usize;

/// Row indices removed by one [`Well::clear_full_rows`] pass, top to bottom.
pub type ClearedRows = ArrayVec<u8, { WELL_HEIGHT as usize }>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Well {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; WELL_SIZE],
}

impl Well {
    /// Create a new empty well
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; WELL_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= WELL_WIDTH as i8 || y < 0 || y >= WELL_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (WELL_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        WELL_WIDTH
    }

    pub fn height(&self) -> u8 {
        WELL_HEIGHT
    }

    /// Cell at (x, y), `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_vacant(&self, x: i8, y: i8) -> bool {
        self.get(x, y) == Some(EMPTY)
    }

    /// Out of bounds or already filled
    pub fn is_blocked(&self, x: i8, y: i8) -> bool {
        !self.is_vacant(x, y)
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * WELL_WIDTH as usize;
        &self.cells[start..start + WELL_WIDTH as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= WELL_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// Check if a row has no filled cells
    pub fn is_row_empty(&self, y: usize) -> bool {
        if y >= WELL_HEIGHT as usize {
            return true;
        }
        self.row(y).iter().all(|&cell| cell == EMPTY)
    }

    /// Remove row `y`: every row above moves down by one and the top row is
    /// emptied.
    fn remove_row(&mut self, y: usize) {
        let width = WELL_WIDTH as usize;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(EMPTY);
    }

    /// Remove every full row in a single top-to-bottom pass.
    ///
    /// When row `y` is removed, row `y` receives the old row `y - 1`, which the
    /// scan has already examined, and rows below `y` are untouched. So one pass
    /// finds every full row, adjacent ones included.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for y in 0..WELL_HEIGHT as usize {
            if self.is_row_full(y) {
                self.remove_row(y);
                cleared.push(y as u8);
            }
        }
        cleared
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows as slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WELL_WIDTH as usize)
    }
}

impl Default for Well {
    fn default() -> Self {
        Self::new()
    }
}
