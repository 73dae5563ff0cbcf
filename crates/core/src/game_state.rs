//! Game state module - the well, the active piece and every rule that moves them
//!
//! All operations are total: positions outside the well simply collide, there
//! are no error values. Rules worth knowing:
//!
//! - Spawning never checks for room. A piece spawned into occupied cells locks
//!   over them on the next gravity step; there is no game over.
//! - Rotation has no wall kicks.
//! - Gravity (`update`) moves down one row, or locks + spawns when it cannot,
//!   and then always clears full rows.
//! - Hard drop jumps to the ghost row and runs gravity, which locks at once.

use log::{debug, trace, warn};

use crate::pieces::{get_shape, minos, PieceShape};
use crate::rng::PieceSource;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;
use crate::well::{ClearedRows, Well};

/// The piece under player control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Landing row if hard-dropped now; kept current by [`GameState`].
    pub ghost_y: i8,
}

impl ActivePiece {
    /// A new piece at the spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
            ghost_y: SPAWN_Y,
        }
    }

    /// Mino offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    well: Well,
    active: ActivePiece,
}

impl GameState {
    /// Empty well with a freshly spawned piece
    pub fn new(source: &mut impl PieceSource) -> Self {
        Self::with_well(Well::new(), source)
    }

    /// Start from a prepared well (fixtures, benchmarks)
    pub fn with_well(well: Well, source: &mut impl PieceSource) -> Self {
        let mut state = Self {
            well,
            active: ActivePiece::new(PieceKind::I),
        };
        state.spawn(source);
        state
    }

    pub fn well(&self) -> &Well {
        &self.well
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    /// True if any occupied atlas cell of (kind, rotation) at (x, y) falls
    /// outside the well or on a filled cell.
    pub fn collide(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
        minos(kind, rotation).any(|(dx, dy, _)| {
            // i8 overflow here means far out of bounds anyway
            match (x.checked_add(dx), y.checked_add(dy)) {
                (Some(px), Some(py)) => self.well.is_blocked(px, py),
                _ => true,
            }
        })
    }

    /// Replace the active piece with a new one at the spawn position.
    pub fn spawn(&mut self, source: &mut impl PieceSource) {
        let kind = source.next_piece();
        self.active = ActivePiece::new(kind);
        if self.collide(kind, Rotation::North, SPAWN_X, SPAWN_Y) {
            warn!("spawned {} into occupied cells", kind.as_str());
        } else {
            trace!("spawned {}", kind.as_str());
        }
        self.refresh_ghost();
    }

    /// Landing row of the active piece: one above the first colliding row
    /// below it, or the bottom row if nothing collides. Never above the piece.
    pub fn ghost(&self) -> i8 {
        let a = &self.active;
        let mut y = a.y;
        while y < WELL_HEIGHT as i8 {
            if self.collide(a.kind, a.rotation, a.x, y) {
                return (y - 1).max(a.y);
            }
            y += 1;
        }
        WELL_HEIGHT as i8 - 1
    }

    fn refresh_ghost(&mut self) {
        self.active.ghost_y = self.ghost();
    }

    /// Move by (dx, dy) if the destination is free.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let a = self.active;
        let (Some(x), Some(y)) = (a.x.checked_add(dx), a.y.checked_add(dy)) else {
            return false;
        };
        if self.collide(a.kind, a.rotation, x, y) {
            return false;
        }
        self.active.x = x;
        self.active.y = y;
        self.refresh_ghost();
        true
    }

    /// Advance to the next rotation state in place, if it fits.
    pub fn try_rotate(&mut self) -> bool {
        let a = self.active;
        let rotation = a.rotation.rotate_cw();
        if self.collide(a.kind, rotation, a.x, a.y) {
            return false;
        }
        self.active.rotation = rotation;
        self.refresh_ghost();
        true
    }

    /// Write the active piece's cells into the well.
    ///
    /// Cells outside the well (possible only after a blocked spawn) are
    /// skipped.
    pub fn lock(&mut self) {
        let a = self.active;
        for (dx, dy, color) in minos(a.kind, a.rotation) {
            if let (Some(x), Some(y)) = (a.x.checked_add(dx), a.y.checked_add(dy)) {
                self.well.set(x, y, color);
            }
        }
        debug!(
            "locked {} at ({}, {}) rotation {}",
            a.kind.as_str(),
            a.x,
            a.y,
            a.rotation.index()
        );
    }

    /// Remove full rows; returns their indices.
    pub fn clear_lines(&mut self) -> ClearedRows {
        let cleared = self.well.clear_full_rows();
        if !cleared.is_empty() {
            debug!("cleared rows {:?}", cleared.as_slice());
            self.refresh_ghost();
        }
        cleared
    }

    /// Gravity step: fall one row, or lock and spawn; then clear full rows.
    ///
    /// Returns the cleared row indices.
    pub fn update(&mut self, source: &mut impl PieceSource) -> ClearedRows {
        if !self.try_move(0, 1) {
            self.lock();
            self.spawn(source);
        }
        self.clear_lines()
    }

    /// Jump to the ghost row and run gravity, which locks the piece.
    pub fn hard_drop(&mut self, source: &mut impl PieceSource) -> ClearedRows {
        self.active.y = self.active.ghost_y;
        self.update(source)
    }

    /// Read-only copy for rendering
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill an existing snapshot without building a new one
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.well.iter_mut().zip(self.well.rows()) {
            dst.copy_from_slice(src);
        }
        out.active = ActiveSnapshot::from(self.active);
        out.ghost_y = self.active.ghost_y;
    }
}
