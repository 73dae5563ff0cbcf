use crate::game_state::ActivePiece;
use crate::types::{Cell, PieceKind, Rotation, EMPTY, WELL_HEIGHT, WELL_WIDTH};

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

/// Everything a renderer needs, by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub well: [[Cell; WELL_WIDTH as usize]; WELL_HEIGHT as usize],
    pub active: ActiveSnapshot,
    pub ghost_y: i8,
}

impl GameSnapshot {
    /// Number of rows holding at least one filled cell
    pub fn occupied_rows(&self) -> usize {
        self.well
            .iter()
            .filter(|row| row.iter().any(|&c| c != EMPTY))
            .count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            well: [[EMPTY; WELL_WIDTH as usize]; WELL_HEIGHT as usize],
            active: ActiveSnapshot {
                kind: PieceKind::I,
                rotation: Rotation::North,
                x: 0,
                y: 0,
            },
            ghost_y: 0,
        }
    }
}
