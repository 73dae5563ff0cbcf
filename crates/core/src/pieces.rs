//! Pieces module - the constant piece table
//!
//! Every piece kind has four rotation states, each a 4x4 grid of color-ids
//! (0 = empty). The table is indexed `[kind][rotation][row][col]` and is never
//! mutated. There are no wall kicks: rotation either fits in place or fails.

use crate::types::{Cell, PieceKind, Rotation, EMPTY};

/// One rotation state of one piece: 4 rows of 4 color-ids.
pub type Atlas = [[Cell; 4]; 4];

/// Offset of a single mino relative to the piece's bounding box
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the bounding box origin
pub type PieceShape = [MinoOffset; 4];

/// The piece table, in [`PieceKind`] order (I, J, L, O, S, T, Z).
pub const PIECES: [[Atlas; 4]; 7] = [
    // I
    [
        [[0, 0, 0, 0], [4, 4, 4, 4], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 4, 0, 0], [0, 4, 0, 0], [0, 4, 0, 0], [0, 4, 0, 0]],
        [[0, 0, 0, 0], [4, 4, 4, 4], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 4, 0, 0], [0, 4, 0, 0], [0, 4, 0, 0], [0, 4, 0, 0]],
    ],
    // J
    [
        [[0, 0, 0, 0], [7, 7, 7, 0], [0, 0, 7, 0], [0, 0, 0, 0]],
        [[0, 7, 0, 0], [0, 7, 0, 0], [7, 7, 0, 0], [0, 0, 0, 0]],
        [[7, 0, 0, 0], [7, 7, 7, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 7, 7, 0], [0, 7, 0, 0], [0, 7, 0, 0], [0, 0, 0, 0]],
    ],
    // L
    [
        [[0, 0, 0, 0], [5, 5, 5, 0], [5, 0, 0, 0], [0, 0, 0, 0]],
        [[5, 5, 0, 0], [0, 5, 0, 0], [0, 5, 0, 0], [0, 0, 0, 0]],
        [[0, 0, 5, 0], [5, 5, 5, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 5, 0, 0], [0, 5, 0, 0], [0, 5, 5, 0], [0, 0, 0, 0]],
    ],
    // O
    [
        [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    ],
    // S
    [
        [[0, 0, 0, 0], [0, 2, 2, 0], [2, 2, 0, 0], [0, 0, 0, 0]],
        [[0, 2, 0, 0], [0, 2, 2, 0], [0, 0, 2, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [0, 2, 2, 0], [2, 2, 0, 0], [0, 0, 0, 0]],
        [[0, 2, 0, 0], [0, 2, 2, 0], [0, 0, 2, 0], [0, 0, 0, 0]],
    ],
    // T
    [
        [[0, 0, 0, 0], [6, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
        [[0, 6, 0, 0], [6, 6, 0, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
        [[0, 6, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 6, 0, 0], [0, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
    ],
    // Z
    [
        [[0, 0, 0, 0], [3, 3, 0, 0], [0, 3, 3, 0], [0, 0, 0, 0]],
        [[0, 0, 3, 0], [0, 3, 3, 0], [0, 3, 0, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [3, 3, 0, 0], [0, 3, 3, 0], [0, 0, 0, 0]],
        [[0, 0, 3, 0], [0, 3, 3, 0], [0, 3, 0, 0], [0, 0, 0, 0]],
    ],
];

/// The 4x4 atlas for a piece kind and rotation
#[inline]
pub fn atlas(kind: PieceKind, rotation: Rotation) -> &'static Atlas {
    &PIECES[kind.index()][rotation.index()]
}

/// Color-id every occupied cell of `kind` carries.
pub fn color_id(kind: PieceKind) -> Cell {
    atlas(kind, Rotation::North)
        .iter()
        .flatten()
        .copied()
        .find(|&c| c != EMPTY)
        .unwrap_or(EMPTY)
}

/// Occupied cells of an atlas as `(dx, dy, color)`, row-major.
pub fn minos(kind: PieceKind, rotation: Rotation) -> impl Iterator<Item = (i8, i8, Cell)> {
    atlas(kind, rotation)
        .iter()
        .enumerate()
        .flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, c)| **c != EMPTY)
                .map(move |(dx, &c)| (dx as i8, dy as i8, c))
        })
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let mut shape = [(0, 0); 4];
    for (slot, (dx, dy, _)) in shape.iter_mut().zip(minos(kind, rotation)) {
        *slot = (dx, dy);
    }
    shape
}
