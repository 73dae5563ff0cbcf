//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data with no dependencies and no allocation, so it
//! builds for bare metal (`no_std`) as well as for the terminal host.
//!
//! # Well Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21), the top [`HIDDEN_ROWS`] are never drawn
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Screen
//!
//! The game draws into an 80x25 character-cell screen (VGA text mode). Each well
//! cell is two screen columns wide; the well's left edge sits at column
//! [`WELL_X`].
//!
//! # Timing
//!
//! There is no fixed timestep. The frame loop measures ticks-per-millisecond from
//! the hardware cycle counter and scales [`GRAVITY_MS`] by it.
//!
//! # Examples
//!
//! ```
//! use metal_tetris_types::{GameAction, PieceKind, Rotation, keys, WELL_HEIGHT, WELL_WIDTH};
//!
//! assert_eq!(PieceKind::from_index(3), PieceKind::O);
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(GameAction::from_scancode(keys::ENTER), Some(GameAction::HardDrop));
//!
//! assert_eq!(WELL_WIDTH, 10);
//! assert_eq!(WELL_HEIGHT, 22);
//! ```

#![cfg_attr(not(test), no_std)]

/// Well width in cells (10 columns)
pub const WELL_WIDTH: u8 = 10;

/// Well height in cells (22 rows)
pub const WELL_HEIGHT: u8 = 22;

/// Rows at the top of the well that are part of the grid but drawn blank.
pub const HIDDEN_ROWS: u8 = 2;

/// Spawn column of a piece's 4x4 bounding box (centered).
pub const SPAWN_X: i8 = (WELL_WIDTH / 2) as i8 - 2;

/// Spawn row of a piece's 4x4 bounding box.
pub const SPAWN_Y: i8 = 0;

/// Text screen width in character cells.
pub const SCREEN_COLS: u8 = 80;

/// Text screen height in character cells.
pub const SCREEN_ROWS: u8 = 25;

/// Screen column of the well's left edge.
pub const WELL_X: u8 = SCREEN_COLS / 2 - WELL_WIDTH;

/// Default gravity interval (one row per second).
pub const GRAVITY_MS: u32 = 1000;

/// Default keyboard poll timeout for the terminal host, in milliseconds.
pub const HOST_POLL_MS: u64 = 1;

/// A well cell: color-id, 0 = empty, 1-7 = locked piece color.
pub type Cell = u8;

/// The empty cell value.
pub const EMPTY: Cell = 0;

/// PC keyboard scancodes (set 1 make codes) the game reacts to.
pub mod keys {
    pub const D: u8 = 0x20;
    pub const R: u8 = 0x13;
    pub const UP: u8 = 0x48;
    pub const DOWN: u8 = 0x50;
    pub const LEFT: u8 = 0x4B;
    pub const RIGHT: u8 = 0x4D;
    pub const ENTER: u8 = 0x1C;
    pub const SPACE: u8 = 0x39;

    /// Set on break (key release) codes.
    pub const RELEASE_BIT: u8 = 0x80;
}

/// The seven tetromino piece kinds, in piece-table order.
///
/// The order matters: the spawn randomizer maps `counter % 7` onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 7;

    /// All kinds in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Map a table index onto a kind. Indices wrap modulo 7.
    ///
    /// # Examples
    ///
    /// ```
    /// use metal_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(0), PieceKind::I);
    /// assert_eq!(PieceKind::from_index(6), PieceKind::Z);
    /// assert_eq!(PieceKind::from_index(7), PieceKind::I);
    /// ```
    pub fn from_index(index: u8) -> Self {
        Self::ALL[index as usize % Self::COUNT]
    }

    /// Index of this kind in the piece table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Rotation states of a piece.
///
/// - **North**: Spawn orientation (index 0)
/// - **East**: index 1
/// - **South**: index 2
/// - **West**: index 3
///
/// Rotation only ever advances: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (index + 1 mod 4)
    ///
    /// # Examples
    ///
    /// ```
    /// use metal_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation index in [0, 4)
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Game actions produced by key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece to the next rotation state
    Rotate,
    /// Drop piece to its ghost row and lock it
    HardDrop,
    /// Show or hide the timing/debug overlay
    ToggleDebug,
    /// Reset the machine (leaves the frame loop)
    Reset,
}

impl GameAction {
    /// Map a scancode onto an action.
    ///
    /// # Examples
    ///
    /// ```
    /// use metal_tetris_types::{keys, GameAction};
    ///
    /// assert_eq!(GameAction::from_scancode(keys::LEFT), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_scancode(keys::UP), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_scancode(keys::SPACE), None);
    /// ```
    pub fn from_scancode(code: u8) -> Option<Self> {
        match code {
            keys::LEFT => Some(GameAction::MoveLeft),
            keys::RIGHT => Some(GameAction::MoveRight),
            keys::DOWN => Some(GameAction::SoftDrop),
            keys::UP => Some(GameAction::Rotate),
            keys::ENTER => Some(GameAction::HardDrop),
            keys::D => Some(GameAction::ToggleDebug),
            keys::R => Some(GameAction::Reset),
            _ => None,
        }
    }
}

/// 16-color text-mode palette.
///
/// Values 0-7 are the base colors, `| 8` selects the bright variant. Well
/// color-ids 1-7 map directly onto the base colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Color {
    #[default]
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    Gray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    Yellow = 14,
    White = 15,
}

impl Color {
    const PALETTE: [Color; 16] = [
        Color::Black,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Brown,
        Color::Gray,
        Color::DarkGray,
        Color::LightBlue,
        Color::LightGreen,
        Color::LightCyan,
        Color::LightRed,
        Color::LightMagenta,
        Color::Yellow,
        Color::White,
    ];

    /// Color for a well cell color-id (low 4 bits).
    pub fn from_id(id: u8) -> Self {
        Self::PALETTE[(id & 0x0F) as usize]
    }

    /// Bright variant of this color.
    pub fn bright(self) -> Self {
        Self::from_id(self as u8 | 0x08)
    }
}
