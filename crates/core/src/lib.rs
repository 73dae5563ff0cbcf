//! Core game logic - deterministic, allocation-free, `no_std`
//!
//! This crate holds the game rules and the timebase. It never touches hardware:
//! clocks come in through the `metal_tetris_hal` traits, and the random piece
//! pick comes in through [`PieceSource`].
//!
//! # Module Structure
//!
//! - [`pieces`]: the constant 7x4 table of 4x4 piece atlases
//! - [`well`]: 10x22 grid of locked cells, full-row clearing
//! - [`game_state`]: active piece, collision, movement, gravity, locking, ghost
//! - [`rng`]: piece sources (cycle counter, fixed, scripted)
//! - [`snapshot`]: read-only copies for rendering
//! - [`timing`]: RTC-calibrated ticks per millisecond, named timers
//!
//! # Game Rules
//!
//! - **Spawn**: random kind (`cycle counter % 7`), rotation 0, box at (3, 0)
//! - **Rotation**: one direction, no wall kicks
//! - **Gravity**: one row per interval; a piece that cannot fall locks at once
//! - **Hard drop**: jump to the ghost row and lock
//! - **Line clear**: full rows vanish, everything above drops one row
//! - **No game over**: a blocked spawn locks over whatever is there
//!
//! # Example
//!
//! ```
//! use metal_tetris_core::{FixedPiece, GameState};
//! use metal_tetris_core::types::PieceKind;
//!
//! let mut game = GameState::new(&mut FixedPiece(PieceKind::O));
//! assert!(game.try_move(1, 0));
//! game.hard_drop(&mut FixedPiece(PieceKind::T));
//!
//! assert_eq!(game.well().filled_count(), 4);
//! assert_eq!(game.active().kind, PieceKind::T);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;
pub mod timing;
pub mod well;

pub use metal_tetris_hal as hal;
pub use metal_tetris_types as types;

// Re-export commonly used types for convenience
pub use game_state::{ActivePiece, GameState};
pub use pieces::{atlas, get_shape, minos};
pub use rng::{CycleRandom, FixedPiece, PieceSource, ScriptedPieces};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use timing::{stable_seconds, TickCalibrator, TimerId, TimerRegistry};
pub use well::{ClearedRows, Well};
