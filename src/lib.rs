//! Metal Tetris (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/`; this package
//! re-exports them as `metal_tetris::{types,hal,core,engine,input,term}` and
//! carries the command line of the terminal binary.

pub mod cli;

pub use metal_tetris_core as core;
pub use metal_tetris_engine as engine;
pub use metal_tetris_hal as hal;
pub use metal_tetris_input as input;
pub use metal_tetris_term as term;
pub use metal_tetris_types as types;
