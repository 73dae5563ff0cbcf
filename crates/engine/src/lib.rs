//! Frame loop and screen layout, `no_std`.
//!
//! [`Game`] ties the core rules to a [`hal::Machine`]: it owns the game state,
//! the tick calibrator and the timer registry, and draws through
//! [`hal::VideoCells`]. The same loop runs on bare metal
//! (`hal::pc::PcMachine`), in the terminal host and against `SimMachine` in
//! tests.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod frame;
pub mod view;

pub use metal_tetris_core as core;
pub use metal_tetris_hal as hal;
pub use metal_tetris_types as types;

pub use config::FrameConfig;
pub use frame::{Flow, Game};
pub use view::{draw_debug, draw_playfield, DebugInfo};
