//! Terminal host for the game.
//!
//! On a PC the game writes straight into text-mode video memory and reads the
//! keyboard controller. This crate provides the same surface on a terminal:
//! a framebuffer of text-mode cells, a diff renderer that flushes it through
//! crossterm, and [`HostMachine`], which implements the `metal_tetris_hal`
//! traits on top of both.
//!
//! Goals:
//! - Keep the frame loop identical to bare metal
//! - Only write changed cells to the terminal
//! - Always leave the terminal usable, whatever the loop did

pub mod fb;
pub mod host;
pub mod renderer;

pub use metal_tetris_hal as hal;
pub use metal_tetris_input as input;
pub use metal_tetris_types as types;

pub use fb::FrameBuffer;
pub use host::{HostConfig, HostMachine};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
