//! Terminal input module (host-facing).
//!
//! Translates `crossterm` key events into the PC keyboard make codes the
//! frame loop understands, so the hosted game goes through the same
//! [`crate::types::GameAction::from_scancode`] mapping as bare metal.

pub mod map;

pub use metal_tetris_types as types;

pub use map::{scancode_for, should_quit};
