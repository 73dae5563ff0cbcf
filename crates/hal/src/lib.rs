//! Hardware capability interface.
//!
//! The game never touches hardware directly. Everything it needs from the
//! machine goes through the small traits in this crate:
//!
//! - [`CycleCounter`]: monotonic cycle counter (the timebase)
//! - [`RealTimeClock`]: seconds register plus its update-in-progress flag
//! - [`Keyboard`]: one scancode per newly pressed key
//! - [`VideoCells`]: 80x25 character-cell writer
//! - [`SystemReset`]: full machine reset, never returns
//!
//! Implementations:
//!
//! - [`pc::PcMachine`] (feature `bare-metal`): port I/O on PC hardware
//! - [`sim::SimMachine`]: deterministic fake with a scripted clock and keys
//! - `metal_tetris_term::HostMachine`: terminal host built on crossterm

#![cfg_attr(not(test), no_std)]

pub mod latch;
#[cfg(all(feature = "bare-metal", any(target_arch = "x86", target_arch = "x86_64")))]
pub mod pc;
pub mod sim;

pub use metal_tetris_types as types;

pub use latch::ScancodeLatch;
pub use sim::SimMachine;

use types::{Color, SCREEN_COLS, SCREEN_ROWS};

/// Monotonic, non-decreasing cycle counter.
pub trait CycleCounter {
    fn cycles(&mut self) -> u64;
}

/// Real-time clock seconds register.
///
/// The register is not latched: a read that overlaps an update may be torn.
/// Callers debounce (see `metal_tetris_core::timing::stable_seconds`).
pub trait RealTimeClock {
    /// True while the clock is updating its registers.
    fn update_in_progress(&mut self) -> bool;

    /// Raw seconds register (BCD or binary, never decoded).
    fn raw_seconds(&mut self) -> u8;
}

/// Edge-triggered key source.
pub trait Keyboard {
    /// Scancode of a key pressed since the last poll, if any.
    ///
    /// No repeats and no key-up events.
    fn poll_key(&mut self) -> Option<u8>;
}

/// A single character cell on the text screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VgaCell {
    pub glyph: u8,
    pub fg: Color,
    pub bg: Color,
}

impl VgaCell {
    pub const fn new(glyph: u8, fg: Color, bg: Color) -> Self {
        Self { glyph, fg, bg }
    }

    /// Text-mode attribute byte (`bg << 4 | fg`).
    pub fn attribute(&self) -> u8 {
        ((self.bg as u8) << 4) | (self.fg as u8)
    }
}

/// Character-cell video output.
pub trait VideoCells {
    /// Write one cell. Writes outside the 80x25 screen are ignored.
    fn put_cell(&mut self, x: u8, y: u8, cell: VgaCell);

    /// Write a string left to right, one cell per byte.
    fn put_str(&mut self, x: u8, y: u8, fg: Color, bg: Color, s: &str) {
        for (i, b) in s.bytes().enumerate() {
            let cx = x as usize + i;
            if cx >= SCREEN_COLS as usize {
                break;
            }
            self.put_cell(cx as u8, y, VgaCell::new(b, fg, bg));
        }
    }

    /// Fill the whole screen with blanks in `bg`.
    fn clear(&mut self, bg: Color) {
        for y in 0..SCREEN_ROWS {
            for x in 0..SCREEN_COLS {
                self.put_cell(x, y, VgaCell::new(b' ', bg, bg));
            }
        }
    }
}

/// Full-system reset.
pub trait SystemReset {
    fn reset(&mut self) -> !;
}

/// Everything the frame loop needs from a machine.
pub trait Machine: CycleCounter + RealTimeClock + Keyboard + VideoCells {}

impl<T: CycleCounter + RealTimeClock + Keyboard + VideoCells> Machine for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_packs_background_high() {
        let cell = VgaCell::new(b'#', Color::Yellow, Color::Blue);
        assert_eq!(cell.attribute(), 0x1E);
    }
}
