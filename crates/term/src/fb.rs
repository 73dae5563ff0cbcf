//! Framebuffer of text-mode cells for terminal rendering.

use crate::hal::{VgaCell, VideoCells};
use crate::types::{Color, SCREEN_COLS, SCREEN_ROWS};

/// 2D framebuffer of [`VgaCell`]s, the hosted stand-in for text-mode memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<VgaCell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![VgaCell::default(); len],
        }
    }

    /// An 80x25 screen.
    pub fn screen() -> Self {
        Self::new(SCREEN_COLS as u16, SCREEN_ROWS as u16)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[VgaCell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<VgaCell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: VgaCell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn fill(&mut self, cell: VgaCell) {
        self.cells.fill(cell);
    }

    /// Glyphs of row `y`, unprintable bytes as spaces.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| glyph_char(c.glyph))
            .collect()
    }
}

impl VideoCells for FrameBuffer {
    fn put_cell(&mut self, x: u8, y: u8, cell: VgaCell) {
        self.set(x as u16, y as u16, cell);
    }

    fn clear(&mut self, bg: Color) {
        self.fill(VgaCell::new(b' ', bg, bg));
    }
}

/// Terminal character for a text-mode glyph byte.
pub fn glyph_char(glyph: u8) -> char {
    if glyph.is_ascii_graphic() {
        glyph as char
    } else {
        ' '
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_outside_are_ignored() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(2, 1, Color::White, Color::Black, "abc");
        assert_eq!(fb.row_text(1), "  ab");
        fb.put_cell(4, 0, VgaCell::new(b'x', Color::White, Color::Black));
        assert_eq!(fb.row_text(0), "    ");
    }

    #[test]
    fn clear_fills_with_background() {
        let mut fb = FrameBuffer::screen();
        fb.clear(Color::Blue);
        assert_eq!(fb.cells().len(), 80 * 25);
        assert!(fb.cells().iter().all(|c| c.bg == Color::Blue && c.glyph == b' '));
    }
}
