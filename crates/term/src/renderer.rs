//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and the first after [`TerminalRenderer::invalidate`]) is a
//! full redraw; after that only runs of changed cells are written.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{glyph_char, FrameBuffer};
use crate::hal::VgaCell;
use crate::types;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.invalidate();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, diffing against the previous one.
    ///
    /// The caller keeps writing into the same buffer between draws, so the
    /// renderer keeps its own copy (reusing the allocation) instead of
    /// swapping.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        let same_size = |p: &&mut FrameBuffer| p.width() == fb.width() && p.height() == fb.height();
        if let Some(prev) = self.last.as_mut().filter(same_size) {
            encode_diff_into(prev, fb, &mut self.buf)?;
            prev.clone_from(fb);
        } else {
            encode_full_into(fb, &mut self.buf)?;
            self.last = Some(fb.clone());
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<(types::Color, types::Color)> = None;
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            apply_style_into(out, cell, &mut current)?;
            out.queue(Print(glyph_char(cell.glyph)))?;
        }
        if y + 1 < fb.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            apply_style_into(out, cell, &mut current)?;
            out.queue(Print(glyph_char(cell.glyph)))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(
    out: &mut Vec<u8>,
    cell: VgaCell,
    current: &mut Option<(types::Color, types::Color)>,
) -> Result<()> {
    let style = (cell.fg, cell.bg);
    if *current == Some(style) {
        return Ok(());
    }
    out.queue(SetForegroundColor(vga_to_color(cell.fg)))?;
    out.queue(SetBackgroundColor(vga_to_color(cell.bg)))?;
    *current = Some(style);
    Ok(())
}

/// Nearest terminal color for a text-mode palette entry.
pub fn vga_to_color(color: types::Color) -> Color {
    use types::Color as Vga;
    match color {
        Vga::Black => Color::Black,
        Vga::Blue => Color::DarkBlue,
        Vga::Green => Color::DarkGreen,
        Vga::Cyan => Color::DarkCyan,
        Vga::Red => Color::DarkRed,
        Vga::Magenta => Color::DarkMagenta,
        Vga::Brown => Color::DarkYellow,
        Vga::Gray => Color::Grey,
        Vga::DarkGray => Color::DarkGrey,
        Vga::LightBlue => Color::Blue,
        Vga::LightGreen => Color::Green,
        Vga::LightCyan => Color::Cyan,
        Vga::LightRed => Color::Red,
        Vga::LightMagenta => Color::Magenta,
        Vga::Yellow => Color::Yellow,
        Vga::White => Color::White,
    }
}

fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::VideoCells;

    #[test]
    fn changed_run_iterator_coalesces_adjacent_cells() {
        let a = FrameBuffer::new(5, 1);
        let mut b = FrameBuffer::new(5, 1);
        b.put_str(1, 0, types::Color::White, types::Color::Black, "XXX");

        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(1, 0, 3)]);
    }

    #[test]
    fn identical_frames_encode_no_cells() {
        let a = FrameBuffer::screen();
        let mut out = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(!text.contains('X'));

        let mut b = a.clone();
        b.put_str(0, 0, types::Color::White, types::Color::Black, "X");
        out.clear();
        encode_diff_into(&a, &b, &mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains('X'));
    }

    #[test]
    fn full_redraw_prints_every_row() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, types::Color::White, types::Color::Black, "ab");
        fb.put_str(0, 1, types::Color::White, types::Color::Black, "cd");
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("ab"));
        assert!(text.contains("cd"));
        assert!(text.contains("\r\n"));
    }

    #[test]
    fn palette_maps_base_and_bright() {
        assert_eq!(vga_to_color(types::Color::Blue), Color::DarkBlue);
        assert_eq!(vga_to_color(types::Color::LightBlue), Color::Blue);
        assert_eq!(vga_to_color(types::Color::Gray), Color::Grey);
        assert_eq!(vga_to_color(types::Color::DarkGray), Color::DarkGrey);
    }
}
