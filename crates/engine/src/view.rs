//! Playfield and debug overlay drawing.
//!
//! Layout on the 80x25 screen:
//!
//! - The well starts at column [`WELL_X`]; every well cell is two columns wide.
//! - The top [`HIDDEN_ROWS`] well rows are drawn blank (pieces spawn there).
//! - A gray border runs down both sides of the visible rows and along the
//!   bottom.
//! - Empty cells show `::` in dark gray, locked cells a solid colored block.
//! - The ghost is `::` in the piece color, the active piece a solid block.
//!
//! Screen row = well row, so the hidden rows occupy screen rows 0-1.

use ::core::fmt::Write;

use arrayvec::ArrayString;

use crate::core::snapshot::GameSnapshot;
use crate::core::{minos, TimerId};
use crate::hal::{VgaCell, VideoCells};
use crate::types::{
    Color, PieceKind, Rotation, EMPTY, HIDDEN_ROWS, SCREEN_COLS, SCREEN_ROWS, WELL_HEIGHT,
    WELL_WIDTH, WELL_X,
};

const BORDER: VgaCell = VgaCell::new(b' ', Color::Black, Color::Gray);

/// Write a two-column well cell at well coordinates, clipped to the screen.
fn put_pair<V: VideoCells + ?Sized>(video: &mut V, col: i16, row: i16, cell: VgaCell) {
    let x = WELL_X as i16 + col * 2;
    if row < 0 || row >= SCREEN_ROWS as i16 {
        return;
    }
    for dx in 0..2 {
        let cx = x + dx;
        if (0..SCREEN_COLS as i16).contains(&cx) {
            video.put_cell(cx as u8, row as u8, cell);
        }
    }
}

fn draw_border<V: VideoCells + ?Sized>(video: &mut V) {
    let right = SCREEN_COLS / 2 + WELL_WIDTH;
    for y in HIDDEN_ROWS..WELL_HEIGHT {
        video.put_cell(WELL_X - 1, y, BORDER);
        video.put_cell(right, y, BORDER);
    }
    for x in 0..WELL_WIDTH * 2 + 2 {
        video.put_cell(WELL_X + x - 1, WELL_HEIGHT, BORDER);
    }
}

fn draw_piece<V: VideoCells + ?Sized>(
    video: &mut V,
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    ghost: bool,
) {
    for (dx, dy, color) in minos(kind, rotation) {
        let color = Color::from_id(color);
        let cell = if ghost {
            VgaCell::new(b':', color, Color::Black)
        } else {
            VgaCell::new(b' ', Color::Black, color)
        };
        put_pair(video, (x + dx) as i16, (y + dy) as i16, cell);
    }
}

/// Draw border, well, ghost and active piece.
pub fn draw_playfield<V: VideoCells + ?Sized>(video: &mut V, snap: &GameSnapshot) {
    draw_border(video);

    for (y, row) in snap.well.iter().enumerate() {
        for (x, &id) in row.iter().enumerate() {
            let cell = if y < HIDDEN_ROWS as usize {
                VgaCell::new(b' ', Color::Black, Color::Black)
            } else if id == EMPTY {
                VgaCell::new(b':', Color::DarkGray, Color::Black)
            } else {
                VgaCell::new(b' ', Color::Black, Color::from_id(id))
            };
            put_pair(video, x as i16, y as i16, cell);
        }
    }

    let a = snap.active;
    draw_piece(video, a.kind, a.rotation, a.x, snap.ghost_y, true);
    draw_piece(video, a.kind, a.rotation, a.x, a.y, false);
}

/// Values shown by the debug overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugInfo {
    pub rtc_second: Option<u8>,
    pub ticks_per_ms: u64,
    pub last_key: u8,
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub ghost_y: i8,
    pub timers: [Option<u64>; TimerId::COUNT],
}

type Field = ArrayString<24>;

fn label<V: VideoCells + ?Sized>(video: &mut V, row: u8, text: &str, value: &str) {
    video.put_str(0, row, Color::LightGreen, Color::Black, text);
    video.put_str(10, row, Color::Green, Color::Black, value);
}

/// Draw the overlay in the top-left corner (rows 0..5 + one per timer).
pub fn draw_debug<V: VideoCells + ?Sized>(video: &mut V, info: &DebugInfo) {
    let mut v = Field::new();

    match info.rtc_second {
        Some(sec) => {
            let _ = write!(v, "{:02X}", sec);
        }
        None => v.push_str("--"),
    }
    label(video, 0, "RTC sec:", &v);

    v.clear();
    let _ = write!(v, "{:010}", info.ticks_per_ms);
    label(video, 1, "ticks/ms:", &v);

    v.clear();
    let _ = write!(v, "{:02X}", info.last_key);
    label(video, 2, "key:", &v);

    v.clear();
    let _ = write!(v, "{},{}", info.kind.index(), info.rotation.index());
    label(video, 3, "i,r:", &v);

    v.clear();
    let _ = write!(v, "{:3},{:3},{:3}", info.x, info.y, info.ghost_y);
    label(video, 4, "x,y,g:", &v);

    for (i, reference) in info.timers.iter().enumerate() {
        v.clear();
        match reference {
            Some(tick) => {
                let _ = write!(v, "{:010}", tick);
            }
            None => v.push_str("disarmed  "),
        }
        label(video, 5 + i as u8, "timer:", &v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedPiece, GameState};
    use crate::hal::SimMachine;

    #[test]
    fn empty_well_draws_dots_border_and_piece() {
        let mut sim = SimMachine::default();
        let state = GameState::new(&mut FixedPiece(PieceKind::O));
        draw_playfield(&mut sim, &state.snapshot());

        // Border on both sides of visible rows and along the bottom
        assert_eq!(sim.cell(WELL_X - 1, 5), Some(BORDER));
        assert_eq!(sim.cell(50, 5), Some(BORDER));
        assert_eq!(sim.cell(WELL_X - 1, 1).map(|c| c.bg), Some(Color::Black));
        assert_eq!(sim.cell(40, WELL_HEIGHT), Some(BORDER));

        // Empty visible cell
        assert_eq!(
            sim.cell(WELL_X, 10),
            Some(VgaCell::new(b':', Color::DarkGray, Color::Black))
        );

        // O at box (3, 0): minos at well (4..=5, 1..=2) → screen cols 38..42
        assert_eq!(sim.cell(38, 1), Some(VgaCell::new(b' ', Color::Black, Color::Blue)));
        assert_eq!(sim.cell(41, 2), Some(VgaCell::new(b' ', Color::Black, Color::Blue)));

        // Ghost on the floor: ghost row 19 → well rows 20-21
        assert_eq!(sim.cell(38, 21), Some(VgaCell::new(b':', Color::Blue, Color::Black)));
        assert_eq!(sim.cell(37, 21).map(|c| c.fg), Some(Color::DarkGray));
    }

    #[test]
    fn pieces_past_the_left_edge_are_clipped() {
        let mut sim = SimMachine::default();
        // Well column -16 maps to screen columns -2..0, -15 to 0..2
        put_pair(&mut sim, -16, 3, VgaCell::new(b'#', Color::White, Color::Black));
        assert_eq!(sim.cell_writes(), 0);
        put_pair(&mut sim, -15, 3, VgaCell::new(b'#', Color::White, Color::Black));
        assert_eq!(sim.cell_writes(), 2);
    }

    #[test]
    fn debug_overlay_formats_fields() {
        let mut sim = SimMachine::default();
        let info = DebugInfo {
            rtc_second: Some(0x37),
            ticks_per_ms: 2_400_000,
            last_key: 0x4B,
            kind: PieceKind::T,
            rotation: Rotation::South,
            x: -1,
            y: 4,
            ghost_y: 18,
            timers: [None],
        };
        draw_debug(&mut sim, &info);
        assert!(sim.row_text(0).starts_with("RTC sec:  37"));
        assert!(sim.row_text(1).starts_with("ticks/ms: 0002400000"));
        assert!(sim.row_text(2).starts_with("key:      4B"));
        assert!(sim.row_text(3).starts_with("i,r:      5,2"));
        assert!(sim.row_text(4).starts_with("x,y,g:     -1,  4, 18"));
        assert!(sim.row_text(5).starts_with("timer:    disarmed"));
        assert_eq!(sim.cell(0, 0).map(|c| c.fg), Some(Color::LightGreen));
        assert_eq!(sim.cell(10, 0).map(|c| c.fg), Some(Color::Green));
    }
}
