//! Rendering tests - playfield into the terminal framebuffer

use metal_tetris::core::{FixedPiece, GameState, Well};
use metal_tetris::engine::draw_playfield;
use metal_tetris::hal::{VgaCell, VideoCells};
use metal_tetris::term::{encode_diff_into, encode_full_into, FrameBuffer};
use metal_tetris::types::{Color, PieceKind, WELL_X};

#[test]
fn test_playfield_rows_in_framebuffer() {
    let mut fb = FrameBuffer::screen();
    fb.clear(Color::Black);
    let state = GameState::new(&mut FixedPiece(PieceKind::I));
    draw_playfield(&mut fb, &state.snapshot());

    // Visible empty row: border, 20 dots, border
    let row = fb.row_text(10);
    let well = &row[WELL_X as usize..WELL_X as usize + 20];
    assert_eq!(well, "::::::::::::::::::::");

    // I spawns in hidden row 1: solid red blocks at well columns 3..=6
    for x in 36..44 {
        assert_eq!(
            fb.get(x, 1),
            Some(VgaCell::new(b' ', Color::Black, Color::Red))
        );
    }
    // Its ghost on the floor
    assert_eq!(fb.get(36, 21), Some(VgaCell::new(b':', Color::Red, Color::Black)));
}

#[test]
fn test_locked_cells_use_their_color() {
    let mut well = Well::new();
    well.set(0, 21, 6);
    let state = GameState::with_well(well, &mut FixedPiece(PieceKind::O));
    let mut fb = FrameBuffer::screen();
    draw_playfield(&mut fb, &state.snapshot());

    let cell = VgaCell::new(b' ', Color::Black, Color::Brown);
    assert_eq!(fb.get(WELL_X as u16, 21), Some(cell));
    assert_eq!(fb.get(WELL_X as u16 + 1, 21), Some(cell));
}

#[test]
fn test_moving_a_piece_only_touches_changed_cells() {
    let mut state = GameState::new(&mut FixedPiece(PieceKind::O));
    let mut before = FrameBuffer::screen();
    draw_playfield(&mut before, &state.snapshot());

    let mut full = Vec::new();
    encode_full_into(&before, &mut full).unwrap();

    state.try_move(0, 1);
    let mut after = before.clone();
    draw_playfield(&mut after, &state.snapshot());

    let mut diff = Vec::new();
    encode_diff_into(&before, &after, &mut diff).unwrap();
    assert!(!diff.is_empty());
    assert!(diff.len() < full.len() / 4);
}
