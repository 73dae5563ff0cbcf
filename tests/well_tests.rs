//! Well tests - grid access and line clearing

use metal_tetris::core::Well;
use metal_tetris::types::{EMPTY, WELL_HEIGHT, WELL_WIDTH};

fn fill_row(well: &mut Well, y: i8, color: u8) {
    for x in 0..WELL_WIDTH as i8 {
        assert!(well.set(x, y, color));
    }
}

#[test]
fn test_well_new_empty() {
    let well = Well::new();
    assert_eq!(well.width(), WELL_WIDTH);
    assert_eq!(well.height(), WELL_HEIGHT);

    for y in 0..WELL_HEIGHT as i8 {
        for x in 0..WELL_WIDTH as i8 {
            assert!(well.is_vacant(x, y), "Cell ({}, {}) should be vacant", x, y);
            assert_eq!(well.get(x, y), Some(EMPTY));
        }
    }
    assert_eq!(well.filled_count(), 0);
}

#[test]
fn test_well_get_out_of_bounds() {
    let well = Well::new();

    assert_eq!(well.get(-1, 0), None);
    assert_eq!(well.get(0, -1), None);
    assert_eq!(well.get(WELL_WIDTH as i8, 0), None);
    assert_eq!(well.get(0, WELL_HEIGHT as i8), None);

    // Outside counts as blocked, never as vacant
    assert!(well.is_blocked(-1, 0));
    assert!(well.is_blocked(0, WELL_HEIGHT as i8));
    assert!(!well.is_vacant(WELL_WIDTH as i8, 0));
}

#[test]
fn test_well_set_and_get() {
    let mut well = Well::new();

    assert!(well.set(5, 10, 6));
    assert_eq!(well.get(5, 10), Some(6));
    assert!(well.is_blocked(5, 10));

    assert!(well.set(5, 10, EMPTY));
    assert!(well.is_vacant(5, 10));

    assert!(!well.set(-1, 10, 6));
    assert!(!well.set(5, WELL_HEIGHT as i8, 6));
    assert_eq!(well.filled_count(), 0);
}

#[test]
fn test_row_full_and_empty() {
    let mut well = Well::new();
    assert!(well.is_row_empty(21));
    assert!(!well.is_row_full(21));

    for x in 0..WELL_WIDTH as i8 - 1 {
        well.set(x, 21, 1);
    }
    assert!(!well.is_row_full(21));
    assert!(!well.is_row_empty(21));

    well.set(WELL_WIDTH as i8 - 1, 21, 1);
    assert!(well.is_row_full(21));
}

#[test]
fn test_clear_removes_row_and_shifts_above() {
    let mut well = Well::new();
    fill_row(&mut well, 21, 4);
    well.set(2, 20, 3);
    well.set(7, 19, 5);
    well.set(0, 0, 1);

    let cleared = well.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[21]);

    assert_eq!(well.get(2, 21), Some(3));
    assert_eq!(well.get(7, 20), Some(5));
    assert_eq!(well.get(0, 1), Some(1));
    assert!(well.is_row_empty(0));
    assert_eq!(well.filled_count(), 3);
}

#[test]
fn test_clear_three_adjacent_rows() {
    let mut well = Well::new();
    for y in 19..22 {
        fill_row(&mut well, y, 2);
    }
    well.set(4, 18, 7);

    let cleared = well.clear_full_rows();
    assert_eq!(cleared.len(), 3);
    assert_eq!(well.filled_count(), 1);
    assert_eq!(well.get(4, 21), Some(7));
}

#[test]
fn test_clear_nothing_when_no_row_is_full() {
    let mut well = Well::new();
    well.set(0, 21, 1);
    let before = well.clone();

    assert!(well.clear_full_rows().is_empty());
    assert_eq!(well, before);
}
