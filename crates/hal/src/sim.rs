//! Deterministic simulated machine.
//!
//! `SimMachine` stands in for real hardware in tests and benchmarks:
//!
//! - Time is a plain counter. Every keyboard poll advances it by `poll_cost`
//!   ticks and every cycle-counter read by `read_cost` ticks, so a frame loop
//!   makes progress without any real clock.
//! - The RTC seconds register is derived from the counter
//!   (`now / ticks_per_second % 60`) and never reports an update in progress.
//! - Key presses are scripted with [`SimMachine::press`] and delivered one per
//!   poll, in order.
//! - Video writes land in an in-memory 80x25 screen that tests can inspect.
//! - [`SystemReset::reset`] panics with `"system reset requested"`.

use arrayvec::{ArrayString, ArrayVec};

use crate::types::{SCREEN_COLS, SCREEN_ROWS};
use crate::{CycleCounter, Keyboard, RealTimeClock, SystemReset, VgaCell, VideoCells};

const COLS: usize = SCREEN_COLS as usize;
const ROWS: usize = SCREEN_ROWS as usize;

/// Maximum number of scripted, not yet delivered key presses.
pub const KEY_QUEUE_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct SimMachine {
    now: u64,
    ticks_per_second: u64,
    poll_cost: u64,
    read_cost: u64,
    keys: ArrayVec<u8, KEY_QUEUE_LEN>,
    screen: [[VgaCell; COLS]; ROWS],
    cell_writes: u64,
}

impl SimMachine {
    /// A machine whose counter runs at `ticks_per_second`, advancing by
    /// `poll_cost` ticks per keyboard poll.
    pub fn new(ticks_per_second: u64, poll_cost: u64) -> Self {
        Self {
            now: 0,
            ticks_per_second: ticks_per_second.max(1),
            poll_cost,
            read_cost: 0,
            keys: ArrayVec::new(),
            screen: [[VgaCell::default(); COLS]; ROWS],
            cell_writes: 0,
        }
    }

    /// Also advance by `read_cost` ticks on every cycle-counter read.
    pub fn with_read_cost(mut self, read_cost: u64) -> Self {
        self.read_cost = read_cost;
        self
    }

    /// Current counter value, without advancing it.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }

    /// Move the counter forward.
    pub fn advance(&mut self, ticks: u64) {
        self.now = self.now.saturating_add(ticks);
    }

    /// Queue a key press. Returns false when the queue is full.
    pub fn press(&mut self, scancode: u8) -> bool {
        self.keys.try_push(scancode).is_ok()
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn cell(&self, x: u8, y: u8) -> Option<VgaCell> {
        self.screen
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Glyphs of one screen row as text.
    pub fn row_text(&self, y: u8) -> ArrayString<COLS> {
        let mut out = ArrayString::new();
        if let Some(row) = self.screen.get(y as usize) {
            for cell in row {
                let ch = if cell.glyph.is_ascii() && cell.glyph != 0 {
                    cell.glyph as char
                } else {
                    ' '
                };
                out.push(ch);
            }
        }
        out
    }

    /// Total number of cell writes so far.
    pub fn cell_writes(&self) -> u64 {
        self.cell_writes
    }
}

impl Default for SimMachine {
    /// 1 MHz counter, 10 ms per poll.
    fn default() -> Self {
        Self::new(1_000_000, 10_000)
    }
}

impl CycleCounter for SimMachine {
    fn cycles(&mut self) -> u64 {
        let now = self.now;
        self.advance(self.read_cost);
        now
    }
}

impl RealTimeClock for SimMachine {
    fn update_in_progress(&mut self) -> bool {
        false
    }

    fn raw_seconds(&mut self) -> u8 {
        ((self.now / self.ticks_per_second) % 60) as u8
    }
}

impl Keyboard for SimMachine {
    fn poll_key(&mut self) -> Option<u8> {
        self.advance(self.poll_cost);
        if self.keys.is_empty() {
            None
        } else {
            Some(self.keys.remove(0))
        }
    }
}

impl VideoCells for SimMachine {
    fn put_cell(&mut self, x: u8, y: u8, cell: VgaCell) {
        if let Some(slot) = self
            .screen
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *slot = cell;
            self.cell_writes += 1;
        }
    }
}

impl SystemReset for SimMachine {
    fn reset(&mut self) -> ! {
        panic!("system reset requested")
    }
}
