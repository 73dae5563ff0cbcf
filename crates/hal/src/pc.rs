//! PC hardware drivers (port I/O).
//!
//! | Device | Access |
//! |--------|--------|
//! | Cycle counter | `rdtsc` |
//! | CMOS RTC | index port 0x70, data port 0x71; register 0x0A bit 7 = update in progress, register 0x00 = seconds |
//! | Keyboard | data port 0x60 (set 1 scancodes), status port 0x64 |
//! | Video | VGA text buffer at physical 0xB8000, 80x25 `u16` cells |
//! | Reset | keyboard controller command 0xFE on port 0x64 |
//!
//! Only valid when the program owns the machine in ring 0 with the VGA buffer
//! identity-mapped.

use core::arch::asm;

use crate::types::{SCREEN_COLS, SCREEN_ROWS};
use crate::{
    CycleCounter, Keyboard, RealTimeClock, ScancodeLatch, SystemReset, VgaCell, VideoCells,
};

const CMOS_INDEX: u16 = 0x70;
const CMOS_DATA: u16 = 0x71;
const CMOS_STATUS_A: u8 = 0x0A;
const CMOS_SECONDS: u8 = 0x00;
const CMOS_UPDATE_IN_PROGRESS: u8 = 0x80;

const KBD_DATA: u16 = 0x60;
const KBD_STATUS: u16 = 0x64;
const KBD_INPUT_FULL: u8 = 0x02;
const KBD_CMD_RESET: u8 = 0xFE;

const VGA_TEXT: usize = 0xB8000;

#[inline]
unsafe fn inb(port: u16) -> u8 {
    let value: u8;
    asm!("in al, dx", out("al") value, in("dx") port, options(nomem, nostack, preserves_flags));
    value
}

#[inline]
unsafe fn outb(port: u16, value: u8) {
    asm!("out dx, al", in("dx") port, in("al") value, options(nomem, nostack, preserves_flags));
}

#[inline]
fn rdtsc() -> u64 {
    let lo: u32;
    let hi: u32;
    // SAFETY: rdtsc has no side effects beyond writing edx:eax.
    unsafe {
        asm!("rdtsc", out("eax") lo, out("edx") hi, options(nomem, nostack, preserves_flags));
    }
    ((hi as u64) << 32) | lo as u64
}

/// The whole PC as one [`crate::Machine`].
pub struct PcMachine {
    latch: ScancodeLatch,
    video: *mut u16,
}

impl PcMachine {
    /// # Safety
    ///
    /// The caller must own the hardware: ring 0, no other code driving the
    /// CMOS, keyboard controller or VGA text buffer, and 0xB8000 mapped.
    pub unsafe fn new() -> Self {
        Self {
            latch: ScancodeLatch::new(),
            video: VGA_TEXT as *mut u16,
        }
    }
}

impl CycleCounter for PcMachine {
    fn cycles(&mut self) -> u64 {
        rdtsc()
    }
}

impl RealTimeClock for PcMachine {
    fn update_in_progress(&mut self) -> bool {
        // SAFETY: CMOS ports are owned by this machine (see `new`).
        unsafe {
            outb(CMOS_INDEX, CMOS_STATUS_A);
            inb(CMOS_DATA) & CMOS_UPDATE_IN_PROGRESS != 0
        }
    }

    fn raw_seconds(&mut self) -> u8 {
        // SAFETY: as above.
        unsafe {
            outb(CMOS_INDEX, CMOS_SECONDS);
            inb(CMOS_DATA)
        }
    }
}

impl Keyboard for PcMachine {
    fn poll_key(&mut self) -> Option<u8> {
        // SAFETY: the keyboard controller is owned by this machine.
        let raw = unsafe { inb(KBD_DATA) };
        self.latch.feed(raw)
    }
}

impl VideoCells for PcMachine {
    fn put_cell(&mut self, x: u8, y: u8, cell: VgaCell) {
        if x >= SCREEN_COLS || y >= SCREEN_ROWS {
            return;
        }
        let offset = y as usize * SCREEN_COLS as usize + x as usize;
        let word = ((cell.attribute() as u16) << 8) | cell.glyph as u16;
        // SAFETY: offset is inside the 80x25 text buffer.
        unsafe { self.video.add(offset).write_volatile(word) }
    }
}

impl SystemReset for PcMachine {
    fn reset(&mut self) -> ! {
        // SAFETY: we own the keyboard controller; after the reset command the
        // CPU is halted until the line takes effect.
        unsafe {
            while inb(KBD_STATUS) & KBD_INPUT_FULL != 0 {}
            outb(KBD_STATUS, KBD_CMD_RESET);
            loop {
                asm!("hlt", options(nomem, nostack));
            }
        }
    }
}
