//! The terminal as a machine.
//!
//! `HostMachine` gives the frame loop the same capabilities bare metal does,
//! backed by the host OS:
//!
//! - cycle counter: nanoseconds since the machine was created
//! - RTC seconds: wall-clock seconds modulo 60, never mid-update
//! - keyboard: crossterm key presses translated to make codes
//! - video: an 80x25 [`FrameBuffer`], flushed by [`HostMachine::present`]
//!
//! Reset is not a hardware reset here; the runner leaves its loop instead.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, error};

use crate::fb::FrameBuffer;
use crate::hal::{CycleCounter, Keyboard, RealTimeClock, VgaCell, VideoCells};
use crate::input::scancode_for;
use crate::renderer::TerminalRenderer;
use crate::types::{keys, Color, HOST_POLL_MS};

/// Terminal machine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConfig {
    /// How long one keyboard poll may block.
    pub poll_timeout: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(HOST_POLL_MS),
        }
    }
}

pub struct HostMachine {
    fb: FrameBuffer,
    renderer: TerminalRenderer,
    start: Instant,
    config: HostConfig,
}

impl HostMachine {
    pub fn new(config: HostConfig) -> Self {
        Self {
            fb: FrameBuffer::screen(),
            renderer: TerminalRenderer::new(),
            start: Instant::now(),
            config,
        }
    }

    /// Switch the terminal to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    /// Restore the terminal.
    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    /// Flush framebuffer changes to the terminal.
    pub fn present(&mut self) -> Result<()> {
        self.renderer.draw(&self.fb)
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn config(&self) -> HostConfig {
        self.config
    }

    fn read_key(&mut self) -> Result<Option<u8>> {
        if !event::poll(self.config.poll_timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(scancode_for(key)),
            Event::Resize(w, h) => {
                debug!("terminal resized to {}x{}", w, h);
                self.renderer.invalidate();
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

impl CycleCounter for HostMachine {
    fn cycles(&mut self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }
}

impl RealTimeClock for HostMachine {
    fn update_in_progress(&mut self) -> bool {
        false
    }

    fn raw_seconds(&mut self) -> u8 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| (d.as_secs() % 60) as u8)
            .unwrap_or(0)
    }
}

impl Keyboard for HostMachine {
    /// A failing terminal cannot deliver keys any more, so it asks the frame
    /// loop to stop.
    fn poll_key(&mut self) -> Option<u8> {
        match self.read_key() {
            Ok(key) => key,
            Err(err) => {
                error!("terminal input failed: {err:#}");
                Some(keys::R)
            }
        }
    }
}

impl VideoCells for HostMachine {
    fn put_cell(&mut self, x: u8, y: u8, cell: VgaCell) {
        self.fb.put_cell(x, y, cell);
    }

    fn clear(&mut self, bg: Color) {
        self.fb.clear(bg);
    }
}
