//! Scancode edge detection for a raw keyboard data port.
//!
//! The keyboard controller's data port holds the last byte received until the
//! next one arrives, so reading it in a loop sees the same code many times.
//! [`ScancodeLatch`] turns those repeated reads into one event per change, and
//! drops break codes and extended-key prefixes so only make codes come out.

use crate::types::keys::RELEASE_BIT;

#[derive(Debug, Clone, Default)]
pub struct ScancodeLatch {
    last: u8,
}

impl ScancodeLatch {
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Feed one raw port read; returns a make code on a new key press.
    pub fn feed(&mut self, raw: u8) -> Option<u8> {
        if raw == self.last {
            return None;
        }
        self.last = raw;
        // Break codes and the 0xE0/0xE1 prefixes all have bit 7 set.
        if raw == 0 || raw & RELEASE_BIT != 0 {
            None
        } else {
            Some(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::keys;

    #[test]
    fn reports_each_press_once() {
        let mut latch = ScancodeLatch::new();
        assert_eq!(latch.feed(keys::LEFT), Some(keys::LEFT));
        assert_eq!(latch.feed(keys::LEFT), None);
        assert_eq!(latch.feed(keys::LEFT), None);
    }

    #[test]
    fn release_rearms_the_same_key() {
        let mut latch = ScancodeLatch::new();
        assert_eq!(latch.feed(keys::UP), Some(keys::UP));
        assert_eq!(latch.feed(keys::UP | RELEASE_BIT), None);
        assert_eq!(latch.feed(keys::UP), Some(keys::UP));
    }

    #[test]
    fn extended_prefix_is_swallowed() {
        let mut latch = ScancodeLatch::new();
        assert_eq!(latch.feed(0xE0), None);
        assert_eq!(latch.feed(keys::RIGHT), Some(keys::RIGHT));
        assert_eq!(latch.feed(0xE0), None);
        assert_eq!(latch.feed(keys::RIGHT | RELEASE_BIT), None);
    }

    #[test]
    fn idle_port_reports_nothing() {
        let mut latch = ScancodeLatch::new();
        assert_eq!(latch.feed(0), None);
    }
}
