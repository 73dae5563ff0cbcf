use crate::types::GRAVITY_MS;

/// Frame loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Milliseconds between gravity steps.
    pub gravity_ms: u32,
    /// Start with the debug overlay visible.
    pub debug_overlay: bool,
}

impl FrameConfig {
    /// Gravity interval in ticks at the given rate. 0 while uncalibrated.
    pub fn gravity_ticks(&self, ticks_per_ms: u64) -> u64 {
        ticks_per_ms.saturating_mul(self.gravity_ms as u64)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            gravity_ms: GRAVITY_MS,
            debug_overlay: false,
        }
    }
}
