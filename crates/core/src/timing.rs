//! Timing module - a millisecond timebase without timer interrupts
//!
//! The cycle counter's rate is unknown (it depends on the CPU clock), so the
//! game measures it: every time the real-time clock's seconds register changes,
//! the number of cycles since the previous change is one second's worth of
//! ticks. Dividing by 1000 gives ticks per millisecond; the truncation is fine
//! because the estimate is replaced every second.
//!
//! Until the first change is seen the rate is 0 and nothing time-based fires.
//!
//! [`TimerRegistry`] builds repeating and one-shot timers on raw tick deltas.

use log::debug;

use crate::hal::{CycleCounter, RealTimeClock};

/// Read the seconds register until two consecutive reads agree.
///
/// Each read waits for any update in progress to finish first.
pub fn stable_seconds<R: RealTimeClock + ?Sized>(rtc: &mut R) -> u8 {
    let mut last = None;
    loop {
        while rtc.update_in_progress() {}
        let sec = rtc.raw_seconds();
        if last == Some(sec) {
            return sec;
        }
        last = Some(sec);
    }
}

/// Ticks-per-millisecond estimate refreshed on every RTC second edge.
#[derive(Debug, Clone, Default)]
pub struct TickCalibrator {
    /// Last trusted seconds value and the counter reading taken when it
    /// was first seen.
    edge: Option<(u8, u64)>,
    ticks_per_second: u64,
}

impl TickCalibrator {
    pub const fn new() -> Self {
        Self {
            edge: None,
            ticks_per_second: 0,
        }
    }

    /// Poll the RTC; on a seconds change, re-measure the tick rate.
    ///
    /// Returns the current ticks-per-millisecond estimate (0 until the first
    /// change after the initial reading).
    pub fn sample<C: CycleCounter + RealTimeClock + ?Sized>(&mut self, clock: &mut C) -> u64 {
        let sec = stable_seconds(clock);
        match self.edge {
            None => {
                self.edge = Some((sec, clock.cycles()));
            }
            Some((last_sec, last_ticks)) if last_sec != sec => {
                let now = clock.cycles();
                self.ticks_per_second = now.saturating_sub(last_ticks);
                self.edge = Some((sec, now));
                debug!(
                    "rtc second {:02x}: {} ticks/s, {} ticks/ms",
                    sec,
                    self.ticks_per_second,
                    self.ticks_per_ms()
                );
            }
            Some(_) => {}
        }
        self.ticks_per_ms()
    }

    pub fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }

    pub fn ticks_per_ms(&self) -> u64 {
        self.ticks_per_second / 1000
    }

    /// Last trusted seconds register value
    pub fn last_second(&self) -> Option<u8> {
        self.edge.map(|(sec, _)| sec)
    }
}

/// Named timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Gravity pacing
    Gravity,
}

impl TimerId {
    pub const COUNT: usize = 1;

    pub const ALL: [TimerId; Self::COUNT] = [TimerId::Gravity];

    fn slot(self) -> usize {
        self as usize
    }
}

/// Reference ticks for every [`TimerId`].
///
/// A reference is `None` when the timer is disarmed, so arming at tick 0 is
/// an ordinary armed state.
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    refs: [Option<u64>; TimerId::COUNT],
}

impl TimerRegistry {
    pub const fn new() -> Self {
        Self {
            refs: [None; TimerId::COUNT],
        }
    }

    /// Repeating timer: true (and restart from `now`) once `threshold` ticks
    /// have passed since the last firing. A timer that never fired counts
    /// from tick 0.
    pub fn interval(&mut self, id: TimerId, now: u64, threshold: u64) -> bool {
        let since = self.refs[id.slot()].unwrap_or(0);
        if now.saturating_sub(since) >= threshold {
            self.refs[id.slot()] = Some(now);
            true
        } else {
            false
        }
    }

    /// One-shot timer: the first call arms it at `now` and returns false; once
    /// `threshold` ticks have passed it returns true and disarms.
    pub fn wait(&mut self, id: TimerId, now: u64, threshold: u64) -> bool {
        match self.refs[id.slot()] {
            None => {
                self.refs[id.slot()] = Some(now);
                false
            }
            Some(armed) if now.saturating_sub(armed) >= threshold => {
                self.refs[id.slot()] = None;
                true
            }
            Some(_) => false,
        }
    }

    /// Stored reference tick, `None` when disarmed
    pub fn reference(&self, id: TimerId) -> Option<u64> {
        self.refs[id.slot()]
    }

    pub fn disarm(&mut self, id: TimerId) {
        self.refs[id.slot()] = None;
    }
}
