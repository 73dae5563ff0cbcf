//! The frame loop.
//!
//! One [`Game::step`] is one iteration:
//!
//! 1. Re-sample the RTC and refresh the ticks-per-millisecond estimate.
//! 2. Poll the keyboard and apply at most one action.
//! 3. Fire gravity if its interval elapsed (only once the rate is known).
//! 4. Redraw the playfield if anything changed, and the debug overlay if on.
//!
//! [`Game::run`] repeats that forever and hands reset requests to the machine.

use log::{debug, info, trace};

use crate::config::FrameConfig;
use crate::core::{CycleRandom, GameState, TickCalibrator, TimerId, TimerRegistry};
use crate::hal::{Machine, SystemReset};
use crate::types::{Color, GameAction};
use crate::view::{draw_debug, draw_playfield, DebugInfo};

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Nothing visible changed
    Idle,
    /// Screen cells were written
    Redrawn,
    /// The player asked for a reset; the step did nothing else
    Reset,
}

pub struct Game {
    state: GameState,
    calibrator: TickCalibrator,
    timers: TimerRegistry,
    config: FrameConfig,
    debug: bool,
    last_key: u8,
}

impl Game {
    /// Clear the screen, spawn the first piece and draw it.
    pub fn boot<M: Machine>(machine: &mut M, config: FrameConfig) -> Self {
        machine.clear(Color::Black);
        let state = GameState::new(&mut CycleRandom(&mut *machine));
        let game = Self {
            state,
            calibrator: TickCalibrator::new(),
            timers: TimerRegistry::new(),
            config,
            debug: config.debug_overlay,
            last_key: 0,
        };
        info!(
            "boot: first piece {}, gravity every {} ms",
            game.state.active().kind.as_str(),
            config.gravity_ms
        );
        game.redraw(machine);
        game
    }

    /// Run one loop iteration.
    pub fn step<M: Machine>(&mut self, machine: &mut M) -> Flow {
        let ticks_per_ms = self.calibrator.sample(machine);
        let mut updated = false;

        if let Some(key) = machine.poll_key() {
            trace!("scancode {:02x}", key);
            self.last_key = key;
            match GameAction::from_scancode(key) {
                Some(GameAction::Reset) => {
                    info!("reset requested");
                    return Flow::Reset;
                }
                Some(action) => self.apply(action, machine),
                None => {}
            }
            updated = true;
        }

        if ticks_per_ms > 0 {
            let threshold = self.config.gravity_ticks(ticks_per_ms);
            let now = machine.cycles();
            if self.timers.interval(TimerId::Gravity, now, threshold) {
                let cleared = self.state.update(&mut CycleRandom(&mut *machine));
                if !cleared.is_empty() {
                    debug!("gravity cleared {} rows", cleared.len());
                }
                updated = true;
            }
        }

        if updated {
            self.redraw(machine);
        }
        if self.debug {
            self.draw_overlay(machine);
        }

        if updated || self.debug {
            Flow::Redrawn
        } else {
            Flow::Idle
        }
    }

    /// Step forever; a reset request resets the machine.
    pub fn run<M: Machine + SystemReset>(mut self, machine: &mut M) -> ! {
        loop {
            if self.step(machine) == Flow::Reset {
                machine.reset();
            }
        }
    }

    fn apply<M: Machine>(&mut self, action: GameAction, machine: &mut M) {
        match action {
            GameAction::MoveLeft => {
                self.state.try_move(-1, 0);
            }
            GameAction::MoveRight => {
                self.state.try_move(1, 0);
            }
            GameAction::SoftDrop => {
                self.state.try_move(0, 1);
            }
            GameAction::Rotate => {
                self.state.try_rotate();
            }
            GameAction::HardDrop => {
                self.state.hard_drop(&mut CycleRandom(&mut *machine));
            }
            GameAction::ToggleDebug => {
                self.debug = !self.debug;
                debug!("debug overlay {}", if self.debug { "on" } else { "off" });
                machine.clear(Color::Black);
            }
            // handled by the caller before any state changes
            GameAction::Reset => {}
        }
    }

    fn redraw<M: Machine>(&self, machine: &mut M) {
        draw_playfield(machine, &self.state.snapshot());
    }

    fn draw_overlay<M: Machine>(&self, machine: &mut M) {
        let a = self.state.active();
        let info = DebugInfo {
            rtc_second: self.calibrator.last_second(),
            ticks_per_ms: self.calibrator.ticks_per_ms(),
            last_key: self.last_key,
            kind: a.kind,
            rotation: a.rotation,
            x: a.x,
            y: a.y,
            ghost_y: a.ghost_y,
            timers: TimerId::ALL.map(|id| self.timers.reference(id)),
        };
        draw_debug(machine, &info);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn calibrator(&self) -> &TickCalibrator {
        &self.calibrator
    }

    pub fn timers(&self) -> &TimerRegistry {
        &self.timers
    }

    pub fn config(&self) -> FrameConfig {
        self.config
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    /// Most recent scancode seen, 0 before the first key
    pub fn last_key(&self) -> u8 {
        self.last_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::SimMachine;
    use crate::types::{keys, PieceKind, WELL_X};

    #[test]
    fn boot_spawns_from_the_counter_and_draws() {
        let mut sim = SimMachine::default();
        let game = Game::boot(&mut sim, FrameConfig::default());
        // counter is 0 at boot → I
        assert_eq!(game.state().active().kind, PieceKind::I);
        assert_eq!(sim.cell(WELL_X, 10).map(|c| c.glyph), Some(b':'));
        assert!(!game.debug_enabled());
    }

    #[test]
    fn key_press_moves_and_redraws() {
        let mut sim = SimMachine::default();
        let mut game = Game::boot(&mut sim, FrameConfig::default());
        sim.press(keys::LEFT);
        assert_eq!(game.step(&mut sim), Flow::Redrawn);
        assert_eq!(game.state().active().x, 2);
        assert_eq!(game.last_key(), keys::LEFT);
        assert_eq!(game.step(&mut sim), Flow::Idle);
    }

    #[test]
    fn unmapped_key_still_redraws() {
        let mut sim = SimMachine::default();
        let mut game = Game::boot(&mut sim, FrameConfig::default());
        sim.press(0x1E);
        assert_eq!(game.step(&mut sim), Flow::Redrawn);
        assert_eq!(game.state().active().x, 3);
    }

    #[test]
    fn reset_key_stops_the_step() {
        let mut sim = SimMachine::default();
        let mut game = Game::boot(&mut sim, FrameConfig::default());
        sim.press(keys::R);
        sim.press(keys::LEFT);
        assert_eq!(game.step(&mut sim), Flow::Reset);
        assert_eq!(sim.pending_keys(), 1);
        assert_eq!(game.state().active().x, 3);
    }

    #[test]
    fn gravity_waits_for_calibration_then_fires_every_interval() {
        // 1 MHz counter, 10 ms per poll: 100 steps per RTC second
        let mut sim = SimMachine::default();
        let mut game = Game::boot(&mut sim, FrameConfig::default());

        for _ in 0..100 {
            game.step(&mut sim);
        }
        assert_eq!(game.calibrator().ticks_per_ms(), 0);
        assert_eq!(game.state().active().y, 0);

        // First RTC edge: rate known, gravity fires at once
        assert_eq!(game.step(&mut sim), Flow::Redrawn);
        assert_eq!(game.calibrator().ticks_per_ms(), 1_000);
        assert_eq!(game.state().active().y, 1);

        for _ in 0..99 {
            game.step(&mut sim);
        }
        assert_eq!(game.state().active().y, 1);
        game.step(&mut sim);
        assert_eq!(game.state().active().y, 2);
    }

    #[test]
    fn hard_drop_locks_on_the_floor() {
        let mut sim = SimMachine::default();
        let mut game = Game::boot(&mut sim, FrameConfig::default());
        sim.press(keys::ENTER);
        game.step(&mut sim);
        let well = game.state().well();
        assert_eq!(well.filled_count(), 4);
        for x in 3..7 {
            assert!(well.is_blocked(x, 21));
        }
        assert_eq!(game.state().active().y, 0);
    }

    #[test]
    fn debug_toggle_draws_overlay_every_step() {
        let mut sim = SimMachine::default();
        let mut game = Game::boot(&mut sim, FrameConfig::default());
        sim.press(keys::D);
        game.step(&mut sim);
        assert!(game.debug_enabled());
        assert!(sim.row_text(0).starts_with("RTC sec:  00"));
        assert_eq!(game.step(&mut sim), Flow::Redrawn);

        sim.press(keys::D);
        game.step(&mut sim);
        assert!(!game.debug_enabled());
        assert!(sim.row_text(0).trim().is_empty());
    }

    #[test]
    fn debug_overlay_can_start_enabled() {
        let mut sim = SimMachine::default();
        let config = FrameConfig {
            debug_overlay: true,
            ..FrameConfig::default()
        };
        let mut game = Game::boot(&mut sim, config);
        assert_eq!(game.step(&mut sim), Flow::Redrawn);
        assert!(sim.row_text(5).starts_with("timer:    disarmed"));
    }

    #[test]
    #[should_panic(expected = "system reset requested")]
    fn run_resets_the_machine() {
        let mut sim = SimMachine::default();
        let game = Game::boot(&mut sim, FrameConfig::default());
        sim.press(keys::R);
        game.run(&mut sim);
    }
}
