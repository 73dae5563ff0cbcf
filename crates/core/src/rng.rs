//! RNG module - where spawned piece kinds come from
//!
//! The game picks each new piece as `cycle counter % 7`. The counter is read
//! at an unpredictable moment (whenever gravity or a hard drop locks a piece),
//! which makes the pick uniform enough and deliberately unreproducible.
//!
//! Tests inject [`FixedPiece`] or [`ScriptedPieces`] instead.

use crate::hal::CycleCounter;
use crate::types::PieceKind;

/// Source of piece kinds for [`crate::GameState::spawn`].
pub trait PieceSource {
    fn next_piece(&mut self) -> PieceKind;
}

/// Picks `counter % 7` from a borrowed cycle counter.
pub struct CycleRandom<'a, C: CycleCounter>(pub &'a mut C);

impl<C: CycleCounter> PieceSource for CycleRandom<'_, C> {
    fn next_piece(&mut self) -> PieceKind {
        let pick = self.0.cycles() % PieceKind::COUNT as u64;
        PieceKind::from_index(pick as u8)
    }
}

/// Always the same kind.
#[derive(Debug, Clone, Copy)]
pub struct FixedPiece(pub PieceKind);

impl PieceSource for FixedPiece {
    fn next_piece(&mut self) -> PieceKind {
        self.0
    }
}

/// Cycles through a fixed list of kinds.
#[derive(Debug, Clone)]
pub struct ScriptedPieces<'a> {
    kinds: &'a [PieceKind],
    next: usize,
}

impl<'a> ScriptedPieces<'a> {
    /// `kinds` must not be empty; an empty list yields `I` forever.
    pub fn new(kinds: &'a [PieceKind]) -> Self {
        Self { kinds, next: 0 }
    }
}

impl PieceSource for ScriptedPieces<'_> {
    fn next_piece(&mut self) -> PieceKind {
        let Some(&kind) = self.kinds.get(self.next) else {
            return PieceKind::I;
        };
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::SimMachine;

    #[test]
    fn cycle_random_maps_counter_modulo_seven() {
        let mut sim = SimMachine::new(1000, 0);
        sim.advance(3);
        assert_eq!(CycleRandom(&mut sim).next_piece(), PieceKind::O);
        sim.advance(4);
        assert_eq!(CycleRandom(&mut sim).next_piece(), PieceKind::I);
    }

    #[test]
    fn cycle_random_covers_every_kind() {
        let mut sim = SimMachine::new(1000, 0).with_read_cost(1);
        let mut seen = [false; 7];
        let mut source = CycleRandom(&mut sim);
        for _ in 0..7 {
            seen[source.next_piece().index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn scripted_pieces_wrap_around() {
        let mut source = ScriptedPieces::new(&[PieceKind::T, PieceKind::Z]);
        assert_eq!(source.next_piece(), PieceKind::T);
        assert_eq!(source.next_piece(), PieceKind::Z);
        assert_eq!(source.next_piece(), PieceKind::T);
    }

    #[test]
    fn scripted_pieces_empty_list_falls_back() {
        let mut source = ScriptedPieces::new(&[]);
        assert_eq!(source.next_piece(), PieceKind::I);
    }
}
