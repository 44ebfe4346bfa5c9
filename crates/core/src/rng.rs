//! RNG module - piece generation
//!
//! The engine draws every `next` piece independently and uniformly from the
//! seven kinds. There is no bag or history, so streaks and droughts happen.
//! Callers that want bag fairness (or a scripted sequence) provide their own
//! [`PieceSource`].
//!
//! Also provides a simple LCG for deterministic play.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Takes the high half of the state; the low bits of a power-of-two LCG
    /// cycle with very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    /// Current RNG state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Supplies the kind that refills the `next` slot.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Independent uniform draws over all seven kinds
#[derive(Debug, Clone)]
pub struct UniformPieces {
    rng: SimpleRng,
}

impl UniformPieces {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for UniformPieces {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for UniformPieces {
    fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

/// Repeats a fixed sequence of kinds forever.
///
/// Useful for replays and for setting up exact scenarios.
#[derive(Debug, Clone)]
pub struct CyclePieces {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl CyclePieces {
    /// Returns `None` for an empty sequence
    pub fn new(kinds: &[PieceKind]) -> Option<Self> {
        if kinds.is_empty() {
            return None;
        }
        Some(Self {
            kinds: kinds.to_vec(),
            index: 0,
        })
    }

    /// A source that only ever yields `kind`
    pub fn repeat(kind: PieceKind) -> Self {
        Self {
            kinds: vec![kind],
            index: 0,
        }
    }
}

impl PieceSource for CyclePieces {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}
