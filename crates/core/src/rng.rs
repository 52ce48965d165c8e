//! RNG module - injected randomness for piece generation
//!
//! The engine never reaches for a global random source. It draws from a
//! [`RandomSource`] supplied by the host, so tests and replays can fix the sequence.
//!
//! Provides a simple LCG for seeded games and a scripted source for tests.

use crate::types::{
    BlockColor, Orientation, ShapeKind, NUM_COLORS, NUM_ORIENTATIONS, NUM_SHAPE_KINDS,
};

/// Source of random numbers for piece generation
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max)
    fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

/// Pick one of the seven kinds uniformly
pub fn random_kind(rng: &mut impl RandomSource) -> ShapeKind {
    let idx = rng.next_range(NUM_SHAPE_KINDS as u32) as usize;
    ShapeKind::ALL[idx]
}

/// Pick one of the six colors uniformly
pub fn random_color(rng: &mut impl RandomSource) -> BlockColor {
    let idx = rng.next_range(NUM_COLORS as u32) as usize;
    BlockColor::ALL[idx]
}

/// Pick one of the four orientations uniformly
pub fn random_orientation(rng: &mut impl RandomSource) -> Orientation {
    let idx = rng.next_range(NUM_ORIENTATIONS as u32) as usize;
    Orientation::ALL[idx]
}

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

    /// Current internal state (a valid seed to replay from here)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low bits of a power-of-two LCG cycle quickly; hand out the high half.
        self.state >> 16
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of values, cycling when exhausted
///
/// `next_range` returns each value modulo the requested range, so a script of
/// `[kind, color, orientation, ...]` indices reproduces exact pieces.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        Self { values, index: 0 }
    }

    /// Script that yields the given pieces in order, then repeats them
    pub fn from_pieces(pieces: &[(ShapeKind, BlockColor, Orientation)]) -> Self {
        let values: Vec<u32> = pieces
            .iter()
            .flat_map(|&(kind, color, orientation)| {
                [kind.index() as u32, color.index() as u32, orientation.index() as u32]
            })
            .collect();
        Self::new(values)
    }
}

impl RandomSource for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.index];
        self.index = (self.index + 1) % self.values.len();
        value
    }
}
