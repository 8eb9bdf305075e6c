//! RNG module - uniform random piece selection
//!
//! Pieces are drawn uniformly and independently from the seven kinds. There is no
//! bag and no anti-repeat rule, so the same kind may come up several times in a row.
//!
//! Also provides a scripted source for replays and exact test scenarios.

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
    /// Scales by the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current RNG state (reseeding with it continues the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Where the next piece comes from
pub trait PieceSource: std::fmt::Debug + Send {
    fn next_piece(&mut self) -> PieceKind;
}

/// Uniform random piece picker
#[derive(Debug, Clone)]
pub struct RandomPieces {
    rng: SimpleRng,
}

impl RandomPieces {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for RandomPieces {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for RandomPieces {
    fn next_piece(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// Fixed, cycling piece sequence
#[derive(Debug, Clone)]
pub struct ScriptedPieces {
    pieces: Vec<PieceKind>,
    index: usize,
}

impl ScriptedPieces {
    /// Cycle through `pieces`. An empty script cycles the whole catalog.
    pub fn new(pieces: &[PieceKind]) -> Self {
        let pieces = if pieces.is_empty() {
            PieceKind::ALL.to_vec()
        } else {
            pieces.to_vec()
        };
        Self { pieces, index: 0 }
    }

    /// The same kind forever
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(&[kind])
    }
}

impl PieceSource for ScriptedPieces {
    fn next_piece(&mut self) -> PieceKind {
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index = (self.index + 1) % self.pieces.len();
        piece
    }
}
