//! RNG module - seeded randomness for board generation, refills and reshuffles
//!
//! The simulation only needs uniform integers in `[0, n)`, expressed by the
//! [`RandomSource`] trait so callers can plug in their own generator.
//! [`SimpleRng`] is the deterministic default: same seed, same board.

/// A source of uniform random integers
pub trait RandomSource {
    /// Uniform value in `[0, n)`. `n` must be non-zero.
    fn next_below(&mut self, n: u32) -> u32;
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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_below(&mut self, n: u32) -> u32 {
        debug_assert!(n > 0, "next_below(0)");
        if n <= 1 {
            return 0;
        }
        // Multiply-shift keeps the high bits; the low bits of an LCG are periodic.
        // Rejecting the biased low zone makes the result exactly uniform.
        let threshold = n.wrapping_neg() % n;
        loop {
            let m = (self.next_u32() as u64) * (n as u64);
            if (m as u32) >= threshold {
                return (m >> 32) as u32;
            }
        }
    }
}

/// Shuffle a slice using Fisher-Yates
pub fn shuffle<T>(slice: &mut [T], rng: &mut impl RandomSource) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_below((i + 1) as u32) as usize;
        slice.swap(i, j);
    }
}
