//! Uniform random number generators.
//!
//! Every generator yields deviates in the **open** interval (0, 1) so that
//! they can be pushed through the inverse normal CDF without producing
//! infinities.  The Mersenne Twister wraps the `rand_mt` crate; the MINSTD
//! linear-congruential and RANLUX subtract-with-borrow generators, and the
//! Sobol low-discrepancy sequence, are implemented here.

use pk_core::Real;
use rand_mt::Mt19937GenRand64;

/// RANLUX generators (luxury levels 3 and 4).
pub mod ranlux;

/// Sobol low-discrepancy sequence generator.
pub mod sobol;

pub use ranlux::RanluxRng;
pub use sobol::SobolRsg;

/// A source of uniform deviates in the open interval (0, 1).
pub trait UniformRng {
    /// Generate the next uniform deviate.
    fn next_uniform(&mut self) -> Real;
}

// ── MINSTD ───────────────────────────────────────────────────────────────────

/// The "minimal standard" Lehmer linear-congruential generator.
///
/// `x_{n+1} = 48271 · x_n mod (2³¹ − 1)`, with the state always in
/// `[1, 2³¹ − 2]`, so the produced deviate can never be exactly 0 or 1.
#[derive(Debug, Clone)]
pub struct MinStdRand {
    state: u64,
}

impl MinStdRand {
    const A: u64 = 48271;
    const M: u64 = 2_147_483_647; // 2^31 - 1

    /// Create a new generator.  A seed congruent to 0 is mapped to 1, since
    /// 0 is a fixed point of the recurrence.
    pub fn new(seed: u32) -> Self {
        let s = seed as u64 % Self::M;
        Self {
            state: if s == 0 { 1 } else { s },
        }
    }
}

impl Default for MinStdRand {
    fn default() -> Self {
        Self::new(1)
    }
}

impl UniformRng for MinStdRand {
    fn next_uniform(&mut self) -> Real {
        self.state = Self::A * self.state % Self::M;
        self.state as Real / Self::M as Real
    }
}

// ── Mersenne Twister ─────────────────────────────────────────────────────────

/// A uniform generator based on the 64-bit Mersenne Twister MT19937-64.
pub struct MersenneTwisterRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }
}

impl Default for MersenneTwisterRng {
    /// The generator with the reference seed 5489.
    fn default() -> Self {
        Self::new(5489)
    }
}

impl UniformRng for MersenneTwisterRng {
    fn next_uniform(&mut self) -> Real {
        // 53-bit mantissa; reject the all-zero draw to stay inside (0, 1).
        loop {
            let u = (self.rng.next_u64() >> 11) as Real * (1.0 / (1u64 << 53) as Real);
            if u > 0.0 {
                return u;
            }
        }
    }
}
