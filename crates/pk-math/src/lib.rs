//! # pk-math
//!
//! Mathematical building blocks for pricekit: piecewise polynomials,
//! polynomial root bracketing and refinement, the standard normal
//! distribution (via statrs' error functions), uniform random number
//! generators, and a sample-statistics accumulator.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison utilities.
pub mod comparison;

/// Probability distributions.
pub mod distributions;

/// Piecewise polynomial functions.
pub mod piecewise_polynomial;

/// Plain polynomials and root finding.
pub mod polynomial;

/// Uniform random number generators.
pub mod random_numbers;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::{close, close_enough};
pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use piecewise_polynomial::{PiecewisePolynomial, PolyOrder};
pub use polynomial::Polynomial;
pub use random_numbers::{MersenneTwisterRng, MinStdRand, RanluxRng, SobolRsg, UniformRng};
pub use statistics::Statistics;
