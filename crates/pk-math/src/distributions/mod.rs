//! Probability distributions.

/// The standard normal distribution.
pub mod normal;

pub use normal::{normal_cdf, normal_cdf_inverse, normal_pdf};

// The error function pair used by the normal distribution, re-exported for
// callers that work directly in erf space.
pub use statrs::function::erf::{erf, erf_inv};
