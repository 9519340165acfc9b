//! The standard normal distribution and its inverse.
//!
//! The CDF and its inverse are expressed through the complementary error
//! function from `statrs`, which keeps both accurate well into the tails.

use pk_core::Real;
use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::{PI, SQRT_2};

/// The standard normal probability density function.
///
/// `φ(x) = exp(-x²/2) / √(2π)`
#[inline]
pub fn normal_pdf(x: Real) -> Real {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// The standard normal cumulative distribution function Φ(x).
///
/// `Φ(x) = erfc(-x/√2) / 2`
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    0.5 * erfc(-x / SQRT_2)
}

/// The inverse standard normal CDF (probit function).
///
/// `Φ⁻¹(p) = -√2 · erfc⁻¹(2p)`
///
/// # Panics
/// `p` must lie strictly inside (0, 1).
#[inline]
pub fn normal_cdf_inverse(p: Real) -> Real {
    assert!(p > 0.0 && p < 1.0, "p must be in (0, 1), got {p}");
    -SQRT_2 * erfc_inv(2.0 * p)
}
