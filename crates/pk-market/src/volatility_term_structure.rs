//! Volatility term structures with constant-forward-vol interpolation.
//!
//! The canonical representation is a piecewise-constant **forward variance
//! rate** (variance per unit time) with a breakpoint at time 0.  Total
//! variance to any maturity is the exact integral of that function, which
//! makes forward variance additive: `fwdVar(t1, t2) = V(t2) − V(t1)`.

use pk_core::{ensure, fail, errors::Result, Time, Volatility};
use pk_math::{PiecewisePolynomial, PolyOrder};

/// Convention of the values handed to [`VolatilityTermStructure::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolValueType {
    /// Spot volatilities to each maturity.
    SpotVols,
    /// Forward volatilities, each over the interval ending at its maturity.
    FwdVols,
}

impl VolValueType {
    /// Convert the raw integer tag used by the call surface.
    ///
    /// # Errors
    /// Anything other than 0 or 1 is a validation error.
    pub fn from_tag(tag: i64) -> Result<Self> {
        match tag {
            0 => Ok(VolValueType::SpotVols),
            1 => Ok(VolValueType::FwdVols),
            _ => Err(pk_core::Error::Validation(format!(
                "unknown volatility value type {tag}, must be 0 or 1"
            ))),
        }
    }
}

/// A deterministic volatility term structure defined by pillar maturities
/// and volatilities of a declared convention.
#[derive(Debug, Clone)]
pub struct VolatilityTermStructure {
    /// Piecewise-constant forward variance rates (σ² per unit time).
    var_rates: PiecewisePolynomial,
}

impl VolatilityTermStructure {
    /// Build a term structure from pillar maturities and volatilities.
    ///
    /// # Errors
    /// * `Validation` for empty or mismatched inputs, non-increasing or
    ///   non-positive maturities, or negative volatilities.
    /// * `Domain` when spot-vol inputs imply decreasing total variance:
    ///   an internally inconsistent term structure, surfaced rather than
    ///   clamped.
    pub fn new(maturities: &[Time], vols: &[Volatility], value_type: VolValueType) -> Result<Self> {
        ensure!(!maturities.is_empty(), "need at least 1 maturity");
        ensure!(
            maturities.len() == vols.len(),
            "maturities and volatilities must have the same length, got {} and {}",
            maturities.len(),
            vols.len()
        );
        ensure!(
            maturities[0] > 0.0,
            "the first maturity must be positive, got {}",
            maturities[0]
        );
        ensure!(
            maturities.windows(2).all(|w| w[0] < w[1]),
            "maturities must be strictly increasing"
        );
        ensure!(
            vols.iter().all(|&v| v >= 0.0),
            "volatilities must be non-negative"
        );

        let rate_values = match value_type {
            VolValueType::SpotVols => variance_rates_from_spot_vols(maturities, vols)?,
            VolValueType::FwdVols => vols.iter().map(|&v| v * v).collect(),
        };

        let mut breakpoints = Vec::with_capacity(maturities.len());
        breakpoints.push(0.0);
        breakpoints.extend_from_slice(&maturities[..maturities.len() - 1]);

        let var_rates = PiecewisePolynomial::new(&breakpoints, &rate_values, PolyOrder::Constant)?;
        Ok(Self { var_rates })
    }

    /// Total variance accumulated from 0 to `t`.
    fn spot_var(&self, t: Time) -> f64 {
        self.var_rates.integral(0.0, t)
    }

    /// Spot volatility to maturity `t`; the instantaneous forward vol at 0
    /// in the `t → 0` limit.
    pub fn spot_vol(&self, t: Time) -> Result<Volatility> {
        ensure!(t >= 0.0, "maturity must be non-negative, got {t}");
        if t == 0.0 {
            return Ok(self.var_rates.eval(0.0, 0).sqrt());
        }
        Ok((self.spot_var(t) / t).sqrt())
    }

    /// Forward volatility between `t1` and `t2`, from variance additivity;
    /// the instantaneous forward vol at `t1` when the two times coincide.
    pub fn fwd_vol(&self, t1: Time, t2: Time) -> Result<Volatility> {
        ensure!(
            0.0 <= t1 && t1 <= t2,
            "need 0 <= t1 <= t2, got t1 = {t1}, t2 = {t2}"
        );
        if t1 == t2 {
            return Ok(self.var_rates.eval(t1, 0).sqrt());
        }
        Ok((self.var_rates.integral(t1, t2) / (t2 - t1)).sqrt())
    }
}

/// Forward variance rates implied by spot volatilities: the increments of
/// total variance `σ_i² t_i` over each pillar interval.
fn variance_rates_from_spot_vols(maturities: &[Time], vols: &[Volatility]) -> Result<Vec<f64>> {
    let mut rates = Vec::with_capacity(vols.len());
    rates.push(vols[0] * vols[0]);
    for i in 1..vols.len() {
        let dvar = vols[i] * vols[i] * maturities[i] - vols[i - 1] * vols[i - 1] * maturities[i - 1];
        if dvar < 0.0 {
            fail!(
                "negative forward variance between maturities {} and {}: \
                 total variance must be non-decreasing",
                maturities[i - 1],
                maturities[i]
            );
        }
        rates.push(dvar / (maturities[i] - maturities[i - 1]));
    }
    Ok(rates)
}
