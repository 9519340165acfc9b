//! Yield curves with constant-forward-rate interpolation.
//!
//! Whatever convention the input values carry, the curve is stored
//! canonically as a piecewise-constant **forward rate** function with a
//! breakpoint at time 0.  Piecewise-constant forwards make the log-discount
//! piecewise linear, so discount factors, spot rates, and forward rates all
//! come out of the exact integral of one [`PiecewisePolynomial`].

use pk_core::{ensure, errors::Result, DiscountFactor, Rate, Real, Time};
use pk_math::{PiecewisePolynomial, PolyOrder};

/// Convention of the values handed to [`YieldCurve::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YcValueType {
    /// Zero-coupon bond prices (discount factors) to each maturity.
    DiscountFactors,
    /// Continuously compounded spot rates to each maturity.
    SpotRates,
    /// Continuously compounded forward rates, each over the interval ending
    /// at its maturity.
    FwdRates,
}

impl YcValueType {
    /// Convert the raw integer tag used by the call surface.
    ///
    /// # Errors
    /// Anything other than 0, 1, or 2 is a validation error.
    pub fn from_tag(tag: i64) -> Result<Self> {
        match tag {
            0 => Ok(YcValueType::DiscountFactors),
            1 => Ok(YcValueType::SpotRates),
            2 => Ok(YcValueType::FwdRates),
            _ => Err(pk_core::Error::Validation(format!(
                "unknown yield curve value type {tag}, must be 0, 1, or 2"
            ))),
        }
    }
}

/// A yield curve defined by pillar maturities and values of a declared
/// convention.
#[derive(Debug, Clone)]
pub struct YieldCurve {
    /// Piecewise-constant forward rates; the value at breakpoint `t_i`
    /// governs the interval up to the next breakpoint.
    fwds: PiecewisePolynomial,
}

impl YieldCurve {
    /// Build a curve from pillar maturities and values.
    ///
    /// # Errors
    /// Maturities must be strictly increasing with the first strictly
    /// positive; lengths must match; discount factor inputs must be
    /// positive.
    pub fn new(maturities: &[Time], values: &[Real], value_type: YcValueType) -> Result<Self> {
        ensure!(!maturities.is_empty(), "need at least 1 maturity");
        ensure!(
            maturities.len() == values.len(),
            "maturities and values must have the same length, got {} and {}",
            maturities.len(),
            values.len()
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

        let fwd_values = match value_type {
            YcValueType::DiscountFactors => {
                forwards_from_spot_rates(maturities, &spot_rates_from_discounts(maturities, values)?)
            }
            YcValueType::SpotRates => forwards_from_spot_rates(maturities, values),
            YcValueType::FwdRates => values.to_vec(),
        };

        // Breakpoints: 0 plus every maturity except the last.  Value i
        // governs the interval ending at maturity i, and the last forward
        // extrapolates flat beyond the final pillar.
        let mut breakpoints = Vec::with_capacity(maturities.len());
        breakpoints.push(0.0);
        breakpoints.extend_from_slice(&maturities[..maturities.len() - 1]);

        let fwds = PiecewisePolynomial::new(&breakpoints, &fwd_values, PolyOrder::Constant)?;
        Ok(Self { fwds })
    }

    /// Discount factor `P(0, t)`.  `discount(0)` is exactly 1.
    pub fn discount(&self, t: Time) -> Result<DiscountFactor> {
        ensure!(t >= 0.0, "maturity must be non-negative, got {t}");
        Ok((-self.fwds.integral(0.0, t)).exp())
    }

    /// Forward discount factor `P(t1, t2) = P(0, t2) / P(0, t1)`.
    pub fn fwd_discount(&self, t1: Time, t2: Time) -> Result<DiscountFactor> {
        ensure!(
            0.0 <= t1 && t1 <= t2,
            "need 0 <= t1 <= t2, got t1 = {t1}, t2 = {t2}"
        );
        Ok((-self.fwds.integral(t1, t2)).exp())
    }

    /// Continuously compounded spot rate to maturity `t`; the instantaneous
    /// forward at 0 in the `t → 0` limit.
    pub fn spot_rate(&self, t: Time) -> Result<Rate> {
        ensure!(t >= 0.0, "maturity must be non-negative, got {t}");
        if t == 0.0 {
            return Ok(self.fwds.eval(0.0, 0));
        }
        Ok(self.fwds.integral(0.0, t) / t)
    }

    /// Continuously compounded forward rate between `t1` and `t2`, exactly
    /// `(ln P(t1) − ln P(t2)) / (t2 − t1)`; the instantaneous forward at
    /// `t1` when the two times coincide.
    pub fn fwd_rate(&self, t1: Time, t2: Time) -> Result<Rate> {
        ensure!(
            0.0 <= t1 && t1 <= t2,
            "need 0 <= t1 <= t2, got t1 = {t1}, t2 = {t2}"
        );
        if t1 == t2 {
            return Ok(self.fwds.eval(t1, 0));
        }
        Ok(self.fwds.integral(t1, t2) / (t2 - t1))
    }
}

/// Spot rates implied by zero-coupon bond prices.
fn spot_rates_from_discounts(maturities: &[Time], discounts: &[Real]) -> Result<Vec<Rate>> {
    ensure!(
        discounts.iter().all(|&p| p > 0.0),
        "discount factors must be positive"
    );
    Ok(maturities
        .iter()
        .zip(discounts)
        .map(|(&t, &p)| -p.ln() / t)
        .collect())
}

/// Per-interval forward rates implied by spot rates: the first spot rate
/// covers `[0, t_0]`, thereafter `f_i = (R_i t_i − R_{i−1} t_{i−1}) /
/// (t_i − t_{i−1})`.
fn forwards_from_spot_rates(maturities: &[Time], rates: &[Rate]) -> Vec<Rate> {
    let mut fwds = Vec::with_capacity(rates.len());
    fwds.push(rates[0]);
    for i in 1..rates.len() {
        let dt = maturities[i] - maturities[i - 1];
        fwds.push((rates[i] * maturities[i] - rates[i - 1] * maturities[i - 1]) / dt);
    }
    fwds
}
