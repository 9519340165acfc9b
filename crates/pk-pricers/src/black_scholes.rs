//! Closed-form Black-Scholes pricing of vanilla and digital European
//! options.
//!
//! The call/put symmetry is folded into single formulas through the signed
//! payoff flag φ.  Zero time-to-expiry and zero volatility resolve to the
//! intrinsic/limiting value through an explicit degenerate branch that
//! saturates d₁/d₂ instead of dividing by zero.

use pk_core::{ensure, errors::Result, Rate, Real, Time, Volatility};
use pk_instruments::OptionType;
use pk_math::{normal_cdf, normal_pdf};

/// Price and sensitivities of a European option, in the fixed reporting
/// order of the call surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionGreeks {
    /// Present value.
    pub price: Real,
    /// ∂price/∂spot.
    pub delta: Real,
    /// ∂²price/∂spot².
    pub gamma: Real,
    /// −∂price/∂time-to-expiry (per year of decay).
    pub theta: Real,
    /// ∂price/∂volatility (per unit of absolute vol).
    pub vega: Real,
}

/// `d1` and `d2` of the Black-Scholes formula.  When the total standard
/// deviation vanishes, both saturate to ±1e15 according to the sign of the
/// forward moneyness, which drives the normal CDF to its 0/1 limits.
fn d1_d2(spot: Real, strike: Real, r: Rate, q: Rate, sigma: Volatility, t: Time) -> (Real, Real) {
    let std_dev = sigma * t.sqrt();
    if std_dev > 0.0 {
        let d1 = ((spot / strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / std_dev;
        (d1, d1 - std_dev)
    } else {
        let fwd = spot * ((r - q) * t).exp();
        let big = if fwd > strike { 1e15 } else { -1e15 };
        (big, big)
    }
}

fn validate_inputs(spot: Real, strike: Real, sigma: Volatility, t: Time) -> Result<()> {
    ensure!(spot > 0.0, "the spot must be positive, got {spot}");
    ensure!(strike > 0.0, "the strike must be positive, got {strike}");
    ensure!(sigma >= 0.0, "the volatility must be non-negative, got {sigma}");
    ensure!(t >= 0.0, "the time to expiration must be non-negative, got {t}");
    Ok(())
}

/// Price and Greeks of a vanilla European option in the Black-Scholes
/// model.
///
/// # Errors
/// Spot and strike must be positive; volatility and time to expiration must
/// be non-negative.
pub fn euro_bs(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    t: Time,
    int_rate: Rate,
    div_yield: Rate,
    sigma: Volatility,
) -> Result<OptionGreeks> {
    validate_inputs(spot, strike, sigma, t)?;
    let phi = option_type.sign();
    let (r, q) = (int_rate, div_yield);
    let df_r = (-r * t).exp();
    let df_q = (-q * t).exp();

    let std_dev = sigma * t.sqrt();
    if std_dev == 0.0 {
        // Degenerate: the terminal distribution is a point mass at the
        // forward, so the option is worth its discounted intrinsic value.
        let fwd = spot * ((r - q) * t).exp();
        let intrinsic = df_r * (phi * (fwd - strike)).max(0.0);
        let itm = phi * (fwd - strike) > 0.0;
        return Ok(OptionGreeks {
            price: intrinsic,
            delta: if itm { phi * df_q } else { 0.0 },
            gamma: 0.0,
            theta: if itm {
                phi * (q * spot * df_q - r * strike * df_r)
            } else {
                0.0
            },
            vega: 0.0,
        });
    }

    let (d1, d2) = d1_d2(spot, strike, r, q, sigma, t);
    let sqrt_t = t.sqrt();
    let nd1 = normal_cdf(phi * d1);
    let nd2 = normal_cdf(phi * d2);
    let npd1 = normal_pdf(d1);

    let price = phi * (spot * df_q * nd1 - strike * df_r * nd2);
    let delta = phi * df_q * nd1;
    let gamma = df_q * npd1 / (spot * std_dev);
    let vega = spot * df_q * npd1 * sqrt_t;
    let theta = -(spot * df_q * npd1 * sigma) / (2.0 * sqrt_t) - phi * r * strike * df_r * nd2
        + phi * q * spot * df_q * nd1;

    Ok(OptionGreeks {
        price,
        delta,
        gamma,
        theta,
        vega,
    })
}

/// Price and Greeks of a digital (cash-or-nothing) European option paying
/// one unit of currency when it finishes in the money.
///
/// # Errors
/// Spot and strike must be positive; volatility and time to expiration must
/// be non-negative.
pub fn digi_bs(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    t: Time,
    int_rate: Rate,
    div_yield: Rate,
    sigma: Volatility,
) -> Result<OptionGreeks> {
    validate_inputs(spot, strike, sigma, t)?;
    let phi = option_type.sign();
    let (r, q) = (int_rate, div_yield);
    let df_r = (-r * t).exp();

    let std_dev = sigma * t.sqrt();
    if std_dev == 0.0 {
        // Degenerate: the digital pays iff the point-mass forward is in the
        // money; only the discounting keeps bleeding value.
        let fwd = spot * ((r - q) * t).exp();
        let itm = phi * (fwd - strike) > 0.0;
        let price = if itm { df_r } else { 0.0 };
        return Ok(OptionGreeks {
            price,
            delta: 0.0,
            gamma: 0.0,
            theta: r * price,
            vega: 0.0,
        });
    }

    let (d1, d2) = d1_d2(spot, strike, r, q, sigma, t);
    let sqrt_t = t.sqrt();
    let npd2 = normal_pdf(d2);

    let price = df_r * normal_cdf(phi * d2);
    let delta = phi * df_r * npd2 / (spot * std_dev);
    let gamma = -phi * df_r * npd2 * d1 / (spot * spot * sigma * sigma * t);
    let vega = -phi * df_r * npd2 * d1 / sigma;
    // ∂d2/∂T, then θ = r·price − φ·e^(−rT)·n(d2)·∂d2/∂T
    let dd2_dt = (r - q) / std_dev - 0.5 * sigma / sqrt_t - 0.5 * d2 / t;
    let theta = r * price - phi * df_r * npd2 * dd2_dt;

    Ok(OptionGreeks {
        price,
        delta,
        gamma,
        theta,
        vega,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const S: Real = 100.0;
    const K: Real = 100.0;
    const R: Rate = 0.05;
    const Q: Rate = 0.0;
    const SIGMA: Volatility = 0.20;
    const T: Time = 1.0;

    #[test]
    fn euro_call_reference_value() {
        let g = euro_bs(OptionType::Call, S, K, T, R, Q, SIGMA).unwrap();
        assert_abs_diff_eq!(g.price, 10.4506, epsilon = 1e-3);
        assert!(g.delta > 0.5 && g.delta < 0.8, "delta = {}", g.delta);
        assert!(g.gamma > 0.0);
        assert!(g.vega > 0.0);
        assert!(g.theta < 0.0, "ATM call theta should be negative");
    }

    #[test]
    fn euro_put_call_parity() {
        let call = euro_bs(OptionType::Call, S, K, T, R, Q, SIGMA).unwrap();
        let put = euro_bs(OptionType::Put, S, K, T, R, Q, SIGMA).unwrap();
        let parity = S * (-Q * T).exp() - K * (-R * T).exp();
        assert_abs_diff_eq!(call.price - put.price, parity, epsilon = 1e-10);
        // Deltas differ by the carry-discounted unit.
        assert_abs_diff_eq!(call.delta - put.delta, (-Q * T).exp(), epsilon = 1e-10);
        // Gamma and vega are shared between call and put.
        assert_abs_diff_eq!(call.gamma, put.gamma, epsilon = 1e-12);
        assert_abs_diff_eq!(call.vega, put.vega, epsilon = 1e-10);
    }

    #[test]
    fn euro_put_call_parity_with_dividends() {
        let (s, k, r, q, sigma, t) = (100.0, 105.0, 0.08, 0.03, 0.25, 0.5);
        let call = euro_bs(OptionType::Call, s, k, t, r, q, sigma).unwrap();
        let put = euro_bs(OptionType::Put, s, k, t, r, q, sigma).unwrap();
        let parity = s * (-q * t).exp() - k * (-r * t).exp();
        assert_abs_diff_eq!(call.price - put.price, parity, epsilon = 1e-10);
    }

    #[test]
    fn euro_zero_vol_is_discounted_intrinsic() {
        let g = euro_bs(OptionType::Call, 100.0, 95.0, 1.0, 0.05, 0.0, 0.0).unwrap();
        let expected = 100.0 - 95.0 * (-0.05_f64).exp();
        assert_abs_diff_eq!(g.price, expected, epsilon = 1e-12);
        assert_abs_diff_eq!(g.delta, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.gamma, 0.0);
        assert_abs_diff_eq!(g.vega, 0.0);
    }

    #[test]
    fn euro_zero_expiry_is_intrinsic() {
        let call = euro_bs(OptionType::Call, 110.0, 100.0, 0.0, 0.05, 0.02, 0.2).unwrap();
        assert_abs_diff_eq!(call.price, 10.0, epsilon = 1e-12);
        let put = euro_bs(OptionType::Put, 90.0, 100.0, 0.0, 0.05, 0.02, 0.2).unwrap();
        assert_abs_diff_eq!(put.price, 10.0, epsilon = 1e-12);
        let otm = euro_bs(OptionType::Put, 110.0, 100.0, 0.0, 0.05, 0.02, 0.2).unwrap();
        assert_abs_diff_eq!(otm.price, 0.0);
    }

    #[test]
    fn euro_vega_matches_bump() {
        let up = euro_bs(OptionType::Call, S, K, T, R, Q, SIGMA + 1e-5).unwrap();
        let dn = euro_bs(OptionType::Call, S, K, T, R, Q, SIGMA - 1e-5).unwrap();
        let g = euro_bs(OptionType::Call, S, K, T, R, Q, SIGMA).unwrap();
        assert_abs_diff_eq!(g.vega, (up.price - dn.price) / 2e-5, epsilon = 1e-4);
    }

    #[test]
    fn euro_delta_gamma_match_bumps() {
        let h = 1e-4;
        let up = euro_bs(OptionType::Put, S + h, K, T, R, Q, SIGMA).unwrap();
        let dn = euro_bs(OptionType::Put, S - h, K, T, R, Q, SIGMA).unwrap();
        let g = euro_bs(OptionType::Put, S, K, T, R, Q, SIGMA).unwrap();
        assert_abs_diff_eq!(g.delta, (up.price - dn.price) / (2.0 * h), epsilon = 1e-6);
        assert_abs_diff_eq!(
            g.gamma,
            (up.price - 2.0 * g.price + dn.price) / (h * h),
            epsilon = 1e-4
        );
    }

    #[test]
    fn euro_theta_matches_bump() {
        let h = 1e-6;
        let up = euro_bs(OptionType::Call, S, K, T + h, R, Q, SIGMA).unwrap();
        let dn = euro_bs(OptionType::Call, S, K, T - h, R, Q, SIGMA).unwrap();
        let g = euro_bs(OptionType::Call, S, K, T, R, Q, SIGMA).unwrap();
        assert_abs_diff_eq!(g.theta, -(up.price - dn.price) / (2.0 * h), epsilon = 1e-5);
    }

    #[test]
    fn digi_reference_value() {
        // e^(-0.05)·N(0.15)
        let g = digi_bs(OptionType::Call, S, K, T, R, Q, SIGMA).unwrap();
        assert_abs_diff_eq!(g.price, 0.53233, epsilon = 1e-4);
    }

    #[test]
    fn digi_call_put_parity() {
        // Digital call + digital put pay one unit in every state.
        let call = digi_bs(OptionType::Call, S, K, T, R, Q, SIGMA).unwrap();
        let put = digi_bs(OptionType::Put, S, K, T, R, Q, SIGMA).unwrap();
        assert_abs_diff_eq!(call.price + put.price, (-R * T).exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(call.delta + put.delta, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(call.vega + put.vega, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn digi_greeks_match_bumps() {
        let h = 1e-4;
        let up = digi_bs(OptionType::Call, S + h, K, T, R, Q, SIGMA).unwrap();
        let dn = digi_bs(OptionType::Call, S - h, K, T, R, Q, SIGMA).unwrap();
        let g = digi_bs(OptionType::Call, S, K, T, R, Q, SIGMA).unwrap();
        assert_abs_diff_eq!(g.delta, (up.price - dn.price) / (2.0 * h), epsilon = 1e-6);
        assert_abs_diff_eq!(
            g.gamma,
            (up.price - 2.0 * g.price + dn.price) / (h * h),
            epsilon = 1e-4
        );

        let vu = digi_bs(OptionType::Call, S, K, T, R, Q, SIGMA + 1e-5).unwrap();
        let vd = digi_bs(OptionType::Call, S, K, T, R, Q, SIGMA - 1e-5).unwrap();
        assert_abs_diff_eq!(g.vega, (vu.price - vd.price) / 2e-5, epsilon = 1e-5);

        let tu = digi_bs(OptionType::Call, S, K, T + 1e-6, R, Q, SIGMA).unwrap();
        let td = digi_bs(OptionType::Call, S, K, T - 1e-6, R, Q, SIGMA).unwrap();
        assert_abs_diff_eq!(g.theta, -(tu.price - td.price) / 2e-6, epsilon = 1e-5);
    }

    #[test]
    fn digi_zero_vol_is_discounted_indicator() {
        let itm = digi_bs(OptionType::Call, 110.0, 100.0, 1.0, 0.05, 0.0, 0.0).unwrap();
        assert_abs_diff_eq!(itm.price, (-0.05_f64).exp(), epsilon = 1e-12);
        let otm = digi_bs(OptionType::Put, 110.0, 100.0, 1.0, 0.05, 0.0, 0.0).unwrap();
        assert_abs_diff_eq!(otm.price, 0.0);
    }

    #[test]
    fn input_validation() {
        assert!(euro_bs(OptionType::Call, -1.0, K, T, R, Q, SIGMA).is_err());
        assert!(euro_bs(OptionType::Call, S, 0.0, T, R, Q, SIGMA).is_err());
        assert!(euro_bs(OptionType::Call, S, K, -1.0, R, Q, SIGMA).is_err());
        assert!(digi_bs(OptionType::Call, S, K, T, R, Q, -0.2).is_err());
    }
}
