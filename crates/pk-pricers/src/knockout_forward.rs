//! The knockout forward: a forward contract that ceases to exist if the
//! asset touches a barrier below spot during a monitoring window.
//!
//! The contract pays `S_T − K` at expiry unless the continuously-monitored
//! running minimum reaches the barrier before the monitoring horizon
//! `t_ko ≤ T`.  The barrier-removed mass comes from the reflection
//! principle for geometric Brownian motion: for log-drift ν the probability
//! of staying above the barrier is
//! `N((ln(S/B) + νt)/σ√t) − (B/S)^(2ν/σ²) · N((ln(B/S) + νt)/σ√t)`,
//! applied once under the pricing measure (ν = r − q − σ²/2) for the strike
//! leg and once under the measure with drift ν + σ² for the asset leg.

use pk_core::{ensure, errors::Result, Rate, Real, Time, Volatility};
use pk_math::normal_cdf;

/// Probability that a GBM with log-drift `nu` stays above the barrier over
/// `[0, t]`, given `ln(S/B) > 0`.
fn survival_probability(log_s_over_b: Real, nu: Real, sigma: Volatility, t: Time) -> Real {
    let s = sigma * t.sqrt();
    let power = (2.0 * nu / (sigma * sigma) * -log_s_over_b).exp();
    normal_cdf((log_s_over_b + nu * t) / s) - power * normal_cdf((-log_s_over_b + nu * t) / s)
}

/// Price of a knockout forward contract in the Black-Scholes model.
///
/// `t_ko` is the end of the barrier monitoring window and may precede the
/// expiry `t_exp`.  Degenerate branches: a barrier at or above spot means
/// the contract is already knocked out; a non-positive barrier or an empty
/// monitoring window leaves a plain forward contract; zero volatility makes
/// the path deterministic and survival an indicator.
///
/// # Errors
/// Spot and strike must be positive, volatility non-negative, and
/// `0 ≤ t_ko ≤ t_exp`.
#[allow(clippy::too_many_arguments)]
pub fn ko_fwd(
    spot: Real,
    strike: Real,
    barrier: Real,
    t_exp: Time,
    t_ko: Time,
    int_rate: Rate,
    div_yield: Rate,
    sigma: Volatility,
) -> Result<Real> {
    ensure!(spot > 0.0, "the spot must be positive, got {spot}");
    ensure!(strike > 0.0, "the strike must be positive, got {strike}");
    ensure!(sigma >= 0.0, "the volatility must be non-negative, got {sigma}");
    ensure!(
        0.0 <= t_ko && t_ko <= t_exp,
        "need 0 <= t_ko <= t_exp, got t_ko = {t_ko}, t_exp = {t_exp}"
    );

    let (r, q) = (int_rate, div_yield);
    let plain = spot * (-q * t_exp).exp() - strike * (-r * t_exp).exp();

    if barrier > 0.0 && spot <= barrier {
        return Ok(0.0);
    }
    if barrier <= 0.0 || t_ko == 0.0 {
        return Ok(plain);
    }
    if sigma == 0.0 {
        // Deterministic path S·exp((r − q)u): the minimum over the window
        // sits at whichever end the carry pushes it to.
        let min_level = spot * ((r - q) * t_ko).exp().min(1.0);
        return Ok(if min_level > barrier { plain } else { 0.0 });
    }

    let log_s_over_b = (spot / barrier).ln();
    let nu = r - q - 0.5 * sigma * sigma;

    // Strike leg: survival probability under the pricing measure.
    let p_survive = survival_probability(log_s_over_b, nu, sigma, t_ko);
    // Asset leg: the same probability under the drift shifted by σ², which
    // absorbs E[S_t·1{survive}] = S·e^((r−q)t)·P̃(survive).
    let p_survive_asset = survival_probability(log_s_over_b, nu + sigma * sigma, sigma, t_ko);

    Ok(spot * (-q * t_exp).exp() * p_survive_asset - strike * (-r * t_exp).exp() * p_survive)
}
