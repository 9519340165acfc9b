//! Forward prices, plain and quanto-adjusted.

use pk_core::{ensure, errors::Result, Rate, Real, Time, Volatility};

/// Forward price of an asset with continuous carry:
/// `F = S · exp((r − q)·t)`.
///
/// # Errors
/// Spot must be positive and time non-negative.
pub fn fwd_price(spot: Real, t: Time, int_rate: Rate, div_yield: Rate) -> Result<Real> {
    ensure!(spot > 0.0, "the spot must be positive, got {spot}");
    ensure!(t >= 0.0, "the time to expiration must be non-negative, got {t}");
    Ok(spot * ((int_rate - div_yield) * t).exp())
}

/// Quanto-adjusted forward price: the plain forward scaled by
/// `exp(−ρ · σ_asset · σ_fx · t)` to correct for the correlation between
/// the asset and the exchange rate it settles through.
///
/// # Errors
/// Spot must be positive, time non-negative, volatilities non-negative, and
/// the correlation within [−1, 1].
pub fn quanto_fwd_price(
    spot: Real,
    t: Time,
    int_rate: Rate,
    div_yield: Rate,
    asset_vol: Volatility,
    fx_vol: Volatility,
    correl: Real,
) -> Result<Real> {
    ensure!(asset_vol >= 0.0, "the asset volatility must be non-negative");
    ensure!(fx_vol >= 0.0, "the FX volatility must be non-negative");
    ensure!(
        (-1.0..=1.0).contains(&correl),
        "the correlation must be in [-1, 1], got {correl}"
    );
    let fwd = fwd_price(spot, t, int_rate, div_yield)?;
    Ok(fwd * (-correl * asset_vol * fx_vol * t).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn forward_with_carry() {
        let f = fwd_price(100.0, 1.0, 0.05, 0.02).unwrap();
        assert_abs_diff_eq!(f, 100.0 * 0.03_f64.exp(), epsilon = 1e-12);
    }

    #[test]
    fn forward_at_zero_time_is_spot() {
        assert_abs_diff_eq!(fwd_price(100.0, 0.0, 0.05, 0.02).unwrap(), 100.0);
    }

    #[test]
    fn quanto_reduces_to_plain_when_uncorrelated() {
        let plain = fwd_price(100.0, 2.0, 0.05, 0.01).unwrap();
        let quanto = quanto_fwd_price(100.0, 2.0, 0.05, 0.01, 0.2, 0.1, 0.0).unwrap();
        assert_abs_diff_eq!(quanto, plain, epsilon = 1e-12);
    }

    #[test]
    fn positive_correlation_lowers_the_quanto_forward() {
        let plain = fwd_price(100.0, 2.0, 0.05, 0.01).unwrap();
        let quanto = quanto_fwd_price(100.0, 2.0, 0.05, 0.01, 0.2, 0.1, 0.5).unwrap();
        assert_abs_diff_eq!(quanto, plain * (-0.5 * 0.2 * 0.1 * 2.0_f64).exp(), epsilon = 1e-12);
        assert!(quanto < plain);
    }

    #[test]
    fn input_validation() {
        assert!(fwd_price(0.0, 1.0, 0.05, 0.0).is_err());
        assert!(fwd_price(100.0, -1.0, 0.05, 0.0).is_err());
        assert!(quanto_fwd_price(100.0, 1.0, 0.05, 0.0, 0.2, 0.1, 1.5).is_err());
        assert!(quanto_fwd_price(100.0, 1.0, 0.05, 0.0, -0.2, 0.1, 0.0).is_err());
    }
}
