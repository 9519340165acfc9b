//! Conversions between periodically and continuously compounded rates.

use crate::errors::Result;
use crate::{ensure, Rate};

/// Continuously compounded rate equivalent to a periodically compounded one.
///
/// `r_cc = f · ln(1 + r/f)` where `f` is the annual compounding frequency.
///
/// # Errors
/// `annfreq` must be positive, and `1 + r/f` must be positive for the
/// logarithm to be defined.
pub fn to_cont_cmpd(rate: Rate, annfreq: u32) -> Result<Rate> {
    ensure!(annfreq > 0, "the annual frequency must be positive");
    let f = annfreq as f64;
    let growth = 1.0 + rate / f;
    ensure!(
        growth > 0.0,
        "rate {rate} is below the -{f} floor for frequency {annfreq}"
    );
    Ok(f * growth.ln())
}

/// Periodically compounded rate equivalent to a continuously compounded one.
///
/// `r = f · (e^(r_cc/f) − 1)` where `f` is the annual compounding frequency.
///
/// # Errors
/// `annfreq` must be positive.
pub fn from_cont_cmpd(rate: Rate, annfreq: u32) -> Result<Rate> {
    ensure!(annfreq > 0, "the annual frequency must be positive");
    let f = annfreq as f64;
    Ok(f * ((rate / f).exp() - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn roundtrip_semiannual() {
        let r = 0.05;
        let cc = to_cont_cmpd(r, 2).unwrap();
        let back = from_cont_cmpd(cc, 2).unwrap();
        assert_abs_diff_eq!(back, r, epsilon = 1e-14);
    }

    #[test]
    fn continuous_rate_is_below_periodic() {
        // ln(1 + x) < x for x > 0
        let cc = to_cont_cmpd(0.08, 1).unwrap();
        assert!(cc < 0.08);
        assert_abs_diff_eq!(cc, 1.08_f64.ln(), epsilon = 1e-15);
    }

    #[test]
    fn zero_frequency_rejected() {
        assert!(to_cont_cmpd(0.05, 0).is_err());
        assert!(from_cont_cmpd(0.05, 0).is_err());
    }
}
