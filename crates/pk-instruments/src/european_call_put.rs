//! The European call/put payoff.

use crate::option_type::OptionType;
use crate::product::Product;
use pk_core::{ensure, errors::Result, Real, Time};

/// A European call or put: one fixing at expiry, one payment at expiry.
#[derive(Debug, Clone)]
pub struct EuropeanCallPut {
    option_type: OptionType,
    strike: Real,
    fix_times: Vec<Time>,
    pay_times: Vec<Time>,
}

impl EuropeanCallPut {
    /// Create the payoff.
    ///
    /// # Errors
    /// The strike and the time to expiration must be positive.
    pub fn new(option_type: OptionType, strike: Real, time_to_exp: Time) -> Result<Self> {
        ensure!(strike > 0.0, "the strike must be positive, got {strike}");
        ensure!(
            time_to_exp > 0.0,
            "the time to expiration must be positive, got {time_to_exp}"
        );
        // Settles at expiration.
        Ok(Self {
            option_type,
            strike,
            fix_times: vec![time_to_exp],
            pay_times: vec![time_to_exp],
        })
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// The payoff direction.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }
}

impl Product for EuropeanCallPut {
    fn fix_times(&self) -> &[Time] {
        &self.fix_times
    }

    fn pay_times(&self) -> &[Time] {
        &self.pay_times
    }

    fn eval(&self, path: &[Real], pay_amounts: &mut [Real]) {
        let s_t = path[path.len() - 1];
        let phi = self.option_type.sign();
        pay_amounts[0] = (phi * (s_t - self.strike)).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn construction_validation() {
        assert!(EuropeanCallPut::new(OptionType::Call, 0.0, 1.0).is_err());
        assert!(EuropeanCallPut::new(OptionType::Call, 100.0, 0.0).is_err());
        assert!(EuropeanCallPut::new(OptionType::Call, 100.0, 1.0).is_ok());
    }

    #[test]
    fn call_and_put_payoffs() {
        let call = EuropeanCallPut::new(OptionType::Call, 100.0, 1.0).unwrap();
        let put = EuropeanCallPut::new(OptionType::Put, 100.0, 1.0).unwrap();
        let mut pay = [0.0];

        call.eval(&[110.0], &mut pay);
        assert_abs_diff_eq!(pay[0], 10.0);
        call.eval(&[90.0], &mut pay);
        assert_abs_diff_eq!(pay[0], 0.0);

        put.eval(&[90.0], &mut pay);
        assert_abs_diff_eq!(pay[0], 10.0);
        put.eval(&[110.0], &mut pay);
        assert_abs_diff_eq!(pay[0], 0.0);
    }

    #[test]
    fn single_fixing_at_expiry() {
        let call = EuropeanCallPut::new(OptionType::Call, 100.0, 2.5).unwrap();
        assert_eq!(call.fix_times(), &[2.5]);
        assert_eq!(call.pay_times(), &[2.5]);
    }
}
