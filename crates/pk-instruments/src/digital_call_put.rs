//! The digital (cash-or-nothing) call/put payoff.

use crate::option_type::OptionType;
use crate::product::Product;
use pk_core::{ensure, errors::Result, Real, Time};

/// A digital call or put paying one unit of currency at expiry when it
/// finishes in the money.
#[derive(Debug, Clone)]
pub struct DigitalCallPut {
    option_type: OptionType,
    strike: Real,
    fix_times: Vec<Time>,
    pay_times: Vec<Time>,
}

impl DigitalCallPut {
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
        Ok(Self {
            option_type,
            strike,
            fix_times: vec![time_to_exp],
            pay_times: vec![time_to_exp],
        })
    }
}

impl Product for DigitalCallPut {
    fn fix_times(&self) -> &[Time] {
        &self.fix_times
    }

    fn pay_times(&self) -> &[Time] {
        &self.pay_times
    }

    fn eval(&self, path: &[Real], pay_amounts: &mut [Real]) {
        let s_t = path[path.len() - 1];
        let in_the_money = match self.option_type {
            OptionType::Call => s_t > self.strike,
            OptionType::Put => s_t < self.strike,
        };
        pay_amounts[0] = if in_the_money { 1.0 } else { 0.0 };
    }
}
