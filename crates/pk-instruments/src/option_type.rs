//! Call/put direction.

use pk_core::{errors::Result, Real};

/// The direction of an option payoff.
///
/// The signed value folds the call/put symmetry into single pricing
/// formulas: φ = +1 for calls, −1 for puts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// A call: pays when the asset finishes above the strike.
    Call,
    /// A put: pays when the asset finishes below the strike.
    Put,
}

impl OptionType {
    /// The signed payoff flag φ.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Convert the raw payoff flag used by the call surface.
    ///
    /// # Errors
    /// Anything other than 1 or −1 is a validation error.
    pub fn from_flag(flag: i32) -> Result<Self> {
        match flag {
            1 => Ok(OptionType::Call),
            -1 => Ok(OptionType::Put),
            _ => Err(pk_core::Error::Validation(format!(
                "the payoff flag must be 1 (call) or -1 (put), got {flag}"
            ))),
        }
    }
}
