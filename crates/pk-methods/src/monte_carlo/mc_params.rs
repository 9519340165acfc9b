//! Monte Carlo configuration.
//!
//! Each knob is a closed enumeration; an unknown selector is a validation
//! error at parse time, never a silent fallback.  The configuration is
//! resolved to concrete generators once, at pricer construction.

use pk_core::{errors::Result, Error};
use std::str::FromStr;

/// The uniform random number generator driving the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrngKind {
    /// The "minimal standard" Lehmer linear-congruential generator.
    MinStdRand,
    /// The MT19937 Mersenne Twister.
    Mt19937,
    /// RANLUX at luxury level 3.
    Ranlux3,
    /// RANLUX at luxury level 4.
    Ranlux4,
    /// The Sobol low-discrepancy sequence.
    Sobol,
}

impl FromStr for UrngKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "MINSTDRAND" => Ok(UrngKind::MinStdRand),
            "MT19937" => Ok(UrngKind::Mt19937),
            "RANLUX3" => Ok(UrngKind::Ranlux3),
            "RANLUX4" => Ok(UrngKind::Ranlux4),
            "SOBOL" => Ok(UrngKind::Sobol),
            _ => Err(Error::Validation(format!("unknown URNG type '{s}'"))),
        }
    }
}

/// The path generation scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathGenKind {
    /// Euler time stepping: one normal increment per time step.  For a
    /// single terminal fixing this is the exact lognormal distribution.
    Euler,
}

impl FromStr for PathGenKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "EULER" => Ok(PathGenKind::Euler),
            _ => Err(Error::Validation(format!(
                "unknown path generator type '{s}'"
            ))),
        }
    }
}

/// The variance-reduction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlVarKind {
    /// Raw paths, one sample per path.
    None,
    /// Antithetic variates: each path is paired with its sign-mirrored
    /// counterpart and the two payoffs are averaged into one sample.
    Antithetic,
}

impl FromStr for ControlVarKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(ControlVarKind::None),
            "ANTITHETIC" => Ok(ControlVarKind::Antithetic),
            _ => Err(Error::Validation(format!(
                "unknown control variate type '{s}'"
            ))),
        }
    }
}

/// The immutable Monte Carlo configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct McParams {
    /// The uniform RNG algorithm.
    pub urng: UrngKind,
    /// The path generation scheme.
    pub path_gen: PathGenKind,
    /// The variance-reduction strategy.
    pub control_var: ControlVarKind,
}

impl McParams {
    /// Assemble a configuration from enum values.
    pub fn new(urng: UrngKind, path_gen: PathGenKind, control_var: ControlVarKind) -> Self {
        Self {
            urng,
            path_gen,
            control_var,
        }
    }

    /// Parse a configuration from the selector names used by the call
    /// surface, case-insensitively.
    ///
    /// # Errors
    /// Any unknown selector fails fast with a validation error.
    pub fn from_names(urng: &str, path_gen: &str, control_var: &str) -> Result<Self> {
        Ok(Self {
            urng: urng.parse()?,
            path_gen: path_gen.parse()?,
            control_var: control_var.parse()?,
        })
    }
}
