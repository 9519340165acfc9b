//! # pk-methods
//!
//! Numerical methods for pricekit.  Currently: the Monte Carlo framework,
//! i.e. configuration enumerations and path generators.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Monte Carlo simulation framework.
pub mod monte_carlo;

pub use monte_carlo::{
    make_path_generator, ControlVarKind, EulerPathGenerator, McParams, PathGenKind,
    PathGenerator, SobolPathGenerator, UrngKind,
};
