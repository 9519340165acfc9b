//! Monte Carlo machinery: the configuration record and path generation.

/// Configuration enumerations and the `McParams` record.
pub mod mc_params;

/// Path generators producing standard normal increments.
pub mod path_generator;

pub use mc_params::{ControlVarKind, McParams, PathGenKind, UrngKind};
pub use path_generator::{
    make_path_generator, EulerPathGenerator, PathGenerator, SobolPathGenerator,
};
