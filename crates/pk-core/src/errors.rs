//! Error types for pricekit.
//!
//! A single `thiserror`-derived enum covers the whole library.  Each variant
//! is a distinct failure kind: malformed input, a missing named market
//! object, a mathematical domain violation, or an iterative method running
//! out of budget.  The `ensure!` and `fail!` macros defined here are the
//! usual shorthands for guarding preconditions.

use thiserror::Error;

/// The top-level error type used throughout pricekit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Malformed input: non-increasing breakpoints, mismatched lengths,
    /// unknown enumeration value, non-positive frequency or path count.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A query referenced a market object name absent from the store.
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// The kind of object that was looked up (e.g. "yield curve").
        kind: &'static str,
        /// The name that failed to resolve.
        name: String,
    },

    /// A mathematical domain violation: a root search over a non-bracketing
    /// interval, a negative forward variance.
    #[error("domain error: {0}")]
    Domain(String),

    /// An iterative method exhausted its iteration budget without meeting
    /// its tolerance.
    #[error("no convergence: {0}")]
    Convergence(String),
}

/// Shorthand `Result` type used throughout pricekit.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Guard an input precondition.
///
/// Returns `Err(Error::Validation(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use pk_core::ensure;
/// fn positive(x: f64) -> pk_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Validation(
                format!($($msg)*)
            ));
        }
    };
}

/// Bail out with a domain error.
///
/// Returns `Err(Error::Domain(...))` immediately.
///
/// # Example
/// ```
/// use pk_core::fail;
/// fn always_err() -> pk_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Domain(format!($($msg)*)))
    };
}
