//! # pk-instruments
//!
//! Product (payoff) definitions evaluated by the Monte Carlo engine: the
//! [`Product`] trait plus European and digital call/put implementations.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// The digital call/put payoff.
pub mod digital_call_put;

/// The European call/put payoff.
pub mod european_call_put;

/// Call/put direction.
pub mod option_type;

/// The product trait.
pub mod product;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use digital_call_put::DigitalCallPut;
pub use european_call_put::EuropeanCallPut;
pub use option_type::OptionType;
pub use product::Product;
