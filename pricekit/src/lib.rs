//! # pricekit
//!
//! A quantitative-finance analytics library: piecewise-polynomial curve
//! mathematics, polynomial root finding, a named market-object store for
//! yield curves and volatility term structures, closed-form
//! Black-Scholes-family pricers, and a Monte Carlo engine with pluggable
//! random number generators and variance reduction.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates.  Application code should depend on this
//! crate rather than the individual `pk-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use pricekit::market::{MarketStore, YcValueType};
//!
//! let store = MarketStore::new();
//! store.yc_create("USD", &[1.0, 2.0, 5.0], &[0.05, 0.045, 0.04], YcValueType::SpotRates)?;
//! let df = store.discount("usd", 2.0)?;
//! assert!((df - (-0.045_f64 * 2.0).exp()).abs() < 1e-14);
//! # Ok::<(), pricekit::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and the error taxonomy.
pub use pk_core as core;

/// Mathematical utilities: piecewise polynomials, root finding,
/// distributions, RNG, statistics.
pub use pk_math as math;

/// Yield curves, volatility term structures, and the market store.
pub use pk_market as market;

/// Product (payoff) definitions.
pub use pk_instruments as instruments;

/// Monte Carlo machinery: configuration and path generation.
pub use pk_methods as methods;

/// Closed-form and Monte Carlo pricers.
pub use pk_pricers as pricers;
