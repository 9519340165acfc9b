//! # pk-market
//!
//! Yield curves, volatility term structures, and the case-insensitive named
//! store that owns them.  Curves and term structures are immutable once
//! built; the store supports create-or-replace, lookup, derived queries,
//! listing, and an atomic clear.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// The named market-object store.
pub mod store;

/// Volatility term structures.
pub mod volatility_term_structure;

/// Yield curves.
pub mod yield_curve;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use store::{MarketList, MarketStore};
pub use volatility_term_structure::{VolValueType, VolatilityTermStructure};
pub use yield_curve::{YcValueType, YieldCurve};
