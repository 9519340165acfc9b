//! The named market-object store.
//!
//! A [`MarketStore`] holds yield curves and volatility term structures under
//! case-insensitive names.  The owner constructs one store per process (or
//! per test) and passes it by reference to whatever needs market data; there
//! is no process-wide global.
//!
//! Mutations are all-or-nothing: an object is fully built and validated
//! before the write lock is taken, so a failed create never leaves a partial
//! entry behind, and readers always observe either the old object or the
//! new one.

use crate::volatility_term_structure::{VolValueType, VolatilityTermStructure};
use crate::yield_curve::{YcValueType, YieldCurve};
use pk_core::{ensure, errors::Result, DiscountFactor, Error, Rate, Time, Volatility};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

/// A stored object together with the name it was created under.
#[derive(Debug, Clone)]
struct Named<T> {
    name: String,
    object: Arc<T>,
}

/// Names of all live market objects, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketList {
    /// Names of yield curves, sorted case-insensitively.
    pub yield_curves: Vec<String>,
    /// Names of volatility term structures, sorted case-insensitively.
    pub volatilities: Vec<String>,
}

/// A registry of named yield curves and volatility term structures.
///
/// Names are matched case-insensitively; creating an object under a name
/// that is already live (in any capitalisation) replaces the previous one.
#[derive(Debug, Default)]
pub struct MarketStore {
    yield_curves: RwLock<HashMap<String, Named<YieldCurve>>>,
    volatilities: RwLock<HashMap<String, Named<VolatilityTermStructure>>>,
}

/// Read a lock even if a writer panicked while holding it; the maps only
/// ever hold fully constructed objects.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

impl MarketStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Yield curves ─────────────────────────────────────────────────────

    /// Create a yield curve, replacing any existing curve of the same
    /// (case-folded) name.  Returns the confirmed name.
    pub fn yc_create(
        &self,
        name: &str,
        maturities: &[Time],
        values: &[f64],
        value_type: YcValueType,
    ) -> Result<String> {
        ensure!(!name.trim().is_empty(), "the yield curve name must not be empty");
        let curve = YieldCurve::new(maturities, values, value_type)?;
        let replaced = write_lock(&self.yield_curves)
            .insert(
                name.to_lowercase(),
                Named {
                    name: name.to_string(),
                    object: Arc::new(curve),
                },
            )
            .is_some();
        info!("yield curve '{name}' {}", if replaced { "replaced" } else { "created" });
        Ok(name.to_string())
    }

    /// Look up a yield curve by name.
    pub fn yield_curve(&self, name: &str) -> Result<Arc<YieldCurve>> {
        read_lock(&self.yield_curves)
            .get(&name.to_lowercase())
            .map(|e| Arc::clone(&e.object))
            .ok_or_else(|| Error::NotFound {
                kind: "yield curve",
                name: name.to_string(),
            })
    }

    /// Discount factor `P(0, t)` from the named curve.
    pub fn discount(&self, name: &str, t: Time) -> Result<DiscountFactor> {
        self.yield_curve(name)?.discount(t)
    }

    /// Forward discount factor `P(t1, t2)` from the named curve.
    pub fn fwd_discount(&self, name: &str, t1: Time, t2: Time) -> Result<DiscountFactor> {
        self.yield_curve(name)?.fwd_discount(t1, t2)
    }

    /// Spot rate from the named curve.
    pub fn spot_rate(&self, name: &str, t: Time) -> Result<Rate> {
        self.yield_curve(name)?.spot_rate(t)
    }

    /// Forward rate between `t1` and `t2` from the named curve.
    pub fn fwd_rate(&self, name: &str, t1: Time, t2: Time) -> Result<Rate> {
        self.yield_curve(name)?.fwd_rate(t1, t2)
    }

    // ── Volatility term structures ───────────────────────────────────────

    /// Create a volatility term structure, replacing any existing one of the
    /// same (case-folded) name.  Returns the confirmed name.
    pub fn vol_create(
        &self,
        name: &str,
        maturities: &[Time],
        vols: &[Volatility],
        value_type: VolValueType,
    ) -> Result<String> {
        ensure!(
            !name.trim().is_empty(),
            "the volatility term structure name must not be empty"
        );
        let ts = VolatilityTermStructure::new(maturities, vols, value_type)?;
        let replaced = write_lock(&self.volatilities)
            .insert(
                name.to_lowercase(),
                Named {
                    name: name.to_string(),
                    object: Arc::new(ts),
                },
            )
            .is_some();
        info!(
            "volatility term structure '{name}' {}",
            if replaced { "replaced" } else { "created" }
        );
        Ok(name.to_string())
    }

    /// Look up a volatility term structure by name.
    pub fn volatility(&self, name: &str) -> Result<Arc<VolatilityTermStructure>> {
        read_lock(&self.volatilities)
            .get(&name.to_lowercase())
            .map(|e| Arc::clone(&e.object))
            .ok_or_else(|| Error::NotFound {
                kind: "volatility term structure",
                name: name.to_string(),
            })
    }

    /// Spot volatility from the named term structure.
    pub fn spot_vol(&self, name: &str, t: Time) -> Result<Volatility> {
        self.volatility(name)?.spot_vol(t)
    }

    /// Forward volatility between `t1` and `t2` from the named term
    /// structure.
    pub fn fwd_vol(&self, name: &str, t1: Time, t2: Time) -> Result<Volatility> {
        self.volatility(name)?.fwd_vol(t1, t2)
    }

    // ── Listing and lifecycle ────────────────────────────────────────────

    /// Names of all live objects, grouped by kind and sorted for
    /// deterministic output.
    pub fn list(&self) -> MarketList {
        let mut yield_curves: Vec<String> = read_lock(&self.yield_curves)
            .values()
            .map(|e| e.name.clone())
            .collect();
        let mut volatilities: Vec<String> = read_lock(&self.volatilities)
            .values()
            .map(|e| e.name.clone())
            .collect();
        yield_curves.sort_by_key(|n| n.to_lowercase());
        volatilities.sort_by_key(|n| n.to_lowercase());
        MarketList {
            yield_curves,
            volatilities,
        }
    }

    /// Remove every object from the store.  Both maps are emptied under
    /// simultaneously held write locks, so no reader sees one cleared and
    /// the other not.
    pub fn clear(&self) {
        let mut ycs = write_lock(&self.yield_curves);
        let mut vols = write_lock(&self.volatilities);
        ycs.clear();
        vols.clear();
        info!("market store cleared");
    }
}
