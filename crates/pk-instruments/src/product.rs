//! The product abstraction evaluated by the Monte Carlo engine.

use pk_core::{Real, Time};

/// A financial product defined by its observation schedule and payoff.
///
/// A product declares the times at which the asset is observed
/// ([`fix_times`](Product::fix_times)) and the times at which it pays
/// ([`pay_times`](Product::pay_times)).  Given one simulated asset level per
/// fixing time, [`eval`](Product::eval) writes one payment amount per pay
/// time into a caller-owned buffer, which keeps products free of interior
/// mutability and safe to share across concurrent pricing calls.
pub trait Product: Send + Sync {
    /// The observation (fixing) times, in increasing order.
    fn fix_times(&self) -> &[Time];

    /// The payment times, in increasing order.
    fn pay_times(&self) -> &[Time];

    /// Evaluate the payoff along one path.
    ///
    /// `path` holds the simulated asset level at each fixing time;
    /// `pay_amounts` has one slot per payment time.
    fn eval(&self, path: &[Real], pay_amounts: &mut [Real]);
}
