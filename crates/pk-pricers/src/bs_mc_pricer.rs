//! Monte Carlo pricer in the Black-Scholes model with deterministic rates
//! and volatilities.
//!
//! The pricer resolves its configuration once at construction: the path
//! generator is built from the `McParams` selectors, and the per-step
//! discount factors, drifts, and standard deviations are pre-computed from
//! the discount curve's forward rates and the (constant or term-structure)
//! volatility.  The simulation loop then only exponentiates and evaluates
//! payoffs.

use pk_core::{ensure, errors::Result, Rate, Real, Time, Volatility};
use pk_instruments::Product;
use pk_market::{VolatilityTermStructure, YieldCurve};
use pk_math::Statistics;
use pk_methods::{make_path_generator, ControlVarKind, McParams, PathGenerator};
use std::sync::Arc;
use tracing::debug;

/// The volatility input of the pricer: a constant or a term structure
/// supplying forward vols per time step.
#[derive(Clone)]
pub enum VolSpec {
    /// A single constant volatility.
    Const(Volatility),
    /// A deterministic volatility term structure.
    TermStructure(Arc<VolatilityTermStructure>),
}

impl VolSpec {
    fn fwd_vol(&self, t1: Time, t2: Time) -> Result<Volatility> {
        match self {
            VolSpec::Const(v) => {
                ensure!(*v >= 0.0, "the volatility must be non-negative, got {v}");
                Ok(*v)
            }
            VolSpec::TermStructure(ts) => ts.fwd_vol(t1, t2),
        }
    }
}

/// The result of one simulation run: the sample mean of the discounted
/// payoffs and its standard error over the effective samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationResult {
    /// Monte Carlo price estimate.
    pub mean: Real,
    /// Standard error of the estimate: sample std dev / √samples.
    pub std_error: Real,
    /// Effective sample count (paths, or antithetic pairs).
    pub samples: usize,
}

/// Monte Carlo pricer of a [`Product`] under Black-Scholes dynamics.
pub struct BsMcPricer {
    product: Arc<dyn Product>,
    control_var: ControlVarKind,
    path_gen: Box<dyn PathGenerator>,
    spot: Real,
    disc_factors: Vec<Real>,
    drifts: Vec<Real>,
    stdevs: Vec<Real>,
}

impl BsMcPricer {
    /// Build a pricer.
    ///
    /// Forward rates come from `discount_curve` over each fixing interval;
    /// `vol` supplies the matching forward volatility.  `seed` feeds the
    /// pseudo-random generators (for Sobol it is the number of initial
    /// points skipped).
    ///
    /// # Errors
    /// Fails on an empty fixing schedule, a non-positive spot, or when the
    /// configuration cannot be resolved.
    pub fn new(
        product: Arc<dyn Product>,
        discount_curve: &YieldCurve,
        div_yield: Rate,
        vol: VolSpec,
        spot: Real,
        mc_params: McParams,
        seed: u64,
    ) -> Result<Self> {
        ensure!(spot > 0.0, "the spot must be positive, got {spot}");
        let fix_times = product.fix_times().to_vec();
        ensure!(
            !fix_times.is_empty(),
            "the product must have at least one fixing time"
        );

        let path_gen = make_path_generator(&mc_params, fix_times.len(), seed)?;

        let mut disc_factors = Vec::with_capacity(product.pay_times().len());
        for &t in product.pay_times() {
            disc_factors.push(discount_curve.discount(t)?);
        }

        let mut drifts = Vec::with_capacity(fix_times.len());
        let mut stdevs = Vec::with_capacity(fix_times.len());
        let mut t1 = 0.0;
        for &t2 in &fix_times {
            let fwd_rate = discount_curve.fwd_rate(t1, t2)?;
            let sigma = vol.fwd_vol(t1, t2)?;
            let dt = t2 - t1;
            let var = sigma * sigma * dt;
            stdevs.push(var.sqrt());
            drifts.push((fwd_rate - div_yield) * dt - 0.5 * var);
            t1 = t2;
        }

        Ok(Self {
            product,
            control_var: mc_params.control_var,
            path_gen,
            spot,
            disc_factors,
            drifts,
            stdevs,
        })
    }

    /// Map one vector of normal increments to the PV of the product along
    /// the resulting path.  `flip` mirrors the increments for the
    /// antithetic counterpart.
    fn process_path(
        &self,
        normals: &[Real],
        flip: bool,
        path: &mut [Real],
        pay_amounts: &mut [Real],
    ) -> Real {
        let mut level = self.spot;
        for (i, slot) in path.iter_mut().enumerate() {
            let z = if flip { -normals[i] } else { normals[i] };
            level *= (self.drifts[i] + self.stdevs[i] * z).exp();
            *slot = level;
        }
        self.product.eval(path, pay_amounts);
        pay_amounts
            .iter()
            .zip(&self.disc_factors)
            .map(|(&amt, &df)| df * amt)
            .sum()
    }

    /// Run the simulation over `n_paths` paths and reduce to a mean and
    /// standard error.
    ///
    /// With antithetic variates each drawn path and its mirror are averaged
    /// into one sample, so an odd path count rounds down to the nearest
    /// even number of paths.
    ///
    /// # Errors
    /// The path count must be positive, and large enough for at least one
    /// antithetic pair when pairing is requested.
    pub fn simulate(&mut self, n_paths: usize) -> Result<SimulationResult> {
        ensure!(n_paths > 0, "the path count must be positive");

        let n_steps = self.path_gen.n_time_steps();
        let mut normals = vec![0.0; n_steps];
        let mut path = vec![0.0; n_steps];
        let mut pay_amounts = vec![0.0; self.product.pay_times().len()];
        let mut stats = Statistics::new();

        match self.control_var {
            ControlVarKind::None => {
                for _ in 0..n_paths {
                    self.path_gen.next(&mut normals);
                    let pv = self.process_path(&normals, false, &mut path, &mut pay_amounts);
                    stats.add(pv);
                }
            }
            ControlVarKind::Antithetic => {
                let n_pairs = n_paths / 2;
                ensure!(
                    n_pairs > 0,
                    "antithetic pairing needs at least 2 paths, got {n_paths}"
                );
                for _ in 0..n_pairs {
                    self.path_gen.next(&mut normals);
                    let pv = self.process_path(&normals, false, &mut path, &mut pay_amounts);
                    let pv_mirror =
                        self.process_path(&normals, true, &mut path, &mut pay_amounts);
                    stats.add(0.5 * (pv + pv_mirror));
                }
            }
        }

        let samples = stats.samples();
        debug!("simulated {samples} samples over {n_steps} time steps");
        Ok(SimulationResult {
            mean: stats.mean().unwrap_or(0.0),
            std_error: stats.error_estimate().unwrap_or(0.0),
            samples,
        })
    }
}
