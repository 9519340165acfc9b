//! Path generators: standard normal increments along the fixing time line.
//!
//! A path generator fills a caller-owned buffer with one standard normal
//! deviate per time step.  Turning uniforms into normals is done here, via
//! the inverse-CDF transform, so the uniform generators stay algorithm-pure.

use super::mc_params::{McParams, UrngKind};
use pk_core::{errors::Result, Real, Size};
use pk_math::normal_cdf_inverse;
use pk_math::random_numbers::{MersenneTwisterRng, MinStdRand, RanluxRng, SobolRsg, UniformRng};

/// Generates the standard normal increments of one sample path.
pub trait PathGenerator: Send {
    /// The number of time steps per path.
    fn n_time_steps(&self) -> Size;

    /// Fill `normals` (one slot per time step) with the next path's
    /// standard normal increments.
    fn next(&mut self, normals: &mut [Real]);
}

// ── Euler over a pseudo-random uniform source ────────────────────────────────

/// Euler path generator over any uniform source: each increment is the
/// inverse normal CDF of the next uniform deviate.
#[derive(Debug)]
pub struct EulerPathGenerator<U> {
    n_time_steps: Size,
    urng: U,
}

impl<U: UniformRng> EulerPathGenerator<U> {
    /// Create a generator for `n_time_steps` increments per path.
    pub fn new(n_time_steps: Size, urng: U) -> Self {
        Self { n_time_steps, urng }
    }
}

impl<U: UniformRng + Send> PathGenerator for EulerPathGenerator<U> {
    fn n_time_steps(&self) -> Size {
        self.n_time_steps
    }

    fn next(&mut self, normals: &mut [Real]) {
        for z in normals.iter_mut() {
            *z = normal_cdf_inverse(self.urng.next_uniform());
        }
    }
}

// ── Euler over the Sobol sequence ────────────────────────────────────────────

/// Euler path generator drawing each path from one point of a Sobol
/// sequence whose dimension equals the number of time steps, so successive
/// coordinates of a point map to successive time steps.
#[derive(Debug)]
pub struct SobolPathGenerator {
    rsg: SobolRsg,
}

impl SobolPathGenerator {
    /// Create a generator for `n_time_steps` increments per path, skipping
    /// the first `skip` points of the sequence.
    ///
    /// # Errors
    /// The time step count must be within the supported Sobol dimensions.
    pub fn new(n_time_steps: Size, skip: u64) -> Result<Self> {
        Ok(Self {
            rsg: SobolRsg::new(n_time_steps, skip)?,
        })
    }
}

impl PathGenerator for SobolPathGenerator {
    fn n_time_steps(&self) -> Size {
        self.rsg.dimension()
    }

    fn next(&mut self, normals: &mut [Real]) {
        let point = self.rsg.next_point();
        for (z, u) in normals.iter_mut().zip(point) {
            *z = normal_cdf_inverse(u);
        }
    }
}

// ── Resolution from the configuration ────────────────────────────────────────

/// Resolve a Monte Carlo configuration to a concrete path generator, once.
///
/// The seed feeds the pseudo-random generators; for the Sobol sequence it is
/// the number of initial points to skip.
///
/// # Errors
/// Fails when the Sobol dimension limit cannot accommodate the step count.
pub fn make_path_generator(
    params: &McParams,
    n_time_steps: Size,
    seed: u64,
) -> Result<Box<dyn PathGenerator>> {
    // PathGenKind::Euler is the only scheme; matching keeps the resolution
    // exhaustive when another scheme is added.
    match params.path_gen {
        super::mc_params::PathGenKind::Euler => {}
    }
    Ok(match params.urng {
        UrngKind::MinStdRand => Box::new(EulerPathGenerator::new(
            n_time_steps,
            MinStdRand::new(seed as u32),
        )),
        UrngKind::Mt19937 => Box::new(EulerPathGenerator::new(
            n_time_steps,
            MersenneTwisterRng::new(seed),
        )),
        UrngKind::Ranlux3 => Box::new(EulerPathGenerator::new(
            n_time_steps,
            RanluxRng::luxury3(seed as u32),
        )),
        UrngKind::Ranlux4 => Box::new(EulerPathGenerator::new(
            n_time_steps,
            RanluxRng::luxury4(seed as u32),
        )),
        UrngKind::Sobol => Box::new(SobolPathGenerator::new(n_time_steps, seed)?),
    })
}
