//! Plain polynomials: evaluation, products, root bracketing and refinement.
//!
//! Coefficients are stored in increasing power order, so `coeffs[k]` is the
//! coefficient of `x^k`.

use pk_core::{ensure, errors::Error, errors::Result, fail, Real, Size};

/// Iteration budget shared by the refinement routines.
const MAX_ITERATIONS: u32 = 100;

/// A polynomial with real coefficients in increasing power order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<Real>,
}

impl Polynomial {
    /// Construct from coefficients in increasing power order.
    ///
    /// # Errors
    /// The coefficient list must not be empty.
    pub fn new(coeffs: &[Real]) -> Result<Self> {
        ensure!(!coeffs.is_empty(), "need at least one coefficient");
        Ok(Self {
            coeffs: coeffs.to_vec(),
        })
    }

    /// The coefficients, lowest power first.
    pub fn coeffs(&self) -> &[Real] {
        &self.coeffs
    }

    /// Evaluate at `x` by Horner's rule.
    pub fn eval(&self, x: Real) -> Real {
        self.coeffs
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }

    /// The formal derivative.
    pub fn derivative(&self) -> Polynomial {
        if self.coeffs.len() == 1 {
            return Polynomial {
                coeffs: vec![0.0],
            };
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, &c)| k as Real * c)
            .collect();
        Polynomial { coeffs }
    }

    /// The product of two polynomials (coefficient convolution).
    pub fn prod(&self, other: &Polynomial) -> Polynomial {
        let mut coeffs = vec![0.0; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Polynomial { coeffs }
    }

    /// Bracket the real roots inside `[lo, hi]`.
    ///
    /// The interval is split into `nsubs` equal subintervals; every
    /// subinterval whose endpoint evaluations change sign is returned, in
    /// order, as a `(left, right)` candidate bracket.  No refinement is
    /// attempted.
    ///
    /// A root falling exactly on a subdivision boundary may be reported for
    /// both adjacent subintervals or for neither, depending on the sign of
    /// the evaluation at that point.  This is inherent to uniform bracketing
    /// and is left as-is.
    ///
    /// # Errors
    /// `lo < hi` and `nsubs ≥ 1` are required.
    pub fn bracket(&self, lo: Real, hi: Real, nsubs: Size) -> Result<Vec<(Real, Real)>> {
        ensure!(lo < hi, "lower limit {lo} must be below upper limit {hi}");
        ensure!(nsubs >= 1, "the subdivision count must be positive");

        let step = (hi - lo) / nsubs as Real;
        let mut brackets = Vec::new();
        let mut xa = lo;
        let mut fa = self.eval(xa);
        for i in 1..=nsubs {
            let xb = if i == nsubs { hi } else { lo + i as Real * step };
            let fb = self.eval(xb);
            if fa * fb <= 0.0 {
                brackets.push((xa, xb));
            }
            xa = xb;
            fa = fb;
        }
        Ok(brackets)
    }

    /// Refine a single root inside `[lo, hi]` with the secant iteration.
    ///
    /// The two most recent iterates are joined by a straight line and the
    /// older one is replaced by its root, until the update magnitude falls
    /// below `tol`.
    ///
    /// # Errors
    /// * `Domain` if `f(lo)` and `f(hi)` do not straddle a sign change;
    ///   callers are expected to have bracketed the root first.
    /// * `Convergence` if the iteration budget is exhausted or the iteration
    ///   stalls on a vanishing secant slope.
    pub fn secant(&self, lo: Real, hi: Real, tol: Real) -> Result<Real> {
        ensure!(lo < hi, "lower limit {lo} must be below upper limit {hi}");
        ensure!(tol > 0.0, "the tolerance must be positive");

        let mut x0 = lo;
        let mut x1 = hi;
        let mut f0 = self.eval(x0);
        let mut f1 = self.eval(x1);

        if f0 * f1 > 0.0 {
            fail!("no sign change between f({lo}) = {f0} and f({hi}) = {f1}");
        }

        for _ in 0..MAX_ITERATIONS {
            let denom = f1 - f0;
            if denom == 0.0 {
                return Err(Error::Convergence(
                    "secant slope vanished before reaching tolerance".into(),
                ));
            }
            let x2 = x1 - f1 * (x1 - x0) / denom;
            if (x2 - x1).abs() < tol {
                return Ok(x2);
            }
            x0 = x1;
            f0 = f1;
            x1 = x2;
            f1 = self.eval(x2);
        }

        Err(Error::Convergence(format!(
            "secant did not reach tolerance {tol} in {MAX_ITERATIONS} iterations"
        )))
    }
}
