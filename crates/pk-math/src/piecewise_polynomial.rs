//! Piecewise polynomial functions over a breakpoint grid.
//!
//! A [`PiecewisePolynomial`] is defined by a strictly increasing sequence of
//! breakpoints and one value per breakpoint.  Between consecutive breakpoints
//! the function is a polynomial of the chosen [`PolyOrder`]; outside the
//! breakpoint span it is held constant at the nearest boundary value.
//!
//! Yield curves and volatility term structures build on this type for their
//! interpolation, and it is also exposed directly.

use pk_core::{ensure, errors::Result, Real, Size};

/// Per-segment polynomial order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolyOrder {
    /// Piecewise constant: the value at the left breakpoint governs the
    /// whole segment.
    Constant,
    /// Piecewise linear between bracketing breakpoints.
    Linear,
}

impl PolyOrder {
    /// Convert the raw integer tag used by the call surface.
    ///
    /// # Errors
    /// Anything other than 0 or 1 is a validation error.
    pub fn from_tag(tag: i64) -> Result<Self> {
        match tag {
            0 => Ok(PolyOrder::Constant),
            1 => Ok(PolyOrder::Linear),
            _ => Err(pk_core::Error::Validation(format!(
                "unknown polynomial order {tag}, must be 0 or 1"
            ))),
        }
    }
}

/// A piecewise polynomial function `f: R → R`.
///
/// Immutable after construction.  Evaluation, differentiation, and exact
/// integration are defined over all of R via constant extrapolation beyond
/// the breakpoint span.
#[derive(Debug, Clone)]
pub struct PiecewisePolynomial {
    breakpoints: Vec<Real>,
    values: Vec<Real>,
    order: PolyOrder,
    /// Cumulative integral from the first breakpoint to each breakpoint.
    cumulative: Vec<Real>,
}

impl PiecewisePolynomial {
    /// Construct from breakpoints and corresponding values.
    ///
    /// # Errors
    /// Fails if the series is empty, the lengths differ, or the breakpoints
    /// are not strictly increasing.
    pub fn new(breakpoints: &[Real], values: &[Real], order: PolyOrder) -> Result<Self> {
        ensure!(!breakpoints.is_empty(), "need at least 1 breakpoint");
        ensure!(
            breakpoints.len() == values.len(),
            "breakpoints and values must have the same length, got {} and {}",
            breakpoints.len(),
            values.len()
        );
        ensure!(
            breakpoints.windows(2).all(|w| w[0] < w[1]),
            "breakpoints must be strictly increasing"
        );

        let mut cumulative = Vec::with_capacity(breakpoints.len());
        cumulative.push(0.0);
        for i in 1..breakpoints.len() {
            let dx = breakpoints[i] - breakpoints[i - 1];
            let seg = match order {
                PolyOrder::Constant => values[i - 1] * dx,
                PolyOrder::Linear => 0.5 * (values[i - 1] + values[i]) * dx,
            };
            cumulative.push(cumulative[i - 1] + seg);
        }

        Ok(Self {
            breakpoints: breakpoints.to_vec(),
            values: values.to_vec(),
            order,
            cumulative,
        })
    }

    /// The breakpoint grid.
    pub fn breakpoints(&self) -> &[Real] {
        &self.breakpoints
    }

    /// The value at each breakpoint.
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// The per-segment polynomial order.
    pub fn order(&self) -> PolyOrder {
        self.order
    }

    /// Index of the rightmost breakpoint ≤ `x`, or `None` left of the span.
    fn locate(&self, x: Real) -> Option<Size> {
        let count = self.breakpoints.partition_point(|&b| b <= x);
        count.checked_sub(1)
    }

    /// Evaluate the function (`deriv_order` = 0) or one of its derivatives
    /// at `x`.
    ///
    /// Outside the breakpoint span the function is constant at the nearest
    /// boundary value, so every derivative vanishes there.  The flat region
    /// starts *at* the last breakpoint: the one-sided derivative taken there
    /// is 0.
    pub fn eval(&self, x: Real, deriv_order: Size) -> Real {
        let n = self.breakpoints.len();

        if deriv_order == 0 {
            return match self.locate(x) {
                None => self.values[0],
                Some(i) if i == n - 1 => self.values[n - 1],
                Some(i) => match self.order {
                    PolyOrder::Constant => self.values[i],
                    PolyOrder::Linear => {
                        let dx = self.breakpoints[i + 1] - self.breakpoints[i];
                        let slope = (self.values[i + 1] - self.values[i]) / dx;
                        self.values[i] + slope * (x - self.breakpoints[i])
                    }
                },
            };
        }

        match (self.order, self.locate(x)) {
            (PolyOrder::Linear, Some(i)) if deriv_order == 1 && i < n - 1 => {
                (self.values[i + 1] - self.values[i])
                    / (self.breakpoints[i + 1] - self.breakpoints[i])
            }
            _ => 0.0,
        }
    }

    /// Antiderivative with `F(breakpoints[0]) = 0`.
    fn antiderivative(&self, x: Real) -> Real {
        let n = self.breakpoints.len();
        match self.locate(x) {
            None => self.values[0] * (x - self.breakpoints[0]),
            Some(i) if i == n - 1 => {
                self.cumulative[n - 1] + self.values[n - 1] * (x - self.breakpoints[n - 1])
            }
            Some(i) => {
                let dx = x - self.breakpoints[i];
                let seg = match self.order {
                    PolyOrder::Constant => self.values[i] * dx,
                    PolyOrder::Linear => {
                        let slope = (self.values[i + 1] - self.values[i])
                            / (self.breakpoints[i + 1] - self.breakpoints[i]);
                        self.values[i] * dx + 0.5 * slope * dx * dx
                    }
                };
                self.cumulative[i] + seg
            }
        }
    }

    /// Exact integral of the function over `[xstart, xend]`.
    ///
    /// Accumulates the segment-wise antiderivative across every segment the
    /// interval overlaps, including the constant-extrapolated tails, and is
    /// antisymmetric in its arguments: `integral(a, b) == -integral(b, a)`,
    /// so `integral(a, c) == integral(a, b) + integral(b, c)` for any a, b, c.
    pub fn integral(&self, xstart: Real, xend: Real) -> Real {
        self.antiderivative(xend) - self.antiderivative(xstart)
    }

    /// Pointwise sum of two piecewise polynomials of the same order.
    ///
    /// The result's breakpoint grid is the deduplicated sorted union of both
    /// inputs' grids, with the summed evaluation at each union breakpoint.
    ///
    /// # Errors
    /// Mixing orders is a validation error.
    pub fn sum(&self, other: &PiecewisePolynomial) -> Result<PiecewisePolynomial> {
        ensure!(
            self.order == other.order,
            "cannot sum piecewise polynomials of different orders"
        );

        let mut merged = Vec::with_capacity(self.breakpoints.len() + other.breakpoints.len());
        let (mut i, mut j) = (0, 0);
        while i < self.breakpoints.len() || j < other.breakpoints.len() {
            let next = match (self.breakpoints.get(i), other.breakpoints.get(j)) {
                (Some(&a), Some(&b)) if a < b => {
                    i += 1;
                    a
                }
                (Some(&a), Some(&b)) if b < a => {
                    j += 1;
                    b
                }
                (Some(&a), Some(_)) => {
                    i += 1;
                    j += 1;
                    a
                }
                (Some(&a), None) => {
                    i += 1;
                    a
                }
                (None, Some(&b)) => {
                    j += 1;
                    b
                }
                (None, None) => unreachable!(),
            };
            merged.push(next);
        }

        let summed: Vec<Real> = merged
            .iter()
            .map(|&x| self.eval(x, 0) + other.eval(x, 0))
            .collect();

        PiecewisePolynomial::new(&merged, &summed, self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn linear_sample() -> PiecewisePolynomial {
        PiecewisePolynomial::new(&[0.0, 1.0, 3.0], &[1.0, 2.0, -2.0], PolyOrder::Linear).unwrap()
    }

    fn constant_sample() -> PiecewisePolynomial {
        PiecewisePolynomial::new(&[0.0, 1.0, 3.0], &[1.0, 2.0, -2.0], PolyOrder::Constant).unwrap()
    }

    #[test]
    fn construction_rejects_bad_input() {
        assert!(PiecewisePolynomial::new(&[], &[], PolyOrder::Constant).is_err());
        assert!(PiecewisePolynomial::new(&[0.0, 1.0], &[1.0], PolyOrder::Constant).is_err());
        assert!(
            PiecewisePolynomial::new(&[0.0, 0.0], &[1.0, 2.0], PolyOrder::Constant).is_err(),
            "duplicate breakpoints must be rejected"
        );
        assert!(PiecewisePolynomial::new(&[1.0, 0.5], &[1.0, 2.0], PolyOrder::Linear).is_err());
    }

    #[test]
    fn order_tag_roundtrip() {
        assert_eq!(PolyOrder::from_tag(0).unwrap(), PolyOrder::Constant);
        assert_eq!(PolyOrder::from_tag(1).unwrap(), PolyOrder::Linear);
        assert!(PolyOrder::from_tag(2).is_err());
    }

    #[test]
    fn eval_reproduces_breakpoint_values() {
        for p in [linear_sample(), constant_sample()] {
            for (&x, &v) in p.breakpoints().iter().zip(p.values()) {
                assert_abs_diff_eq!(p.eval(x, 0), v, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn constant_uses_left_breakpoint_value() {
        let p = constant_sample();
        assert_abs_diff_eq!(p.eval(0.5, 0), 1.0);
        assert_abs_diff_eq!(p.eval(2.999, 0), 2.0);
    }

    #[test]
    fn linear_interpolates_between_breakpoints() {
        let p = linear_sample();
        assert_abs_diff_eq!(p.eval(0.5, 0), 1.5, epsilon = 1e-15);
        assert_abs_diff_eq!(p.eval(2.0, 0), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn constant_extrapolation_outside_span() {
        let p = linear_sample();
        assert_abs_diff_eq!(p.eval(-5.0, 0), 1.0);
        assert_abs_diff_eq!(p.eval(10.0, 0), -2.0);
        assert_abs_diff_eq!(p.eval(-5.0, 1), 0.0);
        assert_abs_diff_eq!(p.eval(10.0, 1), 0.0);
    }

    #[test]
    fn derivatives() {
        let p = linear_sample();
        assert_abs_diff_eq!(p.eval(0.5, 1), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(p.eval(2.0, 1), -2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(p.eval(2.0, 2), 0.0);

        let q = constant_sample();
        assert_abs_diff_eq!(q.eval(0.5, 1), 0.0);
    }

    #[test]
    fn single_breakpoint_is_constant_everywhere() {
        let p = PiecewisePolynomial::new(&[2.0], &[7.0], PolyOrder::Linear).unwrap();
        for x in [-100.0, 0.0, 2.0, 55.0] {
            assert_abs_diff_eq!(p.eval(x, 0), 7.0);
            assert_abs_diff_eq!(p.eval(x, 1), 0.0);
        }
        assert_abs_diff_eq!(p.integral(0.0, 4.0), 28.0, epsilon = 1e-12);
    }

    #[test]
    fn integral_of_constant_segments() {
        let p = constant_sample();
        // 1.0 over [0,1), 2.0 over [1,3)
        assert_abs_diff_eq!(p.integral(0.0, 3.0), 1.0 + 4.0, epsilon = 1e-12);
        // Tails: 1.0 left of 0, -2.0 right of 3
        assert_abs_diff_eq!(p.integral(-1.0, 0.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.integral(3.0, 5.0), -4.0, epsilon = 1e-12);
    }

    #[test]
    fn integral_of_linear_segments() {
        let p = linear_sample();
        // Trapezoids: (1+2)/2 over [0,1] + (2-2)/2*2 over [1,3]
        assert_abs_diff_eq!(p.integral(0.0, 3.0), 1.5, epsilon = 1e-12);
        // Reversed limits flip the sign
        assert_abs_diff_eq!(p.integral(3.0, 0.0), -1.5, epsilon = 1e-12);
    }

    #[test]
    fn sum_rejects_mixed_orders() {
        assert!(linear_sample().sum(&constant_sample()).is_err());
    }

    #[test]
    fn sum_matches_pointwise_addition() {
        let a = linear_sample();
        let b =
            PiecewisePolynomial::new(&[0.5, 2.0, 4.0], &[1.0, 0.0, 3.0], PolyOrder::Linear)
                .unwrap();
        let s = a.sum(&b).unwrap();
        for x in [-1.0, 0.0, 0.25, 0.5, 0.75, 1.0, 1.7, 2.0, 3.0, 3.5, 4.0, 9.0] {
            assert_abs_diff_eq!(s.eval(x, 0), a.eval(x, 0) + b.eval(x, 0), epsilon = 1e-12);
        }
    }

    #[test]
    fn sum_deduplicates_shared_breakpoints() {
        let a = constant_sample();
        let b = constant_sample();
        let s = a.sum(&b).unwrap();
        assert_eq!(s.breakpoints(), a.breakpoints());
        assert_eq!(s.values(), &[2.0, 4.0, -4.0]);
    }

    proptest! {
        #[test]
        fn integral_is_additive(
            a in -10.0..10.0f64,
            b in -10.0..10.0f64,
            c in -10.0..10.0f64,
        ) {
            let p = linear_sample();
            let lhs = p.integral(a, c);
            let rhs = p.integral(a, b) + p.integral(b, c);
            prop_assert!((lhs - rhs).abs() < 1e-10, "lhs={lhs} rhs={rhs}");
        }

        #[test]
        fn constant_integral_is_additive(
            a in -10.0..10.0f64,
            b in -10.0..10.0f64,
            c in -10.0..10.0f64,
        ) {
            let p = constant_sample();
            let lhs = p.integral(a, c);
            let rhs = p.integral(a, b) + p.integral(b, c);
            prop_assert!((lhs - rhs).abs() < 1e-10, "lhs={lhs} rhs={rhs}");
        }
    }
}
