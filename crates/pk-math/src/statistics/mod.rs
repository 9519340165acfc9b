//! Sample statistics accumulator.

use pk_core::Real;

/// Incremental statistics accumulator.
///
/// Accumulates samples one at a time and computes mean, variance, standard
/// deviation, and the standard error of the mean without storing the samples.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    count: usize,
    sum_x: Real,
    sum_x2: Real,
}

impl Statistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        self.sum_x += x;
        self.sum_x2 += x * x;
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Sample mean.  Returns `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum_x / self.count as Real)
        }
    }

    /// Unbiased (Bessel-corrected) sample variance.  Returns `None` for
    /// fewer than 2 samples.
    pub fn variance(&self) -> Option<Real> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as Real;
        let m = self.sum_x / n;
        let s2 = (self.sum_x2 / n - m * m) * n / (n - 1.0);
        // Cancellation can push a near-zero variance slightly negative.
        Some(s2.max(0.0))
    }

    /// Sample standard deviation.  Returns `None` for fewer than 2 samples.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(Real::sqrt)
    }

    /// Standard error of the mean: `std_dev / √n`.  Returns `None` for fewer
    /// than 2 samples.
    pub fn error_estimate(&self) -> Option<Real> {
        self.std_dev().map(|s| s / (self.count as Real).sqrt())
    }

    /// Reset the accumulator to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn basic_moments() {
        let mut s = Statistics::new();
        for x in [1.0, 2.0, 3.0, 4.0, 5.0] {
            s.add(x);
        }
        assert_eq!(s.samples(), 5);
        assert_abs_diff_eq!(s.mean().unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.variance().unwrap(), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(
            s.error_estimate().unwrap(),
            (2.5_f64 / 5.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn empty_and_singleton() {
        let mut s = Statistics::new();
        assert!(s.mean().is_none());
        s.add(1.5);
        assert_abs_diff_eq!(s.mean().unwrap(), 1.5);
        assert!(s.variance().is_none());
        assert!(s.error_estimate().is_none());
    }

    #[test]
    fn constant_samples_have_zero_variance() {
        let mut s = Statistics::new();
        for _ in 0..1000 {
            s.add(0.1);
        }
        assert!(s.variance().unwrap() >= 0.0);
        assert!(s.variance().unwrap() < 1e-12);
    }
}
