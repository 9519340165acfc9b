//! Sobol low-discrepancy sequence generator.
//!
//! Gray-code construction with Joe-Kuo direction numbers: successive points
//! differ in a single direction number, so advancing costs one XOR per
//! dimension.

use pk_core::{errors::Result, Real, Size};

/// Bits carried per direction number.
const BITS: usize = 32;

/// Highest dimension covered by the embedded direction-number table.
pub const MAX_DIMENSION: usize = 51;

/// Sobol quasi-random sequence generator over `[0, 1)^d`.
#[derive(Debug, Clone)]
pub struct SobolRsg {
    dimension: Size,
    index: u64,
    point: Vec<u32>,
    directions: Vec<[u32; BITS]>,
}

impl SobolRsg {
    /// Create a generator of the given dimension, optionally skipping the
    /// first `skip` points of the sequence.
    ///
    /// # Errors
    /// The dimension must lie in `[1, MAX_DIMENSION]`.
    pub fn new(dimension: Size, skip: u64) -> Result<Self> {
        pk_core::ensure!(
            dimension >= 1 && dimension <= MAX_DIMENSION,
            "Sobol dimension must be in [1, {MAX_DIMENSION}], got {dimension}"
        );

        let mut directions = Vec::with_capacity(dimension);
        directions.push(van_der_corput_directions());
        for d in 1..dimension {
            directions.push(joe_kuo_directions(d));
        }

        let mut rsg = Self {
            dimension,
            index: 0,
            point: vec![0u32; dimension],
            directions,
        };
        for _ in 0..skip {
            rsg.advance();
        }
        Ok(rsg)
    }

    /// Dimension of the generated points.
    pub fn dimension(&self) -> Size {
        self.dimension
    }

    /// Generate the next point of the sequence in `[0, 1)^d`.
    pub fn next_point(&mut self) -> Vec<Real> {
        self.advance();
        let norm = 1.0 / 2.0_f64.powi(BITS as i32);
        self.point.iter().map(|&v| v as Real * norm).collect()
    }

    /// Gray-code advance: flip the direction number indexed by the position
    /// of the lowest zero bit of the running index.
    fn advance(&mut self) {
        let c = self.index.trailing_ones() as usize;
        for (coord, dirs) in self.point.iter_mut().zip(&self.directions) {
            *coord ^= dirs[c];
        }
        self.index += 1;
    }
}

/// Direction numbers of the first dimension: the Van der Corput sequence in
/// base 2.
fn van_der_corput_directions() -> [u32; BITS] {
    let mut v = [0u32; BITS];
    for (i, slot) in v.iter_mut().enumerate() {
        *slot = 1u32 << (BITS - 1 - i);
    }
    v
}

/// Expand the Joe-Kuo initial direction numbers of dimension `dim`
/// (1-based past the Van der Corput dimension) into the full 32 numbers via
/// the primitive-polynomial recurrence.
fn joe_kuo_directions(dim: Size) -> [u32; BITS] {
    let (degree, poly, initial) = JOE_KUO_TABLE[dim - 1];
    let mut v = [0u32; BITS];
    for (i, &m) in initial.iter().enumerate() {
        v[i] = m << (BITS - 1 - i);
    }
    for i in degree..BITS {
        v[i] = v[i - degree] ^ (v[i - degree] >> degree);
        for k in 1..degree {
            if poly & (1 << (degree - 1 - k)) != 0 {
                v[i] ^= v[i - k];
            }
        }
    }
    v
}

/// Joe-Kuo parameters per dimension: polynomial degree, coefficients of the
/// primitive polynomial over GF(2) (excluding the leading and trailing 1),
/// and the initial direction numbers `m_1..m_s`.
///
/// From: S. Joe and F. Y. Kuo, "Constructing Sobol sequences with better
/// two-dimensional projections", SIAM J. Sci. Comput. 30(5), 2008.
const JOE_KUO_TABLE: &[(usize, u32, &[u32])] = &[
    (1, 0, &[1]),
    (2, 1, &[1, 1]),
    (3, 1, &[1, 1, 1]),
    (3, 2, &[1, 3, 1]),
    (4, 1, &[1, 1, 1, 1]),
    (4, 4, &[1, 3, 3, 1]),
    (5, 2, &[1, 1, 1, 3, 3]),
    (5, 4, &[1, 3, 5, 13, 7]),
    (5, 7, &[1, 1, 5, 5, 15]),
    (5, 11, &[1, 3, 1, 7, 9]),
    (5, 13, &[1, 1, 3, 1, 13]),
    (5, 14, &[1, 1, 7, 13, 25]),
    (6, 1, &[1, 3, 7, 5, 29, 17]),
    (6, 13, &[1, 1, 5, 9, 5, 57]),
    (6, 16, &[1, 3, 1, 13, 25, 49]),
    (6, 19, &[1, 1, 3, 7, 17, 23]),
    (6, 22, &[1, 3, 5, 1, 15, 13]),
    (6, 25, &[1, 1, 1, 15, 7, 61]),
    (7, 1, &[1, 3, 1, 3, 5, 43, 79]),
    (7, 4, &[1, 1, 7, 5, 1, 35, 65]),
    (7, 7, &[1, 3, 3, 9, 31, 47, 3]),
    (7, 8, &[1, 1, 5, 7, 11, 15, 93]),
    (7, 14, &[1, 3, 7, 11, 17, 63, 111]),
    (7, 19, &[1, 1, 3, 3, 19, 37, 53]),
    (7, 21, &[1, 3, 1, 5, 5, 55, 99]),
    (7, 28, &[1, 1, 7, 15, 29, 7, 73]),
    (7, 31, &[1, 3, 5, 3, 29, 23, 83]),
    (7, 32, &[1, 1, 1, 9, 15, 39, 13]),
    (7, 37, &[1, 3, 3, 5, 9, 45, 117]),
    (7, 41, &[1, 1, 5, 13, 7, 25, 91]),
    (7, 42, &[1, 3, 7, 1, 19, 51, 97]),
    (7, 50, &[1, 1, 3, 11, 5, 41, 109]),
    (7, 55, &[1, 3, 1, 7, 27, 11, 63]),
    (7, 56, &[1, 1, 7, 3, 21, 33, 75]),
    (7, 59, &[1, 3, 5, 15, 31, 5, 49]),
    (7, 62, &[1, 1, 1, 1, 23, 57, 15]),
    (8, 14, &[1, 3, 3, 13, 3, 19, 111, 235]),
    (8, 21, &[1, 1, 5, 1, 13, 41, 49, 237]),
    (8, 22, &[1, 3, 7, 7, 17, 27, 91, 157]),
    (8, 38, &[1, 1, 3, 9, 1, 53, 55, 69]),
    (8, 47, &[1, 3, 1, 3, 19, 21, 77, 193]),
    (8, 49, &[1, 1, 7, 11, 31, 17, 113, 43]),
    (8, 50, &[1, 3, 5, 5, 5, 63, 19, 213]),
    (8, 52, &[1, 1, 1, 7, 21, 45, 5, 251]),
    (8, 56, &[1, 3, 3, 3, 27, 29, 97, 7]),
    (8, 67, &[1, 1, 5, 15, 7, 7, 43, 195]),
    (8, 69, &[1, 3, 7, 9, 29, 35, 79, 35]),
    (8, 70, &[1, 1, 3, 5, 15, 59, 23, 59]),
    (8, 84, &[1, 3, 1, 11, 1, 25, 121, 85]),
    (8, 87, &[1, 1, 7, 1, 19, 3, 103, 101]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_bounds_enforced() {
        assert!(SobolRsg::new(0, 0).is_err());
        assert!(SobolRsg::new(MAX_DIMENSION + 1, 0).is_err());
        assert!(SobolRsg::new(MAX_DIMENSION, 0).is_ok());
    }

    #[test]
    fn first_dimension_is_van_der_corput() {
        let mut rsg = SobolRsg::new(1, 0).unwrap();
        assert!((rsg.next_point()[0] - 0.5).abs() < 1e-12);
        // The next two VdC points under Gray-code ordering.
        assert!((rsg.next_point()[0] - 0.75).abs() < 1e-12);
        assert!((rsg.next_point()[0] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn points_stay_in_unit_cube() {
        let mut rsg = SobolRsg::new(8, 0).unwrap();
        for _ in 0..2_000 {
            let p = rsg.next_point();
            assert_eq!(p.len(), 8);
            for &x in &p {
                assert!((0.0..1.0).contains(&x), "coordinate {x} outside [0, 1)");
            }
        }
    }

    #[test]
    fn equidistribution_per_dimension() {
        let mut rsg = SobolRsg::new(5, 0).unwrap();
        let n = 4096;
        let mut sums = [0.0; 5];
        for _ in 0..n {
            for (s, x) in sums.iter_mut().zip(rsg.next_point()) {
                *s += x;
            }
        }
        for (d, s) in sums.iter().enumerate() {
            let mean = s / n as f64;
            assert!((mean - 0.5).abs() < 0.01, "dim {d} mean {mean}");
        }
    }

    #[test]
    fn skip_matches_manual_advance() {
        let mut skipped = SobolRsg::new(3, 100).unwrap();
        let mut stepped = SobolRsg::new(3, 0).unwrap();
        for _ in 0..100 {
            stepped.next_point();
        }
        assert_eq!(skipped.next_point(), stepped.next_point());
    }
}
