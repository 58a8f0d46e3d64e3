//! Exact LU factorization and triangular solve.
//!
//! Factors a square rational matrix in place with row pivoting, then solves
//! `A·x = b` for one or many right-hand-side columns against the shared
//! factorization. Arithmetic is exact, so the first non-zero entry in a
//! column is always an acceptable pivot; there is no numerical-stability
//! pivot selection.

use num_traits::Zero;

use crate::error::SolveError;
use crate::matrix::Matrix;

/// Step-wise row swap history recorded by [`factorize`].
///
/// Entry `i` names the row swapped into position `i` during elimination
/// step `i`. This is not a final permutation: it must be replayed in
/// recorded order on any companion right-hand side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPermutation(Vec<usize>);

impl RowPermutation {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Factor `m` in place into combined unit-lower and upper triangular parts.
///
/// The unit-lower factor's multipliers are stored below the diagonal, the
/// upper factor on and above it. Fails with [`SolveError::NonInvertible`]
/// when some column has no non-zero pivot candidate.
pub fn factorize(m: &mut Matrix) -> Result<RowPermutation, SolveError> {
    let size = m.rows();
    debug_assert_eq!(size, m.cols());

    let mut swaps = vec![0; size];

    for i in 0..size {
        let pivot = (i..size)
            .find(|&row| !m[(row, i)].is_zero())
            .ok_or(SolveError::NonInvertible { column: i })?;

        swaps[i] = pivot;
        m.swap_rows(i, pivot);

        for row in i + 1..size {
            let multiplier = &m[(row, i)] / &m[(i, i)];
            m[(row, i)] = multiplier;
        }

        for row in i + 1..size {
            for col in i + 1..size {
                let delta = &m[(row, i)] * &m[(i, col)];
                m[(row, col)] -= delta;
            }
        }
    }

    Ok(RowPermutation(swaps))
}

/// Solve `m·out = x` in place for every column of `x`, where `m` holds the
/// factors produced by [`factorize`] and `perm` its swap history.
///
/// Calling this with a matrix that was never factored (or failed to factor)
/// is a contract violation; no runtime check is made here.
pub fn solve(x: &mut Matrix, m: &Matrix, perm: &RowPermutation) {
    let size = m.rows();
    debug_assert_eq!(size, m.cols());
    debug_assert_eq!(size, x.rows());
    debug_assert_eq!(size, perm.len());

    // replay the recorded swaps, in order; this is not a single permutation
    for col in 0..x.cols() {
        for row in 0..size {
            x.swap((row, col), (perm.0[row], col));
        }
    }

    // forward-substitute against the unit-lower factor
    for col in 0..x.cols() {
        for row in 0..size {
            for k in 0..row {
                let delta = &m[(row, k)] * &x[(k, col)];
                x[(row, col)] -= delta;
            }
        }
    }

    // back-substitute against the upper factor
    for col in 0..x.cols() {
        for row in (0..size).rev() {
            for k in row + 1..size {
                let delta = &m[(row, k)] * &x[(k, col)];
                x[(row, col)] -= delta;
            }
            x[(row, col)] /= &m[(row, row)];
        }
    }
}
