//! Exact two-phase simplex over a dictionary tableau.
//!
//! The tableau is built per call from a caller-supplied fragment: one
//! objective row, one box-constraint row per variable, and one trailing
//! equality row per coordinate the search has already fixed. Phase 1
//! drives the artificial variables attached to those trailing rows to
//! zero; phase 2 optimizes the caller's objective over what remains.
//!
//! Variable indices: `0..size` structural, `size..2*size` box slacks,
//! `>= 2*size` branch artificials. Infeasibility and unboundedness are
//! impossible for a finite box with bounds derived from feasible
//! ancestors; both abort the process as invariant violations.

use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::matrix::Matrix;

/// Constraint rows start here; rows 0 and 1 are the phase objectives.
const CONSTRAINT_BASE: usize = 2;

struct Tableau {
    m: Matrix,
    basic: Vec<usize>,
    nonbasic: Vec<usize>,
    size: usize,
    depth: usize,
}

impl Tableau {
    fn new(fragment: &Matrix, size: usize, depth: usize) -> Self {
        let rows = 2 + size + depth;
        let mut m = Matrix::zeros(rows, size + 1);

        for row in 1..rows {
            for col in 0..=size {
                m[(row, col)] = fragment[(row - 1, col)].clone();
            }
        }

        // phase-1 objective: the sum of the branch-constraint rows
        for row in 2 + size..rows {
            for col in 0..=size {
                let term = m[(row, col)].clone();
                m[(0, col)] += term;
            }
        }

        Self {
            m,
            basic: (size..2 * size + depth).collect(),
            nonbasic: (0..size).collect(),
            size,
            depth,
        }
    }

    fn constraints(&self) -> usize {
        self.size + self.depth
    }

    /// Dictionary pivot: normalize the exiting row, eliminate the entering
    /// column elsewhere, and install the leaving variable's column in its
    /// place. Only rows `first_row..` and columns `0..=width` participate;
    /// `width` is also the right-hand-side column for the current phase.
    fn pivot(&mut self, first_row: usize, width: usize, entering: usize, exiting: usize) {
        let pivot_row = CONSTRAINT_BASE + exiting;
        let pivot = self.m[(pivot_row, entering)].clone();

        for col in 0..=width {
            if col == entering {
                continue;
            }
            self.m[(pivot_row, col)] /= &pivot;
        }

        for row in first_row..self.m.rows() {
            if row == pivot_row {
                continue;
            }
            for col in 0..=width {
                if col == entering {
                    continue;
                }
                let delta = &self.m[(row, entering)] * &self.m[(pivot_row, col)];
                self.m[(row, col)] -= delta;
            }
            let replaced = -(&self.m[(row, entering)] / &pivot);
            self.m[(row, entering)] = replaced;
        }

        self.m[(pivot_row, entering)] = pivot.recip();

        std::mem::swap(&mut self.nonbasic[entering], &mut self.basic[exiting]);
    }

    /// One pivot step for the objective in `objective_row` over columns
    /// `0..width`. Returns `true` once no improving column remains.
    fn step(&mut self, objective_row: usize, width: usize) -> bool {
        let rhs = width;

        // a zero right-hand side anywhere means a degenerate vertex;
        // Bland's rule (first eligible column) guarantees termination
        let bland = (0..self.constraints())
            .any(|row| self.m[(CONSTRAINT_BASE + row, rhs)].is_zero());

        let mut entering = None;
        for col in 0..width {
            let coeff = &self.m[(objective_row, col)];
            if coeff.is_positive()
                && entering.map_or(true, |e: usize| coeff > &self.m[(objective_row, e)])
            {
                entering = Some(col);
                if bland {
                    break;
                }
            }
        }
        let Some(entering) = entering else {
            return true;
        };

        let mut exiting = None;
        let mut best: Option<BigRational> = None;
        for row in 0..self.constraints() {
            let coeff = &self.m[(CONSTRAINT_BASE + row, entering)];
            if coeff.is_positive() {
                let ratio = &self.m[(CONSTRAINT_BASE + row, rhs)] / coeff;
                if best.as_ref().map_or(true, |b| ratio < *b) {
                    best = Some(ratio);
                    exiting = Some(row);
                }
            }
        }
        let exiting =
            exiting.expect("simplex: no exiting row for entering column (unbounded region)");

        self.pivot(objective_row, width, entering, exiting);
        false
    }
}

/// Optimize the fragment's objective row over the box plus the `depth`
/// accumulated branch constraints, writing the optimal structural point
/// into `x`. Fragment layout: row 0 objective, rows `1..=size` box rows,
/// rows `1+size..1+size+depth` branch rows, column `size` right-hand side.
pub fn optimize(x: &mut [BigRational], fragment: &Matrix, size: usize, depth: usize) {
    debug_assert_eq!(x.len(), size);

    let mut t = Tableau::new(fragment, size, depth);

    // phase 1: drive the artificial objective down to zero
    while !t.step(0, size) {}

    // any branch artificial still basic must already sit at zero; pivot it
    // out against a structural column where one exists
    for row in 0..t.constraints() {
        if t.basic[row] >= 2 * size {
            assert!(
                t.m[(CONSTRAINT_BASE + row, size)].is_zero(),
                "simplex: branch constraints are infeasible"
            );
            for col in 0..size {
                if t.nonbasic[col] < 2 * size && !t.m[(CONSTRAINT_BASE + row, col)].is_zero() {
                    t.pivot(0, size, col, row);
                    break;
                }
            }
        }
    }

    // move structural columns into the leading positions so the phase-2
    // objective ranges over a contiguous prefix
    if size > depth {
        let mut donor = size - 1;
        for col in 0..size - depth {
            if t.nonbasic[col] >= 2 * size {
                while t.nonbasic[donor] >= 2 * size {
                    donor -= 1;
                }
                t.m.swap_cols(col, donor);
                t.nonbasic.swap(col, donor);
            }
        }
    }

    // install the caller's objective by exchanging the right-hand-side
    // column into the reduced range
    t.m.swap_cols(size - depth, size);

    // phase 2
    while !t.step(1, size - depth) {}

    for value in x.iter_mut() {
        *value = BigRational::zero();
    }
    for row in 0..t.constraints() {
        if t.basic[row] < size {
            x[t.basic[row]] = t.m[(CONSTRAINT_BASE + row, size - depth)].clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn rat(n: i64) -> BigRational {
        BigRational::from_integer(n.into())
    }

    /// Fragment with the given objective row, box bounds `z_i <= bound_i`,
    /// and branch rows appended verbatim.
    fn fragment(objective: &[i64], bounds: &[i64], branch: &[(&[i64], i64)]) -> Matrix {
        let size = objective.len();
        let mut m = Matrix::zeros(1 + size + branch.len(), size + 1);
        for (col, &c) in objective.iter().enumerate() {
            m[(0, col)] = rat(c);
        }
        for (i, &b) in bounds.iter().enumerate() {
            m[(1 + i, i)] = BigRational::one();
            m[(1 + i, size)] = rat(b);
        }
        for (j, (coeffs, rhs)) in branch.iter().enumerate() {
            for (col, &c) in coeffs.iter().enumerate() {
                m[(1 + size + j, col)] = rat(c);
            }
            m[(1 + size + j, size)] = rat(*rhs);
        }
        m
    }

    #[test]
    fn maximizes_over_a_plain_box() {
        // maximize x + y subject to x <= 2, y <= 3, x, y >= 0
        let f = fragment(&[1, 1], &[2, 3], &[]);
        let mut x = vec![BigRational::zero(); 2];

        optimize(&mut x, &f, 2, 0);

        assert_eq!(x, vec![rat(2), rat(3)]);
        assert_eq!(&x[0] + &x[1], rat(5));
    }

    #[test]
    fn negated_objective_minimizes() {
        // maximizing -x - y pins the point to the origin
        let f = fragment(&[-1, -1], &[2, 3], &[]);
        let mut x = vec![BigRational::zero(); 2];

        optimize(&mut x, &f, 2, 0);

        assert_eq!(x, vec![rat(0), rat(0)]);
    }

    #[test]
    fn branch_constraint_fixes_a_coordinate() {
        // maximize y with x fixed to 1 by a branch equality
        let f = fragment(&[0, 1], &[2, 3], &[(&[1, 0], 1)]);
        let mut x = vec![BigRational::zero(); 2];

        optimize(&mut x, &f, 2, 1);

        assert_eq!(x, vec![rat(1), rat(3)]);
    }

    #[test]
    fn degenerate_vertex_still_terminates() {
        // x's bound is zero, so the starting vertex is degenerate and the
        // Bland fallback is exercised from the first step
        let f = fragment(&[1, 1], &[0, 3], &[]);
        let mut x = vec![BigRational::zero(); 2];

        optimize(&mut x, &f, 2, 0);

        assert_eq!(x, vec![rat(0), rat(3)]);
    }

    #[test]
    fn fully_constrained_problem_reports_the_fixed_point() {
        // both coordinates fixed; nothing left to optimize
        let f = fragment(&[0, 0], &[2, 3], &[(&[1, 0], 1), (&[0, 1], 2)]);
        let mut x = vec![BigRational::zero(); 2];

        optimize(&mut x, &f, 2, 2);

        assert_eq!(x, vec![rat(1), rat(2)]);
    }

    #[test]
    fn rational_bounds_are_honored_exactly() {
        // maximize x subject to x <= 7/3
        let size = 1;
        let mut f = Matrix::zeros(2, 2);
        f[(0, 0)] = rat(1);
        f[(1, 0)] = BigRational::one();
        f[(1, 1)] = BigRational::new(7.into(), 3.into());
        let mut x = vec![BigRational::zero(); size];

        optimize(&mut x, &f, size, 0);

        assert_eq!(x[0], BigRational::new(7.into(), 3.into()));
    }
}
