//! Dense rational matrix primitive.
//!
//! Row-major storage over exact rationals. The shape is fixed at
//! construction; there is no resize API, so borrows handed out by the
//! accessors can never be invalidated by a reallocation.

use std::ops::{Index, IndexMut};

use num_rational::BigRational;
use num_traits::{One, Zero};

/// Dense matrix of exact rationals in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    data: Vec<BigRational>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![BigRational::zero(); rows * cols],
            rows,
            cols,
        }
    }

    /// Create an identity matrix.
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size, size);
        for i in 0..size {
            m[(i, i)] = BigRational::one();
        }
        m
    }

    /// Create a matrix from nested rows. All rows must have equal length.
    pub fn from_rows(rows: Vec<Vec<BigRational>>) -> Self {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);
        assert!(rows.iter().all(|row| row.len() == col_count));

        Self {
            data: rows.into_iter().flatten().collect(),
            rows: row_count,
            cols: col_count,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Borrow row `i` as a slice.
    pub fn row(&self, i: usize) -> &[BigRational] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Swap two rows across the full width.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.cols {
            self.data.swap(a * self.cols + col, b * self.cols + col);
        }
    }

    /// Swap two columns across the full height.
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for row in 0..self.rows {
            self.data.swap(row * self.cols + a, row * self.cols + b);
        }
    }

    /// Swap two entries.
    pub fn swap(&mut self, a: (usize, usize), b: (usize, usize)) {
        self.data
            .swap(a.0 * self.cols + a.1, b.0 * self.cols + b.1);
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = BigRational;

    fn index(&self, (row, col): (usize, usize)) -> &BigRational {
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut BigRational {
        &mut self.data[row * self.cols + col]
    }
}
