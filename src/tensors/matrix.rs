use std::{
    fmt::Display,
    ops::{Index, IndexMut},
};

use crate::domains::float::ZERO_TOLERANCE;

/// A dense matrix of `f64` values, stored in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    pub(crate) data: Vec<f64>,
    pub(crate) nrows: u32,
    pub(crate) ncols: u32,
}

impl Matrix {
    /// Create a new zeroed matrix with `nrows` rows and `ncols` columns.
    pub fn new(nrows: u32, ncols: u32) -> Matrix {
        Matrix {
            data: vec![0.; nrows as usize * ncols as usize],
            nrows,
            ncols,
        }
    }

    /// Create a new square matrix with `nrows` rows and ones on the main diagonal and zeroes elsewhere.
    pub fn identity(nrows: u32) -> Matrix {
        let mut m = Matrix::new(nrows, nrows);
        for i in 0..nrows {
            m[(i, i)] = 1.;
        }
        m
    }

    /// Create a new matrix from a 2-dimensional vector of rows.
    pub fn from_nested_vec(matrix: Vec<Vec<f64>>) -> Result<Matrix, MatrixError> {
        let mut data = vec![];

        let cols = matrix.first().map(|r| r.len()).unwrap_or(0);

        for d in matrix {
            if d.len() != cols {
                return Err(MatrixError::ShapeMismatch);
            }

            data.extend(d);
        }

        Ok(Matrix {
            nrows: (data.len() / cols.max(1)) as u32,
            ncols: cols as u32,
            data,
        })
    }

    /// Create a new matrix from a list of scalars in row-major order.
    pub fn from_linear(data: Vec<f64>, nrows: u32, ncols: u32) -> Result<Matrix, MatrixError> {
        if data.len() == (nrows * ncols) as usize {
            Ok(Matrix { data, nrows, ncols })
        } else {
            Err(MatrixError::ShapeMismatch)
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows as usize
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols as usize
    }

    /// Return an iterator over the rows of the matrix.
    pub fn row_iter(&self) -> std::slice::Chunks<'_, f64> {
        self.data.chunks(self.ncols.max(1) as usize)
    }

    /// Multiply the matrix by the vector `v`.
    pub fn mul_vec(&self, v: &[f64]) -> Result<Vec<f64>, MatrixError> {
        if v.len() != self.ncols() {
            return Err(MatrixError::ShapeMismatch);
        }

        Ok(self
            .row_iter()
            .map(|r| r.iter().zip(v).map(|(a, b)| a * b).sum::<f64>())
            .collect())
    }

    /// Solve `A * x = b` for `x`, where `A` is `self`, using Gaussian elimination
    /// with partial pivoting.
    ///
    /// A pivot whose magnitude is below [`ZERO_TOLERANCE`] (relative to the largest
    /// entry of the matrix) makes the matrix singular.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>, MatrixError> {
        if self.nrows != self.ncols {
            return Err(MatrixError::NotSquare);
        }
        if self.nrows() != b.len() {
            return Err(MatrixError::ShapeMismatch);
        }

        let n = self.nrows;
        let scale = self.data.iter().fold(0f64, |m, x| m.max(x.abs())).max(1.);

        // create the augmented matrix
        let mut m = Matrix::new(n, n + 1);
        for r in 0..n {
            for c in 0..n {
                m[(r, c)] = self[(r, c)];
            }
            m[(r, n)] = b[r as usize];
        }

        for j in 0..n {
            // select the largest pivot
            let mut p = j;
            for k in j + 1..n {
                if m[(k, j)].abs() > m[(p, j)].abs() {
                    p = k;
                }
            }

            if m[(p, j)].abs() <= ZERO_TOLERANCE * scale {
                return Err(MatrixError::Singular);
            }

            if p != j {
                for l in j..n + 1 {
                    m.data
                        .swap((m.ncols * j + l) as usize, (m.ncols * p + l) as usize);
                }
            }

            let inv_x = 1. / m[(j, j)];
            for k in j + 1..n {
                let s = m[(k, j)] * inv_x;
                if s != 0. {
                    m[(k, j)] = 0.;
                    for l in j + 1..n + 1 {
                        let e = m[(j, l)];
                        m[(k, l)] -= s * e;
                    }
                }
            }
        }

        // back substitution
        let mut x = vec![0.; n as usize];
        for i in (0..n).rev() {
            let mut e = m[(i, n)];
            for k in i + 1..n {
                e -= m[(i, k)] * x[k as usize];
            }
            x[i as usize] = e / m[(i, i)];
        }

        Ok(x)
    }
}

impl Index<(u32, u32)> for Matrix {
    type Output = f64;

    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index(&self, index: (u32, u32)) -> &Self::Output {
        &self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl IndexMut<(u32, u32)> for Matrix {
    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index_mut(&mut self, index: (u32, u32)) -> &mut f64 {
        &mut self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (ri, r) in self.row_iter().enumerate() {
            f.write_str("{")?;
            for (ci, c) in r.iter().enumerate() {
                Display::fmt(c, f)?;
                if ci + 1 < r.len() {
                    f.write_str(",")?;
                }
            }
            f.write_str("}")?;
            if ri + 1 < self.nrows() {
                f.write_str(",")?;
            }
        }
        f.write_str("}")
    }
}

/// Errors that can occur when performing matrix operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixError {
    NotSquare,
    Singular,
    ShapeMismatch,
}

impl Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::NotSquare => write!(f, "The matrix is not square"),
            MatrixError::Singular => write!(f, "The matrix is singular"),
            MatrixError::ShapeMismatch => write!(f, "The shape of the matrix is not compatible"),
        }
    }
}

impl std::error::Error for MatrixError {}

#[cfg(test)]
mod test {
    use super::{Matrix, MatrixError};

    #[test]
    fn solve() {
        let a = Matrix::from_linear(vec![1., 2., 3., 4., 5., 16., 7., 8., 9.], 3, 3).unwrap();
        let r = a.solve(&[1., 2., 3.]).unwrap();

        let expected = [-1. / 3., 2. / 3., 0.];
        for (x, y) in r.iter().zip(&expected) {
            assert!((x - y).abs() < 1e-12);
        }

        let b = a.mul_vec(&r).unwrap();
        for (x, y) in b.iter().zip(&[1., 2., 3.]) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn solve_needs_pivoting() {
        let a = Matrix::from_nested_vec(vec![vec![0., 1.], vec![1., 0.]]).unwrap();
        assert_eq!(a.solve(&[2., 3.]), Ok(vec![3., 2.]));
    }

    #[test]
    fn singular() {
        let a = Matrix::from_nested_vec(vec![vec![1., 2.], vec![2., 4.]]).unwrap();
        assert_eq!(a.solve(&[1., 1.]), Err(MatrixError::Singular));
    }

    #[test]
    fn shapes() {
        let a = Matrix::new(2, 3);
        assert_eq!(a.solve(&[1., 1.]), Err(MatrixError::NotSquare));
        assert_eq!(
            Matrix::identity(2).solve(&[1.]),
            Err(MatrixError::ShapeMismatch)
        );
        assert_eq!(
            Matrix::from_linear(vec![1.], 2, 2),
            Err(MatrixError::ShapeMismatch)
        );
        assert_eq!(
            Matrix::from_nested_vec(vec![vec![1., 2.], vec![1.]]),
            Err(MatrixError::ShapeMismatch)
        );
    }

    #[test]
    fn display() {
        let a = Matrix::from_nested_vec(vec![vec![1., 2.], vec![3.5, 4.]]).unwrap();
        assert_eq!(a.to_string(), "{{1,2},{3.5,4}}");
    }
}
