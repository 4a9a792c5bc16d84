//! Number types that carry derivatives.
//!
//! - [Dual](dual::Dual) numbers `a + bε` with `ε² = 0` track a value and its first derivative.
//! - [Hyperdual](hyperdual::Hyperdual) numbers are truncated power series in a single
//!   infinitesimal and track a value and all its derivatives up to a chosen order.
//! - [Complex](float::Complex) numbers are used as hyperdual coefficients to evaluate
//!   sines and cosines through `exp(i*x)`.
//!
//! All number types implement [NumericalFloatLike](float::NumericalFloatLike) and
//! [Real](float::Real), so that a function written once can be evaluated on any of them.
pub mod dual;
pub mod float;
pub mod hyperdual;

use std::fmt::{Display, Formatter};

/// Errors that can occur when performing arithmetic on dual and hyperdual numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgebraError {
    /// The divisor has a (numerically) vanishing real part and the
    /// quotient cannot be resolved by reducing the order.
    DivisionByZero,
    IndexOutOfBounds {
        index: usize,
        dim: usize,
    },
    DimensionMismatch {
        expected: usize,
        found: usize,
    },
}

impl Display for AlgebraError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgebraError::DivisionByZero => write!(f, "Division by zero"),
            AlgebraError::IndexOutOfBounds { index, dim } => write!(
                f,
                "Index {} is out of bounds for a number of dimension {}",
                index, dim
            ),
            AlgebraError::DimensionMismatch { expected, found } => write!(
                f,
                "Dimension mismatch: expected {} components, found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for AlgebraError {}
