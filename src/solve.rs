//! Find roots of systems of equations with Newton's method, using
//! Jacobians computed with dual numbers.
//!
//! ```
//! use hyperdual::domains::float::Real;
//! use hyperdual::solve::{newton, NewtonConfig, System};
//!
//! struct Sqrt2;
//!
//! impl System for Sqrt2 {
//!     fn dim(&self) -> usize {
//!         1
//!     }
//!
//!     fn evaluate<T: Real>(&self, x: &[T]) -> Vec<T> {
//!         vec![x[0].clone() * &x[0] - 2.]
//!     }
//! }
//!
//! let r = newton(&Sqrt2, &[1.], &NewtonConfig::default()).unwrap();
//! assert!((r[0] - 2f64.sqrt()).abs() < 1e-12);
//! ```

use std::fmt::Display;

use tracing::debug;

use crate::{
    derivative::{evaluate, jacobian},
    domains::{
        dual::Dual,
        float::{NumericalFloatLike, Real},
        AlgebraError,
    },
    tensors::matrix::MatrixError,
};

/// A system of equations `F(x) = 0`, with as many equations as variables.
///
/// The system is generic over the number type, so that it can be evaluated
/// on plain numbers and on dual numbers to obtain its Jacobian.
pub trait System {
    /// The number of variables.
    fn dim(&self) -> usize;
    /// Evaluate every equation of the system at `x`.
    fn evaluate<T: Real>(&self, x: &[T]) -> Vec<T>;
}

/// Settings for Newton's method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewtonConfig {
    /// The number of iterations that are performed.
    pub iterations: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self { iterations: 50 }
    }
}

/// Errors that can occur when solving equations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverError {
    ShapeMismatch { expected: usize, found: usize },
    Algebra(AlgebraError),
    Matrix(MatrixError),
}

impl Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::ShapeMismatch { expected, found } => {
                write!(f, "Expected {} values, found {}", expected, found)
            }
            SolverError::Algebra(e) => write!(f, "Algebra error: {}", e),
            SolverError::Matrix(e) => write!(f, "Matrix error: {}", e),
        }
    }
}

impl std::error::Error for SolverError {}

impl From<AlgebraError> for SolverError {
    fn from(e: AlgebraError) -> Self {
        match e {
            AlgebraError::DimensionMismatch { expected, found } => {
                SolverError::ShapeMismatch { expected, found }
            }
            e => SolverError::Algebra(e),
        }
    }
}

impl From<MatrixError> for SolverError {
    fn from(e: MatrixError) -> Self {
        SolverError::Matrix(e)
    }
}

/// Find a root of `system` with Newton's method, starting from `guess`.
///
/// Every iteration solves `J(x) d = F(x)` and updates `x` to `x - d`.
/// Exactly `config.iterations` iterations are performed.
pub fn newton<S: System>(
    system: &S,
    guess: &[f64],
    config: &NewtonConfig,
) -> Result<Vec<f64>, SolverError> {
    if guess.len() != system.dim() {
        return Err(SolverError::ShapeMismatch {
            expected: system.dim(),
            found: guess.len(),
        });
    }

    let mut x = guess.to_vec();
    for i in 0..config.iterations {
        let jac = jacobian(system, &x)?;
        let f = evaluate(system, &x)?;
        let delta = jac.solve(&f)?;

        for (xi, di) in x.iter_mut().zip(&delta) {
            *xi -= di;
        }

        debug!("Newton iteration {}: {:?}", i, x);
    }

    Ok(x)
}

/// Find a root of the function `f` of a single variable with Newton's method,
/// starting from `guess`.
pub fn newton_scalar<F>(f: F, guess: f64, config: &NewtonConfig) -> Result<f64, SolverError>
where
    F: Fn(Dual<f64>) -> Dual<f64>,
{
    let mut x = guess;
    for i in 0..config.iterations {
        let r = f(Dual::variable(x));
        x -= r.re.try_div(&r.im)?;
        debug!("Newton iteration {}: {}", i, x);
    }

    Ok(x)
}

#[cfg(test)]
mod test {
    use super::{newton, newton_scalar, NewtonConfig, SolverError, System};
    use crate::{
        domains::{
            float::{NumericalFloatLike, Real},
            AlgebraError,
        },
        tensors::matrix::MatrixError,
    };

    struct Square(f64);

    impl System for Square {
        fn dim(&self) -> usize {
            1
        }

        fn evaluate<T: Real>(&self, x: &[T]) -> Vec<T> {
            vec![x[0].clone() * &x[0] - self.0]
        }
    }

    /// The intersection of the circle `x^2 + y^2 = 4` and the line `y = x`.
    struct CircleLine;

    impl System for CircleLine {
        fn dim(&self) -> usize {
            2
        }

        fn evaluate<T: Real>(&self, x: &[T]) -> Vec<T> {
            vec![
                x[0].clone() * &x[0] + x[1].clone() * &x[1] - 4.,
                x[1].clone() - &x[0],
            ]
        }
    }

    #[test]
    fn sqrt2() {
        let r = newton(&Square(2.), &[1.], &NewtonConfig::default()).unwrap();
        assert!((r[0] - 2f64.sqrt()).abs() < 1e-12);

        let r = newton_scalar(|x| x * x - 2., 1., &NewtonConfig::default()).unwrap();
        assert!((r - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn intersection() {
        let r = newton(&CircleLine, &[1., 0.5], &NewtonConfig::default()).unwrap();
        assert!((r[0] - 2f64.sqrt()).abs() < 1e-12);
        assert!((r[1] - 2f64.sqrt()).abs() < 1e-12);

        let r = newton(&CircleLine, &[-3., -1.], &NewtonConfig::default()).unwrap();
        assert!((r[0] + 2f64.sqrt()).abs() < 1e-12);
        assert!((r[1] + 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn transcendental() {
        // x = cos(x)
        let r = newton_scalar(|x| x - x.cos(), 1., &NewtonConfig::default()).unwrap();
        assert!((r - r.cos()).abs() < 1e-14);
    }

    #[test]
    fn iteration_count() {
        let config = NewtonConfig { iterations: 1 };
        assert_eq!(newton(&Square(2.), &[1.], &config), Ok(vec![1.5]));

        let config = NewtonConfig { iterations: 0 };
        assert_eq!(newton(&Square(2.), &[1.], &config), Ok(vec![1.]));
    }

    #[test]
    fn failures() {
        assert_eq!(
            newton(&Square(2.), &[0.], &NewtonConfig::default()),
            Err(SolverError::Matrix(MatrixError::Singular))
        );
        assert_eq!(
            newton(&CircleLine, &[1.], &NewtonConfig::default()),
            Err(SolverError::ShapeMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            newton_scalar(|x| x.pow(2) + 1., 0., &NewtonConfig::default()),
            Err(SolverError::Algebra(AlgebraError::DivisionByZero))
        );
    }
}
