//! Extract derivatives of functions by evaluating them on dual and hyperdual numbers.
//!
//! The functions passed to these routines should be built from the operations of
//! [NumericalFloatLike](crate::domains::float::NumericalFloatLike) and
//! [Real](crate::domains::float::Real). Writing them generically over `T: Real`
//! allows the same function to be evaluated on plain numbers and differentiated.
//!
//! ```
//! use hyperdual::derivative::{derivative, gradient, nth_derivative};
//! use hyperdual::domains::{dual::Dual, float::{NumericalFloatLike, Real}};
//!
//! fn f<T: Real>(x: T) -> T {
//!     x.pow(3)
//! }
//!
//! assert_eq!(derivative(f, 2.), 12.);
//! assert_eq!(nth_derivative(f, 2., 2), 12.);
//!
//! let g = gradient(|x: &[Dual<f64>]| x[0] * x[0] + x[1] * x[1], &[2., 1.]);
//! assert_eq!(g, vec![4., 2.]);
//! ```

use rayon::prelude::*;

use crate::{
    domains::{dual::Dual, hyperdual::Hyperdual, AlgebraError},
    solve::System,
    tensors::matrix::Matrix,
};

/// Compute the first derivative of `f` at `x`.
pub fn derivative<F>(f: F, x: f64) -> f64
where
    F: Fn(Dual<f64>) -> Dual<f64>,
{
    f(Dual::variable(x)).im
}

/// Compute the `n`-th derivative of `f` at `x`.
pub fn nth_derivative<F>(f: F, x: f64, n: usize) -> f64
where
    F: Fn(Hyperdual<f64>) -> Hyperdual<f64>,
{
    let r = f(Hyperdual::variable(x, n + 1));
    r.values().get(n).copied().unwrap_or(0.)
}

/// Compute the derivatives of order `0` up to and including `n` of `f` at `x`.
///
/// These are the Taylor coefficients of `f` around `x`, multiplied by the factorial of their order.
pub fn derivatives<F>(f: F, x: f64, n: usize) -> Vec<f64>
where
    F: Fn(Hyperdual<f64>) -> Hyperdual<f64>,
{
    let r = f(Hyperdual::variable(x, n + 1));
    (0..=n)
        .map(|i| r.values().get(i).copied().unwrap_or(0.))
        .collect()
}

/// Create dual constants for all `inputs`, with the one at `index` seeded as a variable.
fn seed(inputs: &[f64], index: usize) -> Vec<Dual<f64>> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, x)| {
            if i == index {
                Dual::variable(*x)
            } else {
                Dual::constant(*x)
            }
        })
        .collect()
}

/// Compute the partial derivative of `f` with respect to input `index` at `inputs`.
pub fn partial_derivative<F>(f: F, inputs: &[f64], index: usize) -> Result<f64, AlgebraError>
where
    F: Fn(&[Dual<f64>]) -> Dual<f64>,
{
    if index >= inputs.len() {
        return Err(AlgebraError::IndexOutOfBounds {
            index,
            dim: inputs.len(),
        });
    }

    Ok(f(&seed(inputs, index)).im)
}

/// Compute the gradient of `f` at `inputs`, one partial derivative per input.
///
/// For a function of a single variable, use [derivative].
pub fn gradient<F>(f: F, inputs: &[f64]) -> Vec<f64>
where
    F: Fn(&[Dual<f64>]) -> Dual<f64>,
{
    (0..inputs.len())
        .map(|i| f(&seed(inputs, i)).im)
        .collect()
}

/// Compute the gradient of `f` at `inputs`, evaluating the partial derivatives in parallel.
pub fn par_gradient<F>(f: F, inputs: &[f64]) -> Vec<f64>
where
    F: Fn(&[Dual<f64>]) -> Dual<f64> + Sync,
{
    (0..inputs.len())
        .into_par_iter()
        .map(|i| f(&seed(inputs, i)).im)
        .collect()
}

/// Compute the derivative of `f` at `inputs` in the direction `direction`, which
/// is normalized first. Without a direction, the rate of steepest ascent, i.e. the
/// magnitude of the gradient, is returned.
pub fn directional_derivative<F>(
    f: F,
    inputs: &[f64],
    direction: Option<&[f64]>,
) -> Result<f64, AlgebraError>
where
    F: Fn(&[Dual<f64>]) -> Dual<f64>,
{
    let grad = gradient(f, inputs);

    let Some(direction) = direction else {
        return Ok(grad.iter().map(|g| g * g).sum::<f64>().sqrt());
    };

    if direction.len() != inputs.len() {
        return Err(AlgebraError::DimensionMismatch {
            expected: inputs.len(),
            found: direction.len(),
        });
    }

    let norm = direction.iter().map(|d| d * d).sum::<f64>().sqrt();
    let dot = grad.iter().zip(direction).map(|(g, d)| g * d).sum::<f64>();
    if norm == 0. {
        return Err(AlgebraError::DivisionByZero);
    }

    Ok(dot / norm)
}

/// Evaluate `system` at `point`.
pub fn evaluate<S: System>(system: &S, point: &[f64]) -> Result<Vec<f64>, AlgebraError> {
    check_dim(system, point)?;
    Ok(system.evaluate(point))
}

/// Compute the Jacobian of `system` at `point`. Row `i` is the gradient of the `i`-th
/// component of the system.
pub fn jacobian<S: System>(system: &S, point: &[f64]) -> Result<Matrix, AlgebraError> {
    check_dim(system, point)?;

    let n = point.len();
    let mut columns = Vec::with_capacity(n);
    for j in 0..n {
        let r = system.evaluate(&seed(point, j));
        columns.push(r);
    }

    let m = columns.first().map(|c| c.len()).unwrap_or(0);
    let mut jac = Matrix::new(m as u32, n as u32);
    for (j, c) in columns.iter().enumerate() {
        for (i, v) in c.iter().enumerate() {
            jac[(i as u32, j as u32)] = v.im;
        }
    }

    Ok(jac)
}

fn check_dim<S: System>(system: &S, point: &[f64]) -> Result<(), AlgebraError> {
    if point.len() != system.dim() {
        Err(AlgebraError::DimensionMismatch {
            expected: system.dim(),
            found: point.len(),
        })
    } else {
        Ok(())
    }
}
