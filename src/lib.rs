//! Hyperdual is a library for forward-mode automatic differentiation.
//!
//! Functions are differentiated by evaluating them on numbers that carry derivatives:
//! [dual numbers](domains::dual::Dual) for first derivatives and gradients, and
//! [hyperdual numbers](domains::hyperdual::Hyperdual) for derivatives of any order.
//! On top of these, it can find roots of systems of equations and compute
//! series solutions of linear ordinary differential equations.
//!
//! For example:
//!
//! ```
//! use hyperdual::derivative::{derivative, derivatives};
//! use hyperdual::domains::float::{NumericalFloatLike, Real};
//!
//! fn f<T: Real>(x: T) -> T {
//!     x.pow(2) * x.sin()
//! }
//!
//! fn main() {
//!     println!("f'(1) = {}", derivative(f, 1.));
//!     println!("f(1), f'(1), f''(1), f'''(1) = {:?}", derivatives(f, 1., 3));
//! }
//! ```
//!
//! Functions should be written generically over [Real](domains::float::Real), so that they
//! accept plain numbers as well as all number types that carry derivatives.

pub mod combinatorics;
pub mod derivative;
pub mod domains;
pub mod series;
pub mod solve;
pub mod tensors;

#[cfg(test)]
mod testing;

pub use domains::AlgebraError;
pub use solve::SolverError;
pub use tensors::matrix::MatrixError;
